pub mod oauth;
pub mod video;
