pub mod oauth;
pub mod youtube;
