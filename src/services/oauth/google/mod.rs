pub mod client;
pub mod errors;
#[cfg(test)]
pub mod mock_google_oauth;
pub mod service;
