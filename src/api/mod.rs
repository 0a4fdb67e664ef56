pub mod client;
pub mod models;

pub use client::ConversionClient;
pub use models::ClientConfig;
