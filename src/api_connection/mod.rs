pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, GeminiClient, ModelClient};
pub use endpoints::GenerationOptions;
