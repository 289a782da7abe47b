// padron-api: Async REST client for the persona directory endpoint.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::PersonaClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::Persona;
