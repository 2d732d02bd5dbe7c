pub mod endpoints;
pub mod loader;
pub mod model;

pub use endpoints::*;
pub use loader::*;
pub use model::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The request never produced a response.
    Network(String),
    /// The service answered with a non-success status.
    Status { url: String, status: u16 },
    /// The response body was not the expected JSON.
    Malformed(String),
    /// The payloads parsed but do not describe a consistent catalog.
    Corrupt(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Network(msg) => write!(f, "catalog request failed: {msg}"),
            CatalogError::Status { url, status } => {
                write!(f, "catalog request to {url} returned HTTP {status}")
            }
            CatalogError::Malformed(msg) => write!(f, "catalog payload malformed: {msg}"),
            CatalogError::Corrupt(msg) => write!(f, "catalog inconsistent: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}
