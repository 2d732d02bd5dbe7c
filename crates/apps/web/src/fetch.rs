use catalog::{CatalogError, CatalogSource, Endpoints};
use gloo_net::http::Request;

/// GETs `url` and returns the body as text, treating non-2xx as an error.
pub async fn fetch_text(url: &str) -> Result<String, CatalogError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| CatalogError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(CatalogError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    resp.text()
        .await
        .map_err(|e| CatalogError::Malformed(e.to_string()))
}

/// Catalog payloads straight from the content service.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    endpoints: Endpoints,
}

impl HttpCatalogSource {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }
}

impl CatalogSource for HttpCatalogSource {
    async fn fetch_books(&self) -> Result<String, CatalogError> {
        fetch_text(&self.endpoints.books_url()).await
    }

    async fn fetch_volumes(&self) -> Result<String, CatalogError> {
        fetch_text(&self.endpoints.volumes_url()).await
    }
}
