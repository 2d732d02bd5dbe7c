//! Native inspection of the scripture catalog and chapter geotags.

use catalog::{BookId, Catalog, CatalogError, CatalogSource, Endpoints, VolumeId};
use foundation::GeoPlace;
use layers::{MapConfig, Viewport, plan_viewport};
use navigation::{NavAction, Route, Router, next_chapter, previous_chapter};
use serde::Serialize;
use tracing::debug;

/// Catalog and chapter payloads fetched with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpSource {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoints,
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, CatalogError> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.text()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }
}

impl CatalogSource for HttpSource {
    async fn fetch_books(&self) -> Result<String, CatalogError> {
        self.fetch_text(&self.endpoints.books_url()).await
    }

    async fn fetch_volumes(&self) -> Result<String, CatalogError> {
        self.fetch_text(&self.endpoints.volumes_url()).await
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeRow {
    pub id: VolumeId,
    pub name: String,
    pub min_book_id: BookId,
    pub max_book_id: BookId,
    pub books: usize,
}

pub fn volume_rows(catalog: &Catalog) -> Vec<VolumeRow> {
    catalog
        .volumes()
        .iter()
        .map(|v| VolumeRow {
            id: v.id,
            name: v.full_name.clone(),
            min_book_id: v.min_book_id,
            max_book_id: v.max_book_id,
            books: v.books.len(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub route: String,
    /// Canonical hash for the resolved route.
    pub hash: String,
    pub breadcrumbs: String,
    /// Grid markup; absent for chapter routes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_url: Option<String>,
}

pub fn route_report(catalog: &Catalog, endpoints: &Endpoints, hash: &str) -> RouteReport {
    let route = Route::parse(hash, catalog).resolve(catalog);
    match Router::new().navigate(catalog, hash) {
        NavAction::ShowNavigation {
            markup,
            breadcrumbs,
            ..
        } => RouteReport {
            route: format!("{route:?}"),
            hash: route.to_hash(catalog),
            breadcrumbs,
            markup: Some(markup),
            chapter_url: None,
        },
        NavAction::FetchChapter(request) => RouteReport {
            route: format!("{route:?}"),
            hash: route.to_hash(catalog),
            breadcrumbs: request.breadcrumbs.clone(),
            markup: None,
            chapter_url: Some(request.url(endpoints)),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceRow {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl From<&GeoPlace> for PlaceRow {
    fn from(place: &GeoPlace) -> Self {
        Self {
            name: place.name.clone(),
            latitude: place.latitude,
            longitude: place.longitude,
            altitude: place.altitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewportRow {
    FitBounds {
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    },
    Center {
        latitude: f64,
        longitude: f64,
        zoom: u32,
    },
}

impl From<Viewport> for ViewportRow {
    fn from(viewport: Viewport) -> Self {
        match viewport {
            Viewport::FitBounds(b) => ViewportRow::FitBounds {
                south: b.south(),
                west: b.west(),
                north: b.north(),
                east: b.east(),
            },
            Viewport::Center {
                latitude,
                longitude,
                zoom,
            } => ViewportRow::Center {
                latitude,
                longitude,
                zoom,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterReport {
    pub book_id: BookId,
    pub chapter: u32,
    pub title: String,
    pub url: String,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub places: Vec<PlaceRow>,
    /// Geotag handlers that did not parse.
    pub skipped: Vec<String>,
    pub viewport: ViewportRow,
}

/// Summarizes fetched chapter markup the way the page would map it.
pub fn chapter_report(
    catalog: &Catalog,
    book_id: BookId,
    chapter: u32,
    url: String,
    html: &str,
    config: &MapConfig,
) -> ChapterReport {
    let mut places = Vec::new();
    let mut skipped = Vec::new();
    for result in formats::scan_geotags(html) {
        match result {
            Ok(tag) => places.push(tag.place()),
            Err(err) => skipped.push(err.to_string()),
        }
    }
    let unique = foundation::dedupe(places);
    let viewport = plan_viewport(&unique, config);

    ChapterReport {
        book_id,
        chapter,
        title: catalog
            .book(book_id)
            .map(|book| navigation::chapter_title(book, chapter))
            .unwrap_or_default(),
        url,
        previous: previous_chapter(catalog, book_id, chapter).map(|c| c.title),
        next: next_chapter(catalog, book_id, chapter).map(|c| c.title),
        places: unique.iter().map(PlaceRow::from).collect(),
        skipped,
        viewport: viewport.into(),
    }
}
