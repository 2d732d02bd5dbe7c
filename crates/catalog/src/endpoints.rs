use crate::BookId;

pub const DEFAULT_BASE_URL: &str = "https://scriptures.byu.edu/";

/// Locations of the content service endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn books_url(&self) -> String {
        format!("{}mapscrip/model/books.php", self.base_url)
    }

    pub fn volumes_url(&self) -> String {
        format!("{}mapscrip/model/volumes.php", self.base_url)
    }

    /// Chapter markup URL. `verses` is appended verbatim as the value of the
    /// `verses` key, which the service accepts bare when absent.
    pub fn chapter_url(
        &self,
        book_id: BookId,
        chapter: u32,
        verses: Option<&str>,
        jst: bool,
    ) -> String {
        let mut url = format!(
            "{}mapscrip/mapgetscrip.php?book={book_id}&chap={chapter}&verses",
            self.base_url
        );
        if let Some(verses) = verses.filter(|v| !v.is_empty()) {
            url.push('=');
            url.push_str(verses);
        }
        if jst {
            url.push_str("&jst=JST");
        }
        url
    }
}
