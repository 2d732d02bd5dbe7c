use catalog::{BookId, Catalog, VolumeId};

use crate::chapters::book_chapter_valid;

/// A validated navigation target.
///
/// Hash grammar, with the leading `#` optional:
/// - `` (empty) → [`Route::Home`]
/// - `volumeId` → [`Route::Volume`]
/// - `_:bookId` → [`Route::Book`]
/// - `_:bookId:chapter` → [`Route::Chapter`]
///
/// The leading component of the two longer forms is a placeholder that
/// parsing ignores; generated hashes fill it with the owning volume id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Volume(VolumeId),
    Book(BookId),
    Chapter { book_id: BookId, chapter: u32 },
}

impl Route {
    /// Parses and validates `hash` against the catalog. Anything malformed,
    /// unknown or out of range falls back to [`Route::Home`].
    pub fn parse(hash: &str, catalog: &Catalog) -> Route {
        let payload = hash.strip_prefix('#').unwrap_or(hash);
        if payload.is_empty() {
            return Route::Home;
        }

        let parts: Vec<&str> = payload.split(':').collect();
        match parts.as_slice() {
            [volume] => match volume.parse::<VolumeId>() {
                Ok(id) if catalog.volume(id).is_some() => Route::Volume(id),
                _ => Route::Home,
            },
            [_, book] => match book.parse::<BookId>() {
                Ok(id) if catalog.book(id).is_some() => Route::Book(id),
                _ => Route::Home,
            },
            [_, book, chapter] => match (book.parse::<BookId>(), chapter.parse::<u32>()) {
                (Ok(book_id), Ok(chapter)) if book_chapter_valid(catalog, book_id, chapter) => {
                    Route::Chapter { book_id, chapter }
                }
                _ => Route::Home,
            },
            _ => Route::Home,
        }
    }

    /// Books with at most one chapter skip their chapter grid.
    pub fn resolve(self, catalog: &Catalog) -> Route {
        match self {
            Route::Book(book_id) => match catalog.book(book_id) {
                Some(book) if book.num_chapters <= 1 => Route::Chapter {
                    book_id,
                    chapter: book.first_chapter(),
                },
                _ => self,
            },
            other => other,
        }
    }

    /// Canonical hash for this route, including the leading `#`.
    pub fn to_hash(&self, catalog: &Catalog) -> String {
        let volume_of = |book_id: BookId| {
            catalog
                .book(book_id)
                .map(|b| b.parent_book_id.to_string())
                .unwrap_or_else(|| "_".to_string())
        };
        match *self {
            Route::Home => "#".to_string(),
            Route::Volume(id) => format!("#{id}"),
            Route::Book(book_id) => format!("#{}:{book_id}", volume_of(book_id)),
            Route::Chapter { book_id, chapter } => {
                format!("#{}:{book_id}:{chapter}", volume_of(book_id))
            }
        }
    }
}
