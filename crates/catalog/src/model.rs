use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

pub type BookId = u32;
pub type VolumeId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    /// Id of the volume that owns this book.
    pub parent_book_id: VolumeId,
    pub toc_name: String,
    pub grid_name: String,
    /// Zero means the book is a single pseudo-chapter addressed as chapter 0.
    pub num_chapters: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl Book {
    /// Heading shown above the chapter grid.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.toc_name)
    }

    /// The chapter a reader lands on when entering the book.
    pub fn first_chapter(&self) -> u32 {
        if self.num_chapters == 0 { 0 } else { 1 }
    }

    /// The last addressable chapter (0 for zero-chapter books).
    pub fn last_chapter(&self) -> u32 {
        self.num_chapters
    }

    pub fn has_chapter(&self, chapter: u32) -> bool {
        if self.num_chapters == 0 {
            chapter == 0
        } else {
            (1..=self.num_chapters).contains(&chapter)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: VolumeId,
    pub full_name: String,
    pub min_book_id: BookId,
    pub max_book_id: BookId,
    /// Filled from the book index when the catalog is built.
    #[serde(default, skip_deserializing)]
    pub books: Vec<Book>,
}

/// The immutable book/volume index for a page session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    books: BTreeMap<BookId, Book>,
    volumes: Vec<Volume>,
}

impl Catalog {
    /// Attaches each volume's book range and validates the result.
    pub fn build(
        books: BTreeMap<BookId, Book>,
        mut volumes: Vec<Volume>,
    ) -> Result<Self, CatalogError> {
        let mut previous: Option<VolumeId> = None;
        for volume in &mut volumes {
            if let Some(prev) = previous
                && volume.id <= prev
            {
                return Err(CatalogError::Corrupt(format!(
                    "volume {} listed after volume {prev}",
                    volume.id
                )));
            }
            if volume.min_book_id > volume.max_book_id {
                return Err(CatalogError::Corrupt(format!(
                    "volume {} has empty book range {}..={}",
                    volume.id, volume.min_book_id, volume.max_book_id
                )));
            }

            volume.books = (volume.min_book_id..=volume.max_book_id)
                .map(|book_id| {
                    books.get(&book_id).cloned().ok_or_else(|| {
                        CatalogError::Corrupt(format!(
                            "volume {} references missing book {book_id}",
                            volume.id
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            previous = Some(volume.id);
        }

        Ok(Self { books, volumes })
    }

    /// Parses the raw books-index and volumes-list payloads.
    pub fn from_json(books_json: &str, volumes_json: &str) -> Result<Self, CatalogError> {
        let books = serde_json::from_str::<BTreeMap<BookId, Book>>(books_json)
            .map_err(|e| CatalogError::Malformed(format!("books: {e}")))?;
        let volumes = serde_json::from_str::<Vec<Volume>>(volumes_json)
            .map_err(|e| CatalogError::Malformed(format!("volumes: {e}")))?;
        Self::build(books, volumes)
    }

    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    pub fn volume(&self, id: VolumeId) -> Option<&Volume> {
        self.volumes
            .binary_search_by_key(&id, |v| v.id)
            .ok()
            .map(|idx| &self.volumes[idx])
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn volume_for_book(&self, book_id: BookId) -> Option<&Volume> {
        self.book(book_id)
            .and_then(|book| self.volume(book.parent_book_id))
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const BOOKS_JSON: &str = r#"{
        "101": {"id": 101, "parentBookId": 1, "tocName": "Genesis", "gridName": "Gen", "numChapters": 50, "fullName": "The First Book of Moses called Genesis"},
        "102": {"id": 102, "parentBookId": 1, "tocName": "Exodus", "gridName": "Ex", "numChapters": 40},
        "201": {"id": 201, "parentBookId": 2, "tocName": "Title Page", "gridName": "Title", "numChapters": 0},
        "202": {"id": 202, "parentBookId": 2, "tocName": "1 Nephi", "gridName": "1 Ne", "numChapters": 22}
    }"#;

    pub const VOLUMES_JSON: &str = r#"[
        {"id": 1, "fullName": "Old Testament", "minBookId": 101, "maxBookId": 102},
        {"id": 2, "fullName": "Book of Mormon", "minBookId": 201, "maxBookId": 202}
    ]"#;
}
