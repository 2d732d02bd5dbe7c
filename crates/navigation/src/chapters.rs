use catalog::{Book, BookId, Catalog};

/// A chapter a link can point at, with its display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRef {
    pub book_id: BookId,
    pub chapter: u32,
    pub title: String,
}

impl ChapterRef {
    fn new(book: &Book, chapter: u32) -> Self {
        Self {
            book_id: book.id,
            chapter,
            title: chapter_title(book, chapter),
        }
    }
}

/// Chapter 0 shows only the book name; numbered chapters append the number.
pub fn chapter_title(book: &Book, chapter: u32) -> String {
    if chapter > 0 {
        format!("{} {chapter}", book.toc_name)
    } else {
        book.toc_name.clone()
    }
}

pub fn book_chapter_valid(catalog: &Catalog, book_id: BookId, chapter: u32) -> bool {
    catalog
        .book(book_id)
        .is_some_and(|book| book.has_chapter(chapter))
}

/// The chapter after `(book_id, chapter)`, crossing into the book with the
/// next id when the current one is exhausted.
pub fn next_chapter(catalog: &Catalog, book_id: BookId, chapter: u32) -> Option<ChapterRef> {
    let book = catalog.book(book_id)?;
    if chapter < book.num_chapters {
        return Some(ChapterRef::new(book, chapter + 1));
    }
    let next_book = catalog.book(book_id.checked_add(1)?)?;
    Some(ChapterRef::new(next_book, next_book.first_chapter()))
}

/// The chapter before `(book_id, chapter)`, falling back to the last chapter
/// of the book with the previous id.
pub fn previous_chapter(catalog: &Catalog, book_id: BookId, chapter: u32) -> Option<ChapterRef> {
    let book = catalog.book(book_id)?;
    if chapter > 1 {
        return Some(ChapterRef::new(book, chapter - 1));
    }
    let previous_book = catalog.book(book_id.checked_sub(1)?)?;
    Some(ChapterRef::new(previous_book, previous_book.last_chapter()))
}
