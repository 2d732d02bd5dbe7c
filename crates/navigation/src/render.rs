//! Navigation grids, breadcrumbs and chapter prev/next links.

use catalog::{Book, BookId, Catalog, Volume};
use formats::html::{self, Attrs};

use crate::chapters::{ChapterRef, next_chapter, previous_chapter};
use crate::route::Route;

pub const BOTTOM_PADDING: &str = "<br /><br />";
pub const CLASS_BOOKS: &str = "books";
pub const CLASS_BUTTON: &str = "btn";
pub const CLASS_CHAPTER: &str = "btn chapter";
pub const CLASS_NEXT_PREVIOUS: &str = "nextprev";
pub const CLASS_VOLUME: &str = "volume";
pub const DIV_SCRIPTURES_NAVIGATOR: &str = "scripnav";
pub const HOME_TITLE: &str = "The Scriptures";
pub const TAG_VOLUME_TITLE: &str = "h5";

const ICON_NEXT: &str = "<i class=\"material-icons\">skip_next</i>";
const ICON_PREVIOUS: &str = "<i class=\"material-icons\">skip_previous</i>";

/// Grid markup for a navigation route, or `None` for chapter routes.
pub fn navigation_markup(catalog: &Catalog, route: Route) -> Option<String> {
    let content: String = match route {
        Route::Home => catalog.volumes().iter().map(volume_section).collect(),
        Route::Volume(id) => catalog.volume(id).map(volume_section)?,
        Route::Book(book_id) => chapters_grid(catalog.book(book_id)?),
        Route::Chapter { .. } => return None,
    };
    Some(navigator(&content))
}

fn navigator(content: &str) -> String {
    html::div(
        &Attrs::id(DIV_SCRIPTURES_NAVIGATOR),
        &format!("{content}{BOTTOM_PADDING}"),
    )
}

fn volume_section(volume: &Volume) -> String {
    let heading = format!(
        "{}{}",
        html::anchor(&format!("v{}", volume.id)),
        html::element(TAG_VOLUME_TITLE, &html::text(&volume.full_name))
    );
    let buttons: String = volume
        .books
        .iter()
        .map(|book| {
            let id = book.id.to_string();
            let href = format!("#{}:{}", volume.id, book.id);
            html::link(
                &Attrs {
                    id: Some(&id),
                    class: Some(CLASS_BUTTON),
                    href: Some(&href),
                    title: Some(&book.toc_name),
                },
                &html::text(&book.grid_name),
            )
        })
        .collect();

    let mut out = html::div(&Attrs::class(CLASS_VOLUME), &heading);
    out.push_str(&html::div(&Attrs::class(CLASS_BOOKS), &buttons));
    out
}

fn chapters_grid(book: &Book) -> String {
    let heading = html::element(TAG_VOLUME_TITLE, &html::text(book.display_name()));
    let buttons: String = (1..=book.num_chapters)
        .map(|chapter| {
            let id = chapter.to_string();
            let href = format!("#{}:{}:{chapter}", book.parent_book_id, book.id);
            html::link(
                &Attrs {
                    id: Some(&id),
                    class: Some(CLASS_CHAPTER),
                    href: Some(&href),
                    title: None,
                },
                &id,
            )
        })
        .collect();

    let mut out = html::div(&Attrs::class(CLASS_VOLUME), &heading);
    out.push_str(&html::div(&Attrs::class(CLASS_BOOKS), &buttons));
    out
}

/// Home › Volume › Book › Chapter trail; every level but the last links back.
pub fn breadcrumbs(catalog: &Catalog, route: Route) -> String {
    let mut trail: Vec<(String, Option<String>)> =
        vec![(HOME_TITLE.to_string(), Some("#".into()))];

    let (volume, book, chapter) = match route {
        Route::Home => (None, None, None),
        Route::Volume(id) => (catalog.volume(id), None, None),
        Route::Book(book_id) => (catalog.volume_for_book(book_id), catalog.book(book_id), None),
        Route::Chapter { book_id, chapter } => (
            catalog.volume_for_book(book_id),
            catalog.book(book_id),
            Some(chapter),
        ),
    };

    if let Some(volume) = volume {
        let href = Route::Volume(volume.id).to_hash(catalog);
        trail.push((volume.full_name.clone(), Some(href)));
    }
    if let Some(book) = book {
        // Single-chapter books resolve back to their chapter, so the link stays valid.
        let href = Route::Book(book.id).to_hash(catalog);
        trail.push((book.toc_name.clone(), Some(href)));
        // Chapter 0 is titled by the book alone.
        if let Some(chapter) = chapter.filter(|&c| c > 0) {
            trail.push((chapter.to_string(), None));
        }
    }

    let last = trail.len() - 1;
    let items = trail.into_iter().enumerate().map(|(idx, (label, href))| {
        let label = html::text(&label);
        match href {
            Some(href) if idx != last => html::hash_link(&href, &label),
            _ => label,
        }
    });
    html::unordered_list(items)
}

/// Prev/next links for a chapter; empty when it has no neighbours.
pub fn next_previous_markup(catalog: &Catalog, book_id: BookId, chapter: u32) -> String {
    let previous = previous_chapter(catalog, book_id, chapter);
    let next = next_chapter(catalog, book_id, chapter);
    if previous.is_none() && next.is_none() {
        return String::new();
    }

    let link = |target: &ChapterRef, icon: &str| {
        let href = Route::Chapter {
            book_id: target.book_id,
            chapter: target.chapter,
        }
        .to_hash(catalog);
        html::link(
            &Attrs {
                href: Some(&href),
                title: Some(&target.title),
                ..Attrs::default()
            },
            icon,
        )
    };

    let mut content = String::new();
    if let Some(previous) = &previous {
        content.push_str(&link(previous, ICON_PREVIOUS));
    }
    if let Some(next) = &next {
        content.push_str(&link(next, ICON_NEXT));
    }
    html::div(&Attrs::class(CLASS_NEXT_PREVIOUS), &content)
}
