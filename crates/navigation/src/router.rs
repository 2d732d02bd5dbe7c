use catalog::{BookId, Catalog, Endpoints};

use crate::chapters::chapter_title;
use crate::render::{breadcrumbs, navigation_markup, next_previous_markup};
use crate::route::Route;
use crate::sequence::{NavTicket, NavigationSequence};

/// What the page should do for a hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    /// Replace the content with a navigation grid.
    ShowNavigation {
        ticket: NavTicket,
        route: Route,
        markup: String,
        breadcrumbs: String,
    },
    /// Fetch chapter content, then render it with the prepared decorations.
    FetchChapter(ChapterRequest),
}

impl NavAction {
    pub fn ticket(&self) -> NavTicket {
        match self {
            NavAction::ShowNavigation { ticket, .. } => *ticket,
            NavAction::FetchChapter(request) => request.ticket,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRequest {
    pub ticket: NavTicket,
    pub book_id: BookId,
    pub chapter: u32,
    pub title: String,
    pub breadcrumbs: String,
    /// Prev/next block appended to every heading of the chapter.
    pub next_previous: String,
}

impl ChapterRequest {
    pub fn url(&self, endpoints: &Endpoints) -> String {
        endpoints.chapter_url(self.book_id, self.chapter, None, false)
    }
}

/// Hash-driven navigation state machine.
///
/// Every call to [`Router::navigate`] starts a new navigation, which makes the
/// tickets of all earlier ones stale.
#[derive(Debug, Default)]
pub struct Router {
    sequence: NavigationSequence,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, catalog: &Catalog, hash: &str) -> NavAction {
        let route = Route::parse(hash, catalog).resolve(catalog);
        let ticket = self.sequence.begin();

        match route {
            Route::Chapter { book_id, chapter } => {
                let title = catalog
                    .book(book_id)
                    .map(|book| chapter_title(book, chapter))
                    .unwrap_or_default();
                NavAction::FetchChapter(ChapterRequest {
                    ticket,
                    book_id,
                    chapter,
                    title,
                    breadcrumbs: breadcrumbs(catalog, route),
                    next_previous: next_previous_markup(catalog, book_id, chapter),
                })
            }
            _ => {
                // Route::parse only yields routes the catalog knows about.
                let markup = navigation_markup(catalog, route)
                    .or_else(|| navigation_markup(catalog, Route::Home))
                    .unwrap_or_default();
                NavAction::ShowNavigation {
                    ticket,
                    route,
                    markup,
                    breadcrumbs: breadcrumbs(catalog, route),
                }
            }
        }
    }

    pub fn is_current(&self, ticket: NavTicket) -> bool {
        self.sequence.is_current(ticket)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test_support::sample_catalog;
    use catalog::{Book, Volume};
    use pretty_assertions::assert_eq;

    #[test]
    fn home_and_volume_show_grids() {
        let catalog = sample_catalog();
        let mut router = Router::new();

        match router.navigate(&catalog, "") {
            NavAction::ShowNavigation { route, markup, .. } => {
                assert_eq!(route, Route::Home);
                assert!(markup.contains("Old Testament"));
            }
            other => panic!("unexpected action {other:?}"),
        }

        match router.navigate(&catalog, "#2") {
            NavAction::ShowNavigation { route, .. } => assert_eq!(route, Route::Volume(2)),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn invalid_targets_fall_back_home() {
        let catalog = sample_catalog();
        let mut router = Router::new();
        for hash in ["#9", "#_:555", "#_:101:99", "#a:b:c:d", "#_:101:"] {
            match router.navigate(&catalog, hash) {
                NavAction::ShowNavigation { route, .. } => assert_eq!(route, Route::Home, "{hash}"),
                other => panic!("{hash} gave {other:?}"),
            }
        }
    }

    #[test]
    fn chapter_navigation_prepares_request() {
        let catalog = sample_catalog();
        let mut router = Router::new();
        let NavAction::FetchChapter(request) = router.navigate(&catalog, "#_:101:2") else {
            panic!("expected chapter fetch");
        };
        assert_eq!((request.book_id, request.chapter), (101, 2));
        assert_eq!(request.title, "Genesis 2");
        assert!(request.breadcrumbs.ends_with("<li>2</li></ul>"));
        assert!(request.next_previous.contains(r#"title="Genesis 3""#));
        assert_eq!(
            request.url(&Endpoints::default()),
            "https://scriptures.byu.edu/mapscrip/mapgetscrip.php?book=101&chap=2&verses"
        );
    }

    #[test]
    fn newer_navigation_makes_pending_chapter_stale() {
        let catalog = sample_catalog();
        let mut router = Router::new();
        let first = router.navigate(&catalog, "#_:101:2");
        assert!(router.is_current(first.ticket()));

        let second = router.navigate(&catalog, "#1");
        assert!(!router.is_current(first.ticket()));
        assert!(router.is_current(second.ticket()));
    }

    #[test]
    fn front_matter_book_skips_chapter_grid() {
        let books = BTreeMap::from([
            (
                1,
                Book {
                    id: 1,
                    parent_book_id: 1,
                    toc_name: "Genesis".into(),
                    grid_name: "Gen".into(),
                    num_chapters: 2,
                    full_name: None,
                },
            ),
            (
                2,
                Book {
                    id: 2,
                    parent_book_id: 1,
                    toc_name: "Introduction".into(),
                    grid_name: "Intro".into(),
                    num_chapters: 0,
                    full_name: None,
                },
            ),
        ]);
        let volumes = vec![Volume {
            id: 1,
            full_name: "Old Testament".into(),
            min_book_id: 1,
            max_book_id: 2,
            books: Vec::new(),
        }];
        let catalog = Catalog::build(books, volumes).unwrap();

        let ids: Vec<BookId> = catalog.volumes()[0].books.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let mut router = Router::new();
        let NavAction::FetchChapter(request) = router.navigate(&catalog, "#_:2") else {
            panic!("expected direct chapter fetch");
        };
        assert_eq!((request.book_id, request.chapter), (2, 0));
        assert_eq!(request.title, "Introduction");

        match router.navigate(&catalog, "#_:1") {
            NavAction::ShowNavigation { route, markup, .. } => {
                assert_eq!(route, Route::Book(1));
                assert!(markup.contains(r##"href="#1:1:2""##));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}
