//! What the page does once a chapter request settles.

use catalog::CatalogError;
use foundation::GeoPlace;
use formats::GeotagError;
use layers::{MapWidget, MarkerLayer, Viewport};
use navigation::ChapterRequest;

/// Container receiving navigation grids and chapter content.
pub const DIV_SCRIPTURES: &str = "scriptures";
pub const DIV_BREADCRUMBS: &str = "crumbs";
pub const HEADING_SELECTOR: &str = ".navheading";
pub const CHAPTER_FAILURE: &str = "<p>Unable to retrieve chapter content from server.</p>";

/// The parts of the document a chapter render writes to.
pub trait PageSink {
    type Error;

    fn replace_content(&mut self, id: &str, markup: &str) -> Result<(), Self::Error>;
    /// Appends inside every match of `selector`; returns the match count.
    fn append_to_each(&mut self, selector: &str, markup: &str) -> Result<u32, Self::Error>;
    fn set_title(&mut self, title: &str) -> Result<(), Self::Error>;
}

#[derive(Debug)]
pub enum ChapterOutcome {
    /// A newer navigation started while the request was in flight.
    Stale,
    Rendered {
        viewport: Viewport,
        skipped: Vec<GeotagError>,
    },
    /// The failure message replaced the content; markers were cleared.
    Failed(CatalogError),
}

/// Applies a settled chapter fetch to the page and the map.
///
/// Order on success: content, prev/next under each heading, breadcrumbs,
/// title, then markers.
pub fn apply_chapter_response<P, M>(
    current: bool,
    request: &ChapterRequest,
    response: Result<String, CatalogError>,
    page: &mut P,
    markers: &mut MarkerLayer,
    map: &mut M,
) -> Result<ChapterOutcome, P::Error>
where
    P: PageSink,
    M: MapWidget,
{
    if !current {
        return Ok(ChapterOutcome::Stale);
    }

    let html = match response {
        Ok(html) => html,
        Err(err) => {
            page.replace_content(DIV_SCRIPTURES, CHAPTER_FAILURE)?;
            page.replace_content(DIV_BREADCRUMBS, &request.breadcrumbs)?;
            page.set_title(&request.title)?;
            markers.clear(map);
            return Ok(ChapterOutcome::Failed(err));
        }
    };

    page.replace_content(DIV_SCRIPTURES, &html)?;
    if !request.next_previous.is_empty() {
        page.append_to_each(HEADING_SELECTOR, &request.next_previous)?;
    }
    page.replace_content(DIV_BREADCRUMBS, &request.breadcrumbs)?;
    page.set_title(&request.title)?;

    let (places, skipped) = collect_places(&html);
    let viewport = markers.sync(places, map);
    Ok(ChapterOutcome::Rendered { viewport, skipped })
}

/// Places annotated in chapter markup, plus the annotations that failed to parse.
pub fn collect_places(html: &str) -> (Vec<GeoPlace>, Vec<GeotagError>) {
    let mut places = Vec::new();
    let mut errors = Vec::new();
    for result in formats::scan_geotags(html) {
        match result {
            Ok(tag) => places.push(tag.place()),
            Err(err) => errors.push(err),
        }
    }
    (places, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use foundation::GeoBounds;
    use navigation::NavTicket;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Replace(String, String),
        Append(String, String),
        Title(String),
        ClearMarkers,
        AddMarker(String),
        Fit,
        View(u32),
    }

    /// Page and map write into one timeline.
    struct Page<'a>(&'a RefCell<Vec<Call>>);
    struct Map<'a>(&'a RefCell<Vec<Call>>);

    impl PageSink for Page<'_> {
        type Error = ();

        fn replace_content(&mut self, id: &str, markup: &str) -> Result<(), ()> {
            self.0.borrow_mut().push(Call::Replace(id.into(), markup.into()));
            Ok(())
        }

        fn append_to_each(&mut self, selector: &str, markup: &str) -> Result<u32, ()> {
            self.0.borrow_mut().push(Call::Append(selector.into(), markup.into()));
            Ok(1)
        }

        fn set_title(&mut self, title: &str) -> Result<(), ()> {
            self.0.borrow_mut().push(Call::Title(title.into()));
            Ok(())
        }
    }

    impl MapWidget for Map<'_> {
        fn clear_markers(&mut self) {
            self.0.borrow_mut().push(Call::ClearMarkers);
        }

        fn add_marker(&mut self, place: &GeoPlace) {
            self.0.borrow_mut().push(Call::AddMarker(place.name.clone()));
        }

        fn fit_bounds(&mut self, _bounds: GeoBounds) {
            self.0.borrow_mut().push(Call::Fit);
        }

        fn set_view(&mut self, _latitude: f64, _longitude: f64, zoom: u32) {
            self.0.borrow_mut().push(Call::View(zoom));
        }
    }

    fn request() -> ChapterRequest {
        ChapterRequest {
            ticket: NavTicket(3),
            book_id: 175,
            chapter: 11,
            title: "Joshua 11".into(),
            breadcrumbs: "<ul><li>11</li></ul>".into(),
            next_previous: r#"<div class="nextprev"></div>"#.into(),
        }
    }

    const HAZOR_HTML: &str = concat!(
        r#"<h5 class="navheading">Joshua 11</h5>"#,
        r#"<a onclick="showLocation(536,'Hazor',33.017181,35.568048,33.017181,35.568048,0.0,0.0,5000.0,0.0,'')">Hazor</a>"#,
    );

    fn apply(
        calls: &RefCell<Vec<Call>>,
        markers: &mut MarkerLayer,
        current: bool,
        response: Result<String, CatalogError>,
    ) -> ChapterOutcome {
        let mut page = Page(calls);
        let mut map = Map(calls);
        apply_chapter_response(current, &request(), response, &mut page, markers, &mut map)
            .unwrap()
    }

    #[test]
    fn renders_content_then_decorations_then_markers() {
        let calls = RefCell::new(Vec::new());
        let mut markers = MarkerLayer::default();
        let outcome = apply(&calls, &mut markers, true, Ok(HAZOR_HTML.to_string()));

        assert!(matches!(outcome, ChapterOutcome::Rendered { ref skipped, .. } if skipped.is_empty()));
        assert_eq!(
            calls.into_inner(),
            vec![
                Call::Replace(DIV_SCRIPTURES.into(), HAZOR_HTML.into()),
                Call::Append(HEADING_SELECTOR.into(), r#"<div class="nextprev"></div>"#.into()),
                Call::Replace(DIV_BREADCRUMBS.into(), "<ul><li>11</li></ul>".into()),
                Call::Title("Joshua 11".into()),
                Call::ClearMarkers,
                Call::AddMarker("Hazor".into()),
                Call::View(11),
            ]
        );
        assert_eq!(markers.markers().len(), 1);
    }

    #[test]
    fn stale_response_touches_nothing() {
        let calls = RefCell::new(Vec::new());
        let mut markers = MarkerLayer::default();
        let outcome = apply(&calls, &mut markers, false, Ok(HAZOR_HTML.to_string()));

        assert!(matches!(outcome, ChapterOutcome::Stale));
        assert_eq!(calls.into_inner(), Vec::new());
        assert!(markers.markers().is_empty());
    }

    #[test]
    fn fetch_failure_shows_message_and_clears_old_markers() {
        let calls = RefCell::new(Vec::new());
        let mut markers = MarkerLayer::default();
        apply(&calls, &mut markers, true, Ok(HAZOR_HTML.to_string()));
        calls.borrow_mut().clear();

        let err = CatalogError::Status {
            url: "u".into(),
            status: 500,
        };
        let outcome = apply(&calls, &mut markers, true, Err(err.clone()));

        assert!(matches!(outcome, ChapterOutcome::Failed(ref e) if *e == err));
        assert_eq!(
            calls.into_inner(),
            vec![
                Call::Replace(DIV_SCRIPTURES.into(), CHAPTER_FAILURE.into()),
                Call::Replace(DIV_BREADCRUMBS.into(), "<ul><li>11</li></ul>".into()),
                Call::Title("Joshua 11".into()),
                Call::ClearMarkers,
            ]
        );
        assert!(markers.markers().is_empty());
    }

    #[test]
    fn collects_places_and_parse_failures() {
        let html = concat!(
            r#"<a onclick="showLocation(536,'Hazor',33.017181,35.568048,33.017181,35.568048,0.0,0.0,5000.0,0.0,'')">Hazor</a>"#,
            r#"<a onclick="showLocation(1,'Broken',x,1.0,0,0,0,0,0,0,'')">Broken</a>"#,
            r#"<a onclick="showLocation(12,'Jerusalem',31.778,35.235,31.778,35.235,0,0,7500,0,'~')">Jerusalem</a>"#,
        );
        let (places, errors) = collect_places(html);
        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Hazor", "Jerusalem ~"]);
        assert_eq!(errors.len(), 1);
    }
}
