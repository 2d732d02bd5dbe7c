use std::cell::RefCell;
use std::rc::Rc;

use console_error_panic_hook::set_once;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use catalog::{CatalogCell, CatalogError, Endpoints};
use layers::{MapConfig, MarkerLayer, Viewport};
use navigation::{ChapterRequest, NavAction, Router};

mod chapter;
mod dom;
mod fetch;
mod map;

use chapter::{ChapterOutcome, DIV_BREADCRUMBS, DIV_SCRIPTURES, apply_chapter_response};
use dom::DomSink;
use fetch::{HttpCatalogSource, fetch_text};
use map::JsMap;

const CATALOG_FAILURE: &str = "<p>Unable to load the scripture index. Please reload the page.</p>";

#[derive(Debug, Default)]
struct PageState {
    endpoints: Endpoints,
    router: Router,
    markers: MarkerLayer,
    map: JsMap,
    hash_listener_installed: bool,
}

thread_local! {
    static STATE: RefCell<PageState> = RefCell::new(PageState::default());
    static CATALOG: Rc<CatalogCell> = Rc::new(CatalogCell::new());
}

/// TLS access that yields `None` during teardown instead of panicking.
fn with_state<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut PageState) -> R,
{
    STATE.try_with(|state| f(&mut state.borrow_mut())).ok()
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Loads the catalog and starts routing on hash changes.
///
/// `base_url` overrides the content service location.
#[wasm_bindgen]
pub fn init(base_url: Option<String>) -> Result<(), JsValue> {
    let endpoints = base_url.map(Endpoints::new).unwrap_or_default();
    let install = with_state(|s| {
        s.endpoints = endpoints.clone();
        !std::mem::replace(&mut s.hash_listener_installed, true)
    })
    .unwrap_or(false);
    if install {
        install_hash_listener()?;
    }

    spawn_local(async move {
        match load_catalog(endpoints).await {
            Ok(()) => on_hash_changed(),
            Err(err) => {
                log_error(&format!("scripture index load failed: {err}"));
                if let Err(err) = dom::replace_content(DIV_SCRIPTURES, CATALOG_FAILURE) {
                    log_error(&format!("failure message not shown: {err:?}"));
                }
            }
        }
    });
    Ok(())
}

async fn load_catalog(endpoints: Endpoints) -> Result<(), CatalogError> {
    let cell = CATALOG.with(Rc::clone);
    if cell.is_loading() {
        log("scripture index load already in flight; waiting for it");
    }
    let catalog = cell.get_or_load(HttpCatalogSource::new(endpoints)).await?;
    log(&format!(
        "scripture index loaded: {} volumes, {} books",
        catalog.volumes().len(),
        catalog.book_count()
    ));
    Ok(())
}

fn install_hash_listener() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let closure = Closure::<dyn FnMut()>::new(on_hash_changed);
    window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Routes the current location hash. Runs on load and on every hash change.
#[wasm_bindgen]
pub fn on_hash_changed() {
    let Some(catalog) = CATALOG.with(|cell| cell.get()) else {
        log("hash change ignored: scripture index not loaded yet");
        return;
    };
    let hash = match dom::current_hash() {
        Ok(hash) => hash,
        Err(err) => {
            log_error(&format!("reading location hash failed: {err:?}"));
            String::new()
        }
    };

    let Some(action) = with_state(|s| s.router.navigate(&catalog, &hash)) else {
        return;
    };

    match action {
        NavAction::ShowNavigation {
            markup,
            breadcrumbs,
            ..
        } => {
            let shown = dom::replace_content(DIV_SCRIPTURES, &markup)
                .and_then(|()| dom::replace_content(DIV_BREADCRUMBS, &breadcrumbs));
            if let Err(err) = shown {
                log_error(&format!("navigation render failed: {err:?}"));
            }
        }
        NavAction::FetchChapter(request) => spawn_local(render_chapter(request)),
    }
}

async fn render_chapter(request: ChapterRequest) {
    let Some(url) = with_state(|s| request.url(&s.endpoints)) else {
        return;
    };
    let response = fetch_text(&url).await;

    let applied = with_state(|s| {
        let current = s.router.is_current(request.ticket);
        apply_chapter_response(
            current,
            &request,
            response,
            &mut DomSink,
            &mut s.markers,
            &mut s.map,
        )
    });

    match applied {
        None => {}
        Some(Ok(ChapterOutcome::Stale)) => log(&format!("dropping stale response for {url}")),
        Some(Ok(ChapterOutcome::Rendered { viewport, skipped })) => {
            for err in skipped {
                log(&format!("skipping geotag: {err}"));
            }
            log(&describe_viewport(&viewport));
        }
        Some(Ok(ChapterOutcome::Failed(err))) => {
            log_error(&format!("chapter fetch failed: {err}"));
        }
        Some(Err(err)) => log_error(&format!("chapter render failed: {err:?}")),
    }
}

fn describe_viewport(viewport: &Viewport) -> String {
    match viewport {
        Viewport::FitBounds(b) => format!(
            "map fit to [{:.4}, {:.4}] - [{:.4}, {:.4}]",
            b.south(),
            b.west(),
            b.north(),
            b.east()
        ),
        Viewport::Center {
            latitude,
            longitude,
            zoom,
        } => format!("map centered on {latitude:.4}, {longitude:.4} at zoom {zoom}"),
    }
}

/// Overrides the map defaults used when a chapter has zero or one place.
#[wasm_bindgen]
pub fn set_map_defaults(latitude: f64, longitude: f64, zoom: u32) {
    with_state(|s| {
        s.markers.set_config(MapConfig {
            default_center: (latitude, longitude),
            default_zoom: zoom,
            ..s.markers.config().clone()
        });
    });
}
