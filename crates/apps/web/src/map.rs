use foundation::{GeoBounds, GeoPlace};
use layers::MapWidget;
use wasm_bindgen::prelude::*;

// The page owns the Google map and exposes it as `window.scripnavMap`; these
// shims keep the marker objects on the JS side.
#[wasm_bindgen(inline_js = "
let __scripnav_markers = [];

function __scripnav_map() {
    if (typeof google === 'undefined' || !window.scripnavMap) return null;
    return window.scripnavMap;
}

export function scripnav_map_clear() {
    for (const marker of __scripnav_markers) {
        marker.setMap(null);
    }
    __scripnav_markers = [];
}

export function scripnav_map_add_marker(name, lat, lng) {
    const map = __scripnav_map();
    if (!map) return false;
    const marker = new google.maps.Marker({
        position: { lat, lng },
        map,
        title: name,
        label: { text: name, className: 'scripnav-label' },
        animation: google.maps.Animation.DROP,
    });
    __scripnav_markers.push(marker);
    return true;
}

export function scripnav_map_fit_bounds(south, west, north, east) {
    const map = __scripnav_map();
    if (!map) return false;
    map.fitBounds(new google.maps.LatLngBounds(
        { lat: south, lng: west },
        { lat: north, lng: east },
    ));
    return true;
}

export function scripnav_map_set_view(lat, lng, zoom) {
    const map = __scripnav_map();
    if (!map) return false;
    map.setCenter({ lat, lng });
    map.setZoom(zoom);
    return true;
}
")]
extern "C" {
    fn scripnav_map_clear();
    fn scripnav_map_add_marker(name: &str, lat: f64, lng: f64) -> bool;
    fn scripnav_map_fit_bounds(south: f64, west: f64, north: f64, east: f64) -> bool;
    fn scripnav_map_set_view(lat: f64, lng: f64, zoom: u32) -> bool;
}

/// Map widget backed by the page's Google map.
#[derive(Debug, Default)]
pub struct JsMap {
    /// Set once a call found no map on the page.
    warned: bool,
}

impl JsMap {
    fn note(&mut self, ok: bool) {
        if !ok && !self.warned {
            self.warned = true;
            web_sys::console::log_1(&JsValue::from_str(
                "map widget unavailable; markers will not be shown",
            ));
        }
    }
}

impl MapWidget for JsMap {
    fn clear_markers(&mut self) {
        scripnav_map_clear();
    }

    fn add_marker(&mut self, place: &GeoPlace) {
        let ok = scripnav_map_add_marker(&place.name, place.latitude, place.longitude);
        self.note(ok);
    }

    fn fit_bounds(&mut self, bounds: GeoBounds) {
        let ok =
            scripnav_map_fit_bounds(bounds.south(), bounds.west(), bounds.north(), bounds.east());
        self.note(ok);
    }

    fn set_view(&mut self, latitude: f64, longitude: f64, zoom: u32) {
        let ok = scripnav_map_set_view(latitude, longitude, zoom);
        self.note(ok);
    }
}
