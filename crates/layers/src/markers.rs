use foundation::{GeoBounds, GeoPlace, dedupe};

/// The map widget surface the marker layer drives.
pub trait MapWidget {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, place: &GeoPlace);
    fn fit_bounds(&mut self, bounds: GeoBounds);
    fn set_view(&mut self, latitude: f64, longitude: f64, zoom: u32);
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// `(lat, lon)` shown when a chapter has no places.
    pub default_center: (f64, f64),
    pub default_zoom: u32,
    /// A lone place is shown at zoom `altitude / zoom_altitude_divisor`.
    pub zoom_altitude_divisor: f64,
    pub min_zoom: u32,
    pub max_zoom: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: (31.7683, 35.2137),
            default_zoom: 8,
            zoom_altitude_divisor: 450.0,
            min_zoom: 1,
            max_zoom: 21,
        }
    }
}

impl MapConfig {
    pub fn zoom_for_altitude(&self, altitude: f64) -> u32 {
        let zoom = altitude / self.zoom_altitude_divisor;
        if !zoom.is_finite() {
            return self.default_zoom;
        }
        zoom.round()
            .clamp(f64::from(self.min_zoom), f64::from(self.max_zoom)) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    FitBounds(GeoBounds),
    Center {
        latitude: f64,
        longitude: f64,
        zoom: u32,
    },
}

/// Chooses the view for a set of already-deduplicated places.
pub fn plan_viewport(places: &[GeoPlace], config: &MapConfig) -> Viewport {
    if let [only] = places {
        return Viewport::Center {
            latitude: only.latitude,
            longitude: only.longitude,
            zoom: config.zoom_for_altitude(only.altitude),
        };
    }
    match GeoBounds::enclosing(places.iter().map(|p| (p.latitude, p.longitude))) {
        Some(bounds) => Viewport::FitBounds(bounds),
        None => Viewport::Center {
            latitude: config.default_center.0,
            longitude: config.default_center.1,
            zoom: config.default_zoom,
        },
    }
}

/// Owns the markers currently on the map.
#[derive(Debug, Default)]
pub struct MarkerLayer {
    config: MapConfig,
    markers: Vec<GeoPlace>,
}

impl MarkerLayer {
    pub fn new(config: MapConfig) -> Self {
        Self {
            config,
            markers: Vec::new(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Swaps the view settings; markers already on the map stay tracked.
    pub fn set_config(&mut self, config: MapConfig) {
        self.config = config;
    }

    pub fn markers(&self) -> &[GeoPlace] {
        &self.markers
    }

    pub fn clear<M: MapWidget>(&mut self, map: &mut M) {
        map.clear_markers();
        self.markers.clear();
    }

    /// Replaces the markers with the deduplicated `places` and moves the
    /// viewport to fit them. Old markers are always removed first.
    pub fn sync<M: MapWidget>(&mut self, places: Vec<GeoPlace>, map: &mut M) -> Viewport {
        self.clear(map);

        let unique = dedupe(places);
        for place in &unique {
            map.add_marker(place);
        }

        let viewport = plan_viewport(&unique, &self.config);
        match viewport {
            Viewport::FitBounds(bounds) => map.fit_bounds(bounds),
            Viewport::Center {
                latitude,
                longitude,
                zoom,
            } => map.set_view(latitude, longitude, zoom),
        }

        self.markers = unique;
        viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        Add(String),
        Fit(GeoBounds),
        View(f64, f64, u32),
    }

    #[derive(Default)]
    struct RecordingMap {
        calls: Vec<Call>,
    }

    impl MapWidget for RecordingMap {
        fn clear_markers(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn add_marker(&mut self, place: &GeoPlace) {
            self.calls.push(Call::Add(place.name.clone()));
        }

        fn fit_bounds(&mut self, bounds: GeoBounds) {
            self.calls.push(Call::Fit(bounds));
        }

        fn set_view(&mut self, latitude: f64, longitude: f64, zoom: u32) {
            self.calls.push(Call::View(latitude, longitude, zoom));
        }
    }

    fn place(name: &str, lat: f64, lon: f64, alt: f64) -> GeoPlace {
        GeoPlace::new(name, lat, lon, alt)
    }

    #[test]
    fn zoom_derives_from_altitude() {
        let cfg = MapConfig::default();
        assert_eq!(cfg.zoom_for_altitude(4500.0), 10);
        assert_eq!(cfg.zoom_for_altitude(5000.0), 11);
        assert_eq!(cfg.zoom_for_altitude(0.0), 1);
        assert_eq!(cfg.zoom_for_altitude(1e9), 21);
        assert_eq!(cfg.zoom_for_altitude(f64::NAN), 8);
    }

    #[test]
    fn no_places_resets_to_default_view() {
        let mut layer = MarkerLayer::default();
        let mut map = RecordingMap::default();
        let viewport = layer.sync(Vec::new(), &mut map);
        assert_eq!(
            viewport,
            Viewport::Center {
                latitude: 31.7683,
                longitude: 35.2137,
                zoom: 8
            }
        );
        assert_eq!(map.calls, vec![Call::Clear, Call::View(31.7683, 35.2137, 8)]);
    }

    #[test]
    fn single_place_centers_on_it() {
        let mut layer = MarkerLayer::default();
        let mut map = RecordingMap::default();
        layer.sync(
            vec![
                place("Hazor", 33.017181, 35.568048, 5400.0),
                place("Hazor", 33.017181, 35.568048, 5400.0),
            ],
            &mut map,
        );
        assert_eq!(
            map.calls,
            vec![
                Call::Clear,
                Call::Add("Hazor".into()),
                Call::View(33.017181, 35.568048, 12),
            ]
        );
        assert_eq!(layer.markers().len(), 1);
    }

    #[test]
    fn several_places_fit_bounds() {
        let mut layer = MarkerLayer::default();
        let mut map = RecordingMap::default();
        let viewport = layer.sync(
            vec![
                place("Seir", 30.734691, 35.606250, 5000.0),
                place("Baal-gad", 33.416159, 35.857256, 5000.0),
                place("Mount Hermon", 33.416159, 35.857256, 5000.0),
                place("Mount Halak", 30.916667, 34.833333, 5000.0),
            ],
            &mut map,
        );
        let Viewport::FitBounds(bounds) = viewport else {
            panic!("expected bounds, got {viewport:?}");
        };
        assert_eq!(bounds.south(), 30.734691);
        assert_eq!(bounds.north(), 33.416159);
        assert_eq!(bounds.west(), 34.833333);
        assert_eq!(bounds.east(), 35.857256);
        assert_eq!(
            map.calls[..4],
            [
                Call::Clear,
                Call::Add("Seir".into()),
                Call::Add("Baal-gad, Mount Hermon".into()),
                Call::Add("Mount Halak".into()),
            ]
        );
    }

    #[test]
    fn new_config_keeps_placed_markers() {
        let mut layer = MarkerLayer::default();
        let mut map = RecordingMap::default();
        layer.sync(vec![place("A", 1.0, 1.0, 900.0)], &mut map);

        layer.set_config(MapConfig {
            default_center: (40.0, -111.0),
            default_zoom: 5,
            ..MapConfig::default()
        });
        assert_eq!(layer.markers(), &[place("A", 1.0, 1.0, 900.0)]);

        map.calls.clear();
        let viewport = layer.sync(Vec::new(), &mut map);
        assert_eq!(
            viewport,
            Viewport::Center {
                latitude: 40.0,
                longitude: -111.0,
                zoom: 5
            }
        );
        assert_eq!(map.calls[0], Call::Clear);
    }

    #[test]
    fn resync_clears_previous_markers_first() {
        let mut layer = MarkerLayer::default();
        let mut map = RecordingMap::default();
        layer.sync(vec![place("A", 1.0, 1.0, 900.0)], &mut map);
        map.calls.clear();

        layer.sync(vec![place("B", 2.0, 2.0, 900.0)], &mut map);
        assert_eq!(map.calls[0], Call::Clear);
        assert_eq!(layer.markers(), &[place("B", 2.0, 2.0, 900.0)]);
    }
}
