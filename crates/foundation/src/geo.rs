/// Tolerance below which two coordinates are treated as the same location.
pub const COORD_EPSILON_DEG: f64 = 1e-7;

/// A named point on the map, as annotated in chapter content.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Suggested view altitude in meters (drives the zoom for a lone marker).
    pub altitude: f64,
}

impl GeoPlace {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            altitude,
        }
    }

    pub fn same_location(&self, other: &GeoPlace) -> bool {
        similar(self.latitude, other.latitude) && similar(self.longitude, other.longitude)
    }

    /// Folds `name` into this place's label unless it is already present
    /// (case-insensitive substring).
    fn absorb_name(&mut self, name: &str) {
        if self.name.to_lowercase().contains(&name.to_lowercase()) {
            return;
        }
        self.name.push_str(", ");
        self.name.push_str(name);
    }
}

fn similar(a: f64, b: f64) -> bool {
    (a - b).abs() < COORD_EPSILON_DEG
}

/// Merges places that share a location, preserving first-seen order.
///
/// The first occurrence keeps its coordinates and altitude; later coincident
/// places only contribute their names. Linear scan per point, which is fine
/// for the handful of pins a chapter carries.
pub fn dedupe<I>(places: I) -> Vec<GeoPlace>
where
    I: IntoIterator<Item = GeoPlace>,
{
    let mut unique: Vec<GeoPlace> = Vec::new();
    for place in places {
        match unique.iter_mut().find(|u| u.same_location(&place)) {
            Some(existing) => existing.absorb_name(&place.name),
            None => unique.push(place),
        }
    }
    unique
}
