/// Latitude/longitude bounding box in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoBounds {
    /// `[lat, lon]` of the south-west corner.
    pub min: [f64; 2],
    /// `[lat, lon]` of the north-east corner.
    pub max: [f64; 2],
}

impl GeoBounds {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        GeoBounds { min, max }
    }

    pub fn from_point(latitude: f64, longitude: f64) -> Self {
        GeoBounds {
            min: [latitude, longitude],
            max: [latitude, longitude],
        }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut iter = points.into_iter();
        let (lat, lon) = iter.next()?;
        let mut bounds = GeoBounds::from_point(lat, lon);
        for (lat, lon) in iter {
            bounds.extend(lat, lon);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, latitude: f64, longitude: f64) {
        self.min[0] = self.min[0].min(latitude);
        self.min[1] = self.min[1].min(longitude);
        self.max[0] = self.max[0].max(latitude);
        self.max[1] = self.max[1].max(longitude);
    }

    pub fn south(&self) -> f64 {
        self.min[0]
    }

    pub fn west(&self) -> f64 {
        self.min[1]
    }

    pub fn north(&self) -> f64 {
        self.max[0]
    }

    pub fn east(&self) -> f64 {
        self.max[1]
    }

    pub fn center(&self) -> (f64, f64) {
        (
            0.5 * (self.min[0] + self.max[0]),
            0.5 * (self.min[1] + self.max[1]),
        )
    }
}
