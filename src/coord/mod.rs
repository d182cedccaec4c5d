mod projection;

pub(crate) use projection::grid_to_lat_lng;
pub use projection::{
    Face, face_ij_to_lat_lng, face_uv_to_xyz, face_xyz_to_uv, lat_lng_to_face_ij, lat_lng_to_xyz,
    st_to_uv, uv_to_st, xyz_to_face_uv, xyz_to_lat_lng,
};

use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Trait for types that can provide a latitude/longitude pair.
///
/// Implemented for `(f64, f64)` tuples read as `(lat, lng)`, [`LatLng`], and
/// `geo_types::Point<f64>` read as `x = lng`, `y = lat`.
pub trait Coordinate {
    /// Returns the latitude in degrees.
    fn lat(&self) -> f64;
    /// Returns the longitude in degrees.
    fn lng(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }
    fn lng(&self) -> f64 {
        self.1
    }
}

impl Coordinate for LatLng {
    fn lat(&self) -> f64 {
        self.lat
    }
    fn lng(&self) -> f64 {
        self.lng
    }
}

impl Coordinate for Point<f64> {
    fn lat(&self) -> f64 {
        self.y()
    }
    fn lng(&self) -> f64 {
        self.x()
    }
}

/// Builds the point type returned when reading coordinates off a cell.
///
/// Pick an adapter once and hand it to [`S2CellId::lat_lng_with`] or
/// [`S2CellId::corners_with`].
///
/// [`S2CellId::lat_lng_with`]: crate::S2CellId::lat_lng_with
/// [`S2CellId::corners_with`]: crate::S2CellId::corners_with
pub trait PointAdapter {
    type Point;

    fn make_point(&self, lat: f64, lng: f64) -> Self::Point;
}

/// Default adapter, returns a plain [`LatLng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LatLngPair;

impl PointAdapter for LatLngPair {
    type Point = LatLng;

    fn make_point(&self, lat: f64, lng: f64) -> LatLng {
        LatLng::new(lat, lng)
    }
}

/// Returns `geo_types::Point<f64>` with `x = lng` and `y = lat`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoPoint;

impl PointAdapter for GeoPoint {
    type Point = Point<f64>;

    fn make_point(&self, lat: f64, lng: f64) -> Point<f64> {
        Point::new(lng, lat)
    }
}

/// Wraps any `Fn(lat, lng) -> P` as an adapter.
///
/// # Example
/// ```
/// use s2cell_rs::{MakePoint, S2CellId};
///
/// # fn main() -> Result<(), s2cell_rs::S2CellError> {
/// let cell = S2CellId::from_lat_lng(&(24.93557, 121.69994), 20)?;
/// let label = MakePoint(|lat: f64, lng: f64| format!("{lat:.2},{lng:.2}"));
/// assert_eq!(cell.lat_lng_with(&label), "24.94,121.70");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MakePoint<F>(pub F);

impl<F, P> PointAdapter for MakePoint<F>
where
    F: Fn(f64, f64) -> P,
{
    type Point = P;

    fn make_point(&self, lat: f64, lng: f64) -> P {
        (self.0)(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_trait_tuple() {
        let tuple = (51.5, -0.1);
        assert_eq!(tuple.lat(), 51.5);
        assert_eq!(tuple.lng(), -0.1);
    }

    #[test]
    fn test_coordinate_trait_point() {
        let point = Point::new(-0.1, 51.5);
        assert_eq!(point.lat(), 51.5);
        assert_eq!(point.lng(), -0.1);
    }

    #[test]
    fn test_adapters() {
        assert_eq!(LatLngPair.make_point(1.0, 2.0), LatLng::new(1.0, 2.0));
        assert_eq!(GeoPoint.make_point(1.0, 2.0), Point::new(2.0, 1.0));
        assert_eq!(MakePoint(|lat: f64, lng: f64| lat + lng).make_point(1.0, 2.0), 3.0);
    }
}
