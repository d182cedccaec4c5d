//! # s2cell-rs
//!
//! Converts between latitude/longitude and cells of a cube-projected Hilbert
//! curve, and writes those cells as short sortable strings for range queries.
//!
//! There are currently two main entry points.
//!
//! ### 1. `S2CellId` - Single Cell Operations
//!
//! ```
//! use s2cell_rs::S2CellId;
//!
//! # fn main() -> Result<(), s2cell_rs::S2CellError> {
//! let cell = S2CellId::from_lat_lng(&(24.93557, 121.69994), 20)?;
//! println!("{}", cell);                   // 1/... standard string
//! println!("{}", cell.to_mysql_token());  // 1... without the slash
//! println!("{}", cell.to_token());        // hex token
//! let centre = cell.lat_lng();
//! # Ok(())
//! # }
//! ```
//!
//! Every string form parses back to the same cell:
//!
//! ```
//! use s2cell_rs::{CellInput, S2CellId};
//!
//! # fn main() -> Result<(), s2cell_rs::S2CellError> {
//! let cell = S2CellId::new(CellInput::FaceIjLevel { face: 1, i: 885539, j: 851769, level: 20 })?;
//! assert_eq!(S2CellId::from_token(&cell.to_token())?, cell);
//! assert_eq!(S2CellId::from_mysql_token(&cell.to_mysql_token())?, cell);
//! assert_eq!(cell.to_string().parse::<S2CellId>()?, cell);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `cells_from_coordinates` - Collections of Cells
//!
//! ```
//! use s2cell_rs::{S2CellsToTokens, cells_from_coordinates};
//!
//! # fn main() -> Result<(), s2cell_rs::S2CellError> {
//! let cells = cells_from_coordinates(&[(51.5, -0.12), (48.85, 2.35)], 16)?;
//! let tokens = cells.to_tokens();
//! assert_eq!(tokens.len(), 2);
//! # Ok(())
//! # }
//! ```
//!

pub mod cell;
pub mod coord;
pub mod error;
pub mod index;
pub mod io;

pub use cell::{CellInput, S2CellId};
pub use coord::{
    Coordinate, Face, GeoPoint, LatLng, LatLngPair, MakePoint, PointAdapter, face_ij_to_lat_lng,
    face_uv_to_xyz, face_xyz_to_uv, lat_lng_to_face_ij, lat_lng_to_xyz, st_to_uv, uv_to_st,
    xyz_to_face_uv, xyz_to_lat_lng,
};
pub use error::S2CellError;
pub use index::{
    FACE_COUNT, MAX_LEVEL, POSITION_BITS, face_ij_to_position, init_lookup_table,
    level_position, position_from_binary, position_to_face_ij,
};
pub use io::{S2CellsToTokens, cells_from_coordinates};

pub use geo_types;

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::point;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), S2CellError> {
        init_lookup_table();

        let cell = S2CellId::from_lat_lng(&(24.93557, 121.69994), 20)?;
        assert_eq!(cell.face(), 1);
        assert_eq!(cell.level(), 20);

        let token = cell.to_token();
        let standard = cell.to_standard_string();
        assert_eq!(standard.len(), 2 + 20);
        assert_eq!(token.len(), 11);

        let restored = S2CellId::from_token(&token)?;
        assert_eq!(restored, cell);
        assert_eq!(restored.to_standard_string(), standard);
        Ok(())
    }

    #[test]
    fn test_using_geo_types_points() -> Result<(), S2CellError> {
        let pt = point! { x: -0.1278, y: 51.5074 };
        let from_point = S2CellId::from_lat_lng(&pt, 14)?;
        let from_tuple = S2CellId::from_lat_lng(&(51.5074, -0.1278), 14)?;
        assert_eq!(from_point, from_tuple);

        let centre = from_point.lat_lng_with(&GeoPoint);
        assert!((centre.x() + 0.1278).abs() < 0.01);
        assert!((centre.y() - 51.5074).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn test_position_pipeline() -> Result<(), S2CellError> {
        let cell = S2CellId::from_face_ij(3, 1000, 2000, 12)?;
        let position = level_position(face_ij_to_position(3, 1000, 2000)?, 12)?;
        assert_eq!(cell.position(), position);

        let bits = format!("{:060b}", position);
        let (i, j) = position_to_face_ij(3, position_from_binary(&bits)?)?;
        assert_eq!((i, j), (1000, 2000));
        Ok(())
    }

    #[test]
    fn test_token_ordering_follows_curve() -> Result<(), S2CellError> {
        // Same face and level: token order matches Hilbert position order.
        let mut cells: Vec<S2CellId> = (0..16)
            .flat_map(|i| (0..16).map(move |j| (i, j)))
            .map(|(i, j)| S2CellId::from_face_ij(2, i, j, 4))
            .collect::<Result<_, _>>()?;
        cells.sort_by_key(S2CellId::position);

        let tokens = cells.to_tokens();
        let mut sorted = tokens.clone();
        sorted.sort();
        assert_eq!(tokens, sorted);
        Ok(())
    }
}
