use crate::coord::LatLng;
use crate::error::S2CellError;
use crate::index::identifier::{validate_grid, validate_level};
use serde::{Deserialize, Serialize};

/// One of the six faces of the cube circumscribing the unit sphere.
///
/// Faces 0-2 are centred on the positive x, y and z axes and faces 3-5 on the
/// negative ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Face {
    PosX = 0,
    PosY = 1,
    PosZ = 2,
    NegX = 3,
    NegY = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::PosY,
        Face::PosZ,
        Face::NegX,
        Face::NegY,
        Face::NegZ,
    ];

    /// Face index, 0-5.
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Face {
    type Error = S2CellError;

    fn try_from(face: u8) -> Result<Self, Self::Error> {
        Face::ALL
            .get(face as usize)
            .copied()
            .ok_or(S2CellError::InvalidFace(face))
    }
}

impl From<Face> for u8 {
    fn from(face: Face) -> u8 {
        face.index()
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Converts degrees to a point on the unit sphere.
pub fn lat_lng_to_xyz(lat: f64, lng: f64) -> [f64; 3] {
    let phi = lat.to_radians();
    let theta = lng.to_radians();
    let cos_phi = phi.cos();
    [theta.cos() * cos_phi, theta.sin() * cos_phi, phi.sin()]
}

fn largest_abs_component([x, y, z]: [f64; 3]) -> usize {
    let (ax, ay, az) = (x.abs(), y.abs(), z.abs());
    if ax > ay {
        if ax > az { 0 } else { 2 }
    } else if ay > az {
        1
    } else {
        2
    }
}

/// Picks the face the point projects onto and returns its face-local (u, v).
pub fn xyz_to_face_uv(xyz: [f64; 3]) -> (Face, f64, f64) {
    let axis = largest_abs_component(xyz);
    let face = if xyz[axis] < 0.0 {
        Face::ALL[axis + 3]
    } else {
        Face::ALL[axis]
    };
    let (u, v) = face_xyz_to_uv(face, xyz);
    (face, u, v)
}

/// Projects a point onto the plane of the given face.
pub fn face_xyz_to_uv(face: Face, [x, y, z]: [f64; 3]) -> (f64, f64) {
    match face {
        Face::PosX => (y / x, z / x),
        Face::PosY => (-x / y, z / y),
        Face::PosZ => (-x / z, -y / z),
        Face::NegX => (z / x, y / x),
        Face::NegY => (z / y, -x / y),
        Face::NegZ => (-y / z, -x / z),
    }
}

/// Quadratic warp from u (or v) to s (or t), equalising cell areas.
pub fn uv_to_st(u: f64) -> f64 {
    if u >= 0.0 {
        0.5 * (1.0 + 3.0 * u).sqrt()
    } else {
        1.0 - 0.5 * (1.0 - 3.0 * u).sqrt()
    }
}

/// Quantises s (or t) to a grid index at `level`.
pub(crate) fn st_to_ij(s: f64, level: u8) -> u32 {
    let max_size = (1u64 << level) as f64;
    (s * max_size).floor().clamp(0.0, max_size - 1.0) as u32
}

/// Position of `i` plus `offset` (0.5 for the cell centre) in s/t space.
pub(crate) fn ij_to_st(i: u32, level: u8, offset: f64) -> f64 {
    let max_size = (1u64 << level) as f64;
    (f64::from(i) + offset) / max_size
}

/// Inverse of [`uv_to_st`].
pub fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1.0 / 3.0) * (4.0 * s * s - 1.0)
    } else {
        (1.0 / 3.0) * (1.0 - 4.0 * (1.0 - s) * (1.0 - s))
    }
}

/// Lifts face-local (u, v) back to a (non unit) point in space.
pub fn face_uv_to_xyz(face: Face, u: f64, v: f64) -> [f64; 3] {
    match face {
        Face::PosX => [1.0, u, v],
        Face::PosY => [-u, 1.0, v],
        Face::PosZ => [-u, -v, 1.0],
        Face::NegX => [-1.0, -v, -u],
        Face::NegY => [v, -1.0, -u],
        Face::NegZ => [v, u, -1.0],
    }
}

pub fn xyz_to_lat_lng([x, y, z]: [f64; 3]) -> LatLng {
    let lat = z.atan2((x * x + y * y).sqrt()).to_degrees();
    let lng = y.atan2(x).to_degrees();
    LatLng::new(lat, lng)
}

/// Runs the forward pipeline: lat/lng -> xyz -> (face, u, v) -> (s, t) -> (i, j).
///
/// # Errors
///
/// - [`S2CellError::InvalidLevel`] - level is not 1-30
/// - [`S2CellError::InvalidConstructionArguments`] - lat or lng is not finite
///
/// # Example
/// ```
/// use s2cell_rs::{Face, lat_lng_to_face_ij};
///
/// # fn main() -> Result<(), s2cell_rs::S2CellError> {
/// let (face, i, j) = lat_lng_to_face_ij(0.0, 0.0, 1)?;
/// assert_eq!((face, i, j), (Face::PosX, 1, 1));
/// # Ok(())
/// # }
/// ```
pub fn lat_lng_to_face_ij(lat: f64, lng: f64, level: u8) -> Result<(Face, u32, u32), S2CellError> {
    let level = validate_level(u32::from(level))?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(S2CellError::InvalidConstructionArguments(format!(
            "lat/lng ({}, {}) must be finite",
            lat, lng
        )));
    }

    let (face, u, v) = xyz_to_face_uv(lat_lng_to_xyz(lat, lng));
    let i = st_to_ij(uv_to_st(u), level);
    let j = st_to_ij(uv_to_st(v), level);
    Ok((face, i, j))
}

/// Runs the inverse pipeline for a point inside cell (face, i, j).
///
/// Offsets of 0.5 give the cell centre, offsets of 0 or 1 give its corners.
///
/// # Errors
///
/// - [`S2CellError::InvalidLevel`] - level is not 1-30
/// - [`S2CellError::InvalidConstructionArguments`] - i or j is outside the level's grid
pub fn face_ij_to_lat_lng(
    face: Face,
    i: u32,
    j: u32,
    level: u8,
    offset_i: f64,
    offset_j: f64,
) -> Result<LatLng, S2CellError> {
    let level = validate_level(u32::from(level))?;
    validate_grid(i, j, level)?;
    Ok(grid_to_lat_lng(face, i, j, level, offset_i, offset_j))
}

/// [`face_ij_to_lat_lng`] for a cell whose level and grid are already checked.
pub(crate) fn grid_to_lat_lng(
    face: Face,
    i: u32,
    j: u32,
    level: u8,
    offset_i: f64,
    offset_j: f64,
) -> LatLng {
    let u = st_to_uv(ij_to_st(i, level, offset_i));
    let v = st_to_uv(ij_to_st(j, level, offset_j));
    xyz_to_lat_lng(face_uv_to_xyz(face, u, v))
}
