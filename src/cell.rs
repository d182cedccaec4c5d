use crate::coord::{
    Coordinate, Face, LatLng, LatLngPair, PointAdapter, grid_to_lat_lng, lat_lng_to_face_ij,
};
use crate::error::S2CellError;
use crate::index::cell_position;
use crate::index::identifier::{
    ParsedCell, format_compact_string, format_hex_token, looks_like_compact_string,
    looks_like_hex_token, looks_like_mysql_token, looks_like_standard_string,
    parse_compact_string, parse_hex_token, parse_mysql_token, parse_standard_string,
    position_to_digits, validate_grid, validate_level,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

/// The input forms an [`S2CellId`] can be built from.
///
/// | Variant            | Example                          |
/// |--------------------|----------------------------------|
/// | `StandardString`   | `1/22030333332200233030`         |
/// | `CompactString`    | `F1ij[885539,851769]@20`         |
/// | `HexToken`         | `3467ff41799`                    |
/// | `MysqlToken`       | `122030333332200233030`          |
/// | `LatLngLevel`      | `(24.935570, 121.69994)`, `20`   |
/// | `FaceIjLevel`      | `1`, `885539`, `851769`, `20`    |
/// | `FaceIjPairLevel`  | `1`, `[885539, 851769]`, `20`    |
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellInput<'a> {
    StandardString(&'a str),
    CompactString(&'a str),
    HexToken(&'a str),
    MysqlToken(&'a str),
    LatLngLevel { lat: f64, lng: f64, level: u8 },
    FaceIjLevel { face: u8, i: u32, j: u32, level: u8 },
    FaceIjPairLevel { face: u8, ij: [u32; 2], level: u8 },
}

/// A single cell of the cube-projected Hilbert curve.
///
/// Each `S2CellId` is identified by its face, its (i, j) grid position and its level.
/// Cells built from a point keep that point; the cell centre is derived on first
/// read and cached.
///
/// # Example
///
/// ```
/// use s2cell_rs::S2CellId;
///
/// # fn main() -> Result<(), s2cell_rs::S2CellError> {
/// let cell = S2CellId::from_lat_lng(&(24.93557, 121.69994), 20)?;
/// println!("{}", cell);
/// println!("{}", cell.to_token());
///
/// let restored = S2CellId::from_token(&cell.to_token())?;
/// assert_eq!(cell, restored);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct S2CellId {
    face: Face,
    i: u32,
    j: u32,
    level: u8,
    origin: Option<LatLng>,
    center: OnceLock<LatLng>,
}

impl S2CellId {
    fn from_grid(face: Face, i: u32, j: u32, level: u8) -> Self {
        Self {
            face,
            i,
            j,
            level,
            origin: None,
            center: OnceLock::new(),
        }
    }

    fn from_parsed(parsed: ParsedCell) -> Self {
        Self::from_grid(parsed.face, parsed.i, parsed.j, parsed.level)
    }

    /// Build a cell from any of the recognised input forms.
    ///
    /// # Example
    /// ```
    /// use s2cell_rs::{CellInput, S2CellId};
    ///
    /// # fn main() -> Result<(), s2cell_rs::S2CellError> {
    /// let a = S2CellId::new(CellInput::StandardString("0/2"))?;
    /// let b = S2CellId::new(CellInput::FaceIjLevel { face: 0, i: 1, j: 1, level: 1 })?;
    /// assert_eq!(a, b);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(input: CellInput<'_>) -> Result<Self, S2CellError> {
        match input {
            CellInput::StandardString(s) => Self::from_standard_string(s),
            CellInput::CompactString(s) => Self::from_compact_string(s),
            CellInput::HexToken(s) => Self::from_token(s),
            CellInput::MysqlToken(s) => Self::from_mysql_token(s),
            CellInput::LatLngLevel { lat, lng, level } => Self::from_degrees(lat, lng, level),
            CellInput::FaceIjLevel { face, i, j, level } => Self::from_face_ij(face, i, j, level),
            CellInput::FaceIjPairLevel { face, ij, level } => {
                Self::from_face_ij_pair(face, ij, level)
            }
        }
    }

    /// Create a cell from a standard string such as `1/22030333332200233030`.
    pub fn from_standard_string(s: &str) -> Result<Self, S2CellError> {
        parse_standard_string(s).map(Self::from_parsed)
    }

    /// Create a cell from a compact string such as `F1ij[885539,851769]@20`.
    pub fn from_compact_string(s: &str) -> Result<Self, S2CellError> {
        parse_compact_string(s).map(Self::from_parsed)
    }

    /// Create a cell from a hex token such as `3467ff41799`.
    pub fn from_token(token: &str) -> Result<Self, S2CellError> {
        parse_hex_token(token).map(Self::from_parsed)
    }

    /// Create a cell from a mysql token such as `122030333332200233030`.
    pub fn from_mysql_token(token: &str) -> Result<Self, S2CellError> {
        parse_mysql_token(token).map(Self::from_parsed)
    }

    /// Create a cell containing a point.
    ///
    /// # Example
    /// ```
    /// use s2cell_rs::{LatLng, S2CellId};
    /// use geo_types::Point;
    ///
    /// # fn main() -> Result<(), s2cell_rs::S2CellError> {
    /// // From (lat, lng) tuple
    /// let a = S2CellId::from_lat_lng(&(24.93557, 121.69994), 20)?;
    /// // From LatLng
    /// let b = S2CellId::from_lat_lng(&LatLng::new(24.93557, 121.69994), 20)?;
    /// // From Point (x = lng, y = lat)
    /// let c = S2CellId::from_lat_lng(&Point::new(121.69994, 24.93557), 20)?;
    /// assert_eq!(a, b);
    /// assert_eq!(b, c);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_lat_lng(coord: &impl Coordinate, level: u8) -> Result<Self, S2CellError> {
        Self::from_degrees(coord.lat(), coord.lng(), level)
    }

    /// Create a cell containing the point `(lat, lng)` given in degrees.
    pub fn from_degrees(lat: f64, lng: f64, level: u8) -> Result<Self, S2CellError> {
        let (face, i, j) = lat_lng_to_face_ij(lat, lng, level)?;
        Ok(Self {
            origin: Some(LatLng::new(lat, lng)),
            ..Self::from_grid(face, i, j, level)
        })
    }

    /// Create a cell from its face, grid coordinates and level.
    pub fn from_face_ij(face: u8, i: u32, j: u32, level: u8) -> Result<Self, S2CellError> {
        let level = validate_level(u32::from(level))?;
        let face = Face::try_from(face)?;
        validate_grid(i, j, level)?;
        Ok(Self::from_grid(face, i, j, level))
    }

    /// Create a cell from its face, an `[i, j]` pair and level.
    pub fn from_face_ij_pair(face: u8, ij: [u32; 2], level: u8) -> Result<Self, S2CellError> {
        let [i, j] = ij;
        Self::from_face_ij(face, i, j, level)
    }

    /// Face index, 0-5.
    pub fn face(&self) -> u8 {
        self.face.index()
    }

    pub fn cube_face(&self) -> Face {
        self.face
    }

    pub fn i(&self) -> u32 {
        self.i
    }

    pub fn j(&self) -> u32 {
        self.j
    }

    /// Level (1-30), where higher values mean smaller cells
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Position along the face's Hilbert curve, `2 * level` bits wide.
    pub fn position(&self) -> u64 {
        cell_position(self.face.index(), self.i, self.j, self.level)
    }

    /// The point this cell was built from, if any.
    pub fn origin(&self) -> Option<LatLng> {
        self.origin
    }

    /// Returns the cell centre, computing and caching it on first call.
    pub fn lat_lng(&self) -> LatLng {
        *self.center.get_or_init(|| {
            grid_to_lat_lng(self.face, self.i, self.j, self.level, 0.5, 0.5)
        })
    }

    /// Returns the cell centre through the given point adapter.
    pub fn lat_lng_with<A: PointAdapter>(&self, adapter: &A) -> A::Point {
        let center = self.lat_lng();
        adapter.make_point(center.lat, center.lng)
    }

    /// The currently cached coordinate: the centre once derived, else the origin point.
    pub fn cached_lat_lng(&self) -> Option<LatLng> {
        self.center.get().copied().or(self.origin)
    }

    /// Whether the cached coordinate is the cell centre rather than a supplied point.
    pub fn is_lat_lng_cell_center(&self) -> bool {
        self.center.get().is_some()
    }

    /// Returns the four corners in (offset_i, offset_j) order (0,0), (0,1), (1,0), (1,1).
    pub fn corner_lat_lngs(&self) -> [LatLng; 4] {
        self.corners_with(&LatLngPair)
    }

    /// Returns the four corners through the given point adapter.
    pub fn corners_with<A: PointAdapter>(&self, adapter: &A) -> [A::Point; 4] {
        [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)].map(|(offset_i, offset_j)| {
            let corner =
                grid_to_lat_lng(self.face, self.i, self.j, self.level, offset_i, offset_j);
            adapter.make_point(corner.lat, corner.lng)
        })
    }

    /// Renders `face/digits`, one base-4 digit per level.
    pub fn to_standard_string(&self) -> String {
        format!("{}/{}", self.face, position_to_digits(self.position(), self.level))
    }

    /// Renders the standard string without the slash.
    pub fn to_mysql_token(&self) -> String {
        format!("{}{}", self.face, position_to_digits(self.position(), self.level))
    }

    /// Renders the hex token (face, position and a terminator bit).
    pub fn to_token(&self) -> String {
        format_hex_token(self.face, self.position(), self.level)
    }

    /// Renders `F<face>ij[<i>,<j>]@<level>`.
    pub fn to_compact_string(&self) -> String {
        format_compact_string(self.face, self.i, self.j, self.level)
    }
}

impl PartialEq for S2CellId {
    fn eq(&self, other: &Self) -> bool {
        (self.face, self.i, self.j, self.level) == (other.face, other.i, other.j, other.level)
    }
}

impl Eq for S2CellId {}

impl Hash for S2CellId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.face, self.i, self.j, self.level).hash(state);
    }
}

impl fmt::Display for S2CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_standard_string())
    }
}

/// Detects the string form in order: standard string, compact string, hex token
/// (faces 1-5 only), mysql token.
impl FromStr for S2CellId {
    type Err = S2CellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let result = if looks_like_standard_string(s) {
            Self::from_standard_string(s)
        } else if looks_like_compact_string(s) {
            Self::from_compact_string(s)
        } else if looks_like_hex_token(s) {
            Self::from_token(s)
        } else if looks_like_mysql_token(s) {
            Self::from_mysql_token(s)
        } else {
            Err(S2CellError::MalformedToken(s.to_string()))
        };

        if let Err(e) = &result {
            tracing::debug!(input = s, error = %e, "could not parse cell id");
        }
        result
    }
}

impl Serialize for S2CellId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_standard_string())
    }
}

impl<'de> Deserialize<'de> for S2CellId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_standard_string(&s).map_err(serde::de::Error::custom)
    }
}
