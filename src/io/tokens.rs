use crate::cell::S2CellId;
use crate::coord::Coordinate;
use crate::error::S2CellError;
use rayon::prelude::*;

/// Trait for converting collections of [`S2CellId`]s to their string forms.
///
/// Implemented for `[S2CellId]` and so also usable on `Vec<S2CellId>`.
pub trait S2CellsToTokens {
    /// Hex tokens, in input order.
    fn to_tokens(&self) -> Vec<String>;
    /// Standard `face/digits` strings, in input order.
    fn to_standard_strings(&self) -> Vec<String>;
    /// Mysql tokens, in input order.
    fn to_mysql_tokens(&self) -> Vec<String>;
}

impl S2CellsToTokens for [S2CellId] {
    fn to_tokens(&self) -> Vec<String> {
        self.par_iter().map(S2CellId::to_token).collect()
    }

    fn to_standard_strings(&self) -> Vec<String> {
        self.par_iter().map(S2CellId::to_standard_string).collect()
    }

    fn to_mysql_tokens(&self) -> Vec<String> {
        self.par_iter().map(S2CellId::to_mysql_token).collect()
    }
}

/// Builds one cell per coordinate at `level`, in parallel.
///
/// Fails with the first error encountered if any coordinate is rejected.
///
/// # Example
/// ```
/// use s2cell_rs::{S2CellsToTokens, cells_from_coordinates};
///
/// # fn main() -> Result<(), s2cell_rs::S2CellError> {
/// let cells = cells_from_coordinates(&[(0.0, 0.0), (51.5, -0.1)], 2)?;
/// assert_eq!(cells.to_standard_strings()[0], "0/20");
/// # Ok(())
/// # }
/// ```
pub fn cells_from_coordinates<C>(coords: &[C], level: u8) -> Result<Vec<S2CellId>, S2CellError>
where
    C: Coordinate + Sync,
{
    coords
        .par_iter()
        .map(|coord| S2CellId::from_lat_lng(coord, level))
        .collect()
}
