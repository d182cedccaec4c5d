pub mod tokens;

pub use tokens::{S2CellsToTokens, cells_from_coordinates};
