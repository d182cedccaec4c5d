pub mod constants;
mod hilbert;
pub(crate) mod identifier;
mod lookup;

pub use constants::{
    FACE_COUNT, INVERT_MASK, LOOKUP_BITS, MAX_LEVEL, POSITION_BITS, SWAP_MASK,
    SWAP_OR_INVERT_MASK,
};
pub use hilbert::{face_ij_to_position, level_position, position_from_binary, position_to_face_ij};
pub(crate) use hilbert::cell_position;
pub use lookup::init_lookup_table;
