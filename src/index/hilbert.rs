use crate::error::S2CellError;
use crate::index::constants::{
    FACE_COUNT, LOOKUP_BITS, MAX_LEVEL, POSITION_BITS, POSITION_CHUNKS, SWAP_MASK,
    SWAP_OR_INVERT_MASK,
};
use crate::index::identifier::{validate_grid, validate_level};
use crate::index::lookup::lookup_table;

const CHUNK_MASK: u32 = (1 << LOOKUP_BITS) - 1;

/// Maps face-local grid coordinates to the full 60-bit Hilbert curve position.
///
/// `i` and `j` are consumed four bits at a time, most significant chunk first,
/// starting from orientation `face & SWAP_MASK`. Each step of the lookup table
/// turns `iiiijjjjoo` into `ppppppppoo`, and the returned orientation feeds the
/// next step. The first chunk only ever yields 4 position bits, so the result is
/// one 4-bit group followed by seven 8-bit groups.
///
/// The caller passes i/j sized for its level (trailing bits beyond the level are
/// not shifted in), see [`level_position`].
///
/// # Errors
///
/// - [`S2CellError::InvalidFace`] - face is not 0-5
/// - [`S2CellError::InvalidConstructionArguments`] - i or j needs more than 30 bits
///
/// # Example
/// ```
/// use s2cell_rs::face_ij_to_position;
///
/// # fn main() -> Result<(), s2cell_rs::S2CellError> {
/// assert_eq!(face_ij_to_position(0, 0, 0)?, 0);
/// assert_eq!(face_ij_to_position(0, 1, 1)?, 2);
/// # Ok(())
/// # }
/// ```
pub fn face_ij_to_position(face: u8, i: u32, j: u32) -> Result<u64, S2CellError> {
    if face >= FACE_COUNT {
        return Err(S2CellError::InvalidFace(face));
    }
    validate_grid(i, j, MAX_LEVEL)?;
    Ok(encode_position(face, i, j))
}

/// Unchecked encoder behind [`face_ij_to_position`]. Face and grid are already valid.
pub(crate) fn encode_position(face: u8, i: u32, j: u32) -> u64 {
    let table = lookup_table();
    let mut bits = (face & SWAP_MASK) as usize;
    let mut position = 0u64;

    for k in (0..POSITION_CHUNKS).rev() {
        let shift = k * LOOKUP_BITS;
        bits |= (((i >> shift) & CHUNK_MASK) as usize) << (LOOKUP_BITS + 2);
        bits |= (((j >> shift) & CHUNK_MASK) as usize) << 2;
        bits = table.position_from_grid[bits] as usize;
        position = (position << (2 * LOOKUP_BITS)) | (bits >> 2) as u64;
        bits &= SWAP_OR_INVERT_MASK as usize;
    }

    position
}

/// Keeps the `2 * level` least significant bits of a full Hilbert position.
///
/// # Errors
///
/// - [`S2CellError::InvalidLevel`] - level is not 1-30
pub fn level_position(position: u64, level: u8) -> Result<u64, S2CellError> {
    let level = validate_level(u32::from(level))?;
    Ok(truncate_position(position, level))
}

pub(crate) fn truncate_position(position: u64, level: u8) -> u64 {
    position & ((1u64 << (2 * u32::from(level))) - 1)
}

/// Recovers full-resolution `(i, j)` from a face and a 60-bit Hilbert position.
///
/// The lookup runs backwards from the least significant chunk, so the orientation
/// at the end of the curve has to be guessed. Each of the four guesses is tried in
/// turn and the first one that lands on the face's starting orientation wins.
///
/// # Errors
///
/// - [`S2CellError::InvalidFace`] - face is not 0-5
/// - [`S2CellError::MalformedPositionString`] - position is wider than 60 bits
/// - [`S2CellError::UnreconstructableGrid`] - no orientation guess validates
pub fn position_to_face_ij(face: u8, position: u64) -> Result<(u32, u32), S2CellError> {
    if face >= FACE_COUNT {
        return Err(S2CellError::InvalidFace(face));
    }
    if position >> POSITION_BITS != 0 {
        return Err(S2CellError::MalformedPositionString(format!(
            "position {:#x} is wider than {} bits",
            position, POSITION_BITS
        )));
    }

    let table = lookup_table();
    let chunk_width = 2 * LOOKUP_BITS;

    for first_orientation in 0..=SWAP_OR_INVERT_MASK {
        let mut orientation = first_orientation as usize;
        let mut grid = 0usize;
        let mut i = 0u32;
        let mut j = 0u32;

        for k in 0..POSITION_CHUNKS {
            let chunk = ((position >> (k * chunk_width)) & 0xff) as usize;
            grid = table.grid_from_position[(chunk << 2) | orientation] as usize;
            i |= ((grid >> (LOOKUP_BITS + 2)) as u32) << (k * LOOKUP_BITS);
            j |= (((grid >> 2) as u32) & CHUNK_MASK) << (k * LOOKUP_BITS);
            orientation = grid & SWAP_OR_INVERT_MASK as usize;
        }

        // The leading chunk is only four bits wide, so it must re-encode to a
        // position with a clear upper nibble.
        let leading_fits =
            table.position_from_grid[grid] >> (LOOKUP_BITS + 2) == 0;
        if orientation == (face & SWAP_MASK) as usize && leading_fits {
            return Ok((i, j));
        }
    }

    tracing::warn!(face, position, "no starting orientation reconstructs the grid");
    Err(S2CellError::UnreconstructableGrid { face, position })
}

/// Parses a 60-character binary position string laid out as one 4-bit group
/// followed by seven 8-bit groups.
///
/// # Example
/// ```
/// use s2cell_rs::position_from_binary;
///
/// let bits = format!("{:060b}", 0b10u64);
/// assert_eq!(position_from_binary(&bits).unwrap(), 2);
/// ```
pub fn position_from_binary(binary: &str) -> Result<u64, S2CellError> {
    if binary.len() != POSITION_BITS as usize {
        return Err(S2CellError::MalformedPositionString(format!(
            "expected {} bits, got {}",
            POSITION_BITS,
            binary.len()
        )));
    }

    binary.bytes().try_fold(0u64, |acc, b| match b {
        b'0' => Ok(acc << 1),
        b'1' => Ok((acc << 1) | 1),
        _ => Err(S2CellError::MalformedPositionString(binary.to_string())),
    })
}

/// Full-width Hilbert position for a cell at `level`, with the odd-level swap applied.
///
/// Grid coordinates live at the level's own resolution and the encoder starts
/// from the face orientation. Every (0,0) quadrant above the level flips SWAP,
/// so at odd levels the traversal would otherwise run with i and j exchanged.
pub(crate) fn cell_position(face: u8, i: u32, j: u32, level: u8) -> u64 {
    let (i, j) = if level % 2 == 1 { (j, i) } else { (i, j) };
    truncate_position(encode_position(face, i, j), level)
}

/// Inverse of [`cell_position`].
pub(crate) fn cell_grid(face: u8, position: u64, level: u8) -> Result<(u32, u32), S2CellError> {
    debug_assert!((1..=MAX_LEVEL).contains(&level));
    let (i, j) = position_to_face_ij(face, position)?;
    Ok(if level % 2 == 1 { (j, i) } else { (i, j) })
}
