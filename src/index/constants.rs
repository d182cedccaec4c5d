/// Finest resolution level (cells are 2^30 x 2^30 per face)
pub const MAX_LEVEL: u8 = 30;

/// Number of cube faces
pub const FACE_COUNT: u8 = 6;

/// Bits of i and j consumed per lookup table step
pub const LOOKUP_BITS: u32 = 4;

/// Orientation bit: the quadrant order has i and j exchanged
pub const SWAP_MASK: u8 = 0x01;

/// Orientation bit: the quadrant order is traversed from the far corner
pub const INVERT_MASK: u8 = 0x02;

/// Both orientation bits, used to carry orientation between lookup steps
pub const SWAP_OR_INVERT_MASK: u8 = SWAP_MASK | INVERT_MASK;

/// Entries in each direction of the lookup table: (4 bits i, 4 bits j, 2 bits orientation)
pub(crate) const LOOKUP_SIZE: usize = 1 << (2 * LOOKUP_BITS + 2);

/// Lookup steps needed to cover a full-resolution i/j pair
pub(crate) const POSITION_CHUNKS: u32 = 8;

/// Width of the full Hilbert position: one 4-bit chunk followed by seven 8-bit chunks
pub const POSITION_BITS: u32 = 4 + 8 * 7;

/// Width of the face prefix in a hex token
pub(crate) const FACE_BITS: u32 = 3;

/// Longest hex token (face, 60 position bits and the terminator)
pub(crate) const MAX_TOKEN_LEN: usize = 16;
