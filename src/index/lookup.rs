use crate::index::constants::{
    INVERT_MASK, LOOKUP_BITS, LOOKUP_SIZE, SWAP_MASK, SWAP_OR_INVERT_MASK,
};
use std::sync::OnceLock;

/// Quadrant visit order for each orientation, as packed `(i << 1) | j`.
///
/// | Orientation        | Order                        |
/// |--------------------|------------------------------|
/// | canonical          | (0,0), (0,1), (1,1), (1,0)   |
/// | axes swapped       | (0,0), (1,0), (1,1), (0,1)   |
/// | bits inverted      | (1,1), (1,0), (0,0), (0,1)   |
/// | swapped & inverted | (1,1), (0,1), (0,0), (1,0)   |
const POS_TO_IJ: [[u8; 4]; 4] = [[0, 1, 3, 2], [0, 2, 3, 1], [3, 2, 0, 1], [3, 1, 0, 2]];

/// Orientation change applied when descending into the k-th visited quadrant.
const POS_TO_ORIENTATION: [u8; 4] = [SWAP_MASK, 0, 0, SWAP_OR_INVERT_MASK];

/// Bijection between 4-bit i/j chunks and 4-level Hilbert position chunks.
///
/// Both tables carry the curve orientation in their two low bits:
///
/// - `position_from_grid[(i << 4 | j) << 2 | orientation] = position << 2 | next_orientation`
/// - `grid_from_position` is its exact inverse.
pub(crate) struct LookupTable {
    pub(crate) position_from_grid: [u16; LOOKUP_SIZE],
    pub(crate) grid_from_position: [u16; LOOKUP_SIZE],
}

struct Step {
    depth: u32,
    i: u16,
    j: u16,
    position: u16,
    orientation: u8,
}

impl LookupTable {
    fn build() -> Self {
        let mut position_from_grid = [0u16; LOOKUP_SIZE];

        for start in [0, SWAP_MASK, INVERT_MASK, SWAP_OR_INVERT_MASK] {
            let mut pending = vec![Step {
                depth: 0,
                i: 0,
                j: 0,
                position: 0,
                orientation: start,
            }];

            while let Some(step) = pending.pop() {
                if step.depth == LOOKUP_BITS {
                    let ij = (step.i << LOOKUP_BITS) | step.j;
                    position_from_grid[((ij << 2) | start as u16) as usize] =
                        (step.position << 2) | step.orientation as u16;
                    continue;
                }

                let order = POS_TO_IJ[step.orientation as usize];
                for (k, &quadrant) in order.iter().enumerate() {
                    pending.push(Step {
                        depth: step.depth + 1,
                        i: (step.i << 1) | (quadrant >> 1) as u16,
                        j: (step.j << 1) | (quadrant & 1) as u16,
                        position: (step.position << 2) | k as u16,
                        orientation: step.orientation ^ POS_TO_ORIENTATION[k],
                    });
                }
            }
        }

        let mut grid_from_position = [0u16; LOOKUP_SIZE];
        for (index, &value) in position_from_grid.iter().enumerate() {
            grid_from_position[value as usize] = index as u16;
        }

        tracing::debug!(entries = LOOKUP_SIZE, "built Hilbert lookup table");

        Self {
            position_from_grid,
            grid_from_position,
        }
    }
}

static LOOKUP_TABLE: OnceLock<LookupTable> = OnceLock::new();

/// Returns the process-wide lookup table, building it on first use.
pub(crate) fn lookup_table() -> &'static LookupTable {
    LOOKUP_TABLE.get_or_init(LookupTable::build)
}

/// Builds the process-wide Hilbert lookup table now rather than on first use.
///
/// The table is immutable once built, so this is only useful to move the
/// one-time cost out of a latency sensitive path. Calling it again is a no-op.
pub fn init_lookup_table() {
    lookup_table();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_are_inverse() {
        let table = lookup_table();
        for x in 0..LOOKUP_SIZE {
            let forward = table.position_from_grid[x] as usize;
            assert_eq!(table.grid_from_position[forward] as usize, x);
        }
    }

    #[test]
    fn test_forward_table_is_bijective() {
        let table = lookup_table();
        let values: HashSet<u16> = table.position_from_grid.iter().copied().collect();
        assert_eq!(values.len(), LOOKUP_SIZE);
        assert!(values.iter().all(|&v| (v as usize) < LOOKUP_SIZE));
    }

    #[test]
    fn test_origin_chunk_stays_at_origin() {
        let table = lookup_table();
        // Four (0,0) quadrants flip SWAP four times, so the orientation comes back.
        assert_eq!(table.position_from_grid[0], 0);
        assert_eq!(table.position_from_grid[SWAP_MASK as usize], SWAP_MASK as u16);
    }

    #[test]
    fn test_known_entry() {
        let table = lookup_table();
        // i = 0001, j = 0001 from the canonical orientation ends in the third
        // quadrant of a swapped frame.
        let index = ((1 << LOOKUP_BITS) | 1) << 2;
        assert_eq!(table.position_from_grid[index], (2 << 2) | SWAP_MASK as u16);
    }

    #[test]
    fn test_init_is_idempotent() {
        init_lookup_table();
        let first = lookup_table() as *const LookupTable;
        init_lookup_table();
        assert_eq!(first, lookup_table() as *const LookupTable);
    }
}
