use crate::error::{MeshError, MeshResult};

/// Global 1-based node id for structured index `(i, j, k)` of block `block`.
///
/// `dims` lists every block's extents in grid order. Block `b`'s ids occupy
/// the contiguous range right after the ids of blocks `0..b`, starting at 1;
/// within a block, indices flatten with k fastest, then j, then i:
/// `local = k + kmax*j + kmax*jmax*i`.
///
/// Pure over its arguments. Fails with an out-of-range error when `block`
/// exceeds the table or `(i, j, k)` lies outside the block's extents.
pub fn global_node_id(
    dims: &[(usize, usize, usize)],
    block: usize,
    i: usize,
    j: usize,
    k: usize,
) -> MeshResult<usize> {
    if block >= dims.len() {
        return Err(MeshError::BlockOutOfRange {
            block,
            nblocks: dims.len(),
        });
    }
    let (imax, jmax, kmax) = dims[block];
    if i >= imax || j >= jmax || k >= kmax {
        return Err(MeshError::IndexOutOfRange {
            block,
            i,
            j,
            k,
            imax,
            jmax,
            kmax,
        });
    }

    let offset: usize = dims[..block]
        .iter()
        .map(|&(di, dj, dk)| di * dj * dk)
        .sum::<usize>()
        + 1;
    Ok(offset + k + kmax * j + kmax * jmax * i)
}
