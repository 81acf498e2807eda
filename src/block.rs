#[derive(Clone, Debug)]
pub struct Block {
    pub imax: usize,
    pub jmax: usize,
    pub kmax: usize, // extents along the three logical axes, each >= 1
    pub x: Vec<f64>, // length = imax*jmax*kmax
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Block {
    pub fn new(
        imax: usize,
        jmax: usize,
        kmax: usize,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
    ) -> Self {
        let n = imax * jmax * kmax;
        assert_eq!(x.len(), n);
        assert_eq!(y.len(), n);
        assert_eq!(z.len(), n);
        Self {
            imax,
            jmax,
            kmax,
            x,
            y,
            z,
        }
    }

    #[inline]
    pub fn npoints(&self) -> usize {
        self.imax * self.jmax * self.kmax
    }

    /// Extents along the three logical axes.
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize) {
        (self.imax, self.jmax, self.kmax)
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        // i–j–k order (k fastest), same flattening as the global node numbering
        debug_assert!(i < self.imax && j < self.jmax && k < self.kmax);
        (i * self.jmax + j) * self.kmax + k
    }

    #[inline]
    pub fn xyz(&self, i: usize, j: usize, k: usize) -> (f64, f64, f64) {
        let idx = self.idx(i, j, k);
        (self.x[idx], self.y[idx], self.z[idx])
    }
}

/// Extent table for a list of blocks, used by the global node indexer.
pub fn block_dims(blocks: &[Block]) -> Vec<(usize, usize, usize)> {
    blocks.iter().map(Block::dims).collect()
}
