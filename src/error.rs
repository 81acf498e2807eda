use std::path::PathBuf;
use thiserror::Error;

/// Result type for grid and mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors produced while reading grids, parsing boundary descriptors, or
/// assembling the output mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Input file does not exist.
    #[error("file not found: {path}")]
    MissingFile {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Block number outside the loaded block list.
    #[error("block {block} is out of range (grid has {nblocks} blocks)")]
    BlockOutOfRange {
        /// Offending 0-based block index.
        block: usize,
        /// Number of blocks actually loaded.
        nblocks: usize,
    },

    /// Structured index outside a block's extents.
    #[error("index ({i}, {j}, {k}) is out of range for block {block} with extents ({imax}, {jmax}, {kmax})")]
    IndexOutOfRange {
        block: usize,
        i: usize,
        j: usize,
        k: usize,
        imax: usize,
        jmax: usize,
        kmax: usize,
    },

    /// Face identifier outside 1..=6.
    #[error("invalid face identifier {face} (expected 1..=6)")]
    InvalidFace {
        /// The rejected face id.
        face: usize,
    },

    /// Boundary record carries a zero range start (ranges are 1-based).
    #[error("invalid index range in boundary record {label:?}: {range1:?} / {range2:?}")]
    InvalidRange {
        label: String,
        range1: (usize, usize),
        range2: (usize, usize),
    },

    /// Boundary descriptor file does not have the expected structure.
    #[error("malformed boundary descriptor at line {line}: {message}")]
    MalformedDescriptor {
        /// 1-based line number in the descriptor file.
        line: usize,
        /// Description of what was wrong.
        message: String,
    },

    /// Grid file payload ended early or held an unparsable token.
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Integer parsing error.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),
}

impl MeshError {
    /// Create an `InvalidContent` error with the given message.
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Create a `MalformedDescriptor` error for `line`.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            line,
            message: message.into(),
        }
    }
}
