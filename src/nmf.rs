use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use serde::Serialize;

use crate::error::{MeshError, MeshResult};

/// Label marking a record as block-to-block adjacency rather than a physical
/// boundary. Such records never reach the mesh assembler.
pub const CONNECTIVITY_MARKER: &str = "one-to-one";

/// One physical-boundary patch from a Neutral Map File: a face of a block,
/// restricted to a 2-D index range over the face's tangential axes.
///
/// `block` is 1-based, as in the file. Ranges are 1-based with an exclusive
/// feel: the last included index is `end - 1`.
#[derive(Clone, Debug, Serialize)]
pub struct BoundaryRecord {
    pub label: String,
    pub block: usize,
    pub face: usize,
    pub range1: (usize, usize),
    pub range2: (usize, usize),
}

struct LineReader {
    lines: Lines<BufReader<File>>,
    lineno: usize,
}

impl LineReader {
    fn next_line(&mut self) -> MeshResult<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.lineno += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self, what: &str) -> MeshResult<String> {
        self.next_line()?
            .ok_or_else(|| MeshError::malformed(self.lineno + 1, format!("missing {what}")))
    }

    /// One logical record line: trailing backslashes join the next line.
    fn next_logical_line(&mut self) -> MeshResult<Option<String>> {
        let Some(mut line) = self.next_line()? else {
            return Ok(None);
        };
        while let Some(stripped) = line.trim_end().strip_suffix('\\') {
            let cont = self.expect_line("continuation line")?;
            line = format!("{stripped} {cont}");
        }
        Ok(Some(line))
    }
}

/// Parse a Neutral Map File into its physical boundary records.
///
/// File layout: four header lines, a block-count line, one line per block,
/// a separator line, three comment lines, then one record per line. Each
/// record is a quoted label followed by six integers (block, face, range1
/// start/end, range2 start/end); trailing tokens are ignored. Records whose
/// label is [`CONNECTIVITY_MARKER`] are dropped here.
pub fn read_nmf(path: impl AsRef<Path>) -> MeshResult<Vec<BoundaryRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MeshError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    let mut rdr = LineReader {
        lines: BufReader::new(File::open(path)?).lines(),
        lineno: 0,
    };

    // initial comments
    for _ in 0..4 {
        rdr.expect_line("header line")?;
    }

    let count_line = rdr.expect_line("block count line")?;
    let lineno = rdr.lineno;
    let nblocks: usize = count_line
        .split_whitespace()
        .next()
        .ok_or_else(|| MeshError::malformed(lineno, "empty block count line"))?
        .parse()
        .map_err(|_| MeshError::malformed(lineno, format!("bad block count: {count_line:?}")))?;

    // per-block lines, separator, middle comments
    for _ in 0..nblocks {
        rdr.expect_line("block line")?;
    }
    rdr.expect_line("separator line")?;
    for _ in 0..3 {
        rdr.expect_line("comment line")?;
    }

    // boundary records
    let mut records = Vec::new();
    while let Some(line) = rdr.next_logical_line()? {
        let mut tokens = line.split_whitespace();
        let Some(raw_label) = tokens.next() else {
            continue; // blank line
        };
        let label = raw_label.trim_matches(|c| c == '\'' || c == '"').to_string();
        if label == CONNECTIVITY_MARKER {
            continue;
        }
        let lineno = rdr.lineno;
        let mut next_int = |what: &str| -> MeshResult<usize> {
            tokens
                .next()
                .ok_or_else(|| MeshError::malformed(lineno, format!("missing {what}")))?
                .parse()
                .map_err(|_| MeshError::malformed(lineno, format!("bad {what}")))
        };
        let block = next_int("block number")?;
        let face = next_int("face id")?;
        let range1 = (next_int("range1 start")?, next_int("range1 end")?);
        let range2 = (next_int("range2 start")?, next_int("range2 end")?);
        records.push(BoundaryRecord {
            label,
            block,
            face,
            range1,
            range2,
        });
    }
    Ok(records)
}
