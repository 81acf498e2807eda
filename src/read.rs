use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::block::Block;
use crate::error::{MeshError, MeshResult};
use crate::utils::{read_fortran_record, Endian};

#[derive(Copy, Clone, Debug)]
pub enum BinaryFormat {
    Fortran,
    Raw,
}

#[derive(Copy, Clone, Debug)]
pub enum FloatPrecision {
    F32,
    F64,
}

/// Whitespace-delimited token cursor over a buffered reader.
///
/// The grid file is one numeric stream; line breaks carry no meaning, so the
/// cursor refills from the next line whenever the current one is exhausted.
struct Tokens<R: BufRead> {
    rdr: R,
    line: String,
    pos: usize,
}

impl<R: BufRead> Tokens<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pos: 0,
        }
    }

    fn next_token(&mut self) -> MeshResult<&str> {
        loop {
            let rest = &self.line[self.pos..];
            let trimmed = rest.trim_start();
            if !trimmed.is_empty() {
                let start = self.pos + (rest.len() - trimmed.len());
                let end = start
                    + trimmed
                        .find(char::is_whitespace)
                        .unwrap_or(trimmed.len());
                self.pos = end;
                return Ok(&self.line[start..end]);
            }
            self.line.clear();
            self.pos = 0;
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Err(MeshError::invalid_content("unexpected end of file"));
            }
        }
    }

    fn next_usize(&mut self) -> MeshResult<usize> {
        Ok(self.next_token()?.parse()?)
    }

    fn next_f64(&mut self) -> MeshResult<f64> {
        Ok(self.next_token()?.parse()?)
    }

    fn next_f64_vec(&mut self, n: usize) -> MeshResult<Vec<f64>> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.next_f64()?);
        }
        Ok(out)
    }
}

fn open(path: &Path) -> MeshResult<File> {
    if !path.exists() {
        return Err(MeshError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    Ok(File::open(path)?)
}

/// Read an ASCII PLOT3D grid file.
///
/// Stream layout: block count, then three extents per block, then per block
/// the x, y, z values each flattened with k fastest, then j, then i — the
/// same order as the global node numbering, so each block's coordinate
/// arrays land directly in node-id order.
pub fn read_plot3d_ascii(path: impl AsRef<Path>) -> MeshResult<Vec<Block>> {
    let f = open(path.as_ref())?;
    let mut toks = Tokens::new(BufReader::new(f));

    let nblocks = toks.next_usize()?;

    let mut dims = Vec::with_capacity(nblocks);
    for _ in 0..nblocks {
        let imax = toks.next_usize()?;
        let jmax = toks.next_usize()?;
        let kmax = toks.next_usize()?;
        if imax == 0 || jmax == 0 || kmax == 0 {
            return Err(MeshError::invalid_content(format!(
                "zero extent in block dimensions ({imax}, {jmax}, {kmax})"
            )));
        }
        dims.push((imax, jmax, kmax));
    }

    let mut blocks = Vec::with_capacity(nblocks);
    for (imax, jmax, kmax) in dims {
        let n = imax * jmax * kmax;
        let x = toks.next_f64_vec(n)?;
        let y = toks.next_f64_vec(n)?;
        let z = toks.next_f64_vec(n)?;
        blocks.push(Block::new(imax, jmax, kmax, x, y, z));
    }
    Ok(blocks)
}

/// Read a binary PLOT3D grid file, either raw or Fortran-record framed.
pub fn read_plot3d_binary(
    path: impl AsRef<Path>,
    format: BinaryFormat,
    precision: FloatPrecision,
    endian: Endian,
) -> MeshResult<Vec<Block>> {
    let mut f = open(path.as_ref())?;
    match format {
        BinaryFormat::Raw => read_binary_raw(&mut f, precision, endian),
        BinaryFormat::Fortran => read_binary_fortran(&mut f, precision, endian),
    }
}

fn read_binary_raw(
    r: &mut impl Read,
    precision: FloatPrecision,
    endian: Endian,
) -> MeshResult<Vec<Block>> {
    use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

    fn read_u32(r: &mut impl Read, endian: Endian) -> MeshResult<u32> {
        Ok(match endian {
            Endian::Little => r.read_u32::<LittleEndian>()?,
            Endian::Big => r.read_u32::<BigEndian>()?,
        })
    }

    let nblocks = read_u32(r, endian)? as usize;

    let mut dims = Vec::with_capacity(nblocks);
    for _ in 0..nblocks {
        let imax = read_u32(r, endian)? as usize;
        let jmax = read_u32(r, endian)? as usize;
        let kmax = read_u32(r, endian)? as usize;
        dims.push((imax, jmax, kmax));
    }

    let mut blocks = Vec::with_capacity(nblocks);
    for (imax, jmax, kmax) in dims {
        let n = imax * jmax * kmax;
        let x = read_vec_num(r, n, precision, endian)?;
        let y = read_vec_num(r, n, precision, endian)?;
        let z = read_vec_num(r, n, precision, endian)?;
        blocks.push(Block::new(imax, jmax, kmax, x, y, z));
    }
    Ok(blocks)
}

fn read_binary_fortran(
    r: &mut impl Read,
    precision: FloatPrecision,
    endian: Endian,
) -> MeshResult<Vec<Block>> {
    let nb_rec = read_fortran_record(r, endian)?;
    if nb_rec.len() < 4 {
        return Err(MeshError::invalid_content("short nblocks record"));
    }
    let nblocks = endian.read_u32(&nb_rec[..4]) as usize;

    // one dims record per block
    let mut dims = Vec::with_capacity(nblocks);
    for _ in 0..nblocks {
        let rec = read_fortran_record(r, endian)?;
        if rec.len() < 12 {
            return Err(MeshError::invalid_content("short dims record"));
        }
        let imax = endian.read_u32(&rec[0..4]) as usize;
        let jmax = endian.read_u32(&rec[4..8]) as usize;
        let kmax = endian.read_u32(&rec[8..12]) as usize;
        dims.push((imax, jmax, kmax));
    }

    // payload records: X, Y, Z for each block
    let mut blocks = Vec::with_capacity(nblocks);
    for (imax, jmax, kmax) in dims {
        let n = imax * jmax * kmax;
        let mut vars = [Vec::new(), Vec::new(), Vec::new()];
        for (axis, var) in vars.iter_mut().enumerate() {
            let rec = read_fortran_record(r, endian)?;
            *var = match precision {
                FloatPrecision::F32 => endian
                    .read_f32_slice(&rec)
                    .into_iter()
                    .map(|v| v as f64)
                    .collect(),
                FloatPrecision::F64 => endian.read_f64_slice(&rec),
            };
            if var.len() != n {
                return Err(MeshError::invalid_content(format!(
                    "coordinate record {axis} holds {} values, expected {n}",
                    var.len()
                )));
            }
        }
        let [x, y, z] = vars;
        blocks.push(Block::new(imax, jmax, kmax, x, y, z));
    }

    Ok(blocks)
}

fn read_vec_num(
    r: &mut impl Read,
    n: usize,
    precision: FloatPrecision,
    endian: Endian,
) -> MeshResult<Vec<f64>> {
    use byteorder::{BigEndian, LittleEndian, ReadBytesExt};

    let mut out = Vec::with_capacity(n);
    match (precision, endian) {
        (FloatPrecision::F32, Endian::Little) => {
            for _ in 0..n {
                out.push(r.read_f32::<LittleEndian>()? as f64);
            }
        }
        (FloatPrecision::F32, Endian::Big) => {
            for _ in 0..n {
                out.push(r.read_f32::<BigEndian>()? as f64);
            }
        }
        (FloatPrecision::F64, Endian::Little) => {
            for _ in 0..n {
                out.push(r.read_f64::<LittleEndian>()?);
            }
        }
        (FloatPrecision::F64, Endian::Big) => {
            for _ in 0..n {
                out.push(r.read_f64::<BigEndian>()?);
            }
        }
    }
    Ok(out)
}
