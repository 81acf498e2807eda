use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::io::{self, Read};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    #[inline]
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    pub fn read_f32_slice(self, buf: &[u8]) -> Vec<f32> {
        buf.chunks_exact(4)
            .map(|chunk| f32::from_bits(self.read_u32(chunk)))
            .collect()
    }

    pub fn read_f64_slice(self, buf: &[u8]) -> Vec<f64> {
        buf.chunks_exact(8)
            .map(|chunk| {
                let top = self.read_u32(&chunk[0..4]) as u64;
                let bot = self.read_u32(&chunk[4..8]) as u64;
                // join two u32 as u64 with endianness already respected
                f64::from_bits((top << 32) | bot)
            })
            .collect()
    }
}

// Fortran unformatted record: [len:u32] payload [len:u32]
pub fn read_fortran_record<R: Read>(r: &mut R, endian: Endian) -> io::Result<Vec<u8>> {
    let mut lenb = [0u8; 4];
    r.read_exact(&mut lenb)?;
    let len = endian.read_u32(&lenb) as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    r.read_exact(&mut lenb)?;
    let len2 = endian.read_u32(&lenb) as usize;
    if len != len2 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Fortran record length mismatch",
        ));
    }
    Ok(buf)
}
