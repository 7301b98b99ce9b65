use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{FbgenError, FbgenResult};

/// Строка SIGPROC: длина (i32 LE) и байты без завершающего нуля.
pub fn write_sigproc_str<W: Write>(
    w: &mut W,
    s: &str,
) -> FbgenResult<()> {
    let len = i32::try_from(s.len())
        .map_err(|_| FbgenError::header_field(format!("string too long: {} bytes", s.len())))?;

    w.write_i32::<LittleEndian>(len)?;
    w.write_all(s.as_bytes())?;

    Ok(())
}

pub fn write_sigproc_i32<W: Write>(
    w: &mut W,
    val: i32,
) -> FbgenResult<()> {
    w.write_i32::<LittleEndian>(val)?;
    Ok(())
}

pub fn write_sigproc_f64<W: Write>(
    w: &mut W,
    val: f64,
) -> FbgenResult<()> {
    w.write_f64::<LittleEndian>(val)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_length_prefixed() {
        let mut buf = Vec::new();
        write_sigproc_str(&mut buf, "nchans").unwrap();

        assert_eq!(&buf[0..4], &6i32.to_le_bytes());
        assert_eq!(&buf[4..], b"nchans");
    }

    #[test]
    fn test_numbers_are_little_endian() {
        let mut buf = Vec::new();
        write_sigproc_i32(&mut buf, 0x0102_0304).unwrap();
        write_sigproc_f64(&mut buf, 1.5).unwrap();

        assert_eq!(&buf[0..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&buf[4..12], &1.5f64.to_le_bytes());
    }
}
