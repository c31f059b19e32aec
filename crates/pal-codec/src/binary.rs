//! Endian-aware binary primitives shared by the binary coders.
//!
//! Every read consumes exactly the bytes it needs and maps a short read to
//! [`Error::EndOfStream`]; every write is the byte-exact inverse of its read.
//!
//! # Strings
//!
//! Swatch formats store UTF-16BE strings behind a length prefix that counts
//! code units *including* a trailing null:
//!
//! ```text
//! 00 03  00 41  00 42  00 00     "AB"  (u16 prefix, ASE)
//! 00 00 00 03  00 41 ...         "AB"  (u32 prefix, ACO)
//! ```

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use pal_core::{Error, Result};
use std::io::{self, Read, Write};

/// Integer types readable and writable in either byte order.
pub trait BinaryInteger: Sized + Copy {
    /// Reads one value.
    fn read_from<B: ByteOrder, R: Read + ?Sized>(reader: &mut R) -> io::Result<Self>;
    /// Writes one value.
    fn write_to<B: ByteOrder, W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()>;
}

impl BinaryInteger for u8 {
    fn read_from<B: ByteOrder, R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        reader.read_u8()
    }

    fn write_to<B: ByteOrder, W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_u8(self)
    }
}

macro_rules! binary_integer {
    ($($ty:ty => $read:ident, $write:ident;)*) => {
        $(
            impl BinaryInteger for $ty {
                fn read_from<B: ByteOrder, R: Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
                    reader.$read::<B>()
                }

                fn write_to<B: ByteOrder, W: Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
                    writer.$write::<B>(self)
                }
            }
        )*
    };
}

binary_integer! {
    u16 => read_u16, write_u16;
    u32 => read_u32, write_u32;
    i16 => read_i16, write_i16;
    i32 => read_i32, write_i32;
}

/// Maps a short read to [`Error::EndOfStream`], anything else to [`Error::Io`].
pub fn map_eof(e: io::Error) -> Error {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        Error::EndOfStream
    } else {
        Error::Io(e)
    }
}

/// Reads a big-endian integer.
pub fn read_integer_be<T: BinaryInteger, R: Read + ?Sized>(reader: &mut R) -> Result<T> {
    T::read_from::<BigEndian, R>(reader).map_err(map_eof)
}

/// Reads a little-endian integer.
pub fn read_integer_le<T: BinaryInteger, R: Read + ?Sized>(reader: &mut R) -> Result<T> {
    T::read_from::<LittleEndian, R>(reader).map_err(map_eof)
}

/// Writes a big-endian integer.
pub fn write_integer_be<T: BinaryInteger, W: Write + ?Sized>(writer: &mut W, value: T) -> Result<()> {
    Ok(value.write_to::<BigEndian, W>(writer)?)
}

/// Writes a little-endian integer.
pub fn write_integer_le<T: BinaryInteger, W: Write + ?Sized>(writer: &mut W, value: T) -> Result<()> {
    Ok(value.write_to::<LittleEndian, W>(writer)?)
}

/// Reads a big-endian IEEE-754 single.
pub fn read_f32_be<R: Read + ?Sized>(reader: &mut R) -> Result<f32> {
    reader.read_f32::<BigEndian>().map_err(map_eof)
}

/// Writes a big-endian IEEE-754 single.
pub fn write_f32_be<W: Write + ?Sized>(writer: &mut W, value: f32) -> Result<()> {
    Ok(writer.write_f32::<BigEndian>(value)?)
}

/// Reads a 4-byte tag such as `ASEF` or `RIFF`.
pub fn read_tag<R: Read + ?Sized>(reader: &mut R) -> Result<[u8; 4]> {
    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag).map_err(map_eof)?;
    Ok(tag)
}

/// Reads exactly `len` bytes.
pub fn read_bytes<R: Read + ?Sized>(reader: &mut R, len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    (&mut *reader).take(len as u64).read_to_end(&mut buf)?;
    if buf.len() < len {
        return Err(Error::EndOfStream);
    }
    Ok(buf)
}

/// Reads a u16-prefixed UTF-16BE string, dropping the trailing null.
pub fn read_pascal_unicode_string<R: Read + ?Sized>(reader: &mut R) -> Result<String> {
    let len: u16 = read_integer_be(reader)?;
    read_utf16_units(reader, len as usize)
}

/// Writes a u16-prefixed, null-terminated UTF-16BE string.
///
/// # Errors
///
/// [`Error::InvalidString`] if the string needs more than `u16::MAX - 1` code units.
pub fn write_pascal_unicode_string<W: Write + ?Sized>(writer: &mut W, value: &str) -> Result<()> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let len = u16::try_from(units.len() + 1).map_err(|_| {
        Error::InvalidString(format!("string of {} code units does not fit a u16 length", units.len()))
    })?;
    write_integer_be(writer, len)?;
    write_utf16_units(writer, &units)
}

/// Reads a u32-prefixed UTF-16BE string, dropping the trailing null.
pub fn read_unicode_string<R: Read + ?Sized>(reader: &mut R) -> Result<String> {
    let len: u32 = read_integer_be(reader)?;
    read_utf16_units(reader, len as usize)
}

/// Writes a u32-prefixed, null-terminated UTF-16BE string.
pub fn write_unicode_string<W: Write + ?Sized>(writer: &mut W, value: &str) -> Result<()> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let len = u32::try_from(units.len() + 1)
        .map_err(|_| Error::InvalidString("string too long for a u32 length".into()))?;
    write_integer_be(writer, len)?;
    write_utf16_units(writer, &units)
}

fn read_utf16_units<R: Read + ?Sized>(reader: &mut R, count: usize) -> Result<String> {
    // count comes from the file; don't trust it for preallocation
    let mut units = Vec::with_capacity(count.min(256));
    for _ in 0..count {
        units.push(read_integer_be::<u16, R>(reader)?);
    }
    if units.last() == Some(&0) {
        units.pop();
    }
    String::from_utf16(&units).map_err(|e| Error::InvalidString(e.to_string()))
}

fn write_utf16_units<W: Write + ?Sized>(writer: &mut W, units: &[u16]) -> Result<()> {
    for &unit in units {
        write_integer_be(writer, unit)?;
    }
    write_integer_be(writer, 0u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_integers() {
        let mut cur = Cursor::new(vec![0x12, 0x34, 0x12, 0x34, 0xFF, 0xFE]);
        assert_eq!(read_integer_be::<u16, _>(&mut cur).unwrap(), 0x1234);
        assert_eq!(read_integer_le::<u16, _>(&mut cur).unwrap(), 0x3412);
        assert_eq!(read_integer_be::<i16, _>(&mut cur).unwrap(), -2);
        assert!(matches!(read_integer_be::<u8, _>(&mut cur), Err(Error::EndOfStream)));
    }

    #[test]
    fn test_short_read() {
        let mut cur = Cursor::new(vec![0x00, 0x00, 0x01]);
        assert!(matches!(read_integer_be::<u32, _>(&mut cur), Err(Error::EndOfStream)));
        let mut cur = Cursor::new(vec![1, 2, 3]);
        assert!(matches!(read_bytes(&mut cur, 4), Err(Error::EndOfStream)));
    }

    #[test]
    fn test_write_integers() {
        let mut out = Vec::new();
        write_integer_be(&mut out, 0xC001u16).unwrap();
        write_integer_le(&mut out, 0x0300u16).unwrap();
        write_integer_be(&mut out, 1u32).unwrap();
        assert_eq!(out, vec![0xC0, 0x01, 0x00, 0x03, 0, 0, 0, 1]);
    }

    #[test]
    fn test_f32() {
        let mut out = Vec::new();
        write_f32_be(&mut out, 1.0).unwrap();
        assert_eq!(out, vec![0x3F, 0x80, 0x00, 0x00]);
        assert_eq!(read_f32_be(&mut Cursor::new(out)).unwrap(), 1.0);
    }

    #[test]
    fn test_pascal_string_layout() {
        let mut out = Vec::new();
        write_pascal_unicode_string(&mut out, "AB").unwrap();
        assert_eq!(out, vec![0x00, 0x03, 0x00, 0x41, 0x00, 0x42, 0x00, 0x00]);
        assert_eq!(read_pascal_unicode_string(&mut Cursor::new(out)).unwrap(), "AB");
    }

    #[test]
    fn test_pascal_string_without_null() {
        // Some writers omit the terminator; length then counts only the text.
        let data = vec![0x00, 0x02, 0x00, 0x68, 0x00, 0x69];
        assert_eq!(read_pascal_unicode_string(&mut Cursor::new(data)).unwrap(), "hi");
    }

    #[test]
    fn test_empty_and_non_ascii_strings() {
        let mut out = Vec::new();
        write_pascal_unicode_string(&mut out, "").unwrap();
        assert_eq!(out, vec![0x00, 0x01, 0x00, 0x00]);

        let mut out = Vec::new();
        write_unicode_string(&mut out, "café 🎨").unwrap();
        assert_eq!(read_unicode_string(&mut Cursor::new(out)).unwrap(), "café 🎨");
    }

    #[test]
    fn test_invalid_utf16() {
        // lone high surrogate
        let data = vec![0x00, 0x02, 0xD8, 0x00, 0x00, 0x41];
        assert!(matches!(
            read_pascal_unicode_string(&mut Cursor::new(data)),
            Err(Error::InvalidString(_))
        ));
    }

    #[test]
    fn test_string_too_long() {
        let long = "x".repeat(u16::MAX as usize);
        let mut out = Vec::new();
        assert!(matches!(
            write_pascal_unicode_string(&mut out, &long),
            Err(Error::InvalidString(_))
        ));
    }

    #[test]
    fn test_truncated_string() {
        let data = vec![0x00, 0x05, 0x00, 0x41];
        assert!(matches!(
            read_pascal_unicode_string(&mut Cursor::new(data)),
            Err(Error::EndOfStream)
        ));
    }
}
