use std::io::{ErrorKind, Read};

use super::error::{FormatError, Result};

/// Reads a single byte, returning `None` at end of stream.
///
/// Interrupted reads are retried; any other I/O failure is surfaced as-is.
pub(crate) fn next_byte<R: Read>(reader: &mut R) -> Result<Option<u8>> {
	let mut buf = [0u8; 1];
	loop {
		match reader.read(&mut buf) {
			Ok(0) => return Ok(None),
			Ok(_) => return Ok(Some(buf[0])),
			Err(e) if e.kind() == ErrorKind::Interrupted => continue,
			Err(e) => return Err(FormatError::Io(e)),
		}
	}
}

/// Reads a single byte, failing with `Truncated` at end of stream.
pub(crate) fn require_byte<R: Read>(reader: &mut R) -> Result<u8> {
	next_byte(reader)?.ok_or(FormatError::Truncated)
}

/// Fills `buf` from the stream, failing with `Truncated` if it ends first.
pub(crate) fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
	reader.read_exact(buf).map_err(|e| match e.kind() {
		ErrorKind::UnexpectedEof => FormatError::Truncated,
		_ => FormatError::Io(e),
	})
}

/// Reads `width` bytes and returns the big-endian integer they encode.
///
/// A width of 0 reads nothing and returns 0. Widths above 8 bytes are
/// accepted as long as the excess leading bytes are zero; a value that
/// does not fit in 64 bits is `Malformed`.
pub(crate) fn read_big_endian<R: Read>(reader: &mut R, width: usize) -> Result<u64> {
	let mut value: u64 = 0;
	for _ in 0..width {
		let byte = require_byte(reader)?;
		if value >> 56 != 0 {
			return Err(FormatError::Malformed(
				"integer field does not fit in 64 bits".to_owned(),
			));
		}
		value = (value << 8) | u64::from(byte);
	}
	Ok(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_next_byte_reads_until_eof() {
		let data = [0x01u8, 0x02];
		let mut reader = &data[..];
		assert_eq!(next_byte(&mut reader).unwrap(), Some(0x01));
		assert_eq!(next_byte(&mut reader).unwrap(), Some(0x02));
		assert_eq!(next_byte(&mut reader).unwrap(), None);
	}

	#[test]
	fn test_require_byte_truncated_at_eof() {
		let mut reader: &[u8] = &[];
		assert!(matches!(
			require_byte(&mut reader),
			Err(FormatError::Truncated)
		));
	}

	#[test]
	fn test_read_big_endian() {
		let data = [0x32u8, 0xC8];
		let mut reader = &data[..];
		assert_eq!(read_big_endian(&mut reader, 2).unwrap(), 13000);
	}

	#[test]
	fn test_read_big_endian_zero_width_reads_nothing() {
		let data = [0xFFu8];
		let mut reader = &data[..];
		assert_eq!(read_big_endian(&mut reader, 0).unwrap(), 0);
		assert_eq!(next_byte(&mut reader).unwrap(), Some(0xFF));
	}

	#[test]
	fn test_read_big_endian_truncated() {
		let data = [0x01u8];
		let mut reader = &data[..];
		assert!(matches!(
			read_big_endian(&mut reader, 2),
			Err(FormatError::Truncated)
		));
	}

	#[test]
	fn test_read_big_endian_oversized_value() {
		let data = [0xFFu8; 9];
		let mut reader = &data[..];
		assert!(matches!(
			read_big_endian(&mut reader, 9),
			Err(FormatError::Malformed(_))
		));
	}

	#[test]
	fn test_read_big_endian_wide_field_with_zero_padding() {
		let data = [0x00u8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2A];
		let mut reader = &data[..];
		assert_eq!(read_big_endian(&mut reader, 9).unwrap(), 42);
	}
}
