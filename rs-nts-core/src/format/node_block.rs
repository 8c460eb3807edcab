use crate::model::tree_node::NGramTreeNode;

use super::byte_width::byte_width;
use super::error::{FormatError, Result};

/// Top-2-bit tag of the end-of-word marker: `0b10xxxxxx`, where the low
/// 6 bits carry the byte width of the child count that follows.
pub(crate) const END_WORD_MASK: u8 = 0b1000_0000;

/// Top-2-bit tag of the bank-reference marker: `0b11yyyyyy`, where the low
/// 6 bits carry the byte width of the bank address that follows.
pub(crate) const BANK_REF_MASK: u8 = 0b1100_0000;

/// Low 6 bits of a marker byte.
pub(crate) const WIDTH_MASK: u8 = 0b0011_1111;

/// Largest byte width the 6-bit marker field can express.
const MAX_FIELD_WIDTH: usize = 63;

/// Longest word the bank length field (u8, 0 reserved) can carry.
pub(crate) const MAX_WORD_LENGTH: usize = 255;

/// Appends `width` big-endian bytes of `value` to `buf`.
fn push_big_endian(buf: &mut Vec<u8>, value: u64, width: usize) {
	for i in (0..width).rev() {
		buf.push((value >> (8 * i)) as u8);
	}
}

/// Checks that a word can cross the codec boundary: 7-bit ASCII and short
/// enough for the bank length field.
pub(crate) fn validate_word(word: &str) -> Result<()> {
	if !word.is_ascii() {
		return Err(FormatError::NonAscii(word.to_owned()));
	}
	if word.len() > MAX_WORD_LENGTH {
		return Err(FormatError::WordTooLong(word.len()));
	}
	Ok(())
}

/// Encodes the child count suffix shared by both block shapes: the
/// end-of-word marker followed by the big-endian count.
fn push_child_count(buf: &mut Vec<u8>, n_children: u64) -> Result<()> {
	let width = byte_width(n_children);
	if width > MAX_FIELD_WIDTH {
		return Err(FormatError::OverflowChildren(n_children));
	}
	buf.push(END_WORD_MASK | width as u8);
	push_big_endian(buf, n_children, width);
	Ok(())
}

/// Encodes a node in the standard (inline word) block format:
///
/// ```text
/// | ascii word bytes | 0b10xxxxxx | n_children (big-endian) |
/// ```
///
/// ASCII word bytes all have their high bit clear, so they can never be
/// mistaken for a marker.
pub(crate) fn encode_node_standard(node: &NGramTreeNode) -> Result<Vec<u8>> {
	let word = node.word();
	validate_word(word)?;

	let n_children = node.branch_count() as u64;
	let mut encoded = Vec::with_capacity(word.len() + byte_width(n_children) + 1);

	encoded.extend_from_slice(word.as_bytes());
	push_child_count(&mut encoded, n_children)?;

	Ok(encoded)
}

/// Encodes a node whose word is stored in the word bank:
///
/// ```text
/// | 0b11yyyyyy | address (big-endian) | 0b10xxxxxx | n_children (big-endian) |
/// ```
///
/// Address 0 has byte width 0, so a reference to the first bank entry is
/// the bare marker byte `0xC0`.
pub(crate) fn encode_node_reference(address: usize, node: &NGramTreeNode) -> Result<Vec<u8>> {
	let n_children = node.branch_count() as u64;
	let address_width = byte_width(address as u64);

	let mut encoded = Vec::with_capacity(address_width + byte_width(n_children) + 2);

	encoded.push(BANK_REF_MASK | address_width as u8);
	push_big_endian(&mut encoded, address as u64, address_width);
	push_child_count(&mut encoded, n_children)?;

	Ok(encoded)
}
