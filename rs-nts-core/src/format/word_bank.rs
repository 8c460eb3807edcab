use std::collections::HashMap;
use std::io::{Read, Write};

use crate::model::tree_node::NGramTreeNode;

use super::byte_width::byte_width;
use super::error::{FormatError, Result};
use super::node_block::MAX_WORD_LENGTH;
use super::stream::{read_exact, require_byte};

/// Returns the words appearing on two or more nodes of the tree, in the
/// order the traversal first encounters them.
///
/// The traversal order itself is immaterial, it only serves as a stable
/// tie-break when the bank is later sorted by length.
pub(crate) fn find_repeats(root: &NGramTreeNode) -> Vec<String> {
	let mut counts: HashMap<&str, usize> = HashMap::new();
	let mut encounter_order: Vec<&str> = Vec::new();

	let mut stack = vec![root];
	while let Some(node) = stack.pop() {
		let count = counts.entry(node.word()).or_insert(0);
		if *count == 0 {
			encounter_order.push(node.word());
		}
		*count += 1;
		stack.extend(node.children().iter());
	}

	encounter_order
		.into_iter()
		.filter(|word| counts[word] >= 2)
		.map(str::to_owned)
		.collect()
}

/// Removes candidate words whose bank entry would not shrink the file.
///
/// A word at position `i` is only worth banking if a reference to it
/// (marker byte + address bytes + end-of-word byte, minus the end-of-word
/// byte an inline word also pays) is strictly smaller than the word
/// itself: `byte_width(i) + 2 < len`. Words longer than the bank length
/// field can carry are removed as well.
///
/// Removal shifts the tail leftward, so the word sliding into position `i`
/// is re-tested against its new, cheaper address before moving on.
pub(crate) fn filter_repeats(words: &mut Vec<String>) {
	let mut i = 0;
	while i < words.len() {
		let word = &words[i];
		if byte_width(i as u64) + 2 >= word.len() || word.len() > MAX_WORD_LENGTH {
			words.remove(i);
		} else {
			i += 1;
		}
	}
}

/// Compiles the word bank for a tree: repeated words, sorted ascending by
/// length so the shortest words get the cheapest addresses, then filtered
/// by the storage cost model.
///
/// The result is a pure function of the tree: the sort is stable and ties
/// keep their first-encounter order.
pub fn compile_word_bank(root: &NGramTreeNode) -> Vec<String> {
	let mut repeats = find_repeats(root);
	repeats.sort_by_key(|word| word.len());
	filter_repeats(&mut repeats);
	repeats
}

/// Maps each bank word to its address for encoding-time lookup.
///
/// Bank entries are unique, so the map never overwrites.
pub(crate) fn build_address_map(bank: &[String]) -> HashMap<&str, usize> {
	bank.iter()
		.enumerate()
		.map(|(address, word)| (word.as_str(), address))
		.collect()
}

/// Encodes one bank entry: `| length (u8) | ascii word bytes |`.
pub(crate) fn encode_bank_entry(word: &str) -> Vec<u8> {
	let mut encoded = Vec::with_capacity(word.len() + 1);
	encoded.push(word.len() as u8);
	encoded.extend_from_slice(word.as_bytes());
	encoded
}

/// Compiles and writes the word bank for the tree, then the `0x00`
/// terminator announcing that tree data follows. Returns the bank so the
/// caller can build the address map from it.
pub(crate) fn write_word_bank<W: Write>(
	root: &NGramTreeNode,
	writer: &mut W,
) -> Result<Vec<String>> {
	let bank = compile_word_bank(root);

	for word in &bank {
		writer.write_all(&encode_bank_entry(word))?;
	}
	writer.write_all(&[0])?;

	Ok(bank)
}

/// Reads the word bank from the head of a stream, up to and including the
/// `0x00` terminator.
///
/// A stream ending before the terminator, or inside an entry, is
/// `Truncated`; an entry with bytes outside 7-bit ASCII is `NonAscii`.
pub(crate) fn read_word_bank<R: Read>(reader: &mut R) -> Result<Vec<String>> {
	let mut bank = Vec::new();

	loop {
		let length = require_byte(reader)?;
		if length == 0 {
			return Ok(bank);
		}

		let mut buf = vec![0u8; length as usize];
		read_exact(reader, &mut buf)?;

		match String::from_utf8(buf) {
			Ok(word) if word.is_ascii() => bank.push(word),
			Ok(word) => return Err(FormatError::NonAscii(word)),
			Err(e) => {
				return Err(FormatError::NonAscii(
					String::from_utf8_lossy(e.as_bytes()).into_owned(),
				))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// A tree whose words repeat enough to populate a bank.
	fn repeated_tree() -> NGramTreeNode {
		let mut tree = NGramTreeNode::new("<".to_owned());
		tree.add_sequence(&["continuation", "prediction", "continuation"]);
		tree.add_sequence(&["prediction", "continuation", "prediction"]);
		tree.add_sequence(&["sentence", "prediction", "sentence"]);
		tree
	}

	#[test]
	fn test_encode_bank_entry() {
		let encoded = encode_bank_entry("word");
		assert_eq!(encoded, [0x04, b'w', b'o', b'r', b'd']);
	}

	#[test]
	fn test_find_repeats_counts_across_branches() {
		let repeats = find_repeats(&repeated_tree());

		assert!(repeats.contains(&"continuation".to_owned()));
		assert!(repeats.contains(&"prediction".to_owned()));
		assert!(repeats.contains(&"sentence".to_owned()));
		// The root word appears once
		assert!(!repeats.contains(&"<".to_owned()));
	}

	#[test]
	fn test_filter_keeps_only_profitable_words() {
		let mut words: Vec<String> = vec!["abc", "def", "ghi"]
			.into_iter()
			.map(str::to_owned)
			.collect();
		filter_repeats(&mut words);

		// At address 0 a reference costs 2 bytes against a 3-byte word;
		// from address 1 on it costs 3 and breaks even, so only the first
		// 3-byte word survives.
		assert_eq!(words, ["abc"]);
	}

	#[test]
	fn test_filter_retests_shifted_words() {
		// Removing the oversized head must slide the tail into cheaper
		// addresses before testing it: "abc" only qualifies at address 0.
		let mut words: Vec<String> = vec!["x".repeat(300), "abc".to_owned()];
		filter_repeats(&mut words);

		// "abc" moved to address 0, where it qualifies
		assert_eq!(words, ["abc"]);
	}

	#[test]
	fn test_filter_invariant_holds_for_survivors() {
		let mut words: Vec<String> = (0..500)
			.map(|i| format!("word-number-{:04}", i))
			.collect();
		filter_repeats(&mut words);

		for (i, word) in words.iter().enumerate() {
			assert!(byte_width(i as u64) + 2 < word.len());
			assert!(word.len() <= MAX_WORD_LENGTH);
		}
	}

	#[test]
	fn test_single_letter_words_never_banked() {
		let mut tree = NGramTreeNode::new("<".to_owned());
		tree.add_sequence(&["a", "b"]);
		tree.add_sequence(&["a", "b"]);

		assert!(compile_word_bank(&tree).is_empty());
	}

	#[test]
	fn test_bank_is_deterministic() {
		let first = compile_word_bank(&repeated_tree());
		let second = compile_word_bank(&repeated_tree());

		assert!(!first.is_empty());
		assert_eq!(first, second);
	}

	#[test]
	fn test_bank_sorted_by_length() {
		let bank = compile_word_bank(&repeated_tree());
		for pair in bank.windows(2) {
			assert!(pair[0].len() <= pair[1].len());
		}
	}

	#[test]
	fn test_address_map_matches_bank_positions() {
		let bank = compile_word_bank(&repeated_tree());
		let address_map = build_address_map(&bank);

		assert_eq!(address_map.len(), bank.len());
		for (word, &address) in &address_map {
			assert_eq!(bank[address], *word);
		}
	}

	#[test]
	fn test_write_then_read_round_trips() {
		let tree = repeated_tree();
		let mut bytes = Vec::new();
		let bank = write_word_bank(&tree, &mut bytes).unwrap();

		// Terminator closes the bank and nothing before it is a 0x00
		assert_eq!(*bytes.last().unwrap(), 0);
		assert!(!bytes[..bytes.len() - 1].contains(&0));

		let mut reader = &bytes[..];
		let reread = read_word_bank(&mut reader).unwrap();
		assert_eq!(bank, reread);
	}

	#[test]
	fn test_read_truncated_mid_entry() {
		// Entry announces 4 bytes but only 2 follow
		let bytes = [0x04u8, b'w', b'o'];
		let mut reader = &bytes[..];
		assert!(matches!(
			read_word_bank(&mut reader),
			Err(FormatError::Truncated)
		));
	}

	#[test]
	fn test_read_missing_terminator() {
		let bytes = [0x02u8, b'h', b'i'];
		let mut reader = &bytes[..];
		assert!(matches!(
			read_word_bank(&mut reader),
			Err(FormatError::Truncated)
		));
	}

	#[test]
	fn test_read_rejects_non_ascii_entry() {
		let bytes = [0x02u8, 0xC3, 0xA9, 0x00];
		let mut reader = &bytes[..];
		assert!(matches!(
			read_word_bank(&mut reader),
			Err(FormatError::NonAscii(_))
		));
	}
}
