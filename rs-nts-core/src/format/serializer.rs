use std::io::Write;

use crate::model::tree_node::NGramTreeNode;

use super::error::Result;
use super::node_block::{encode_node_reference, encode_node_standard, validate_word};
use super::word_bank::{build_address_map, write_word_bank};

/// Writes the binary form of the tree: the word bank, then every node in
/// depth-first pre-order.
///
/// Nodes whose word made it into the bank are written as bank references,
/// all others inline their word. The traversal uses an explicit stack;
/// these trees reach depths where call-stack recursion is not an option.
///
/// The caller keeps exclusive use of `writer` for the whole call. A failed
/// serialize leaves whatever bytes were already written, the resulting
/// stream will not deserialize cleanly.
pub fn serialize_tree<W: Write>(root: &NGramTreeNode, writer: &mut W) -> Result<()> {
	// Every word is checked before the first byte goes out, so a tree
	// that cannot be encoded fails without producing partial output.
	validate_tree_words(root)?;

	let bank = write_word_bank(root, writer)?;
	let address_map = build_address_map(&bank);

	let mut stack = vec![root];
	while let Some(node) = stack.pop() {
		let block = match address_map.get(node.word()) {
			Some(&address) => encode_node_reference(address, node)?,
			None => encode_node_standard(node)?,
		};
		writer.write_all(&block)?;

		// Push children in reverse so the first child is popped, and thus
		// emitted and re-attached, first. Child order survives the
		// round trip.
		for child in node.children().iter().rev() {
			stack.push(child);
		}
	}

	Ok(())
}

fn validate_tree_words(root: &NGramTreeNode) -> Result<()> {
	let mut stack = vec![root];
	while let Some(node) = stack.pop() {
		validate_word(node.word())?;
		stack.extend(node.children().iter());
	}
	Ok(())
}
