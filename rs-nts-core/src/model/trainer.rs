use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use crate::format;
use crate::io::{build_output_path, read_file};

use super::tree_node::NGramTreeNode;
use super::{END_WORD, START_WORD};

/// Loads a trained tree from its binary cache if one exists, otherwise
/// builds it from the text corpus and writes the cache.
///
/// - `corpus_path` is the input text file, one sentence per line.
/// - The cache lives next to it with the `nts` extension.
/// - `order` is the n-gram size; windows of up to `order` words feed the
///   tree.
///
/// # Errors
/// Returns an error on I/O failure, on an unreadable cache, or if
/// `order < 2`.
pub fn load_or_train<P: AsRef<Path>>(
	corpus_path: P,
	order: usize,
) -> Result<NGramTreeNode, Box<dyn std::error::Error>> {
	let cache_path = build_output_path(&corpus_path, "nts")?;

	if cache_path.exists() {
		let mut reader = BufReader::new(File::open(cache_path)?);
		return Ok(format::deserialize_tree(&mut reader)?);
	}

	let tree = train(&corpus_path, order)?;

	let mut writer = BufWriter::new(File::create(cache_path)?);
	format::serialize_tree(&tree, &mut writer)?;

	Ok(tree)
}

/// Builds a tree from a text corpus with multithreaded merging.
///
/// # Behavior
/// - Splits the corpus lines into chunks (CPU cores * factor).
/// - Spawns a thread per chunk building a partial tree.
/// - Collects the partial trees over an MPSC channel and merges them
///   sequentially into the final tree.
///
/// Sibling order in the final tree follows merge arrival order, so two
/// runs over the same corpus may produce differently ordered, equally
/// valid trees. The persisted form is only canonical per tree, not per
/// corpus.
pub fn train<P: AsRef<Path>>(
	corpus_path: P,
	order: usize,
) -> Result<NGramTreeNode, Box<dyn std::error::Error>> {
	if order < 2 {
		return Err("order must be >= 2".into());
	}

	let lines = read_file(&corpus_path)?;
	let cpus = num_cpus::get();
	let factor = 8;
	let chunks = cpus * factor;
	let chunk_size = ((lines.len() + chunks - 1) / chunks).max(1);

	let (tx, rx) = mpsc::channel();
	for chunk in lines.chunks(chunk_size) {
		let tx = tx.clone();
		let chunk: Vec<String> = chunk.to_vec();

		thread::spawn(move || {
			let mut partial = NGramTreeNode::new(START_WORD.to_owned());
			for sentence in chunk {
				add_sentence(&mut partial, &sentence, order);
			}
			tx.send(partial).expect("Failed to send from thread");
		});
	}
	drop(tx);

	let mut tree = NGramTreeNode::new(START_WORD.to_owned());
	for partial in rx.iter() {
		tree.merge(partial)?;
	}

	Ok(tree)
}

/// Feeds one sentence into the tree as sliding windows of `order` words.
fn add_sentence(tree: &mut NGramTreeNode, sentence: &str, order: usize) {
	let tokens = tokenize(sentence);
	if tokens.is_empty() {
		return;
	}

	for start in 0..tokens.len() {
		let end = (start + order).min(tokens.len());
		tree.add_sequence(&tokens[start..end]);
	}
}

/// Splits a sentence into lowercase tokens and appends the end-of-sentence
/// word.
///
/// Tokens the binary format cannot carry (non-ASCII, or longer than a bank
/// length field) are dropped here rather than failing a later serialize.
fn tokenize(sentence: &str) -> Vec<String> {
	let mut tokens: Vec<String> = sentence
		.split_whitespace()
		.map(str::to_lowercase)
		.filter(|token| token.is_ascii() && token.len() <= format::MAX_WORD_LENGTH)
		.collect();

	if !tokens.is_empty() {
		tokens.push(END_WORD.to_owned());
	}
	tokens
}
