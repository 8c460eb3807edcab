use thiserror::Error;

/// Failure conditions surfaced by the NTS codec.
///
/// Every error aborts the current serialize/deserialize call; no partially
/// reconstructed tree is ever handed back to the caller. I/O failures are
/// not retried here, retry is a caller concern.
#[derive(Debug, Error)]
pub enum FormatError {
	/// Underlying stream read/write failed.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// The stream ended mid-entry, mid-block, or with nodes still
	/// waiting for children.
	#[error("stream ended before the encoded tree was complete")]
	Truncated,

	/// The byte stream violates the block grammar.
	#[error("malformed tree data: {0}")]
	Malformed(String),

	/// A bank reference points outside the word bank read from this file.
	#[error("word bank address {address} is out of range (bank holds {bank_size} entries)")]
	BadAddress { address: usize, bank_size: usize },

	/// A word contains bytes outside 7-bit ASCII.
	#[error("word {0:?} contains non-ASCII characters")]
	NonAscii(String),

	/// A child count too wide for the 6-bit width field. With counts
	/// bounded by memory this cannot be reached in practice.
	#[error("child count {0} cannot be encoded in the 6-bit width field")]
	OverflowChildren(u64),

	/// A word longer than the 255 bytes the bank length field can carry.
	#[error("word of length {0} exceeds the maximum encodable length of 255 bytes")]
	WordTooLong(usize),

	/// The stream contained no node blocks after the word bank.
	#[error("no node blocks found after the word bank")]
	Empty,
}

/// Result type alias using FormatError.
pub type Result<T> = std::result::Result<T, FormatError>;
