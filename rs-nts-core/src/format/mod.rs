//! NTS, a compact binary format for n-gram prediction trees.
//!
//! An n-gram tree repeats the same vocabulary all over its nodes, so the
//! format factors repeated words into a *word bank* written ahead of the
//! tree data, and encodes each node as a self-delimiting block that either
//! inlines its word or references the bank:
//!
//! ```text
//! file      := word-bank 0x00 node-block...        (pre-order)
//! bank      := (length:u8 ascii-bytes)...          (length 1..=255)
//! standard  := ascii-bytes 0b10xxxxxx n-children
//! reference := 0b11yyyyyy address 0b10xxxxxx n-children
//! ```
//!
//! `xxxxxx`/`yyyyyy` carry the byte width of the big-endian integer that
//! follows; width 0 means the value is 0 and occupies no bytes. ASCII
//! word bytes keep their high bit clear, so they can never be mistaken for
//! either marker.
//!
//! Serialization and deserialization are both single-pass and streaming:
//! the emitter walks the tree with an explicit stack, and the reader
//! rebuilds arbitrary shapes with one frame per tree level.

/// Failure taxonomy shared by the whole codec.
pub mod error;

/// Minimum whole-byte width of an unsigned integer.
mod byte_width;

/// Encoding of a single node block, standard or bank-reference.
mod node_block;

/// Byte-level read helpers shared by the bank and tree readers.
mod stream;

/// Repeat analysis, the bank cost model, and the bank wire codec.
mod word_bank;

/// Depth-first streaming emitter.
mod serializer;

/// Single-pass streaming reconstructor.
mod deserializer;

pub use deserializer::deserialize_tree;
pub use error::{FormatError, Result};
pub use serializer::serialize_tree;
pub use word_bank::compile_word_bank;

pub(crate) use node_block::MAX_WORD_LENGTH;
