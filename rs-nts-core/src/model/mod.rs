//! N-gram tree modeling: structure, training and prediction.
//!
//! A single rooted tree holds every observed n-gram window: the path from
//! the root spells the context, the children of its last node are the
//! continuations seen in the corpus.

/// The n-gram tree node with ordered children.
///
/// Handles window ingestion, continuation prediction with suffix backoff,
/// and merging of partial trees.
pub mod tree_node;

/// Corpus ingestion: tokenization, multithreaded building, and the
/// load-or-train cache backed by the binary format.
pub mod trainer;

/// Word carried by the root of every trained tree.
pub const START_WORD: &str = "<";

/// Token appended to every sentence so prediction can stop cleanly.
pub const END_WORD: &str = ">";
