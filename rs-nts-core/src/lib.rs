//! N-gram tree modeling and binary serialization library.
//!
//! This crate provides a word-level n-gram prediction tree together with
//! the NTS binary format used to persist it:
//! - An n-gram tree type with ordered children (`NGramTreeNode`)
//! - Corpus ingestion with multithreaded merging and on-disk caching
//! - A compact binary codec with a shared word bank (`format`)
//! - Internal utilities for I/O and path handling
//!
//! The format module is self-contained: it only sees trees through their
//! words and ordered children, and rebuilds them through the public
//! constructor and child attachment.

/// N-gram tree structure, training and prediction.
pub mod model;

/// The NTS binary format: serialization, deserialization and errors.
pub mod format;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
