//! Language-specific analyzers.
//!
//! - [`english`] - English complaint text: punctuation stripping, Unicode
//!   word segmentation, stop words and lemmatization

pub mod english;
