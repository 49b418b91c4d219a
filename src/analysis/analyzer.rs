//! Analyzers that combine char filters, a tokenizer and token filters.
//!
//! - [`pipeline::PipelineAnalyzer`] - Custom char filter + tokenizer + filter chains
//! - [`language::english::EnglishAnalyzer`] - The complaint normalization chain

#[allow(clippy::module_inception)]
pub mod analyzer;
pub mod language;
pub mod pipeline;
