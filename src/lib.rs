//! # complaint-router
//!
//! Classifies free-text complaint narratives into a fixed set of categories
//! and routes each one to the responsible department.
//!
//! ## Features
//!
//! - Deterministic English text normalization built as an analysis pipeline
//! - TF-IDF features over unigrams and bigrams
//! - Multinomial naive Bayes and elastic-net logistic regression
//! - Confidence gating with a fallback category
//! - Category to department routing and a pluggable notification boundary
//! - Atomic model swaps and JSON model snapshots

pub mod analysis;
pub mod category;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod ml;
pub mod routing;
pub mod training;

pub mod prelude {
    pub use crate::category::CategoryLabel;
    pub use crate::config::EngineConfig;
    pub use crate::corpus::LabeledExample;
    pub use crate::engine::{Engine, ModelSnapshot, RoutingDecision};
    pub use crate::error::{Result, RouterError};
    pub use crate::ml::gate::PredictionResult;
    pub use crate::routing::{ComplaintNotice, DepartmentRecord, Notifier};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
