//! Core domain logic for any-two inter-rater agreement.
//!
//! This crate contains the fundamental types and logic for:
//! - Code vocabulary: validating the categorical codes observers assign
//! - Evaluations: building one observer's breakdowns with a tolerance window
//! - Points: splitting multi-code breakdowns into single-code comparisons
//! - Any-two matching: classifying points for a pair of observers
//! - Pipeline: computing every unordered pair of evaluations

mod any_two;
pub mod breakdown;
pub mod code;
pub mod evaluation;
mod pipeline;
pub mod point;
pub mod time;
mod types;

pub use any_two::{AnyTwo, DirectionalMatches, PairSummary, match_direction};
pub use breakdown::Breakdown;
pub use code::Code;
pub use evaluation::{
    DEFAULT_THRESHOLD_SECS, Evaluation, LoadOptions, LoadedEvaluation, RawRow, RowPolicy,
};
pub use pipeline::Pipeline;
pub use point::{Classification, Point, Side, expand_pair};
pub use time::{Interval, TimeOfDay};
pub use types::{CoreError, ObserverId};
