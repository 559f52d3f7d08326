//! Compositional time-range conditions over the civil calendar.
//!
//! A [`Cond`](cond::Cond) is a predicate over instants that also knows
//! its governing ranges: for any reference instant it reports the range
//! during which it currently (or most recently) held
//! ([`last_active_range`](cond::ActiveRanges::last_active_range)) and the
//! upcoming ranges when it will hold again
//! ([`next_ranges`](cond::ActiveRanges::next_ranges)). Because answers
//! are ranges rather than points, compositions like "the first morning
//! after the start of next Monday" stay well-defined.
//!
//! Condition trees are built directly from the variant constructors,
//! from the configured [`Factory`](factory::Factory), or from the
//! surface syntax via [`parse`](parse::parse); [`describe`](describe::describe)
//! renders a tree back into that syntax.

pub mod cond;
pub mod config;
pub mod daytime;
pub mod describe;
pub mod error;
pub mod factory;
pub mod parse;
pub mod range;
pub mod rangeset;
pub mod time;

pub use crate::error::{Error, Result};
