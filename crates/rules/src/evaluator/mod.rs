//! Condition and trigger evaluation.
//!
//! A condition tests one resolved field of the notice graph; a trigger
//! combines its conditions with `all` or `any`. Both are pure functions of
//! their inputs and never fail: an unresolvable field is simply a non-match
//! before negation is applied.

mod condition;
mod trigger;

pub use condition::{evaluate_condition, matches_value};
pub use trigger::evaluate_trigger;
