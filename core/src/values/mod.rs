//! Dynamic values produced by trigger evaluation.
//!
//! Trigger scripts are loosely typed: every intermediate result can be read
//! back as a boolean, an integer, a float or text, and the interpreter picks
//! the representation by looking at the shape of the operands. [`Value`] keeps
//! an explicit tag for speed but every conversion reproduces the text-based
//! rules, so `"3.5"` behaves like a float and `"0"` is false.

mod coerce;
mod value;

pub use coerce::{atof, atoi, looks_like_float, looks_like_int};
pub use value::Value;
