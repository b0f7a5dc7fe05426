//! Transforms that produce new grammars from existing ones.

pub mod filter;

pub use filter::{filter, reduce};
