//! FQL Core - shared types for the FQL subscription filter language
//!
//! This crate provides the types produced by the subscription compiler and
//! consumed by downstream routing evaluators:
//! - `Value` for coerced literal values
//! - `Condition` trees (the compiled AST)
//! - `Operator` / `GroupOperator` for leaf and group comparisons

pub mod ast;
pub mod value;

// Re-export commonly used types
pub use ast::{Condition, GroupOperator, Operator};
pub use value::Value;
