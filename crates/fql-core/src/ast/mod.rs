//! Abstract Syntax Tree (AST) definitions for compiled subscriptions
//!
//! This module contains the node definitions for:
//! - Leaf comparison conditions (event type, event name, scalar and nested fields)
//! - Condition groups (and/or)
//! - Comparison and group operators

pub mod condition;
pub mod operator;

pub use condition::Condition;
pub use operator::{GroupOperator, Operator};
