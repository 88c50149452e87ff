//! FQL Parser - compiles subscription filter strings into condition trees
//!
//! Destination actions declare which analytics events they want with a small
//! boolean filter language (FQL), e.g.
//! `type = "track" and event = "Order Completed"`. This crate compiles such
//! strings into the `Condition` AST from `fql-core`, which a downstream
//! routing evaluator walks per incoming event.
//!
//! The pipeline is tokenize → normalize → parse, all pure and synchronous:
//!
//! ```
//! use fql_core::{Condition, GroupOperator, Operator};
//! use fql_parser::parse_fql;
//!
//! let ast = parse_fql("type = \"track\"").unwrap();
//! assert_eq!(
//!     ast,
//!     Condition::group(
//!         GroupOperator::And,
//!         vec![Condition::event_type(Operator::Eq, "track")],
//!     )
//! );
//! ```
//!
//! Malformed input never panics; every failure is a [`ParseError`].

pub mod error;
pub mod generate;
pub mod lexer;
pub mod normalizer;
pub mod parser;

// Re-export the compile surface
pub use error::{GenerateError, ParseError, Result};
pub use generate::generate_fql;
pub use parser::parse_fql;
