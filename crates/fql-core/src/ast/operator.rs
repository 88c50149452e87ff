//! Operators for subscription conditions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators usable on leaf conditions
///
/// The serde spellings are the wire names consumed by downstream evaluators,
/// so they must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    // Comparison operators
    /// Equal (=)
    #[serde(rename = "=")]
    Eq,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    Ne,
    /// Greater than (>)
    #[serde(rename = ">")]
    Gt,
    /// Less than (<)
    #[serde(rename = "<")]
    Lt,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    Ge,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    Le,

    // String operators (produced by contains()/match() calls)
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "not_contains")]
    NotContains,
    #[serde(rename = "starts_with")]
    StartsWith,
    #[serde(rename = "not_starts_with")]
    NotStartsWith,
    #[serde(rename = "ends_with")]
    EndsWith,
    #[serde(rename = "not_ends_with")]
    NotEndsWith,

    // Presence operators (produced by null/boolean shorthand comparisons)
    #[serde(rename = "exists")]
    Exists,
    #[serde(rename = "not_exists")]
    NotExists,
    #[serde(rename = "is_true")]
    IsTrue,
    #[serde(rename = "is_false")]
    IsFalse,
}

impl Operator {
    /// Parse an operator from its source spelling, if it is one
    pub fn from_fql(text: &str) -> Option<Operator> {
        match text {
            "=" => Some(Operator::Eq),
            "!=" => Some(Operator::Ne),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            ">=" => Some(Operator::Ge),
            "<=" => Some(Operator::Le),
            "contains" => Some(Operator::Contains),
            "not_contains" => Some(Operator::NotContains),
            "starts_with" => Some(Operator::StartsWith),
            "not_starts_with" => Some(Operator::NotStartsWith),
            "ends_with" => Some(Operator::EndsWith),
            "not_ends_with" => Some(Operator::NotEndsWith),
            "exists" => Some(Operator::Exists),
            "not_exists" => Some(Operator::NotExists),
            "is_true" => Some(Operator::IsTrue),
            "is_false" => Some(Operator::IsFalse),
            _ => None,
        }
    }

    /// The wire/source spelling of this operator
    pub fn as_fql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::NotStartsWith => "not_starts_with",
            Operator::EndsWith => "ends_with",
            Operator::NotEndsWith => "not_ends_with",
            Operator::Exists => "exists",
            Operator::NotExists => "not_exists",
            Operator::IsTrue => "is_true",
            Operator::IsFalse => "is_false",
        }
    }

    /// Returns true if this is one of the six comparison operators
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Ne | Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le
        )
    }

    /// Returns true if a leaf condition with this operator carries a value
    pub fn takes_value(&self) -> bool {
        !matches!(
            self,
            Operator::Exists | Operator::NotExists | Operator::IsTrue | Operator::IsFalse
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_fql())
    }
}

/// Conjunction operator on a condition group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupOperator {
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
}

impl GroupOperator {
    /// Parse a group operator from its source spelling
    pub fn from_fql(text: &str) -> Option<GroupOperator> {
        match text {
            "and" => Some(GroupOperator::And),
            "or" => Some(GroupOperator::Or),
            _ => None,
        }
    }

    /// The wire/source spelling of this operator
    pub fn as_fql(&self) -> &'static str {
        match self {
            GroupOperator::And => "and",
            GroupOperator::Or => "or",
        }
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_fql())
    }
}
