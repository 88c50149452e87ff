//! Condition AST nodes
//!
//! A compiled subscription is a tree of `Condition` nodes: seven leaf kinds
//! addressing the routable parts of an event, plus `Group` for and/or
//! conjunctions. The node set is closed and exhaustively matched by both the
//! compiler and downstream evaluators, so it is a tagged enum rather than a
//! trait hierarchy.
//!
//! The serde representation is tagged by the `type` field and uses the wire
//! names (`event-type`, `event-property`, ...) expected by evaluators.

use super::operator::{GroupOperator, Operator};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A compiled subscription condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Condition {
    /// Conjunction or disjunction of child conditions, in source order
    #[serde(rename = "group")]
    Group {
        operator: GroupOperator,
        children: Vec<Condition>,
    },

    /// Comparison against the event's type (`track`, `identify`, ...)
    #[serde(rename = "event-type")]
    EventType { operator: Operator, value: Value },

    /// Comparison against the event name
    #[serde(rename = "event")]
    Event { operator: Operator, value: Value },

    /// Comparison against the top-level `name` field
    #[serde(rename = "name")]
    Name {
        operator: Operator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },

    /// Comparison against the top-level `userId` field
    #[serde(rename = "userId")]
    UserId {
        operator: Operator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },

    /// Comparison against a path under `properties.`
    #[serde(rename = "event-property")]
    EventProperty {
        name: String,
        operator: Operator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },

    /// Comparison against a path under `traits.`
    #[serde(rename = "event-trait")]
    EventTrait {
        name: String,
        operator: Operator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },

    /// Comparison against a path under `context.`
    #[serde(rename = "event-context")]
    EventContext {
        name: String,
        operator: Operator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
    },
}

impl Condition {
    /// Create a group condition
    pub fn group(operator: GroupOperator, children: Vec<Condition>) -> Self {
        Condition::Group { operator, children }
    }

    /// Create an event-type condition
    pub fn event_type(operator: Operator, value: impl Into<Value>) -> Self {
        Condition::EventType {
            operator,
            value: value.into(),
        }
    }

    /// Create an event-name condition
    pub fn event(operator: Operator, value: impl Into<Value>) -> Self {
        Condition::Event {
            operator,
            value: value.into(),
        }
    }

    /// Create a name condition
    pub fn name(operator: Operator, value: Option<Value>) -> Self {
        Condition::Name { operator, value }
    }

    /// Create a userId condition
    pub fn user_id(operator: Operator, value: Option<Value>) -> Self {
        Condition::UserId { operator, value }
    }

    /// Create an event-property condition
    pub fn event_property(
        name: impl Into<String>,
        operator: Operator,
        value: Option<Value>,
    ) -> Self {
        Condition::EventProperty {
            name: name.into(),
            operator,
            value,
        }
    }

    /// Create an event-trait condition
    pub fn event_trait(name: impl Into<String>, operator: Operator, value: Option<Value>) -> Self {
        Condition::EventTrait {
            name: name.into(),
            operator,
            value,
        }
    }

    /// Create an event-context condition
    pub fn event_context(
        name: impl Into<String>,
        operator: Operator,
        value: Option<Value>,
    ) -> Self {
        Condition::EventContext {
            name: name.into(),
            operator,
            value,
        }
    }

    /// Returns true if this is a group condition
    pub fn is_group(&self) -> bool {
        matches!(self, Condition::Group { .. })
    }
}
