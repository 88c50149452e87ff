//! Canonical source generation
//!
//! Renders a condition tree back to subscription source text. Over
//! canonical input this is the inverse of the parser:
//! `generate_fql(&parse_fql(s)?)? == s`.

use crate::error::GenerateError;
use fql_core::{Condition, Operator, Value};

/// Render a condition tree as subscription source text
pub fn generate_fql(condition: &Condition) -> Result<String, GenerateError> {
    render(condition, true)
}

fn render(condition: &Condition, root: bool) -> Result<String, GenerateError> {
    match condition {
        Condition::Group { operator, children } => {
            if children.is_empty() {
                return Err(GenerateError::EmptyGroup);
            }
            let rendered = children
                .iter()
                .map(|child| render(child, false))
                .collect::<Result<Vec<_>, _>>()?;
            if root && rendered.len() == 1 {
                return Ok(rendered.into_iter().next().unwrap_or_default());
            }
            let joined = rendered.join(&format!(" {} ", operator.as_fql()));
            if root {
                Ok(joined)
            } else {
                Ok(format!("({})", joined))
            }
        }
        Condition::EventType { operator, value } => leaf("type".into(), *operator, Some(value)),
        Condition::Event { operator, value } => leaf("event".into(), *operator, Some(value)),
        Condition::Name { operator, value } => leaf("name".into(), *operator, value.as_ref()),
        Condition::UserId { operator, value } => leaf("userId".into(), *operator, value.as_ref()),
        Condition::EventProperty {
            name,
            operator,
            value,
        } => leaf(format!("properties.{}", name), *operator, value.as_ref()),
        Condition::EventTrait {
            name,
            operator,
            value,
        } => leaf(format!("traits.{}", name), *operator, value.as_ref()),
        Condition::EventContext {
            name,
            operator,
            value,
        } => leaf(format!("context.{}", name), *operator, value.as_ref()),
    }
}

fn leaf(field: String, operator: Operator, value: Option<&Value>) -> Result<String, GenerateError> {
    // Presence operators render back as the null/boolean shorthand that
    // produced them
    match operator {
        Operator::Exists => return Ok(format!("{} != null", field)),
        Operator::NotExists => return Ok(format!("{} = null", field)),
        Operator::IsTrue => return Ok(format!("{} = true", field)),
        Operator::IsFalse => return Ok(format!("{} = false", field)),
        _ => {}
    }

    let value =
        value.ok_or_else(|| GenerateError::MissingValue(operator.as_fql().to_string()))?;

    Ok(match operator {
        Operator::Contains => format!("contains({}, {})", field, literal(value)),
        Operator::NotContains => format!("!contains({}, {})", field, literal(value)),
        Operator::StartsWith => format!("match({}, \"{}*\")", field, value),
        Operator::NotStartsWith => format!("!match({}, \"{}*\")", field, value),
        Operator::EndsWith => format!("match({}, \"*{}\")", field, value),
        Operator::NotEndsWith => format!("!match({}, \"*{}\")", field, value),
        _ => format!("{} {} {}", field, operator.as_fql(), literal(value)),
    })
}

/// Render a literal value as it appears in source: strings quoted, numbers
/// and booleans bare
fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fql_core::{Condition, GroupOperator};

    #[test]
    fn test_generate_comparison_leaf() {
        let cond = Condition::group(
            GroupOperator::And,
            vec![Condition::event_type(Operator::Eq, "track")],
        );
        assert_eq!(generate_fql(&cond).unwrap(), "type = \"track\"");
    }

    #[test]
    fn test_generate_number_is_bare() {
        let cond = Condition::event_property("price", Operator::Ge, Some(Value::Number(100.0)));
        assert_eq!(generate_fql(&cond).unwrap(), "properties.price >= 100");
    }

    #[test]
    fn test_generate_presence_shorthand() {
        assert_eq!(
            generate_fql(&Condition::user_id(Operator::Exists, None)).unwrap(),
            "userId != null"
        );
        assert_eq!(
            generate_fql(&Condition::event_property("active", Operator::IsTrue, None)).unwrap(),
            "properties.active = true"
        );
    }

    #[test]
    fn test_generate_function_operators() {
        assert_eq!(
            generate_fql(&Condition::event(Operator::Contains, "Nike")).unwrap(),
            "contains(event, \"Nike\")"
        );
        assert_eq!(
            generate_fql(&Condition::name(
                Operator::NotStartsWith,
                Some(Value::String("X".to_string()))
            ))
            .unwrap(),
            "!match(name, \"X*\")"
        );
        assert_eq!(
            generate_fql(&Condition::event_trait(
                "name",
                Operator::EndsWith,
                Some(Value::String("X".to_string()))
            ))
            .unwrap(),
            "match(traits.name, \"*X\")"
        );
    }

    #[test]
    fn test_generate_nested_group_is_parenthesized() {
        let cond = Condition::group(
            GroupOperator::Or,
            vec![
                Condition::group(
                    GroupOperator::And,
                    vec![
                        Condition::event(Operator::Eq, "A"),
                        Condition::event_property(
                            "price",
                            Operator::Ge,
                            Some(Value::Number(100.0)),
                        ),
                    ],
                ),
                Condition::event(Operator::Eq, "B"),
            ],
        );
        assert_eq!(
            generate_fql(&cond).unwrap(),
            "(event = \"A\" and properties.price >= 100) or event = \"B\""
        );
    }

    #[test]
    fn test_generate_rejects_missing_value() {
        let cond = Condition::name(Operator::Eq, None);
        assert_eq!(
            generate_fql(&cond),
            Err(GenerateError::MissingValue("=".to_string()))
        );
    }

    #[test]
    fn test_generate_rejects_empty_group() {
        let cond = Condition::group(GroupOperator::And, vec![]);
        assert_eq!(generate_fql(&cond), Err(GenerateError::EmptyGroup));
    }
}
