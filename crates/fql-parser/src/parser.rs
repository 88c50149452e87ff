//! Subscription condition parser
//!
//! Parses a normalized token stream into a `Condition` tree.
//!
//! Supported syntax:
//! - Field comparisons: `type = "track"`, `properties.price >= 100`
//! - Null/boolean shorthand: `userId != null`, `properties.active = true`
//! - Function calls: `contains(properties.name, "Nike")`, `match(event, "X*")`
//! - Negated function calls: `!contains(event, "Nike")`
//! - Grouping: `(event = "A" or event = "B")`
//! - Conjunctions: `expr and expr`, `expr or expr`
//!
//! The parser is a single shift-based loop with no backtracking. Two
//! long-standing quirks of the subscription grammar are preserved on
//! purpose, because stored subscriptions depend on them: the last `and`/`or`
//! token seen governs the entire sibling list of a group, and the
//! parenthesis scan stops at the first `)` without tracking nesting depth.

use fql_core::{Condition, GroupOperator, Operator, Value};
use std::collections::VecDeque;

use crate::error::{ParseError, Result};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::normalizer::normalize;

/// Compile a subscription source string into a condition tree
///
/// This is the single entry point: tokenize, normalize, parse. The result
/// is always a `Group` at the root, and every failure surfaces as a
/// `ParseError` value; malformed input never panics.
pub fn parse_fql(source: &str) -> Result<Condition> {
    let mut tokens: VecDeque<Token> = normalize(tokenize(source)).into();

    match parse(&mut tokens) {
        Ok(ast) if ast.is_group() => Ok(ast),
        Ok(ast) => Ok(Condition::group(GroupOperator::And, vec![ast])),
        Err(error) => {
            log::debug!("failed to compile subscription {:?}: {}", source, error);
            Err(error)
        }
    }
}

/// Field addressed by the left-hand side of a comparison
enum FieldTarget {
    EventType,
    Event,
    Name,
    UserId,
    Property(String),
    Trait(String),
    Context(String),
}

/// Resolve a (possibly dotted) identifier to the field it addresses
fn field_target(path: &str) -> Option<FieldTarget> {
    match path {
        "type" => Some(FieldTarget::EventType),
        "event" => Some(FieldTarget::Event),
        "name" => Some(FieldTarget::Name),
        "userId" => Some(FieldTarget::UserId),
        _ => {
            if let Some(rest) = path.strip_prefix("properties.") {
                (!rest.is_empty()).then(|| FieldTarget::Property(rest.to_string()))
            } else if let Some(rest) = path.strip_prefix("traits.") {
                (!rest.is_empty()).then(|| FieldTarget::Trait(rest.to_string()))
            } else if let Some(rest) = path.strip_prefix("context.") {
                (!rest.is_empty()).then(|| FieldTarget::Context(rest.to_string()))
            } else {
                None
            }
        }
    }
}

fn is_fql_function(text: &str) -> bool {
    matches!(text, "contains" | "match")
}

/// Pop the next token, treating end of stream as absent
fn shift(tokens: &mut VecDeque<Token>) -> Option<Token> {
    tokens.pop_front().filter(|t| t.kind != TokenKind::Eos)
}

/// Coerce a token to its literal value
fn token_value(token: &Token) -> Value {
    match token.kind {
        TokenKind::String => {
            let text = token.text.strip_prefix('"').unwrap_or(&token.text);
            let text = text.strip_suffix('"').unwrap_or(text);
            Value::String(text.to_string())
        }
        TokenKind::Number => match token.text.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::String(token.text.clone()),
        },
        TokenKind::Ident if token.text == "true" => Value::Bool(true),
        TokenKind::Ident if token.text == "false" => Value::Bool(false),
        _ => Value::String(token.text.clone()),
    }
}

fn parse_operator(token: &Token) -> Result<Operator> {
    Operator::from_fql(&token.text)
        .ok_or_else(|| ParseError::InvalidOperator(token.text.clone()))
}

/// Parse a normalized token stream into a single condition
///
/// Consumes the stream. Returns the lone condition unwrapped when exactly
/// one was accumulated, otherwise a group under the pending conjunction.
fn parse(tokens: &mut VecDeque<Token>) -> Result<Condition> {
    let mut nodes: Vec<Condition> = Vec::new();
    let mut operator = GroupOperator::And;

    while let Some(token) = tokens.pop_front() {
        match token.kind {
            TokenKind::Eos => break,
            TokenKind::Ident => {
                if let Some(target) = field_target(&token.text) {
                    parse_comparison(target, &mut nodes, tokens)?;
                } else if is_fql_function(&token.text) {
                    parse_fql_function(&token.text, false, &mut nodes, tokens)?;
                }
                // Any other identifier contributes nothing
            }
            TokenKind::Operator if token.text == "!" => {
                let negates_function = tokens
                    .front()
                    .is_some_and(|t| t.kind == TokenKind::Ident && is_fql_function(&t.text));
                if negates_function {
                    if let Some(function) = tokens.pop_front() {
                        parse_fql_function(&function.text, true, &mut nodes, tokens)?;
                    }
                }
            }
            TokenKind::ParenLeft => {
                // Collect up to the first ")"; the scan is not nesting aware
                let mut group: VecDeque<Token> = VecDeque::new();
                loop {
                    match tokens.pop_front() {
                        Some(t) if t.kind == TokenKind::ParenRight => break,
                        Some(t) if t.kind != TokenKind::Eos => group.push_back(t),
                        _ => return Err(ParseError::UnclosedGroup),
                    }
                }
                group.push_back(Token::eos());
                nodes.push(parse(&mut group)?);
            }
            TokenKind::Conditional => {
                // The last conditional seen wins for the whole sibling list
                if let Some(op) = GroupOperator::from_fql(&token.text) {
                    operator = op;
                }
            }
            _ => {}
        }
    }

    if nodes.len() > 1 {
        Ok(Condition::group(operator, nodes))
    } else {
        nodes.pop().ok_or(ParseError::EmptyExpression)
    }
}

/// Parse the operator and value of a field comparison and push the leaf
fn parse_comparison(
    target: FieldTarget,
    nodes: &mut Vec<Condition>,
    tokens: &mut VecDeque<Token>,
) -> Result<()> {
    let operator_token = shift(tokens).ok_or(ParseError::MissingOperator)?;
    let value_token = shift(tokens).ok_or(ParseError::MissingValue)?;

    // `type` and `event` comparisons always keep their operator and value
    // verbatim, even for `null`/`true`/`false` literals
    match target {
        FieldTarget::EventType => {
            let op = parse_operator(&operator_token)?;
            nodes.push(Condition::event_type(op, token_value(&value_token)));
            return Ok(());
        }
        FieldTarget::Event => {
            let op = parse_operator(&operator_token)?;
            nodes.push(Condition::event(op, token_value(&value_token)));
            return Ok(());
        }
        _ => {}
    }

    // Null and boolean comparisons on the remaining fields are rewritten
    // into presence operators; the raw token text decides, so a quoted
    // "null" or "true" is a plain string comparison
    let (operator, value) = match (operator_token.text.as_str(), value_token.text.as_str()) {
        ("!=", "null") => (Operator::Exists, None),
        ("=", "null") => (Operator::NotExists, None),
        ("=", "true") => (Operator::IsTrue, None),
        ("=", "false") => (Operator::IsFalse, None),
        _ => (
            parse_operator(&operator_token)?,
            Some(token_value(&value_token)),
        ),
    };

    nodes.push(match target {
        FieldTarget::Name => Condition::name(operator, value),
        FieldTarget::UserId => Condition::user_id(operator, value),
        FieldTarget::Property(name) => Condition::event_property(name, operator, value),
        FieldTarget::Trait(name) => Condition::event_trait(name, operator, value),
        FieldTarget::Context(name) => Condition::event_context(name, operator, value),
        FieldTarget::EventType | FieldTarget::Event => unreachable!("handled above"),
    });

    Ok(())
}

/// Parse a `contains()`/`match()` call: exactly `(`, field, `,`, value, `)`
///
/// A call against an unsupported field (including bare `type`, which is not
/// addressable inside a function call) consumes its tokens and contributes
/// no node.
fn parse_fql_function(
    name: &str,
    negate: bool,
    nodes: &mut Vec<Condition>,
    tokens: &mut VecDeque<Token>,
) -> Result<()> {
    let missing = |argument| ParseError::MissingArgument {
        function: name.to_string(),
        argument,
    };

    // Skip "(" token
    tokens.pop_front();

    let field_token = shift(tokens).ok_or_else(|| missing("1st"))?;

    // Skip "," token
    tokens.pop_front();

    let value_token = shift(tokens).ok_or_else(|| missing("2nd"))?;

    // Skip ")" token
    tokens.pop_front();

    let (operator, value) = match name {
        "contains" => {
            let operator = if negate {
                Operator::NotContains
            } else {
                Operator::Contains
            };
            (operator, token_value(&value_token).to_string())
        }
        "match" => {
            let coerced = token_value(&value_token).to_string();
            // The trailing wildcard is checked on the raw token text, with
            // its closing quote still attached
            if value_token.text.ends_with("*\"") {
                let operator = if negate {
                    Operator::NotStartsWith
                } else {
                    Operator::StartsWith
                };
                let mut value = coerced;
                value.pop();
                (operator, value)
            } else {
                let operator = if negate {
                    Operator::NotEndsWith
                } else {
                    Operator::EndsWith
                };
                (operator, coerced.chars().skip(1).collect())
            }
        }
        _ => return Ok(()),
    };
    let value = Value::String(value);

    match field_target(&field_token.text) {
        Some(FieldTarget::Event) => nodes.push(Condition::event(operator, value)),
        Some(FieldTarget::Name) => nodes.push(Condition::name(operator, Some(value))),
        Some(FieldTarget::UserId) => nodes.push(Condition::user_id(operator, Some(value))),
        Some(FieldTarget::Property(field)) => {
            nodes.push(Condition::event_property(field, operator, Some(value)))
        }
        Some(FieldTarget::Trait(field)) => {
            nodes.push(Condition::event_trait(field, operator, Some(value)))
        }
        Some(FieldTarget::Context(field)) => {
            nodes.push(Condition::event_context(field, operator, Some(value)))
        }
        Some(FieldTarget::EventType) | None => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_conditional_wins_for_all_siblings() {
        let ast = parse_fql("type = \"track\" and event = \"A\" or name = \"B\"").unwrap();
        match ast {
            Condition::Group { operator, children } => {
                assert_eq!(operator, GroupOperator::Or);
                assert_eq!(children.len(), 3);
            }
            _ => panic!("Expected Group"),
        }
    }

    #[test]
    fn test_group_scan_stops_at_first_close_paren() {
        // The scan is not nesting aware, so the outer group is truncated at
        // the inner ")" and the leftover "(" can never find a close
        assert_eq!(
            parse_fql("((type = \"track\") and event = \"A\")"),
            Err(ParseError::UnclosedGroup)
        );
    }

    #[test]
    fn test_single_condition_paren_group_unwraps() {
        // A parenthesized sub-expression with one condition comes back as a
        // plain leaf, not a nested group
        let ast =
            parse_fql("(type = \"track\") and (type = \"identify\")").unwrap();
        assert_eq!(
            ast,
            Condition::group(
                GroupOperator::And,
                vec![
                    Condition::event_type(Operator::Eq, "track"),
                    Condition::event_type(Operator::Eq, "identify"),
                ]
            )
        );
    }

    #[test]
    fn test_substitution_checks_raw_token_text() {
        // A quoted "null" stays an equality comparison on a string
        let ast = parse_fql("properties.plan = \"null\"").unwrap();
        assert_eq!(
            ast,
            Condition::group(
                GroupOperator::And,
                vec![Condition::event_property(
                    "plan",
                    Operator::Eq,
                    Some(Value::String("null".to_string()))
                )]
            )
        );
    }

    #[test]
    fn test_unknown_identifier_contributes_nothing() {
        assert_eq!(parse_fql("typo"), Err(ParseError::EmptyExpression));
    }

    #[test]
    fn test_multi_dot_path_resolves_to_context_target() {
        let ast = parse_fql("context.traits.name = \"x\"").unwrap();
        assert_eq!(
            ast,
            Condition::group(
                GroupOperator::And,
                vec![Condition::event_context(
                    "traits.name",
                    Operator::Eq,
                    Some(Value::String("x".to_string()))
                )]
            )
        );
    }
}
