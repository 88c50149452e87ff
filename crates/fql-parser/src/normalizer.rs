//! Token normalization
//!
//! Collapses dotted field paths into single identifier tokens before
//! parsing: `properties` `.` `name` becomes one `properties.name` token.
//! A merged identifier participates in the next lookahead check, so
//! multi-dot paths like `context.traits.name` collapse fully in one pass.
//! Normalization cannot fail and is idempotent.

use crate::lexer::{Token, TokenKind};

/// Merge `Ident Dot Ident` triples into single compound identifiers
pub fn normalize(tokens: Vec<Token>) -> Vec<Token> {
    let mut normalized: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        let merges = token.kind == TokenKind::Dot
            && normalized
                .last()
                .is_some_and(|prev| prev.kind == TokenKind::Ident)
            && iter.peek().is_some_and(|next| next.kind == TokenKind::Ident);

        if merges {
            if let (Some(prev), Some(next)) = (normalized.pop(), iter.next()) {
                normalized.push(Token::ident(format!(
                    "{}{}{}",
                    prev.text, token.text, next.text
                )));
            }
        } else {
            normalized.push(token);
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn test_merges_single_dotted_path() {
        let tokens = normalize(tokenize("properties.name != null"));
        assert_eq!(tokens[0], Token::ident("properties.name"));
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_merges_multi_dot_path() {
        let tokens = normalize(tokenize("context.traits.name = \"x\""));
        assert_eq!(tokens[0], Token::ident("context.traits.name"));
    }

    #[test]
    fn test_leaves_other_tokens_alone() {
        let tokens = tokenize("type = \"track\" and properties.price >= 100");
        let normalized = normalize(tokens.clone());
        assert_eq!(normalized.len(), tokens.len() - 2);
        assert_eq!(normalized.last(), Some(&Token::eos()));
    }

    #[test]
    fn test_stray_dot_passes_through() {
        // Dot with no identifier on one side is not merged
        let tokens = normalize(tokenize(". name"));
        assert_eq!(tokens[0].kind, TokenKind::Dot);
        assert_eq!(tokens[1], Token::ident("name"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for source in [
            "properties.name != null",
            "context.traits.name = \"x\"",
            "type = \"track\" and event = \"Order Completed\"",
            "contains(properties.name, \"Nike\")",
        ] {
            let once = normalize(tokenize(source));
            let twice = normalize(once.clone());
            assert_eq!(once, twice, "source: {:?}", source);
        }
    }
}
