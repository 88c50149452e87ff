//! Subscription string tokenizer
//!
//! Converts source text into a flat token stream terminated by a single
//! `Eos` token. The tokenizer is total: any finite string produces a token
//! vector, and malformed grammar (stray characters, truncated expressions)
//! is left for the parser to reject. String tokens keep their surrounding
//! quotes; operator tokens keep their exact source spelling.

/// Token kinds emitted by the tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Quoted string literal, quotes retained
    String,
    /// Numeric literal
    Number,
    /// Identifier, including `true`/`false`/`null` and merged dotted paths
    Ident,
    /// Operator spelling (`=`, `!=`, `>`, ...) or any unrecognized character
    Operator,
    /// A `.` between identifiers
    Dot,
    /// `and` / `or`
    Conditional,
    /// `(`
    ParenLeft,
    /// `)`
    ParenRight,
    /// End of stream
    Eos,
}

/// A single lexed token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    /// Create an identifier token
    pub fn ident(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Ident, text)
    }

    /// Create the terminal end-of-stream token
    pub fn eos() -> Self {
        Token::new(TokenKind::Eos, "eos")
    }
}

/// Tokenize a subscription source string
///
/// Never fails: unknown characters become single-character `Operator` tokens
/// and an unterminated string consumes the rest of the input.
pub fn tokenize(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() {
                    match chars[i] {
                        // Skip escaped characters so `\"` does not close the string
                        '\\' => i += 2,
                        '"' => {
                            i += 1;
                            break;
                        }
                        _ => i += 1,
                    }
                }
                let end = i.min(chars.len());
                tokens.push(Token::new(
                    TokenKind::String,
                    chars[start..end].iter().collect::<String>(),
                ));
            }
            '(' => {
                tokens.push(Token::new(TokenKind::ParenLeft, "("));
                i += 1;
            }
            ')' => {
                tokens.push(Token::new(TokenKind::ParenRight, ")"));
                i += 1;
            }
            '.' => {
                tokens.push(Token::new(TokenKind::Dot, "."));
                i += 1;
            }
            '!' | '>' | '<' => {
                if chars.get(i + 1) == Some(&'=') {
                    tokens.push(Token::new(TokenKind::Operator, format!("{}=", c)));
                    i += 2;
                } else {
                    tokens.push(Token::new(TokenKind::Operator, c.to_string()));
                    i += 1;
                }
            }
            '=' => {
                tokens.push(Token::new(TokenKind::Operator, "="));
                i += 1;
            }
            _ if c.is_ascii_digit()
                || (c == '-' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) =>
            {
                let start = i;
                if c == '-' {
                    i += 1;
                }
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
                // A fraction only when the dot is followed by a digit, so
                // `properties.price` style paths keep their Dot token
                if chars.get(i) == Some(&'.')
                    && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
                {
                    i += 1;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                tokens.push(Token::new(
                    TokenKind::Number,
                    chars[start..i].iter().collect::<String>(),
                ));
            }
            _ if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let kind = match text.as_str() {
                    "and" | "or" => TokenKind::Conditional,
                    _ => TokenKind::Ident,
                };
                tokens.push(Token::new(kind, text));
            }
            // Anything else (including `,`) passes through as an operator
            // token for the parser to skip or reject
            _ => {
                tokens.push(Token::new(TokenKind::Operator, c.to_string()));
                i += 1;
            }
        }
    }

    tokens.push(Token::eos());
    tokens
}
