//! Tokenizer for time-range strings such as `10am-4:15` or `2:30pm`.

use crate::error::ParseError;

/// Kinds of tokens in a time-range string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// One or two consecutive digits.
    Digits,
    /// `am` or `pm`, any case.
    Meridiem,
    /// `:`
    Colon,
    /// `-`
    Dash,
    /// End of input.
    End,
}

/// A token borrowing its text from the scanned string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What the token is.
    pub kind: TokenKind,
    /// The exact source text (empty for [`TokenKind::End`]).
    pub literal: &'a str,
}

impl<'a> Token<'a> {
    const fn new(kind: TokenKind, literal: &'a str) -> Self {
        Self { kind, literal }
    }
}

/// Scan a time-range string into tokens, terminated by an end token.
///
/// Digit runs are capped at two characters: `123` scans as `12` then `3`.
///
/// # Errors
///
/// Returns [`ParseError::Lex`] on whitespace, an unknown character, or an
/// `a`/`p` not followed by `m`.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        let start = index;
        match bytes[index] {
            b'0'..=b'9' => {
                index += 1;
                if bytes.get(index).is_some_and(u8::is_ascii_digit) {
                    index += 1;
                }
                tokens.push(Token::new(TokenKind::Digits, &source[start..index]));
            },
            b'a' | b'A' | b'p' | b'P' => {
                if !matches!(bytes.get(index + 1), Some(b'm' | b'M')) {
                    return Err(ParseError::lex(
                        "provided time tag besides valid 'am'/'pm'",
                        source,
                    ));
                }
                index += 2;
                tokens.push(Token::new(TokenKind::Meridiem, &source[start..index]));
            },
            b':' => {
                index += 1;
                tokens.push(Token::new(TokenKind::Colon, &source[start..index]));
            },
            b'-' => {
                index += 1;
                tokens.push(Token::new(TokenKind::Dash, &source[start..index]));
            },
            _ => return Err(ParseError::lex("invalid character in time expression", source)),
        }
    }

    tokens.push(Token::new(TokenKind::End, ""));
    Ok(tokens)
}
