//! Tokenizer for the payoff expression grammar.

use crate::error::ExpressionError;

/// A lexical token of the payoff grammar.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    /// Numeric literal (integer, decimal or scientific notation).
    Number(f64),
    /// Identifier or function name.
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    DoubleStar,
    LParen,
    RParen,
    Comma,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
    And,
    Or,
    If,
    Else,
}

impl Token {
    /// Human-readable rendering used in parser error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Token::Number(v) => format!("number {}", v),
            Token::Ident(name) => format!("'{}'", name),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Percent => "'%'".to_string(),
            Token::DoubleStar => "'**'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Lt => "'<'".to_string(),
            Token::Le => "'<='".to_string(),
            Token::Gt => "'>'".to_string(),
            Token::Ge => "'>='".to_string(),
            Token::EqEq => "'=='".to_string(),
            Token::NotEq => "'!='".to_string(),
            Token::And => "'and'".to_string(),
            Token::Or => "'or'".to_string(),
            Token::If => "'if'".to_string(),
            Token::Else => "'else'".to_string(),
        }
    }
}

/// A token together with its byte offset in the source text.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SpannedToken {
    pub token: Token,
    pub position: usize,
}

/// Splits the expression text into tokens.
///
/// Rejects any character outside the payoff grammar (string quotes,
/// brackets, attribute dots, assignment) with a positioned syntax error,
/// so constructs like subscripts or attribute access never reach the
/// parser at all.
pub(crate) fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ExpressionError> {
    let mut tokens = Vec::new();
    let bytes = source.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            ' ' | '\t' | '\r' | '\n' => {
                i += 1;
            }
            '0'..='9' | '.' => {
                let (value, end) = lex_number(source, i)?;
                tokens.push(SpannedToken {
                    token: Token::Number(value),
                    position: i,
                });
                i = end;
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let end = lex_ident_end(bytes, i);
                let name = &source[i..end];
                let token = match name {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "if" => Token::If,
                    "else" => Token::Else,
                    _ => Token::Ident(name.to_string()),
                };
                tokens.push(SpannedToken { token, position: i });
                i = end;
            }
            '+' => {
                tokens.push(SpannedToken {
                    token: Token::Plus,
                    position: i,
                });
                i += 1;
            }
            '-' => {
                tokens.push(SpannedToken {
                    token: Token::Minus,
                    position: i,
                });
                i += 1;
            }
            '*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    tokens.push(SpannedToken {
                        token: Token::DoubleStar,
                        position: i,
                    });
                    i += 2;
                } else {
                    tokens.push(SpannedToken {
                        token: Token::Star,
                        position: i,
                    });
                    i += 1;
                }
            }
            '/' => {
                tokens.push(SpannedToken {
                    token: Token::Slash,
                    position: i,
                });
                i += 1;
            }
            '%' => {
                tokens.push(SpannedToken {
                    token: Token::Percent,
                    position: i,
                });
                i += 1;
            }
            '(' => {
                tokens.push(SpannedToken {
                    token: Token::LParen,
                    position: i,
                });
                i += 1;
            }
            ')' => {
                tokens.push(SpannedToken {
                    token: Token::RParen,
                    position: i,
                });
                i += 1;
            }
            ',' => {
                tokens.push(SpannedToken {
                    token: Token::Comma,
                    position: i,
                });
                i += 1;
            }
            '<' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(SpannedToken {
                        token: Token::Le,
                        position: i,
                    });
                    i += 2;
                } else {
                    tokens.push(SpannedToken {
                        token: Token::Lt,
                        position: i,
                    });
                    i += 1;
                }
            }
            '>' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(SpannedToken {
                        token: Token::Ge,
                        position: i,
                    });
                    i += 2;
                } else {
                    tokens.push(SpannedToken {
                        token: Token::Gt,
                        position: i,
                    });
                    i += 1;
                }
            }
            '=' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(SpannedToken {
                        token: Token::EqEq,
                        position: i,
                    });
                    i += 2;
                } else {
                    return Err(ExpressionError::Syntax {
                        position: i,
                        message: "assignment is not supported; use '==' for comparison"
                            .to_string(),
                    });
                }
            }
            '!' => {
                if bytes.get(i + 1) == Some(&b'=') {
                    tokens.push(SpannedToken {
                        token: Token::NotEq,
                        position: i,
                    });
                    i += 2;
                } else {
                    return Err(ExpressionError::Syntax {
                        position: i,
                        message: "unexpected character '!'".to_string(),
                    });
                }
            }
            other => {
                return Err(ExpressionError::Syntax {
                    position: i,
                    message: format!("unexpected character '{}'", other),
                });
            }
        }
    }

    Ok(tokens)
}

/// Scans a numeric literal starting at `start`, returning its value and
/// the offset one past its end.
fn lex_number(source: &str, start: usize) -> Result<(f64, usize), ExpressionError> {
    let bytes = source.as_bytes();
    let mut i = start;
    let mut seen_dot = false;

    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => i += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            b'e' | b'E' => {
                // Exponent part: optional sign, then at least one digit.
                let mut j = i + 1;
                if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
                    j += 1;
                }
                if matches!(bytes.get(j), Some(b'0'..=b'9')) {
                    i = j;
                    while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                        i += 1;
                    }
                }
                break;
            }
            _ => break,
        }
    }

    let lexeme = &source[start..i];
    lexeme
        .parse::<f64>()
        .map(|value| (value, i))
        .map_err(|_| ExpressionError::Syntax {
            position: start,
            message: format!("invalid numeric literal '{}'", lexeme),
        })
}

fn lex_ident_end(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => i += 1,
            _ => break,
        }
    }
    i
}
