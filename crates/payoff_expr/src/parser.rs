//! Recursive-descent parser for the payoff expression grammar.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression  := or_expr ('if' or_expr 'else' expression)?
//! or_expr     := and_expr ('or' and_expr)*
//! and_expr    := comparison ('and' comparison)*
//! comparison  := additive (CMP additive)?          -- no chaining
//! additive    := multiplicative (('+' | '-') multiplicative)*
//! multiplicative := unary (('*' | '/' | '%') unary)*
//! unary       := ('-' | '+') unary | power
//! power       := atom ('**' unary)?                -- right associative
//! atom        := NUMBER | IDENT | IDENT '(' args ')' | '(' expression ')'
//! ```
//!
//! Power binds tighter than unary minus on its left (`-x**2` is `-(x**2)`)
//! while still admitting a signed exponent (`2**-3`), matching the source
//! grammar users write payoffs in. Nesting depth is bounded so adversarial
//! input cannot overflow the stack.

use crate::ast::{BinaryOp, BoolOp, CompareOp, Expr, UnaryOp};
use crate::error::ExpressionError;
use crate::token::{tokenize, SpannedToken, Token};

/// Maximum expression nesting depth.
pub(crate) const MAX_DEPTH: usize = 256;

/// Parses expression text into a raw [`Expr`] tree.
///
/// Whitelist checks happen afterwards in [`validate`](crate::validate);
/// this stage only enforces the grammar itself.
pub(crate) fn parse(source: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: source.len(),
    };
    let expr = parser.expression(0)?;

    if let Some(spanned) = parser.tokens.get(parser.pos) {
        return Err(ExpressionError::Syntax {
            position: spanned.position,
            message: format!("unexpected {}", spanned.token.describe()),
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|t| t.position)
            .unwrap_or(self.end)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), ExpressionError> {
        if depth > MAX_DEPTH {
            Err(ExpressionError::TooDeep { limit: MAX_DEPTH })
        } else {
            Ok(())
        }
    }

    fn expression(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        self.check_depth(depth)?;
        let body = self.or_expr(depth)?;

        if self.eat(&Token::If) {
            let condition = self.or_expr(depth + 1)?;
            if !self.eat(&Token::Else) {
                return Err(ExpressionError::Syntax {
                    position: self.position(),
                    message: "expected 'else' after conditional".to_string(),
                });
            }
            let otherwise = self.expression(depth + 1)?;
            return Ok(Expr::Conditional {
                condition: Box::new(condition),
                then: Box::new(body),
                otherwise: Box::new(otherwise),
            });
        }
        Ok(body)
    }

    fn or_expr(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        let mut lhs = self.and_expr(depth)?;
        while self.eat(&Token::Or) {
            let rhs = self.and_expr(depth)?;
            lhs = Expr::Bool {
                op: BoolOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn and_expr(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        let mut lhs = self.comparison(depth)?;
        while self.eat(&Token::And) {
            let rhs = self.comparison(depth)?;
            lhs = Expr::Bool {
                op: BoolOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn comparison_op(&self) -> Option<CompareOp> {
        match self.peek() {
            Some(Token::Lt) => Some(CompareOp::Lt),
            Some(Token::Le) => Some(CompareOp::Le),
            Some(Token::Gt) => Some(CompareOp::Gt),
            Some(Token::Ge) => Some(CompareOp::Ge),
            Some(Token::EqEq) => Some(CompareOp::Eq),
            Some(Token::NotEq) => Some(CompareOp::Ne),
            _ => None,
        }
    }

    fn comparison(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        let lhs = self.additive(depth)?;

        let Some(op) = self.comparison_op() else {
            return Ok(lhs);
        };
        self.pos += 1;
        let rhs = self.additive(depth)?;

        if self.comparison_op().is_some() {
            return Err(ExpressionError::Syntax {
                position: self.position(),
                message: "comparison chaining is not supported; parenthesise instead"
                    .to_string(),
            });
        }

        Ok(Expr::Compare {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    fn additive(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        let mut lhs = self.multiplicative(depth)?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.multiplicative(depth)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        let mut lhs = self.unary(depth)?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.unary(depth)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        self.check_depth(depth)?;
        let op = match self.peek() {
            Some(Token::Minus) => Some(UnaryOp::Neg),
            Some(Token::Plus) => Some(UnaryOp::Pos),
            _ => None,
        };
        if let Some(op) = op {
            self.pos += 1;
            let operand = self.unary(depth + 1)?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.power(depth)
    }

    fn power(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        let base = self.atom(depth)?;
        if self.eat(&Token::DoubleStar) {
            // Right associative; the exponent may carry its own sign.
            let exponent = self.unary(depth + 1)?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn atom(&mut self, depth: usize) -> Result<Expr, ExpressionError> {
        self.check_depth(depth)?;
        let position = self.position();

        let Some(spanned) = self.tokens.get(self.pos).cloned() else {
            return Err(ExpressionError::Syntax {
                position,
                message: "unexpected end of expression".to_string(),
            });
        };
        self.pos += 1;

        match spanned.token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    let args = self.call_args(depth + 1)?;
                    Ok(Expr::Call {
                        function: name,
                        args,
                    })
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            Token::LParen => {
                let inner = self.expression(depth + 1)?;
                if !self.eat(&Token::RParen) {
                    return Err(ExpressionError::Syntax {
                        position: self.position(),
                        message: "expected ')'".to_string(),
                    });
                }
                Ok(inner)
            }
            other => Err(ExpressionError::Syntax {
                position: spanned.position,
                message: format!("unexpected {}", other.describe()),
            }),
        }
    }

    fn call_args(&mut self, depth: usize) -> Result<Vec<Expr>, ExpressionError> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression(depth)?);
            if self.eat(&Token::Comma) {
                continue;
            }
            if self.eat(&Token::RParen) {
                return Ok(args);
            }
            return Err(ExpressionError::Syntax {
                position: self.position(),
                message: "expected ',' or ')' in argument list".to_string(),
            });
        }
    }
}
