//! # Parley Arithmetic Evaluator
//!
//! File: cli/src/engine/arithmetic.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! A small recursive-descent evaluator for the expressions users type after
//! "what is". Input is first reduced to digits, `.`, `+ - * /` and parentheses
//! by `sanitize`; `evaluate` then parses and computes the value as `f64`.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := number | '(' expr ')'
//! ```
//!
//! NaN and infinite results (e.g. `1/0`) are reported as `EvalError::NonFinite`.
//!
use thiserror::Error;

/// Nesting limit for parentheses and unary signs.
const MAX_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected '{found}' at position {pos}")]
    UnexpectedChar { pos: usize, found: char },

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("expression nests too deeply")]
    TooDeep,

    #[error("result is not a finite number")]
    NonFinite,
}

/// Keeps only the characters the evaluator understands.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
        .collect()
}

/// Evaluates `expr` and returns a finite result.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let chars: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        chars: &chars,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(&found) = parser.peek() {
        return Err(EvalError::UnexpectedChar {
            pos: parser.pos,
            found,
        });
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Formats a result the way it is shown to users: `4`, `0.5`, `-3`.
///
/// Always positional notation, never exponent form, so `1e21` prints as
/// `1000000000000000000000` and `1e-7` as `0.0000001`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid printing "-0".
        return "0".to_string();
    }
    value.to_string()
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&char> {
        self.chars.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&char> {
        self.chars.get(self.pos + offset)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            if self.eat('+') {
                value += self.term()?;
            } else if self.eat('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            // `**` was already consumed by `power`, so a lone `*` here is multiplication.
            if self.eat('*') {
                value *= self.unary()?;
            } else if self.eat('/') {
                value /= self.unary()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some('-') | Some('+') => {
                let negate = self.peek() == Some(&'-');
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(if negate { -value } else { value })
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if self.peek() == Some(&'*') && self.peek_at(1) == Some(&'*') {
            self.pos += 2;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some('(') => {
                self.pos += 1;
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                if !self.eat(')') {
                    return match self.peek() {
                        Some(&found) => Err(EvalError::UnexpectedChar {
                            pos: self.pos,
                            found,
                        }),
                        None => Err(EvalError::UnexpectedEnd),
                    };
                }
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || *c == '.' => self.number(),
            Some(&found) => Err(EvalError::UnexpectedChar {
                pos: self.pos,
                found,
            }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || *c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal
            .parse::<f64>()
            .map_err(|_| EvalError::InvalidNumber(literal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_everything_else() {
        assert_eq!(sanitize("2 + 2?"), "2+2");
        assert_eq!(sanitize("(3 x 4) / 2 apples"), "(34)/2");
        assert_eq!(sanitize("alert('hi')"), "()");
        assert_eq!(sanitize("1.5 * -2"), "1.5*-2");
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(evaluate("2+2"), Ok(4.0));
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("10-4-3"), Ok(3.0));
        assert_eq!(evaluate("100/10/5"), Ok(2.0));
        assert_eq!(evaluate("2**3**2"), Ok(512.0));
        assert_eq!(evaluate("2*3**2"), Ok(18.0));
    }

    #[test]
    fn unary_signs_and_decimals() {
        assert_eq!(evaluate("-3"), Ok(-3.0));
        assert_eq!(evaluate("--3"), Ok(3.0));
        assert_eq!(evaluate("4*-2"), Ok(-8.0));
        assert_eq!(evaluate(".5+1."), Ok(1.5));
        assert_eq!(evaluate("1 / 4"), Ok(0.25));
    }

    #[test]
    fn division_by_zero_is_non_finite() {
        assert_eq!(evaluate("1/0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate("0/0"), Err(EvalError::NonFinite));
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(evaluate(""), Err(EvalError::Empty));
        assert_eq!(evaluate("()"), Err(EvalError::UnexpectedChar { pos: 1, found: ')' }));
        assert_eq!(evaluate("2+"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("(1+2"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("1+2)"), Err(EvalError::UnexpectedChar { pos: 3, found: ')' }));
        assert_eq!(evaluate("2***3"), Err(EvalError::UnexpectedChar { pos: 3, found: '*' }));
        assert_eq!(
            evaluate("1.2.3"),
            Err(EvalError::InvalidNumber("1.2.3".to_string()))
        );
        assert_eq!(evaluate("."), Err(EvalError::InvalidNumber(".".to_string())));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(evaluate(&deep), Err(EvalError::TooDeep));
        let shallow = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert_eq!(evaluate(&shallow), Ok(1.0));
    }

    #[test]
    fn formats_results() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn formats_extreme_magnitudes_without_exponent() {
        assert_eq!(format_number(1e21), "1000000000000000000000");
        assert_eq!(format_number(1e-7), "0.0000001");
        assert_eq!(format_number(-2.5e-7), "-0.00000025");
    }
}
