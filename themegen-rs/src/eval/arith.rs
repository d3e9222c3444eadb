//! Arithmetic used by the `math()` function.
//!
//! Only numeric literals, the four basic operators, unary sign and
//! parentheses are accepted; there are no variables (placeholders have
//! already been substituted by the time an expression gets here).
//!
//! Precedence (lowest → highest):  additive  →  multiplicative  →  unary  →  primary

use crate::error::{Result, ThemeError};

// ── Token ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Eof,
}

// ── Lexer ─────────────────────────────────────────────────────────────────────

struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer { src: src.as_bytes(), pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    fn read_number(&mut self) -> Result<Token> {
        let start = self.pos;
        self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.eat_digits();
        }
        // The slice only ever contains ASCII digits, '.', 'e' and signs.
        let text = std::str::from_utf8(&self.src[start..self.pos]).unwrap_or_default();
        text.parse()
            .map(Token::Num)
            .map_err(|_| ThemeError::format(format!("math: invalid number '{text}'")))
    }

    fn next_token(&mut self) -> Result<Token> {
        self.skip_ws();
        let Some(ch) = self.peek() else {
            return Ok(Token::Eof);
        };
        if ch.is_ascii_digit() || ch == b'.' {
            return self.read_number();
        }
        self.pos += 1;
        Ok(match ch {
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            _ => {
                // Report the whole character, not just its first byte.
                let rest = String::from_utf8_lossy(&self.src[self.pos - 1..]);
                let c = rest.chars().next().unwrap_or('?');
                return Err(ThemeError::format(format!("math: unexpected character '{c}'")));
            }
        })
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let t = self.next_token()?;
            let done = t == Token::Eof;
            tokens.push(t);
            if done {
                return Ok(tokens);
            }
        }
    }
}

// ── AST ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug)]
enum Expr {
    Num(f64),
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

// ── Parser ────────────────────────────────────────────────────────────────────

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let t = self.tokens.get(self.pos).cloned().unwrap_or(Token::Eof);
        self.pos += 1;
        t
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek() {
            Token::Minus => {
                self.pos += 1;
                Ok(Expr::Neg(Box::new(self.parse_unary()?)))
            }
            Token::Plus => {
                self.pos += 1;
                self.parse_unary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Token::Num(x) => Ok(Expr::Num(x)),
            Token::LParen => {
                let inner = self.parse_additive()?;
                if self.advance() != Token::RParen {
                    return Err(ThemeError::format("math: expected ')'"));
                }
                Ok(inner)
            }
            Token::Eof => Err(ThemeError::format("math: unexpected end of expression")),
            other => Err(ThemeError::format(format!("math: unexpected token {other:?}"))),
        }
    }
}

// ── Evaluator ─────────────────────────────────────────────────────────────────

fn eval(expr: &Expr) -> Result<f64> {
    match expr {
        Expr::Num(x) => Ok(*x),
        Expr::Neg(inner) => Ok(-eval(inner)?),
        Expr::Binary(op, lhs, rhs) => {
            let l = eval(lhs)?;
            let r = eval(rhs)?;
            match op {
                BinOp::Add => Ok(l + r),
                BinOp::Sub => Ok(l - r),
                BinOp::Mul => Ok(l * r),
                BinOp::Div if r == 0.0 => Err(ThemeError::format("math: division by zero")),
                BinOp::Div => Ok(l / r),
            }
        }
    }
}

/// Evaluate an arithmetic expression such as `(12 + 4) / 2`.
pub fn eval_arith(src: &str) -> Result<f64> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_additive()?;
    if parser.peek() != &Token::Eof {
        return Err(ThemeError::format(format!(
            "math: unexpected {:?} in '{src}'",
            parser.peek()
        )));
    }
    eval(&expr)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
