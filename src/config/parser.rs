//! Recursive-descent parser for the configuration-dump grammar.
//!
//! Grammar (ordered choice, one token of lookahead):
//!   document := (variable | group)* EOF
//!   group    := name '{' (variable | group)* '}'
//!   variable := name '=' value
//!   value    := integer | '"' text '"' | '[' '"' text '"' (',' ...)* ']'
//! Whitespace and `#`-to-end-of-line comments are skipped between tokens.
//! Failures report the furthest position reached and what was expected there.

use crate::config::tree::{GroupNode, SyntaxNode, SyntaxTree, Value};
use crate::errors::ParseFailure;

/// Parse a complete configuration dump.
pub fn parse(text: &str) -> Result<SyntaxTree, ParseFailure> {
    let mut p = Parser {
        src: text.as_bytes(),
        pos: 0,
    };
    let body = p.body(true)?;
    Ok(SyntaxTree {
        root: GroupNode {
            name: String::new(),
            body,
        },
    })
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn fail(&self, expected: &'static str) -> ParseFailure {
        let mut line = 1;
        let mut column = 1;
        for &b in &self.src[..self.pos] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        ParseFailure {
            line,
            column,
            expected,
        }
    }

    /// Skip whitespace and `#` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.bump(),
                Some(b'#') => {
                    while let Some(b) = self.peek() {
                        self.bump();
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    /// Body of a group (or, with `top`, the document itself).
    fn body(&mut self, top: bool) -> Result<Vec<SyntaxNode>, ParseFailure> {
        let mut nodes = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek() {
                None if top => return Ok(nodes),
                None => return Err(self.fail("closing '}'")),
                Some(b'}') if !top => return Ok(nodes),
                _ => {}
            }
            let name = self.name()?;
            self.skip_trivia();
            match self.peek() {
                Some(b'=') => {
                    self.bump();
                    self.skip_trivia();
                    let value = self.value()?;
                    nodes.push(SyntaxNode::Variable { name, value });
                }
                Some(b'{') => {
                    self.bump();
                    let inner = self.body(false)?;
                    // body(false) stops only at '}' or EOF, and EOF failed already
                    self.bump();
                    nodes.push(SyntaxNode::Group(GroupNode { name, body: inner }));
                }
                _ => return Err(self.fail("'=' or '{' after name")),
            }
        }
    }

    fn name(&mut self) -> Result<String, ParseFailure> {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'-' | b'+') {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(self.fail("a name"));
        }
        Ok(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
    }

    fn value(&mut self) -> Result<Value, ParseFailure> {
        match self.peek() {
            Some(b'"') => Ok(Value::Text(self.quoted_string()?)),
            Some(b'[') => self.list(),
            Some(b) if b == b'-' || b.is_ascii_digit() => self.integer(),
            _ => Err(self.fail("an integer, a quoted string or a list")),
        }
    }

    fn integer(&mut self) -> Result<Value, ParseFailure> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.bump();
        }
        let digits = self.pos;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                self.bump();
            } else {
                break;
            }
        }
        if self.pos == digits {
            return Err(self.fail("digits"));
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        text.parse()
            .map(Value::Integer)
            .map_err(|_| self.fail("an integer in range"))
    }

    fn quoted_string(&mut self) -> Result<String, ParseFailure> {
        // opening quote checked by the caller
        self.bump();
        let mut out = Vec::new();
        loop {
            match self.peek() {
                None => return Err(self.fail("closing '\"'")),
                Some(b'"') => {
                    self.bump();
                    return Ok(String::from_utf8_lossy(&out).into_owned());
                }
                Some(b'\\') => {
                    self.bump();
                    match self.peek() {
                        Some(b @ (b'"' | b'\\')) => {
                            out.push(b);
                            self.bump();
                        }
                        _ => return Err(self.fail("an escaped character")),
                    }
                }
                Some(b) => {
                    out.push(b);
                    self.bump();
                }
            }
        }
    }

    fn list(&mut self) -> Result<Value, ParseFailure> {
        // opening bracket checked by the caller
        self.bump();
        let mut items = Vec::new();
        self.skip_trivia();
        if self.peek() == Some(b']') {
            self.bump();
            return Ok(Value::List(items));
        }
        loop {
            self.skip_trivia();
            if self.peek() != Some(b'"') {
                return Err(self.fail("a quoted string"));
            }
            items.push(self.quoted_string()?);
            self.skip_trivia();
            match self.peek() {
                Some(b',') => self.bump(),
                Some(b']') => {
                    self.bump();
                    return Ok(Value::List(items));
                }
                _ => return Err(self.fail("',' or ']'")),
            }
        }
    }
}
