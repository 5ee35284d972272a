//! Recursive descent parser
//!
//! Precedence, lowest first: `||`, `&&`, equality, comparison, additive,
//! multiplicative, unary, call / method call, primary.

use super::error::EngineError;
use super::lexer::{Token, TokenKind};

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nil,
    Var(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(Box<Expr>, BinOp, Box<Expr>),
    /// Builtin call: `name(args)`
    Call(String, Vec<Expr>),
    /// Host method call: `target.method(args)`
    Method(Box<Expr>, String, Vec<Expr>),
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(String, Expr),
    Expr(Expr),
    If(Expr, Vec<Stmt>, Option<Vec<Stmt>>),
    While(Expr, Vec<Stmt>),
    Block(Vec<Stmt>),
}

/// Parse a token stream into statements
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, EngineError> {
    Parser { tokens, pos: 0 }.program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].kind
    }

    fn peek_at(
        &self,
        offset: usize,
    ) -> &TokenKind {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn line(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)].line
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        kind
    }

    fn check(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.peek() == kind
    }

    fn eat(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(
        &mut self,
        kind: &TokenKind,
        what: &str,
    ) -> Result<(), EngineError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(
        &self,
        expected: &str,
    ) -> EngineError {
        EngineError::Parse {
            line: self.line(),
            message: format!("expected {}, found {}", expected, describe(self.peek())),
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(), TokenKind::Newline | TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn program(&mut self) -> Result<Vec<Stmt>, EngineError> {
        let mut stmts = Vec::new();
        self.skip_separators();
        while !self.check(&TokenKind::Eof) {
            stmts.push(self.statement()?);
            self.end_of_statement(&TokenKind::Eof)?;
            self.skip_separators();
        }
        Ok(stmts)
    }

    /// After a statement: a separator or the closing token must follow
    fn end_of_statement(
        &mut self,
        closer: &TokenKind,
    ) -> Result<(), EngineError> {
        match self.peek() {
            TokenKind::Newline | TokenKind::Semicolon => Ok(()),
            kind if kind == closer => Ok(()),
            _ => Err(self.unexpected("end of statement")),
        }
    }

    fn block(&mut self) -> Result<Vec<Stmt>, EngineError> {
        self.expect(&TokenKind::LBrace, "'{'")?;
        let mut stmts = Vec::new();
        self.skip_separators();
        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::Eof) {
                return Err(self.unexpected("'}'"));
            }
            stmts.push(self.statement()?);
            self.end_of_statement(&TokenKind::RBrace)?;
            self.skip_separators();
        }
        self.advance();
        Ok(stmts)
    }

    fn statement(&mut self) -> Result<Stmt, EngineError> {
        match self.peek() {
            TokenKind::If => self.if_statement(),
            TokenKind::While => {
                self.advance();
                let cond = self.expression()?;
                let body = self.block()?;
                Ok(Stmt::While(cond, body))
            }
            TokenKind::LBrace => Ok(Stmt::Block(self.block()?)),
            TokenKind::Ident(name) if self.peek_at(1) == &TokenKind::Assign => {
                let name = name.clone();
                self.advance();
                self.advance();
                Ok(Stmt::Assign(name, self.expression()?))
            }
            _ => Ok(Stmt::Expr(self.expression()?)),
        }
    }

    fn if_statement(&mut self) -> Result<Stmt, EngineError> {
        self.expect(&TokenKind::If, "'if'")?;
        let cond = self.expression()?;
        let then_branch = self.block()?;

        // `else` may start the next line
        let save = self.pos;
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
        if !self.eat(&TokenKind::Else) {
            self.pos = save;
            return Ok(Stmt::If(cond, then_branch, None));
        }

        let else_branch = if self.check(&TokenKind::If) {
            vec![self.if_statement()?]
        } else {
            self.block()?
        };
        Ok(Stmt::If(cond, then_branch, Some(else_branch)))
    }

    fn expression(&mut self) -> Result<Expr, EngineError> {
        self.binary(0)
    }

    /// Precedence climbing over [`binary_op`] levels
    fn binary(
        &mut self,
        level: usize,
    ) -> Result<Expr, EngineError> {
        if level == BINARY_LEVELS {
            return self.unary();
        }

        let mut left = self.binary(level + 1)?;
        while let Some(op) = binary_op(level, self.peek()) {
            self.advance();
            let right = self.binary(level + 1)?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, EngineError> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.postfix(),
        };
        self.advance();
        Ok(Expr::Unary(op, Box::new(self.unary()?)))
    }

    fn postfix(&mut self) -> Result<Expr, EngineError> {
        let mut expr = self.primary()?;
        while self.eat(&TokenKind::Dot) {
            let method = match self.peek() {
                TokenKind::Ident(name) => name.clone(),
                _ => return Err(self.unexpected("method name")),
            };
            self.advance();
            let args = self.arguments()?;
            expr = Expr::Method(Box::new(expr), method, args);
        }
        Ok(expr)
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, EngineError> {
        self.expect(&TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(&TokenKind::RParen) {
                return Ok(args);
            }
            self.expect(&TokenKind::Comma, "',' or ')'")?;
        }
    }

    fn primary(&mut self) -> Result<Expr, EngineError> {
        let expr = match self.peek().clone() {
            TokenKind::Int(i) => Expr::Int(i),
            TokenKind::Float(x) => Expr::Float(x),
            TokenKind::Str(s) => Expr::Str(s),
            TokenKind::True => Expr::Bool(true),
            TokenKind::False => Expr::Bool(false),
            TokenKind::Nil => Expr::Nil,
            TokenKind::Ident(name) => {
                self.advance();
                if self.check(&TokenKind::LParen) {
                    let args = self.arguments()?;
                    return Ok(Expr::Call(name, args));
                }
                return Ok(Expr::Var(name));
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen, "')'")?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("expression")),
        };
        self.advance();
        Ok(expr)
    }
}

const BINARY_LEVELS: usize = 6;

/// Operator for `kind` at a precedence level, 0 binding loosest
fn binary_op(
    level: usize,
    kind: &TokenKind,
) -> Option<BinOp> {
    let op = match (level, kind) {
        (0, TokenKind::Or) => BinOp::Or,
        (1, TokenKind::And) => BinOp::And,
        (2, TokenKind::Eq) => BinOp::Eq,
        (2, TokenKind::Ne) => BinOp::Ne,
        (3, TokenKind::Lt) => BinOp::Lt,
        (3, TokenKind::Le) => BinOp::Le,
        (3, TokenKind::Gt) => BinOp::Gt,
        (3, TokenKind::Ge) => BinOp::Ge,
        (4, TokenKind::Plus) => BinOp::Add,
        (4, TokenKind::Minus) => BinOp::Sub,
        (5, TokenKind::Star) => BinOp::Mul,
        (5, TokenKind::Slash) => BinOp::Div,
        (5, TokenKind::Percent) => BinOp::Rem,
        _ => return None,
    };
    Some(op)
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Int(i) => format!("'{}'", i),
        TokenKind::Float(x) => format!("'{}'", x),
        TokenKind::Str(s) => format!("{:?}", s),
        TokenKind::Ident(name) => format!("'{}'", name),
        TokenKind::Newline => "end of line".to_string(),
        TokenKind::Eof => "end of input".to_string(),
        other => {
            let text = match other {
                TokenKind::If => "if",
                TokenKind::Else => "else",
                TokenKind::While => "while",
                TokenKind::True => "true",
                TokenKind::False => "false",
                TokenKind::Nil => "nil",
                TokenKind::LParen => "(",
                TokenKind::RParen => ")",
                TokenKind::LBrace => "{",
                TokenKind::RBrace => "}",
                TokenKind::Comma => ",",
                TokenKind::Dot => ".",
                TokenKind::Semicolon => ";",
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                TokenKind::Percent => "%",
                TokenKind::Bang => "!",
                TokenKind::Assign => "=",
                TokenKind::Eq => "==",
                TokenKind::Ne => "!=",
                TokenKind::Lt => "<",
                TokenKind::Le => "<=",
                TokenKind::Gt => ">",
                TokenKind::Ge => ">=",
                TokenKind::And => "&&",
                TokenKind::Or => "||",
                _ => "?",
            };
            format!("'{}'", text)
        }
    }
}
