//! Lexer for the script language

use super::error::EngineError;

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),

    // Keywords
    If,
    Else,
    While,
    True,
    False,
    Nil,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Dot,
    Semicolon,
    Newline,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    Assign,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,

    Eof,
}

/// Token with its source line (1-based)
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

/// Turns source text into tokens.
///
/// Newlines inside parentheses are dropped so calls and conditions may span lines;
/// elsewhere they separate statements.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    paren_depth: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            paren_depth: 0,
        }
    }

    /// Tokenize the whole input; the last token is always `Eof`
    pub fn tokenize(mut self) -> Result<Vec<Token>, EngineError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn eat(
        &mut self,
        expected: char,
    ) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(
        &self,
        message: impl Into<String>,
    ) -> EngineError {
        EngineError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<Token, EngineError> {
        self.skip_trivia()?;
        let line = self.line;

        let Some(c) = self.bump() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                line,
            });
        };

        let kind = match c {
            '\n' => TokenKind::Newline,
            '(' => {
                self.paren_depth += 1;
                TokenKind::LParen
            }
            ')' => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                TokenKind::RParen
            }
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '!' if self.eat('=') => TokenKind::Ne,
            '!' => TokenKind::Bang,
            '=' if self.eat('=') => TokenKind::Eq,
            '=' => TokenKind::Assign,
            '<' if self.eat('=') => TokenKind::Le,
            '<' => TokenKind::Lt,
            '>' if self.eat('=') => TokenKind::Ge,
            '>' => TokenKind::Gt,
            '&' if self.eat('&') => TokenKind::And,
            '|' if self.eat('|') => TokenKind::Or,
            '"' | '\'' => self.read_string(c)?,
            c if c.is_ascii_digit() => self.read_number(c)?,
            c if c == '_' || unicode_ident::is_xid_start(c) => self.read_identifier(c),
            other => return Err(self.error(format!("unexpected character '{}'", other))),
        };

        Ok(Token { kind, line })
    }

    /// Skip spaces, comments, line splices and (inside parentheses) newlines
    fn skip_trivia(&mut self) -> Result<(), EngineError> {
        while let Some(&c) = self.chars.peek() {
            match c {
                '\n' if self.paren_depth > 0 => {
                    self.bump();
                }
                '\\' => {
                    // `\` at the end of a line joins it with the next one
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    if ahead.peek() == Some(&'\r') {
                        ahead.next();
                    }
                    if ahead.peek() != Some(&'\n') {
                        return Ok(());
                    }
                    while self.bump() != Some('\n') {}
                }
                c if c.is_whitespace() && c != '\n' => {
                    self.bump();
                }
                '/' => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.peek() {
                        Some('/') => {
                            while let Some(&c) = self.chars.peek() {
                                if c == '\n' {
                                    break;
                                }
                                self.bump();
                            }
                        }
                        Some('*') => {
                            self.bump();
                            self.bump();
                            let mut closed = false;
                            while let Some(c) = self.bump() {
                                if c == '*' && self.eat('/') {
                                    closed = true;
                                    break;
                                }
                            }
                            if !closed {
                                return Err(self.error("unterminated comment"));
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
        Ok(())
    }

    fn read_string(
        &mut self,
        quote: char,
    ) -> Result<TokenKind, EngineError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(TokenKind::Str(value)),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some(c @ ('\\' | '"' | '\'')) => value.push(c),
                    Some(other) => {
                        return Err(self.error(format!("unknown escape '\\{}'", other)))
                    }
                    None => return Err(self.error("unterminated string")),
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn read_number(
        &mut self,
        first: char,
    ) -> Result<TokenKind, EngineError> {
        let mut text = String::from(first);
        let mut is_float = false;

        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.bump();
                if c != '_' {
                    text.push(c);
                }
            } else if c == '.' && !is_float {
                // `1.foo` is not a float; only take the dot when a digit follows
                let mut ahead = self.chars.clone();
                ahead.next();
                if !matches!(ahead.peek(), Some(d) if d.is_ascii_digit()) {
                    break;
                }
                is_float = true;
                self.bump();
                text.push('.');
            } else {
                break;
            }
        }

        if is_float {
            text.parse()
                .map(TokenKind::Float)
                .map_err(|_| self.error(format!("invalid number '{}'", text)))
        } else {
            text.parse()
                .map(TokenKind::Int)
                .map_err(|_| self.error(format!("integer literal '{}' out of range", text)))
        }
    }

    fn read_identifier(
        &mut self,
        first: char,
    ) -> TokenKind {
        let mut name = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if c == '_' || unicode_ident::is_xid_continue(c) {
                self.bump();
                name.push(c);
            } else {
                break;
            }
        }

        match name.as_str() {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "nil" => TokenKind::Nil,
            _ => TokenKind::Ident(name),
        }
    }
}
