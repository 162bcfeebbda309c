//! Query tokenizer - splits query text into a flat sequence of tokens

use std::{fmt::Display, str::Chars};

use crate::error::{Error, Result};

/// A single lexical token: its classification plus the text it was scanned from
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Reserved keyword
    Keyword(Keyword),
    Comma,
    LeftParen,
    RightParen,
    Equals,
    Asterisk,
    /// Quoted literal, delimiters included
    String,
    Number,
    /// Table or column name (or anything else unclassified)
    Identifier,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Keyword(keyword) => keyword.fmt(f),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::LeftParen => f.write_str("'('"),
            TokenKind::RightParen => f.write_str("')'"),
            TokenKind::Equals => f.write_str("'='"),
            TokenKind::Asterisk => f.write_str("'*'"),
            TokenKind::String => f.write_str("string literal"),
            TokenKind::Number => f.write_str("number"),
            TokenKind::Identifier => f.write_str("identifier"),
        }
    }
}

/// Reserved keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    Insert,
    Into,
    Values,
    From,
    Update,
    Set,
    Where,
}

impl Keyword {
    /// Attempts to parse a string as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_ref() {
            "SELECT" => Keyword::Select,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "FROM" => Keyword::From,
            "UPDATE" => Keyword::Update,
            "SET" => Keyword::Set,
            "WHERE" => Keyword::Where,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::From => "FROM",
            Keyword::Update => "UPDATE",
            Keyword::Set => "SET",
            Keyword::Where => "WHERE",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// Tokenizes a query string, failing only when it yields no tokens at all
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let tokens = Lexer::new(text).scan();
    if tokens.is_empty() {
        return Err(Error::EmptyQuery);
    }
    Ok(tokens)
}

/// Accumulator-based scanner
///
/// Characters are collected into `current` until a separator (whitespace or
/// punctuation) flushes them as one token. A single quote switches into quoted
/// mode, where everything up to the closing quote belongs to the same lexeme.
pub struct Lexer<'a> {
    iter: Chars<'a>,
    current: String,
    quoted: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given query text
    pub fn new(text: &'a str) -> Self {
        Self {
            iter: text.chars(),
            current: String::new(),
            quoted: false,
            tokens: Vec::new(),
        }
    }

    /// Runs the scan to completion and returns every token found
    pub fn scan(mut self) -> Vec<Token> {
        while let Some(c) = self.iter.next() {
            if self.quoted {
                self.current.push(c);
                if c == '\'' {
                    self.quoted = false;
                    self.flush();
                }
                continue;
            }
            match c {
                ' ' | '\t' | '\n' | '\r' => self.flush(),
                '(' => self.emit(TokenKind::LeftParen, c),
                ')' => self.emit(TokenKind::RightParen, c),
                ',' => self.emit(TokenKind::Comma, c),
                '=' => self.emit(TokenKind::Equals, c),
                '\'' => {
                    self.flush();
                    self.current.push(c);
                    self.quoted = true;
                }
                c => self.current.push(c),
            }
        }
        // An unterminated quote is flushed as-is and classified like any other lexeme
        self.flush();
        self.tokens
    }

    /// Flushes pending text, then emits a single-character punctuation token
    fn emit(&mut self, kind: TokenKind, c: char) {
        self.flush();
        self.tokens.push(Token::new(kind, c));
    }

    /// Classifies the accumulated text and pushes it as a token
    fn flush(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.current);
        self.tokens.push(Token::new(classify(&text), text));
    }
}

fn classify(text: &str) -> TokenKind {
    if let Some(keyword) = Keyword::from_str(text) {
        return TokenKind::Keyword(keyword);
    }
    match text {
        "=" => TokenKind::Equals,
        "*" => TokenKind::Asterisk,
        t if is_number(t) => TokenKind::Number,
        t if t.len() >= 2 && t.starts_with('\'') && t.ends_with('\'') => TokenKind::String,
        _ => TokenKind::Identifier,
    }
}

/// Optional leading minus, digits, at most one decimal point
fn is_number(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.matches('.').count() <= 1
}

#[cfg(test)]
mod tests {
    use super::{Keyword, Token, TokenKind, tokenize};
    use crate::error::{Error, Result};

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lexer_select() -> Result<()> {
        let tokens = tokenize("SELECT * FROM users")?;
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Keyword(Keyword::Select), "SELECT"),
                Token::new(TokenKind::Asterisk, "*"),
                Token::new(TokenKind::Keyword(Keyword::From), "FROM"),
                Token::new(TokenKind::Identifier, "users"),
            ]
        );

        // keywords match case-insensitively but keep their spelling
        let tokens = tokenize("select name,age from Users where age > 30")?;
        assert_eq!(tokens[0], Token::new(TokenKind::Keyword(Keyword::Select), "select"));
        assert_eq!(tokens[5], Token::new(TokenKind::Identifier, "Users"));
        assert_eq!(
            kinds(&tokens[6..]),
            vec![
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Number,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_insert_into() -> Result<()> {
        let tokens = tokenize("INSERT INTO users (name, age) VALUES ('Alice', 30)")?;
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Keyword(Keyword::Insert),
                TokenKind::Keyword(Keyword::Into),
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::RightParen,
                TokenKind::Keyword(Keyword::Values),
                TokenKind::LeftParen,
                TokenKind::String,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RightParen,
            ]
        );
        assert_eq!(tokens[10].text, "'Alice'");
        assert_eq!(tokens[12].text, "30");
        Ok(())
    }

    #[test]
    fn test_lexer_quoted_span() -> Result<()> {
        let tokens = tokenize("VALUES('Alice Smith, Jr. (=)',-2.5)")?;
        assert_eq!(tokens[2], Token::new(TokenKind::String, "'Alice Smith, Jr. (=)'"));
        assert_eq!(tokens[4], Token::new(TokenKind::Number, "-2.5"));

        // an unterminated quote is not a string literal
        let tokens = tokenize("SET name = 'Bob")?;
        assert_eq!(tokens[3], Token::new(TokenKind::Identifier, "'Bob"));
        Ok(())
    }

    #[test]
    fn test_lexer_update() -> Result<()> {
        let tokens = tokenize("UPDATE users\tSET name='Alice',\nage = 25 WHERE id = 1")?;
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Keyword(Keyword::Update),
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::Set),
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::String,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Number,
                TokenKind::Keyword(Keyword::Where),
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Number,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_numbers() -> Result<()> {
        let tokens = tokenize("1 1.5 -3 1.2.3 - . 1e5 v2")?;
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Number,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_empty() {
        assert_eq!(tokenize(""), Err(Error::EmptyQuery));
        assert_eq!(tokenize(" \t\n "), Err(Error::EmptyQuery));
    }
}
