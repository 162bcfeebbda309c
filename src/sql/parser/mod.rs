use std::collections::BTreeMap;
use std::iter::Peekable;
use std::vec::IntoIter;

use crate::error::{Error, Result};
use crate::sql::parser::lexer::{Keyword, Token, TokenKind};

pub mod ast;
pub mod lexer;

pub use lexer::tokenize;

/// Parses a token sequence into a statement
pub fn parse(tokens: Vec<Token>) -> Result<ast::Statement> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses query text in one step
pub fn parse_query(sql: &str) -> Result<ast::Statement> {
    parse(tokenize(sql)?)
}

/// Query parser - converts tokens into an AST statement
///
/// Grammar checks are strictly positional: each helper consumes exactly the
/// token kind it expects or fails with a syntax error naming it.
pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter().peekable(),
        }
    }

    /// Parses the whole token sequence into one statement
    pub fn parse(&mut self) -> Result<ast::Statement> {
        match self.tokens.peek().map(|t| t.kind) {
            Some(TokenKind::Keyword(Keyword::Select)) => self.parse_select(),
            Some(TokenKind::Keyword(Keyword::Insert)) => self.parse_insert(),
            Some(TokenKind::Keyword(Keyword::Update)) => self.parse_update(),
            Some(_) => {
                let token = self.next()?;
                Err(syntax(format!("unsupported statement starting with {}", token)))
            }
            None => Err(Error::EmptyQuery),
        }
    }

    /// SELECT (* | col, ...) FROM table [WHERE ...]
    fn parse_select(&mut self) -> Result<ast::Statement> {
        self.next_expect(TokenKind::Keyword(Keyword::Select))?;

        let columns = if self.next_if_kind(TokenKind::Asterisk).is_some() {
            vec!["*".to_string()]
        } else {
            self.parse_ident_list()?
        };

        self.next_expect(TokenKind::Keyword(Keyword::From))?;
        let table = self.next_ident()?;
        let where_clause = self.parse_where_clause()?;

        Ok(ast::Statement::Select {
            table,
            columns,
            where_clause,
        })
    }

    /// INSERT INTO table (col, ...) VALUES (lit, ...)
    fn parse_insert(&mut self) -> Result<ast::Statement> {
        self.next_expect(TokenKind::Keyword(Keyword::Insert))?;
        self.next_expect(TokenKind::Keyword(Keyword::Into))?;
        let table = self.next_ident()?;

        // The column list is optional in the grammar but an empty one is rejected
        if self.next_if_kind(TokenKind::LeftParen).is_none() {
            return Err(syntax(format!("no columns specified for INSERT INTO {}", table)));
        }
        let columns = self.parse_ident_list()?;
        self.next_expect(TokenKind::RightParen)?;
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].contains(col) {
                return Err(syntax(format!("duplicate column {} in INSERT", col)));
            }
        }

        self.next_expect(TokenKind::Keyword(Keyword::Values))?;
        self.next_expect(TokenKind::LeftParen)?;
        let mut values = vec![self.next_literal()?];
        while self.next_if_kind(TokenKind::Comma).is_some() {
            values.push(self.next_literal()?);
        }
        self.next_expect(TokenKind::RightParen)?;
        self.expect_end()?;

        if columns.len() != values.len() {
            return Err(syntax(format!(
                "INSERT lists {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }

        Ok(ast::Statement::Insert {
            table,
            columns,
            values,
        })
    }

    /// UPDATE table SET col = lit, ... [WHERE ...]
    fn parse_update(&mut self) -> Result<ast::Statement> {
        self.next_expect(TokenKind::Keyword(Keyword::Update))?;
        let table = self.next_ident()?;
        self.next_expect(TokenKind::Keyword(Keyword::Set))?;

        let mut assignments = BTreeMap::new();
        loop {
            let col = self.next_ident()?;
            self.next_expect(TokenKind::Equals)?;
            let value = self.next_literal()?;
            if assignments.contains_key(&col) {
                return Err(syntax(format!("duplicate column {} in SET clause", col)));
            }
            assignments.insert(col, value);
            if self.next_if_kind(TokenKind::Comma).is_none() {
                break;
            }
        }

        Ok(ast::Statement::Update {
            table,
            assignments,
            where_clause: self.parse_where_clause()?,
        })
    }

    /// ident (, ident)*
    fn parse_ident_list(&mut self) -> Result<Vec<String>> {
        let mut idents = vec![self.next_ident()?];
        while self.next_if_kind(TokenKind::Comma).is_some() {
            idents.push(self.next_ident()?);
        }
        Ok(idents)
    }

    /// Optional trailing WHERE; the fragment is every remaining token joined by a space
    fn parse_where_clause(&mut self) -> Result<Option<String>> {
        match self.tokens.next() {
            None => Ok(None),
            Some(token) if token.kind == TokenKind::Keyword(Keyword::Where) => {
                let parts = self.tokens.by_ref().map(|t| t.text).collect::<Vec<_>>();
                if parts.is_empty() {
                    return Err(syntax("expected condition after WHERE"));
                }
                Ok(Some(parts.join(" ")))
            }
            Some(token) => Err(syntax(format!("expected WHERE or end of input, got {}", token))),
        }
    }

    /// Consumes and returns the next token
    fn next(&mut self) -> Result<Token> {
        self.tokens
            .next()
            .ok_or_else(|| syntax("unexpected end of input"))
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        match self.next()? {
            Token {
                kind: TokenKind::Identifier,
                text,
            } => Ok(text),
            token => Err(syntax(format!("expected identifier, got {}", token))),
        }
    }

    /// Expects and consumes a string or number literal, returned in lexeme form
    fn next_literal(&mut self) -> Result<String> {
        match self.next()? {
            Token {
                kind: TokenKind::String | TokenKind::Number,
                text,
            } => Ok(text),
            token => Err(syntax(format!("expected string or number, got {}", token))),
        }
    }

    /// Expects a specific token kind, returns error if different
    fn next_expect(&mut self, expect: TokenKind) -> Result<()> {
        match self.tokens.next() {
            Some(token) if token.kind == expect => Ok(()),
            Some(token) => Err(syntax(format!("expected {}, got {}", expect, token))),
            None => Err(syntax(format!("expected {}, got end of input", expect))),
        }
    }

    /// Consumes next token if it has the given kind
    fn next_if_kind(&mut self, kind: TokenKind) -> Option<Token> {
        self.tokens.next_if(|t| t.kind == kind)
    }

    /// Fails if any token is left
    fn expect_end(&mut self) -> Result<()> {
        match self.tokens.next() {
            None => Ok(()),
            Some(token) => Err(syntax(format!("unexpected token {} after statement", token))),
        }
    }
}

fn syntax(reason: impl Into<String>) -> Error {
    Error::Syntax(reason.into())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{parse, parse_query, tokenize};
    use crate::{
        error::{Error, Result},
        sql::parser::{
            ast::Statement,
            lexer::{Token, TokenKind},
        },
    };

    #[test]
    fn test_parser_select() -> Result<()> {
        let stmt = parse(tokenize("SELECT * FROM t")?)?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "t".to_string(),
                columns: vec!["*".to_string()],
                where_clause: None,
            }
        );

        let stmt = parse_query("select name, age from users where age > 30")?;
        assert_eq!(
            stmt,
            Statement::Select {
                table: "users".to_string(),
                columns: vec!["name".to_string(), "age".to_string()],
                where_clause: Some("age > 30".to_string()),
            }
        );

        // punctuation tokens are rejoined with single spaces
        let stmt = parse_query("SELECT id FROM users WHERE name='Bob'")?;
        assert_eq!(stmt.to_string(), "SELECT id FROM users WHERE name = 'Bob'");
        Ok(())
    }

    #[test]
    fn test_parser_select_errors() {
        for sql in [
            "SELECT FROM users",
            "SELECT * users",
            "SELECT name, FROM users",
            "SELECT * FROM",
            "SELECT * FROM 'users'",
            "SELECT * FROM users WHERE",
            "SELECT * FROM users extra",
            "SELECT name age FROM users",
        ] {
            assert!(
                matches!(parse_query(sql), Err(Error::Syntax(_))),
                "expected syntax error for {}",
                sql
            );
        }
    }

    #[test]
    fn test_parser_insert() -> Result<()> {
        let stmt = parse_query("INSERT INTO users (name, age) VALUES ('Alice', 30)")?;
        assert_eq!(
            stmt,
            Statement::Insert {
                table: "users".to_string(),
                columns: vec!["name".to_string(), "age".to_string()],
                values: vec!["'Alice'".to_string(), "30".to_string()],
            }
        );
        assert_eq!(
            stmt.to_string(),
            "INSERT INTO users (name, age) VALUES ('Alice', 30)"
        );
        Ok(())
    }

    #[test]
    fn test_parser_insert_errors() {
        for sql in [
            "INSERT users (name) VALUES ('a')",
            "INSERT INTO users VALUES ('a')",
            "INSERT INTO users () VALUES ('a')",
            "INSERT INTO users (name) VALUES ()",
            "INSERT INTO users (name VALUES ('a')",
            "INSERT INTO users (name) VALUES ('a'",
            "INSERT INTO users (name) ('a')",
            "INSERT INTO users (name) VALUES (bob)",
            "INSERT INTO users (name, age) VALUES ('a')",
            "INSERT INTO users (name, name) VALUES ('a', 'b')",
            "INSERT INTO users (name) VALUES ('a') WHERE id = 1",
        ] {
            assert!(
                matches!(parse_query(sql), Err(Error::Syntax(_))),
                "expected syntax error for {}",
                sql
            );
        }
    }

    #[test]
    fn test_parser_update() -> Result<()> {
        let stmt = parse_query("UPDATE users SET name = 'Alice', age = 25 WHERE id = 1")?;
        assert_eq!(
            stmt,
            Statement::Update {
                table: "users".to_string(),
                assignments: BTreeMap::from([
                    ("name".to_string(), "'Alice'".to_string()),
                    ("age".to_string(), "25".to_string()),
                ]),
                where_clause: Some("id = 1".to_string()),
            }
        );

        let stmt = parse_query("update users set score = -1.5")?;
        assert_eq!(stmt.table(), "users");
        assert!(matches!(stmt, Statement::Update { where_clause: None, .. }));
        Ok(())
    }

    #[test]
    fn test_parser_update_errors() {
        for sql in [
            "UPDATE SET name = 'a'",
            "UPDATE users name = 'a'",
            "UPDATE users SET name 'a'",
            "UPDATE users SET name =",
            "UPDATE users SET name = other",
            "UPDATE users SET name = 'a',",
            "UPDATE users SET name = 'a', name = 'b'",
            "UPDATE users SET name = 'a' id = 1",
        ] {
            assert!(
                matches!(parse_query(sql), Err(Error::Syntax(_))),
                "expected syntax error for {}",
                sql
            );
        }
    }

    #[test]
    fn test_parser_dispatch() {
        assert_eq!(parse(vec![]), Err(Error::EmptyQuery));
        assert_eq!(parse_query("   "), Err(Error::EmptyQuery));
        assert!(matches!(
            parse(vec![Token::new(TokenKind::Identifier, "DELETE")]),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn test_parser_table_name_preserved() -> Result<()> {
        for (sql, table) in [
            ("SELECT a FROM Orders", "Orders"),
            ("INSERT INTO line_items (x) VALUES (1)", "line_items"),
            ("UPDATE t2 SET x = 1 WHERE y < 3", "t2"),
        ] {
            assert_eq!(parse_query(sql)?.table(), table);
        }
        Ok(())
    }
}
