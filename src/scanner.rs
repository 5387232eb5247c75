use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};
use substring::Substring;

use crate::token::{Token, Type};
use crate::literal::Literal;
use crate::error::{Error, ScanError};

/// Turns source text into a flat token stream in a single left-to-right pass.
/// Lexemes are taken with maximal munch; errors are reported as they are
/// found and scanning continues with the next character.
pub struct Scanner<'a> {
    source: &'a str,
    chars: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source,
            chars: source.chars().peekmore(),
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    /// The last token is always `EOF`.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), None, self.line));

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        self.current += 1;
        self.chars.next().expect("advance to be called before the end of the file")
    }

    /// Returns the next character without consuming it, or `'\0'` at the end.
    fn peek(&mut self) -> char {
        self.chars.peek().copied().unwrap_or('\0')
    }

    /// Returns the character after the next one without consuming anything.
    fn peek_next(&mut self) -> char {
        self.chars.peek_nth(1).copied().unwrap_or('\0')
    }

    /// Consumes the next character if it is the expected one.
    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// Adds a new token to the list of tokens. The lexeme is the slice of
    /// source between the token's start and the current position.
    fn add_token(&mut self, r#type: Type, literal: Option<Literal>) {
        let lexeme = self.source.substring(self.start, self.current).to_string();
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    /// Handles a string literal. Strings may span lines.
    fn string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            ScanError {
                line: self.line,
                message: String::from("Unterminated string."),
            }.throw();
            return;
        }

        self.advance(); // The closing double quote.

        // The literal does not include the double quotes unlike the lexeme.
        let value = self.source.substring(self.start + 1, self.current - 1).to_string();
        self.add_token(Type::String, Some(Literal::String(value)));
    }

    /// Handles a number literal. The dot is only part of the number when a
    /// digit follows it, so `123.` scans as a number and a dot.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // Consume the dot.

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value: f64 = self.source.substring(self.start, self.current)
            .parse()
            .expect("number lexeme to be parsable");

        self.add_token(Type::Number, Some(Literal::Number(value)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let token_type = match self.source.substring(self.start, self.current) {
            "and"      => Type::And,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, None);
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let c = self.advance();
        match c {
            // One character tokens
            '(' => self.add_token(Type::LeftParen, None),
            ')' => self.add_token(Type::RightParen, None),
            '{' => self.add_token(Type::LeftBrace, None),
            '}' => self.add_token(Type::RightBrace, None),
            ',' => self.add_token(Type::Comma, None),
            '.' => self.add_token(Type::Dot, None),
            '-' => self.add_token(Type::Minus, None),
            '+' => self.add_token(Type::Plus, None),
            ';' => self.add_token(Type::Semicolon, None),
            '*' => self.add_token(Type::Star, None),

            // One or two character tokens
            '!' => {
                let r#type = if self.match_next('=') { Type::BangEqual } else { Type::Bang };
                self.add_token(r#type, None);
            },
            '=' => {
                let r#type = if self.match_next('=') { Type::EqualEqual } else { Type::Equal };
                self.add_token(r#type, None);
            },
            '<' => {
                let r#type = if self.match_next('=') { Type::LessEqual } else { Type::Less };
                self.add_token(r#type, None);
            },
            '>' => {
                let r#type = if self.match_next('=') { Type::GreaterEqual } else { Type::Greater };
                self.add_token(r#type, None);
            },

            // Slash or a line comment
            '/' => {
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, None);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => (),

            // Update line counter
            '\n' => self.line += 1,

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_ascii_alphabetic() || c == '_' => self.identifier(),

            _ => {
                ScanError {
                    line: self.line,
                    message: String::from("Unexpected character."),
                }.throw();
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        Scanner::new(source).scan_tokens()
    }

    fn types(source: &str) -> Vec<Type> {
        scan(source).iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn scan_punctuation() {
        assert_eq!(
            types("(){},.-+;*/"),
            vec![
                Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
                Type::Comma, Type::Dot, Type::Minus, Type::Plus, Type::Semicolon,
                Type::Star, Type::Slash, Type::EOF,
            ],
        );
    }

    #[test]
    fn scan_one_or_two_char_tokens() {
        assert_eq!(
            types("! != = == < <= > >="),
            vec![
                Type::Bang, Type::BangEqual, Type::Equal, Type::EqualEqual,
                Type::Less, Type::LessEqual, Type::Greater, Type::GreaterEqual,
                Type::EOF,
            ],
        );
    }

    #[test]
    fn scan_keywords_and_identifiers() {
        let tokens = scan("var language = lox;");
        assert_eq!(tokens[0].r#type, Type::Var);
        assert_eq!(tokens[1].r#type, Type::Identifier);
        assert_eq!(tokens[1].lexeme, "language");
        assert_eq!(tokens[3].r#type, Type::Identifier);
        assert_eq!(tokens[3].lexeme, "lox");
    }

    #[test]
    fn scan_every_keyword() {
        assert_eq!(
            types("and class else false for fun if nil or print return super this true var while"),
            vec![
                Type::And, Type::Class, Type::Else, Type::False, Type::For, Type::Fun,
                Type::If, Type::Nil, Type::Or, Type::Print, Type::Return, Type::Super,
                Type::This, Type::True, Type::Var, Type::While, Type::EOF,
            ],
        );
    }

    #[test]
    fn scan_number_literals() {
        let tokens = scan("12 3.5");
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
        assert_eq!(tokens[0].lexeme, "12");
        assert_eq!(tokens[1].literal, Some(Literal::Number(3.5)));
        assert_eq!(tokens[1].lexeme, "3.5");
    }

    #[test]
    fn scan_number_with_trailing_dot() {
        // The dot is not part of the number without a following digit.
        assert_eq!(types("123."), vec![Type::Number, Type::Dot, Type::EOF]);
    }

    #[test]
    fn scan_string_literal() {
        let tokens = scan("\"hello\"");
        assert_eq!(tokens[0].r#type, Type::String);
        assert_eq!(tokens[0].lexeme, "\"hello\"");
        assert_eq!(tokens[0].literal, Some(Literal::from("hello")));
    }

    #[test]
    fn scan_multiline_string_counts_lines() {
        let tokens = scan("\"one\ntwo\"\nident");
        assert_eq!(tokens[0].literal, Some(Literal::from("one\ntwo")));
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn scan_comment_to_end_of_line() {
        assert_eq!(types("// nothing to see here\nprint"), vec![Type::Print, Type::EOF]);
        assert_eq!(types("// comment without a newline"), vec![Type::EOF]);
    }

    #[test]
    fn scan_skips_unexpected_character() {
        // The error is reported but scanning continues.
        assert_eq!(types("1 @ 2"), vec![Type::Number, Type::Number, Type::EOF]);
    }

    #[test]
    fn scan_always_ends_with_eof() {
        assert_eq!(types(""), vec![Type::EOF]);
        let tokens = scan("a\nb\nc");
        assert_eq!(tokens.last().unwrap().r#type, Type::EOF);
        assert_eq!(tokens.last().unwrap().line, 3);
    }

    #[test]
    fn lexemes_roundtrip_to_source() {
        // Concatenating lexemes reproduces the source minus whitespace and comments.
        let source = "var a = (1 + 2.5) * \"str\"; // trailing comment\nprint a;";
        let stripped: String = "var a = (1 + 2.5) * \"str\"; print a;"
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let joined: String = scan(source).iter().map(|token| token.lexeme.as_str()).collect();
        assert_eq!(joined, stripped);
    }
}
