//! Token lexer for the quiz language.
//!
//! The lexer is total: it never fails. Anything it cannot classify becomes
//! a `TokenKind::Error` token, which the parser reports as a syntax error.
//!
//! # Performance
//!
//! - Zero-copy: token text borrows directly from input
//! - String literals are scanned with `memchr2`, jumping between quotes and
//!   backslashes instead of walking every character
//! - Line tracking counts newlines with `memchr`

use std::fmt;

use memchr::{memchr2, memchr_iter, memrchr};

use crate::span::{Position, Span};

/// Keyword introducing the quiz title.
pub const QUIZ_KEYWORD: &str = "اختبار";
/// Keyword introducing a question.
pub const QUESTION_KEYWORD: &str = "سؤال";
/// Keyword introducing a question's choices; followed by `:`.
pub const CHOICES_KEYWORD: &str = "اختيارات";
/// Marker placed after the correct choice.
pub const CORRECT_MARKER: &str = "الجواب";

/// Reasons the lexer could not classify a run of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    /// A `"` with no closing quote before end of input.
    UnterminatedString,
    /// A character that starts no token.
    UnexpectedChar,
    /// A word that is not one of the fixed keywords.
    UnknownWord,
}

impl LexError {
    pub fn message(self) -> &'static str {
        match self {
            LexError::UnterminatedString => "unterminated string literal",
            LexError::UnexpectedChar => "unexpected character",
            LexError::UnknownWord => "unknown keyword",
        }
    }
}

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    QuizKeyword,
    QuestionKeyword,
    ChoicesKeyword,
    CorrectMarker,
    /// Double-quoted string literal, quotes included in the token text.
    Str,
    Colon,
    Error(LexError),
    Eof,
}

impl TokenKind {
    /// Short description used in "expected ..." diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::QuizKeyword => "quiz keyword `اختبار`",
            TokenKind::QuestionKeyword => "question keyword `سؤال`",
            TokenKind::ChoicesKeyword => "choices keyword `اختيارات`",
            TokenKind::CorrectMarker => "correct marker `الجواب`",
            TokenKind::Str => "string",
            TokenKind::Colon => "`:`",
            TokenKind::Error(_) => "invalid input",
            TokenKind::Eof => "end of input",
        }
    }

    fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            QUIZ_KEYWORD => Some(TokenKind::QuizKeyword),
            QUESTION_KEYWORD => Some(TokenKind::QuestionKeyword),
            CHOICES_KEYWORD => Some(TokenKind::ChoicesKeyword),
            CORRECT_MARKER => Some(TokenKind::CorrectMarker),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified lexical unit with its source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw source text of the token (empty for `Eof`).
    pub text: &'a str,
    /// Byte span in the original input.
    pub span: Span,
    /// Line and column of the token's first character.
    pub pos: Position,
}

/// Tokenize the whole input. The last token is always `Eof`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::with_capacity(input.len() / 8 + 1);
    loop {
        let token = lexer.next_token();
        let eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if eof {
            break;
        }
    }
    log::trace!("lexed {} tokens from {} bytes", tokens.len(), input.len());
    tokens
}

/// Streaming lexer over a borrowed input.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
    pos: Position,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            pos: Position::START,
        }
    }

    /// Produce the next token. Returns `Eof` forever once input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let rest = &self.input[self.offset..];
        let ch = match rest.chars().next() {
            Some(c) => c,
            None => return self.make(TokenKind::Eof, self.offset),
        };

        match ch {
            '"' => self.lex_string(),
            ':' => self.make(TokenKind::Colon, self.offset + 1),
            c if is_word_char(c) => {
                let len = rest.find(|c| !is_word_char(c)).unwrap_or(rest.len());
                let word = &rest[..len];
                let kind =
                    TokenKind::keyword(word).unwrap_or(TokenKind::Error(LexError::UnknownWord));
                self.make(kind, self.offset + len)
            }
            c => self.make(
                TokenKind::Error(LexError::UnexpectedChar),
                self.offset + c.len_utf8(),
            ),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.offset..];
        let trimmed = rest.trim_start();
        let skipped = rest.len() - trimmed.len();
        if skipped > 0 {
            self.advance_to(self.offset + skipped);
        }
    }

    fn lex_string(&mut self) -> Token<'a> {
        // Skip the opening quote, then hop between quotes and backslashes.
        // Both are ASCII, so they never occur inside a multi-byte character.
        let mut cursor = self.offset + 1;
        loop {
            match memchr2(b'"', b'\\', &self.bytes[cursor..]) {
                Some(i) if self.bytes[cursor + i] == b'"' => {
                    return self.make(TokenKind::Str, cursor + i + 1);
                }
                Some(i) => {
                    // Backslash: the next character is escaped, whatever it is.
                    let escaped = cursor + i + 1;
                    cursor = match self.input[escaped..].chars().next() {
                        Some(c) => escaped + c.len_utf8(),
                        None => escaped,
                    };
                }
                None => {
                    return self.make(
                        TokenKind::Error(LexError::UnterminatedString),
                        self.bytes.len(),
                    );
                }
            }
        }
    }

    /// Build a token spanning from the current offset to `end` and move past it.
    fn make(&mut self, kind: TokenKind, end: usize) -> Token<'a> {
        let start = self.offset;
        let token = Token {
            kind,
            text: &self.input[start..end],
            span: Span::new(start as u32, end as u32),
            pos: self.pos,
        };
        self.advance_to(end);
        token
    }

    fn advance_to(&mut self, end: usize) {
        let consumed = &self.input[self.offset..end];
        let newlines = memchr_iter(b'\n', consumed.as_bytes()).count() as u32;
        if newlines == 0 {
            self.pos.column += consumed.chars().count() as u32;
        } else {
            // `memrchr` finds the last newline; the column restarts after it.
            let last = memrchr(b'\n', consumed.as_bytes()).unwrap_or(0);
            self.pos.line += newlines;
            self.pos.column = 1 + consumed[last + 1..].chars().count() as u32;
        }
        self.offset = end;
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}
