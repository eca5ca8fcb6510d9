use std::fmt;

use crate::lexer::{LexError, Token, TokenKind};
use crate::span::{Position, Span};

/// Error kinds for categorizing syntax errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A well-formed token that cannot continue the current production.
    UnexpectedToken,
    /// Input ended while a production was still open.
    UnexpectedEof,
    /// The lexer could not classify the input at this point.
    Lexical(LexError),
}

/// The input does not match the grammar.
///
/// Always fatal for the compile: no tree and no document are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Error categorization
    pub kind: SyntaxErrorKind,
    /// Line and column of the offending token
    pub position: Position,
    /// Byte span of the offending token
    pub span: Span,
    /// Token kinds that would have been accepted here
    pub expected: Vec<TokenKind>,
    /// Source text of the offending token
    pub found: String,
}

impl SyntaxError {
    /// Create an error for a token that cannot continue the current production.
    pub fn unexpected(token: &Token<'_>, expected: &[TokenKind]) -> Self {
        let kind = match token.kind {
            TokenKind::Eof => SyntaxErrorKind::UnexpectedEof,
            TokenKind::Error(e) => SyntaxErrorKind::Lexical(e),
            _ => SyntaxErrorKind::UnexpectedToken,
        };
        let found = match token.kind {
            TokenKind::Eof => TokenKind::Eof.describe().to_string(),
            _ => format!("`{}`", token.text),
        };
        let message = match kind {
            SyntaxErrorKind::Lexical(e) => format!(
                "{} {}, expected {}",
                e.message(),
                found,
                describe_expected(expected)
            ),
            _ => format!("expected {}, found {}", describe_expected(expected), found),
        };
        Self {
            message,
            kind,
            position: token.pos,
            span: token.span,
            expected: expected.to_vec(),
            found: token.text.to_string(),
        }
    }
}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [only] => only.describe().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|k| k.describe()).collect();
            format!("{} or {}", head.join(", "), last.describe())
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.position)
    }
}

impl std::error::Error for SyntaxError {}

/// A question that does not have exactly one correct choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable error message
    pub message: String,
    /// Unquoted text of the offending question
    pub question: String,
    /// Number of choices carrying the correct marker
    pub found: usize,
    /// Location of the question's text
    pub position: Option<Position>,
}

impl ValidationError {
    /// Create an error for a question with the wrong number of correct choices.
    pub fn correct_count(question: impl Into<String>, found: usize, position: Option<Position>) -> Self {
        let question = question.into();
        Self {
            message: format!(
                "question '{}' must have exactly one correct answer, found {}",
                question, found
            ),
            question,
            found,
            position,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(position) = self.position {
            write!(f, " ({})", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A collection of validation errors gathered over the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Create an empty error collection.
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Add an error to the collection.
    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Check if any errors were collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }
}

// One error per line, in source order.
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'e> IntoIterator for &'e ValidationErrors {
    type Item = &'e ValidationError;
    type IntoIter = std::slice::Iter<'e, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Why a compile produced no document.
///
/// The two kinds never mix: validation only runs on a tree that parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Syntax(SyntaxError),
    Validation(ValidationErrors),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Syntax(e) => write!(f, "syntax error: {}", e),
            CompileError::Validation(errors) => {
                write!(f, "{} validation error(s):", errors.len())?;
                for error in errors {
                    write!(f, "\n - {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Syntax(e) => Some(e),
            CompileError::Validation(_) => None,
        }
    }
}

impl From<SyntaxError> for CompileError {
    fn from(e: SyntaxError) -> Self {
        CompileError::Syntax(e)
    }
}

impl From<ValidationErrors> for CompileError {
    fn from(errors: ValidationErrors) -> Self {
        CompileError::Validation(errors)
    }
}
