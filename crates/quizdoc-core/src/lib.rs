//! # quizdoc Core
//!
//! Compiler for a small multiple-choice quiz language. A source file
//! declares a title, then questions, each with choices of which exactly
//! one is marked correct. The compiler turns it into a single
//! self-contained HTML page that grades itself in the browser.
//!
//! ## Quick Start
//!
//! ```rust
//! let source = "اختبار \"Sample\"\n\
//!               سؤال \"Capital of France?\"\n\
//!               اختيارات:\n\
//!               \"Paris\" الجواب\n\
//!               \"London\"\n\
//!               \"Rome\"\n";
//!
//! let quiz = quizdoc_core::compile(source).unwrap();
//! assert_eq!(quiz.questions[0].choices.len(), 3);
//!
//! let html = quizdoc_core::render(&quiz);
//! assert!(html.contains("id=\"q1_c1\""));
//! ```
//!
//! ## Pipeline
//!
//! 1. [`lexer::tokenize`] turns text into positioned tokens (never fails)
//! 2. [`parser::parse`] matches tokens against the grammar ([`SyntaxError`])
//! 3. [`validate::validate`] checks one correct choice per question,
//!    collecting every violation ([`ValidationErrors`])
//! 4. [`model::build`] produces the [`Quiz`] document model
//! 5. [`render::render`] produces the HTML page
//!
//! A document is produced only when parsing succeeds and validation
//! reports nothing.

pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod render;
pub mod span;
pub mod text;
pub mod tree;
pub mod validate;

pub use error::{CompileError, SyntaxError, SyntaxErrorKind, ValidationError, ValidationErrors};
pub use lexer::{tokenize, Token, TokenKind};
pub use model::{build, Choice, Question, Quiz};
pub use parser::parse;
pub use render::render;
pub use span::{Position, Span};
pub use validate::validate;

/// Compile source text into the document model.
///
/// Fails with [`CompileError::Syntax`] on the first grammar mismatch, or
/// with [`CompileError::Validation`] listing every question that does not
/// have exactly one correct choice.
pub fn compile(source: &str) -> Result<Quiz, CompileError> {
    let tokens = tokenize(source);
    let tree = parse(&tokens)?;

    let errors = validate(&tree);
    if !errors.is_empty() {
        return Err(CompileError::Validation(errors));
    }

    Ok(build(&tree))
}

/// Compile source text straight to the rendered HTML page.
pub fn compile_html(source: &str) -> Result<String, CompileError> {
    compile(source).map(|quiz| render(&quiz))
}
