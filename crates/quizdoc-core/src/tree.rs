//! Parse tree types produced by the parser.
//!
//! The tree is:
//!
//! - **Zero-copy**: nodes hold the tokens they matched, which borrow from input
//! - **Position-tracked**: every node records where it starts
//! - **Owned top-down**: each node exclusively owns its children
//!
//! Nothing mutates a tree after the parser returns it.

use crate::lexer::Token;
use crate::span::{Position, Span};

/// Root node: `quiz := QUIZ_KW STRING question*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizNode<'a> {
    pub keyword: Token<'a>,
    /// Quoted title literal.
    pub title: Token<'a>,
    /// Questions in source order.
    pub questions: Vec<QuestionNode<'a>>,
    pub pos: Position,
    pub span: Span,
}

/// `question := QUESTION_KW STRING choices`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionNode<'a> {
    pub keyword: Token<'a>,
    /// Quoted question literal.
    pub text: Token<'a>,
    pub choices: ChoiceListNode<'a>,
    pub pos: Position,
    pub span: Span,
}

impl QuestionNode<'_> {
    /// Number of choices carrying the correct marker.
    pub fn correct_count(&self) -> usize {
        self.choices
            .choices
            .iter()
            .filter(|c| c.is_correct())
            .count()
    }
}

/// `choices := CHOICES_KW ':' choice+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceListNode<'a> {
    pub keyword: Token<'a>,
    pub colon: Token<'a>,
    /// At least one choice, in source order.
    pub choices: Vec<ChoiceNode<'a>>,
    pub pos: Position,
    pub span: Span,
}

/// `choice := STRING CORRECT_MARKER?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceNode<'a> {
    /// Quoted choice literal.
    pub text: Token<'a>,
    pub marker: Option<Token<'a>>,
    pub pos: Position,
    pub span: Span,
}

impl ChoiceNode<'_> {
    #[inline]
    pub fn is_correct(&self) -> bool {
        self.marker.is_some()
    }
}
