//! Plain document model built from a parse tree.
//!
//! The model owns its strings and no longer refers to the source text, so
//! it can outlive the input it was compiled from.

use serde::Serialize;

use crate::text::unquote;
use crate::tree::{ChoiceNode, QuestionNode, QuizNode};

/// A compiled quiz: title plus questions in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    pub title: String,
    /// May be empty when the source declares no questions.
    pub questions: Vec<Question>,
}

/// One question with its choices in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Question {
    /// Number of choices flagged correct. Exactly one after a successful compile.
    pub fn correct_count(&self) -> usize {
        self.choices.iter().filter(|c| c.correct).count()
    }

    /// The correct choice, if there is exactly one.
    pub fn correct_choice(&self) -> Option<&Choice> {
        let mut correct = self.choices.iter().filter(|c| c.correct);
        match (correct.next(), correct.next()) {
            (Some(choice), None) => Some(choice),
            _ => None,
        }
    }
}

/// A single answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub text: String,
    pub correct: bool,
}

impl Quiz {
    /// Total number of choices across all questions.
    pub fn choice_count(&self) -> usize {
        self.questions.iter().map(|q| q.choices.len()).sum()
    }
}

/// Translate a parse tree into the document model, preserving order.
pub fn build(quiz: &QuizNode<'_>) -> Quiz {
    Quiz {
        title: unquote(quiz.title.text).into_owned(),
        questions: quiz.questions.iter().map(build_question).collect(),
    }
}

fn build_question(question: &QuestionNode<'_>) -> Question {
    Question {
        text: unquote(question.text.text).into_owned(),
        choices: question.choices.choices.iter().map(build_choice).collect(),
    }
}

fn build_choice(choice: &ChoiceNode<'_>) -> Choice {
    Choice {
        text: unquote(choice.text.text).into_owned(),
        correct: choice.is_correct(),
    }
}
