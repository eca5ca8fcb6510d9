//! Structural validation of a parsed quiz.
//!
//! Every question must carry exactly one correct marker. All questions are
//! checked and every violation is reported, so one compile surfaces every
//! offending question.

use crate::error::{ValidationError, ValidationErrors};
use crate::text::unquote;
use crate::tree::{QuestionNode, QuizNode};

/// Check the whole tree. An empty result means the quiz is valid.
pub fn validate(quiz: &QuizNode<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for question in &quiz.questions {
        validate_question(question, &mut errors);
    }
    if errors.is_empty() {
        log::debug!("validated {} question(s)", quiz.questions.len());
    } else {
        log::debug!("validation found {} error(s)", errors.len());
    }
    errors
}

fn validate_question(question: &QuestionNode<'_>, errors: &mut ValidationErrors) {
    let found = question.correct_count();
    if found != 1 {
        errors.push(ValidationError::correct_count(
            unquote(question.text.text),
            found,
            Some(question.text.pos),
        ));
    }
}
