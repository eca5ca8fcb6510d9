//! Python bindings for the quizdoc compiler.

use pyo3::exceptions::{PySyntaxError, PyValueError};
use pyo3::prelude::*;
use quizdoc_core::{
    Choice as CoreChoice, CompileError, Question as CoreQuestion, Quiz as CoreQuiz,
};

// ============================================================================
// Model
// ============================================================================

/// A single answer choice.
#[pyclass(frozen, get_all, name = "Choice")]
#[derive(Clone)]
pub struct PyChoice {
    pub text: String,
    pub correct: bool,
}

#[pymethods]
impl PyChoice {
    fn __repr__(&self) -> String {
        format!("Choice({:?}, correct={})", self.text, self.correct)
    }
}

impl From<&CoreChoice> for PyChoice {
    fn from(c: &CoreChoice) -> Self {
        PyChoice {
            text: c.text.clone(),
            correct: c.correct,
        }
    }
}

/// A question with its choices in authored order.
#[pyclass(frozen, get_all, name = "Question")]
#[derive(Clone)]
pub struct PyQuestion {
    pub text: String,
    pub choices: Vec<PyChoice>,
}

#[pymethods]
impl PyQuestion {
    fn __repr__(&self) -> String {
        format!("Question({:?}, choices={})", self.text, self.choices.len())
    }

    fn __len__(&self) -> usize {
        self.choices.len()
    }
}

impl From<&CoreQuestion> for PyQuestion {
    fn from(q: &CoreQuestion) -> Self {
        PyQuestion {
            text: q.text.clone(),
            choices: q.choices.iter().map(PyChoice::from).collect(),
        }
    }
}

/// A compiled quiz.
#[pyclass(frozen, name = "Quiz")]
pub struct PyQuiz {
    inner: CoreQuiz,
}

#[pymethods]
impl PyQuiz {
    #[getter]
    fn title(&self) -> String {
        self.inner.title.clone()
    }

    #[getter]
    fn questions(&self) -> Vec<PyQuestion> {
        self.inner.questions.iter().map(PyQuestion::from).collect()
    }

    /// Render this quiz into a self-contained HTML page.
    fn render(&self) -> String {
        quizdoc_core::render(&self.inner)
    }

    fn __repr__(&self) -> String {
        format!(
            "Quiz({:?}, questions={})",
            self.inner.title,
            self.inner.questions.len()
        )
    }

    fn __len__(&self) -> usize {
        self.inner.questions.len()
    }
}

// ============================================================================
// Errors
// ============================================================================

fn to_py_err(e: CompileError) -> PyErr {
    match e {
        CompileError::Syntax(e) => PySyntaxError::new_err(e.to_string()),
        CompileError::Validation(errors) => PyValueError::new_err(errors.to_string()),
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Compile quiz source text.
///
/// Args:
///     source: Quiz source text
///
/// Returns:
///     Quiz: The compiled quiz
///
/// Raises:
///     SyntaxError: If the source does not match the grammar
///     ValueError: Listing every question without exactly one correct choice
#[pyfunction]
#[pyo3(text_signature = "(source)")]
fn compile(source: &str) -> PyResult<PyQuiz> {
    quizdoc_core::compile(source)
        .map(|inner| PyQuiz { inner })
        .map_err(to_py_err)
}

/// Render a compiled quiz into a self-contained HTML page.
#[pyfunction]
#[pyo3(text_signature = "(quiz)")]
fn render(quiz: PyRef<'_, PyQuiz>) -> String {
    quiz.render()
}

/// Compile quiz source text straight to HTML.
///
/// Raises the same errors as `compile`.
#[pyfunction]
#[pyo3(text_signature = "(source)")]
fn compile_html(source: &str) -> PyResult<String> {
    quizdoc_core::compile_html(source).map_err(to_py_err)
}

// ============================================================================
// Module
// ============================================================================

/// quizdoc - compile multiple-choice quizzes into self-grading HTML.
#[pymodule]
fn pyquiz(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyQuiz>()?;
    m.add_class::<PyQuestion>()?;
    m.add_class::<PyChoice>()?;
    m.add_function(wrap_pyfunction!(compile, m)?)?;
    m.add_function(wrap_pyfunction!(render, m)?)?;
    m.add_function(wrap_pyfunction!(compile_html, m)?)?;
    Ok(())
}
