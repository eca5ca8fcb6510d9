//! HTML renderer for compiled quizzes.
//!
//! Output is a single self-contained page: a fixed shell with inline CSS,
//! the generated quiz body, and a fixed inline script that grades the
//! answers in the browser. Rendering is a pure function of the model, so
//! the same quiz always yields byte-identical output.
//!
//! The correct answer is visible in the markup as `data-correct="true"`.
//! The page grades on the client, so hiding it is not attempted.

use crate::model::{Choice, Question, Quiz};
use crate::text::push_escaped;

const PAGE_HEAD: &str = r#"<!doctype html>
<html lang="ar" dir="rtl">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>"#;

const PAGE_STYLE: &str = r#"</title>
<style>
  body { font-family: Arial, sans-serif; margin: 20px; line-height: 1.5; }
  .quiz { max-width: 600px; margin: auto; }
  h1 { font-size: 1.5rem; margin-bottom: 1rem; }
  .question { padding: 10px; border: 1px solid #ccc; margin-bottom: 15px; border-radius: 5px; }
  h2 { font-size: 1.1rem; margin-bottom: 0.5rem; }
  .choices { list-style: none; padding: 0; }
  .choices li { margin-bottom: 5px; }
  .right { background-color: #d4edda; }
  .wrong { background-color: #f8d7da; }
  .actions { margin-top: 15px; display: flex; gap: 10px; align-items: center; }
  button { padding: 5px 10px; border: 1px solid #999; background: #eee; cursor: pointer; }
  button:hover { background: #ddd; }
  #score { font-weight: bold; }
</style>
</head>
<body>
"#;

const ACTIONS: &str = r#"<div class="actions">
<button id="checkBtn" type="button">تحقق من الإجابات</button>
<button id="resetBtn" type="button">إعادة تعيين</button>
<span id="score"></span>
</div>
</main>
"#;

// Grades only answered questions: each gets `right` or `wrong`, and the
// score shows correct over answered.
const PAGE_SCRIPT: &str = r#"<script>
(function(){
  const $$ = sel => document.querySelectorAll(sel);
  const scoreEl = document.getElementById("score");

  function clearMarks(q){
    q.classList.remove("right", "wrong");
  }

  document.getElementById("checkBtn").addEventListener("click", () => {
    let total = 0, correct = 0;
    $$(".question").forEach(q => {
      clearMarks(q);
      const selected = q.querySelector("input[type=radio]:checked");
      if (selected) {
        total++;
        if (selected.dataset.correct === "true") {
          q.classList.add("right");
          correct++;
        } else {
          q.classList.add("wrong");
        }
      }
    });
    scoreEl.textContent = "النتيجة: " + correct + " / " + total;
  });

  document.getElementById("resetBtn").addEventListener("click", () => {
    $$(".question").forEach(q => {
      clearMarks(q);
      q.querySelectorAll("input[type=radio]").forEach(inp => inp.checked = false);
    });
    scoreEl.textContent = "";
  });
})();
</script>
</body>
</html>
"#;

/// Identifier of the question at 1-based `index`.
#[inline]
pub fn question_id(index: usize) -> String {
    format!("q{}", index)
}

/// Identifier of the choice at 1-based `choice` within question `question`.
#[inline]
pub fn choice_id(question: usize, choice: usize) -> String {
    format!("q{}_c{}", question, choice)
}

/// Render the quiz into a complete HTML document.
pub fn render(quiz: &Quiz) -> String {
    let mut out = String::with_capacity(4096 + quiz.choice_count() * 128);

    out.push_str(PAGE_HEAD);
    push_escaped(&mut out, &quiz.title);
    out.push_str(PAGE_STYLE);

    out.push_str("<main class=\"quiz\">\n<header><h1>اختبار ");
    push_escaped(&mut out, &quiz.title);
    out.push_str("</h1></header>\n");

    for (i, question) in quiz.questions.iter().enumerate() {
        render_question(&mut out, i + 1, question);
    }

    out.push_str(ACTIONS);
    out.push_str(PAGE_SCRIPT);

    log::debug!(
        "rendered {} question(s) into {} bytes",
        quiz.questions.len(),
        out.len()
    );
    out
}

fn render_question(out: &mut String, index: usize, question: &Question) {
    let id = question_id(index);

    out.push_str("<section class=\"question\" id=\"");
    out.push_str(&id);
    out.push_str("\">\n<h2>");
    push_escaped(out, &question.text);
    out.push_str("</h2>\n<ul class=\"choices\">\n");

    for (i, choice) in question.choices.iter().enumerate() {
        render_choice(out, index, i + 1, &id, choice);
    }

    out.push_str("</ul>\n</section>\n");
}

fn render_choice(out: &mut String, question: usize, index: usize, name: &str, choice: &Choice) {
    out.push_str("<li><label><input type=\"radio\" name=\"");
    out.push_str(name);
    out.push_str("\" id=\"");
    out.push_str(&choice_id(question, index));
    out.push_str("\" value=\"");
    out.push_str(&index.to_string());
    out.push('"');
    if choice.correct {
        out.push_str(" data-correct=\"true\"");
    }
    out.push('>');
    push_escaped(out, &choice.text);
    out.push_str("</label></li>\n");
}
