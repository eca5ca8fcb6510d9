//! Integration tests for the lexer, parser and text helpers

use quizdoc_core::error::SyntaxErrorKind;
use quizdoc_core::lexer::LexError;
use quizdoc_core::parser::parse_source;
use quizdoc_core::text::{escape_html, quote, unquote};
use quizdoc_core::{tokenize, Position, TokenKind};

const SAMPLE: &str = "اختبار \"Sample\"\n\
                      سؤال \"Capital of France?\"\n\
                      اختيارات:\n\
                      \"Paris\" الجواب\n\
                      \"London\"\n\
                      \"Rome\"\n";

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).into_iter().map(|t| t.kind).collect()
}

// ============================================================================
// Lexer Tests
// ============================================================================

#[test]
fn test_tokenize_sample() {
    assert_eq!(
        kinds(SAMPLE),
        vec![
            TokenKind::QuizKeyword,
            TokenKind::Str,
            TokenKind::QuestionKeyword,
            TokenKind::Str,
            TokenKind::ChoicesKeyword,
            TokenKind::Colon,
            TokenKind::Str,
            TokenKind::CorrectMarker,
            TokenKind::Str,
            TokenKind::Str,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_tokenize_empty_input() {
    let tokens = tokenize("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].pos, Position::new(1, 1));
}

#[test]
fn test_token_positions_count_characters() {
    let tokens = tokenize(SAMPLE);
    assert_eq!(tokens[0].pos, Position::new(1, 1));
    // Six-letter keyword plus a space.
    assert_eq!(tokens[1].pos, Position::new(1, 8));
    assert_eq!(tokens[2].pos, Position::new(2, 1));
    assert_eq!(tokens[3].pos, Position::new(2, 6));
    // Colon directly follows the eight-letter choices keyword.
    assert_eq!(tokens[5].pos, Position::new(3, 9));
    assert_eq!(tokens[6].pos, Position::new(4, 1));
}

#[test]
fn test_token_text_borrows_source() {
    let tokens = tokenize(SAMPLE);
    assert_eq!(tokens[1].text, "\"Sample\"");
    let span = tokens[1].span;
    assert_eq!(&SAMPLE[span.start as usize..span.end as usize], "\"Sample\"");
}

#[test]
fn test_tokenize_crlf_line_endings() {
    let tokens = tokenize("اختبار \"T\"\r\nسؤال \"Q\"");
    assert_eq!(tokens[2].kind, TokenKind::QuestionKeyword);
    assert_eq!(tokens[2].pos, Position::new(2, 1));
}

#[test]
fn test_string_with_escaped_quote_is_one_token() {
    let tokens = tokenize(r#""say \"hi\" \\" "next""#);
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].text, r#""say \"hi\" \\""#);
    assert_eq!(tokens[1].kind, TokenKind::Str);
    assert_eq!(tokens[1].text, "\"next\"");
}

#[test]
fn test_multiline_string_advances_lines() {
    let tokens = tokenize("\"one\ntwo\" :");
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[1].kind, TokenKind::Colon);
    assert_eq!(tokens[1].pos, Position::new(2, 6));
}

#[test]
fn test_unterminated_string() {
    let tokens = tokenize("اختبار \"open");
    assert_eq!(tokens[1].kind, TokenKind::Error(LexError::UnterminatedString));
    assert_eq!(tokens[1].text, "\"open");
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn test_trailing_backslash_is_unterminated() {
    let tokens = tokenize("\"abc\\");
    assert_eq!(tokens[0].kind, TokenKind::Error(LexError::UnterminatedString));
}

#[test]
fn test_unknown_word_and_character() {
    assert_eq!(
        kinds("quiz ?"),
        vec![
            TokenKind::Error(LexError::UnknownWord),
            TokenKind::Error(LexError::UnexpectedChar),
            TokenKind::Eof,
        ]
    );
}

// ============================================================================
// Parser Tests
// ============================================================================

#[test]
fn test_parse_sample_tree() {
    let tree = parse_source(SAMPLE).unwrap();
    assert_eq!(tree.title.text, "\"Sample\"");
    assert_eq!(tree.questions.len(), 1);

    let question = &tree.questions[0];
    assert_eq!(question.pos, Position::new(2, 1));
    assert_eq!(question.choices.choices.len(), 3);
    assert!(question.choices.choices[0].is_correct());
    assert!(!question.choices.choices[1].is_correct());
    assert_eq!(question.correct_count(), 1);
}

#[test]
fn test_node_spans_cover_their_tokens() {
    let tree = parse_source(SAMPLE).unwrap();
    let question = &tree.questions[0];
    let span = question.span;
    let text = &SAMPLE[span.start as usize..span.end as usize];
    assert!(text.starts_with("سؤال"));
    assert!(text.ends_with("\"Rome\""));
    assert_eq!(tree.span.start, 0);
    assert_eq!(tree.span.end, span.end);
}

#[test]
fn test_parse_zero_questions() {
    let tree = parse_source("اختبار \"Empty\"").unwrap();
    assert!(tree.questions.is_empty());
}

#[test]
fn test_parse_multiple_questions_in_order() {
    let input = "اختبار \"T\"\n\
                 سؤال \"first\" اختيارات: \"a\" الجواب\n\
                 سؤال \"second\" اختيارات: \"b\" \"c\" الجواب\n";
    let tree = parse_source(input).unwrap();
    let texts: Vec<_> = tree.questions.iter().map(|q| q.text.text).collect();
    assert_eq!(texts, vec!["\"first\"", "\"second\""]);
    assert!(tree.questions[1].choices.choices[1].is_correct());
}

#[test]
fn test_parse_missing_title() {
    let err = parse_source("اختبار\nسؤال \"Q\"").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken);
    assert_eq!(err.expected, vec![TokenKind::Str]);
    assert_eq!(err.position, Position::new(2, 1));
}

#[test]
fn test_parse_requires_quiz_keyword() {
    let err = parse_source("سؤال \"Q\"").unwrap_err();
    assert_eq!(err.expected, vec![TokenKind::QuizKeyword]);
    assert_eq!(err.position, Position::new(1, 1));
}

#[test]
fn test_parse_empty_choice_list() {
    let err = parse_source("اختبار \"T\"\nسؤال \"Q\"\nاختيارات:\n").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedEof);
    assert_eq!(err.expected, vec![TokenKind::Str]);
}

#[test]
fn test_parse_missing_colon() {
    let err = parse_source("اختبار \"T\"\nسؤال \"Q\"\nاختيارات \"a\" الجواب").unwrap_err();
    assert_eq!(err.expected, vec![TokenKind::Colon]);
    assert_eq!(err.found, "\"a\"");
}

#[test]
fn test_parse_stray_marker() {
    let err =
        parse_source("اختبار \"T\"\nسؤال \"Q\"\nاختيارات: \"a\" الجواب الجواب").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedToken);
    assert!(err.expected.contains(&TokenKind::QuestionKeyword));
    assert!(err.expected.contains(&TokenKind::Eof));
}

#[test]
fn test_parse_reports_lexical_error() {
    let err = parse_source("اختبار \"T\" oops").unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::Lexical(LexError::UnknownWord));
    assert_eq!(err.found, "oops");
    assert_eq!(err.position, Position::new(1, 12));
    assert!(err.to_string().contains("line 1, col 12"));
}

// ============================================================================
// Text Helper Tests
// ============================================================================

#[test]
fn test_unquote_escapes() {
    assert_eq!(unquote(r#""plain""#), "plain");
    assert_eq!(unquote(r#""a \"b\" c""#), "a \"b\" c");
    assert_eq!(unquote(r#""back\\slash""#), "back\\slash");
    assert_eq!(unquote(r#""keep \n as is""#), "keep \\n as is");
}

#[test]
fn test_unquote_is_left_inverse_of_quote() {
    let samples = [
        "",
        "plain",
        "\"",
        "\\",
        "\\\"",
        "ends with backslash \\",
        "mixed \\n \"quoted\" \\\\ text",
        "ما هي عاصمة فرنسا؟",
    ];
    for s in samples {
        assert_eq!(unquote(&quote(s)), s, "round trip of {:?}", s);
    }
}

#[test]
fn test_quoted_text_lexes_as_single_string() {
    let literal = quote("tricky \"\\\" text\\");
    let tokens = tokenize(&literal);
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].text, literal);
}

#[test]
fn test_escape_html_all_five() {
    assert_eq!(escape_html("<script>&\"'"), "&lt;script&gt;&amp;&quot;&#39;");
}

#[test]
fn test_escape_html_leaves_other_text() {
    assert_eq!(escape_html("Paris / باريس"), "Paris / باريس");
}
