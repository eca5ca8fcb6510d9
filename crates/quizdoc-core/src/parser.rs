//! Recursive-descent parser for the quiz language.
//!
//! One function per production, one token of lookahead, no backtracking.
//! The first token that cannot continue the current production aborts the
//! parse; there is no recovery and no partial tree.

use crate::error::SyntaxError;
use crate::lexer::{tokenize, Token, TokenKind};
use crate::tree::{ChoiceListNode, ChoiceNode, QuestionNode, QuizNode};

/// Tokenize and parse in one step.
pub fn parse_source(input: &str) -> Result<QuizNode<'_>, SyntaxError> {
    let tokens = tokenize(input);
    parse(&tokens)
}

/// Parse a token sequence produced by [`tokenize`].
///
/// The sequence must end with an `Eof` token; a missing one is treated as
/// end of input at the last token.
pub fn parse<'a>(tokens: &[Token<'a>]) -> Result<QuizNode<'a>, SyntaxError> {
    let mut parser = Parser::new(tokens);
    let quiz = parser.parse_quiz()?;
    log::debug!("parsed quiz with {} question(s)", quiz.questions.len());
    Ok(quiz)
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    index: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    #[inline]
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self { tokens, index: 0 }
    }

    /// Look at the current token without consuming it.
    #[inline]
    fn peek(&self) -> Token<'a> {
        match self.tokens.get(self.index).or_else(|| self.tokens.last()) {
            Some(token) => *token,
            None => Token {
                kind: TokenKind::Eof,
                text: "",
                span: Default::default(),
                pos: Default::default(),
            },
        }
    }

    #[inline]
    fn bump(&mut self) -> Token<'a> {
        let token = self.peek();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    /// Consume a token of the given kind or fail naming it as expected.
    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, SyntaxError> {
        let token = self.peek();
        if token.kind == kind {
            Ok(self.bump())
        } else {
            Err(SyntaxError::unexpected(&token, &[kind]))
        }
    }

    fn parse_quiz(&mut self) -> Result<QuizNode<'a>, SyntaxError> {
        let keyword = self.expect(TokenKind::QuizKeyword)?;
        let title = self.expect(TokenKind::Str)?;

        let mut questions = Vec::new();
        loop {
            let token = self.peek();
            match token.kind {
                TokenKind::QuestionKeyword => questions.push(self.parse_question()?),
                TokenKind::Eof => break,
                // After a choice list another choice would also have been accepted.
                _ if questions.is_empty() => {
                    return Err(SyntaxError::unexpected(
                        &token,
                        &[TokenKind::QuestionKeyword, TokenKind::Eof],
                    ))
                }
                _ => {
                    return Err(SyntaxError::unexpected(
                        &token,
                        &[TokenKind::Str, TokenKind::QuestionKeyword, TokenKind::Eof],
                    ))
                }
            }
        }

        let end = questions.last().map_or(title.span, |q| q.span);
        Ok(QuizNode {
            pos: keyword.pos,
            span: keyword.span.merge(end),
            keyword,
            title,
            questions,
        })
    }

    fn parse_question(&mut self) -> Result<QuestionNode<'a>, SyntaxError> {
        let keyword = self.expect(TokenKind::QuestionKeyword)?;
        let text = self.expect(TokenKind::Str)?;
        let choices = self.parse_choices()?;
        Ok(QuestionNode {
            pos: keyword.pos,
            span: keyword.span.merge(choices.span),
            keyword,
            text,
            choices,
        })
    }

    fn parse_choices(&mut self) -> Result<ChoiceListNode<'a>, SyntaxError> {
        let keyword = self.expect(TokenKind::ChoicesKeyword)?;
        let colon = self.expect(TokenKind::Colon)?;

        // `choice+`: the first one is mandatory.
        let mut choices = vec![self.parse_choice()?];
        while self.peek().kind == TokenKind::Str {
            choices.push(self.parse_choice()?);
        }

        let end = choices.last().map_or(colon.span, |c| c.span);
        Ok(ChoiceListNode {
            pos: keyword.pos,
            span: keyword.span.merge(end),
            keyword,
            colon,
            choices,
        })
    }

    fn parse_choice(&mut self) -> Result<ChoiceNode<'a>, SyntaxError> {
        let text = self.expect(TokenKind::Str)?;
        let marker = if self.peek().kind == TokenKind::CorrectMarker {
            Some(self.bump())
        } else {
            None
        };
        let end = marker.map_or(text.span, |m| m.span);
        Ok(ChoiceNode {
            pos: text.pos,
            span: text.span.merge(end),
            text,
            marker,
        })
    }
}
