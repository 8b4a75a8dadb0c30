//! This module contains the parser for the pattern syntax.
//! The parser is a hand-written recursive-descent parser that produces a
//! syntax tree ([`Ast`]) over the reduced ERE-subset grammar:
//!
//! ```text
//! Alt    := Concat ('|' Concat)*
//! Concat := Factor+
//! Factor := Base '*'*
//! Base   := '(' Alt ')' | '.' | '\' any | anyNonSpecial
//! ```

use log::trace;

use crate::errors::{CompileError, CompileErrorKind};
use crate::internal::ast::Ast;

type Result<T> = std::result::Result<T, CompileError>;

struct Parser {
    chars: Vec<(usize, char)>,
    end: usize,
    idx: usize,
}

impl Parser {
    fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.char_indices().collect(),
            end: pattern.len(),
            idx: 0,
        }
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.idx).map(|(_, c)| *c)
    }

    #[inline]
    fn pos(&self) -> usize {
        self.chars.get(self.idx).map_or(self.end, |(p, _)| *p)
    }

    #[inline]
    fn advance(&mut self) {
        self.idx += 1;
    }

    fn parse_alt(&mut self, depth: usize) -> Result<Ast> {
        let mut left = self.parse_concat(depth)?;
        while self.peek_char() == Some('|') {
            self.advance();
            let right = self.parse_concat(depth)?;
            left = Ast::alt(left, right);
        }
        Ok(left)
    }

    fn parse_concat(&mut self, depth: usize) -> Result<Ast> {
        let mut factors = Vec::new();
        loop {
            match self.peek_char() {
                None => break,
                Some('|') => break,
                Some(')') => {
                    if depth == 0 {
                        return Err(CompileError::new(
                            self.pos(),
                            CompileErrorKind::UnopenedGroup,
                        ));
                    }
                    break;
                }
                Some(_) => factors.push(self.parse_factor(depth)?),
            }
        }
        if factors.is_empty() {
            return Err(CompileError::new(
                self.pos(),
                CompileErrorKind::EmptyConcatenation,
            ));
        }
        let mut iter = factors.into_iter();
        let mut result = iter.next().expect("checked non-empty above");
        for factor in iter {
            result = Ast::concat(result, factor);
        }
        Ok(result)
    }

    fn parse_factor(&mut self, depth: usize) -> Result<Ast> {
        let mut base = self.parse_base(depth)?;
        while self.peek_char() == Some('*') {
            self.advance();
            base = Ast::star(base);
        }
        Ok(base)
    }

    fn parse_base(&mut self, depth: usize) -> Result<Ast> {
        match self.peek_char() {
            None => Err(CompileError::new(
                self.pos(),
                CompileErrorKind::EmptyConcatenation,
            )),
            Some('*') => Err(CompileError::new(self.pos(), CompileErrorKind::LeadingStar)),
            Some('(') => {
                let open_pos = self.pos();
                self.advance();
                if self.peek_char() == Some(')') {
                    self.advance();
                    return Ok(Ast::empty());
                }
                let inner = self.parse_alt(depth + 1)?;
                match self.peek_char() {
                    Some(')') => {
                        self.advance();
                        Ok(inner)
                    }
                    _ => Err(CompileError::new(open_pos, CompileErrorKind::UnclosedGroup)),
                }
            }
            Some('.') => {
                self.advance();
                Ok(Ast::Dot)
            }
            Some('\\') => {
                self.advance();
                match self.peek_char() {
                    None => Err(CompileError::new(
                        self.pos(),
                        CompileErrorKind::TrailingEscape,
                    )),
                    Some(c) => {
                        self.advance();
                        Ok(Ast::Char(c))
                    }
                }
            }
            Some(c) => {
                self.advance();
                Ok(Ast::Char(c))
            }
        }
    }
}

/// Parse a pattern string into a syntax tree.
///
/// # Errors
/// Returns a [`CompileError`] carrying the byte offset and kind of the first
/// error encountered. The parser never consumes past end-of-pattern silently:
/// any unconsumed trailing character is reported as
/// [`CompileErrorKind::TrailingInput`].
pub(crate) fn parse(pattern: &str) -> Result<Ast> {
    if pattern.is_empty() {
        return Err(CompileError::new(0, CompileErrorKind::EmptyPattern));
    }
    let mut parser = Parser::new(pattern);
    let ast = parser.parse_alt(0)?;
    if parser.peek_char().is_some() {
        return Err(CompileError::new(
            parser.pos(),
            CompileErrorKind::TrailingInput,
        ));
    }
    trace!("parsed {:?} -> {:?}", pattern, ast);
    Ok(ast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::ast::EMPTY;

    #[test]
    fn test_parse_literal() {
        assert_eq!(parse("a").unwrap(), Ast::Char('a'));
    }

    #[test]
    fn test_parse_dot() {
        assert_eq!(parse(".").unwrap(), Ast::Dot);
    }

    #[test]
    fn test_parse_concat() {
        assert_eq!(
            parse("ab").unwrap(),
            Ast::concat(Ast::Char('a'), Ast::Char('b'))
        );
    }

    #[test]
    fn test_parse_alt() {
        assert_eq!(
            parse("a|b").unwrap(),
            Ast::alt(Ast::Char('a'), Ast::Char('b'))
        );
    }

    #[test]
    fn test_parse_star() {
        assert_eq!(parse("a*").unwrap(), Ast::star(Ast::Char('a')));
    }

    #[test]
    fn test_parse_double_star() {
        assert_eq!(
            parse("a**").unwrap(),
            Ast::star(Ast::star(Ast::Char('a')))
        );
    }

    #[test]
    fn test_parse_group() {
        assert_eq!(parse("(a)").unwrap(), Ast::Char('a'));
    }

    #[test]
    fn test_parse_empty_group() {
        assert_eq!(parse("()").unwrap(), Ast::Char(EMPTY));
    }

    #[test]
    fn test_parse_escape() {
        assert_eq!(parse(r"\*").unwrap(), Ast::Char('*'));
        assert_eq!(parse(r"\(").unwrap(), Ast::Char('('));
    }

    #[test]
    fn test_parse_complex() {
        // (a|b)*abb
        let ast = parse("(a|b)*abb").unwrap();
        let ab = Ast::alt(Ast::Char('a'), Ast::Char('b'));
        let expected = Ast::concat(
            Ast::concat(Ast::concat(Ast::star(ab), Ast::Char('a')), Ast::Char('b')),
            Ast::Char('b'),
        );
        assert_eq!(ast, expected);
    }

    #[test]
    fn test_empty_pattern_error() {
        let err = parse("").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::EmptyPattern);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_empty_concatenation_trailing_bar() {
        let err = parse("a|").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::EmptyConcatenation);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_empty_concatenation_leading_bar() {
        let err = parse("|a").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::EmptyConcatenation);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse("(a").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::UnclosedGroup);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_unopened_group() {
        let err = parse("a)").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::UnopenedGroup);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_leading_star() {
        let err = parse("*a").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::LeadingStar);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn test_trailing_escape() {
        let err = parse(r"a\").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::TrailingEscape);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn test_trailing_input() {
        let err = parse("a)b").unwrap_err();
        // The first ')' is reported before trailing input is even reached.
        assert_eq!(err.kind, CompileErrorKind::UnopenedGroup);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn test_round_trip_unparse() {
        for pattern in ["a", "ab", "a|b", "a*", "(a|b)*abb", "a.c", "(.*)(abc)(.*)"] {
            let ast = parse(pattern).unwrap();
            let unparsed = ast.unparse();
            let reparsed = parse(&unparsed).unwrap();
            assert_eq!(ast, reparsed, "round-trip failed for {pattern:?}");
        }
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'é' is two bytes in UTF-8; the trailing escape should be reported at
        // the byte offset, not the char offset.
        let err = parse("é\\").unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::TrailingEscape);
        assert_eq!(err.offset, 3);
    }
}
