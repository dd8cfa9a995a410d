use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{all_consuming, opt, recognize},
    sequence::pair,
    IResult,
};
use exprtok_protocol::TokenType;
use exprtok_trie::Select;

use crate::table::OperatorTable;
use crate::token::{Span, Token};

/// Identifier characters: ASCII letters and underscore.
pub fn is_variable_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Canonical integer literal: optional leading minus, then ASCII digits.
pub fn is_int_literal(text: &str) -> bool {
    let parsed: IResult<&str, &str> = all_consuming(recognize(pair(opt(char('-')), digit1)))(text);
    parsed.is_ok()
}

/// Collapses every whitespace run into a single space.
pub fn normalize_whitespace(original_input: &str) -> Vec<char> {
    let mut input = original_input;
    let mut symbols = Vec::with_capacity(input.len());

    while !input.is_empty() {
        let run: IResult<&str, &str> = take_while1(char::is_whitespace)(input);
        match run {
            Ok((next_input, _)) => {
                symbols.push(' ');
                input = next_input;
            }
            Err(_) => {
                if let Some(c) = input.chars().next() {
                    symbols.push(c);
                    input = &input[c.len_utf8()..];
                } else {
                    break;
                }
            }
        }
    }

    symbols
}

/// What a peek predicate sees: the next symbol and the symbols already taken.
#[derive(Debug, Clone, Copy)]
pub struct PeekProgress<'a> {
    pub symbol: char,
    pub prev: &'a [char],
}

impl PeekProgress<'_> {
    /// The span so far with `symbol` appended.
    pub fn full(&self) -> String {
        self.prev.iter().chain(Some(&self.symbol)).collect()
    }
}

/// Extends a span from `index` one symbol at a time while `predicate`
/// holds, taking at most `limit` symbols. An empty span means nothing matched.
pub fn peek_ahead<P>(data: &[char], index: usize, limit: Option<usize>, mut predicate: P) -> Span
where
    P: FnMut(&PeekProgress<'_>) -> bool,
{
    let mut end = index;
    while end < data.len() && limit.map_or(true, |limit| end - index < limit) {
        let progress = PeekProgress {
            symbol: data[end],
            prev: &data[index..end],
        };
        if !predicate(&progress) {
            break;
        }
        end += 1;
    }
    Span::new(index, end)
}

/// The readers the tokenizer tries, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reader {
    Variable,
    Literal,
    Operator,
}

impl Reader {
    pub const ORDER: [Reader; 3] = [Reader::Variable, Reader::Literal, Reader::Operator];
}

pub fn read_variable(data: &[char], index: usize) -> Option<Token> {
    let span = peek_ahead(data, index, None, |p| is_variable_char(p.symbol));
    if span.is_empty() {
        return None;
    }
    Some(Token::new(&data[span.start..span.end], span).with_type(TokenType::VARIABLE))
}

/// Digits, with a leading `-` only as the first symbol and only when
/// `allow_sign` is set. The span must then be a canonical integer literal.
pub fn read_literal(data: &[char], index: usize, allow_sign: bool) -> Option<Token> {
    let span = peek_ahead(data, index, None, |p| match p.symbol {
        '-' => allow_sign && p.prev.is_empty(),
        c => c.is_ascii_digit(),
    });
    if span.is_empty() {
        return None;
    }

    let value = &data[span.start..span.end];
    let text: String = value.iter().collect();
    if !is_int_literal(&text) {
        return None;
    }
    Some(Token::new(value, span).with_type(TokenType::INT_LITERAL))
}

/// Takes the run of operator symbols at `index` and keeps its longest
/// prefix that is itself a known operator, so `<==` reads as `<=`.
pub fn read_operator(data: &[char], index: usize, table: &OperatorTable) -> Option<Token> {
    // No walk gets further than the longest operator, so the run is capped there
    let run = peek_ahead(data, index, Some(table.max_len()), |p| {
        table.is_operator_symbol(p.symbol)
    });
    if run.is_empty() {
        return None;
    }

    let query = &data[run.start..run.end];
    let Some(best) = table
        .trie()
        .search_filter(query, |r| table.contains(&r.matched_string()), Select::Last)
    else {
        log::trace!("no operator in run {:?} at {}", query.iter().collect::<String>(), index);
        return None;
    };

    let text = best.matched_string();
    let kind = table.kind_of(&text)?;
    let span = Span::new(index, index + best.matched_len());

    Some(
        Token::new(best.matched(), span)
            .with_type(kind.token_type())
            .with_operator_kind(kind),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("a \t\n b"), chars("a b"));
        assert_eq!(normalize_whitespace("  x  "), chars(" x "));
        assert_eq!(normalize_whitespace("άλφα\u{00A0}\u{2003}1"), chars("άλφα 1"));
        assert!(normalize_whitespace("").is_empty());
    }

    #[test]
    fn test_int_literal_pattern() {
        assert!(is_int_literal("42"));
        assert!(is_int_literal("-7"));
        assert!(!is_int_literal("-"));
        assert!(!is_int_literal("--1"));
        assert!(!is_int_literal("1-"));
        assert!(!is_int_literal(""));
    }

    #[test]
    fn test_peek_ahead_limit_and_progress() {
        let data = chars("abcdef");

        let span = peek_ahead(&data, 1, Some(3), |_| true);
        assert_eq!(span, Span::new(1, 4));

        let span = peek_ahead(&data, 0, None, |p| p.full() != "abc");
        assert_eq!(span, Span::new(0, 2));

        let span = peek_ahead(&data, 6, None, |_| true);
        assert!(span.is_empty());
    }

    #[test]
    fn test_read_variable() {
        let data = chars("foo_Bar1");
        let token = read_variable(&data, 0).unwrap();
        assert_eq!(token.text(), "foo_Bar");
        assert_eq!(token.token_type(), TokenType::VARIABLE);
        assert!(read_variable(&data, 7).is_none());
    }

    #[test]
    fn test_read_literal_sign() {
        let data = chars("-12-3");

        let signed = read_literal(&data, 0, true).unwrap();
        assert_eq!(signed.text(), "-12");
        assert_eq!(signed.span(), Span::new(0, 3));

        // No embedded sign
        assert!(read_literal(&data, 0, false).is_none());
        assert_eq!(read_literal(&data, 1, true).unwrap().text(), "12");

        // A lone minus fails the literal pattern
        let lone = chars("-+");
        assert!(read_literal(&lone, 0, true).is_none());
    }

    #[test]
    fn test_read_operator_longest_match() {
        let table = OperatorTable::default();
        let data = chars("<==");

        let token = read_operator(&data, 0, &table).unwrap();
        assert_eq!(token.text(), "<=");
        assert_eq!(token.span(), Span::new(0, 2));
        assert_eq!(token.token_type(), TokenType::EQUALITY_OPERATOR);
        assert_eq!(token.operator_kind(), Some(exprtok_protocol::OperatorKind::LessThanOrEqual));
    }

    #[test]
    fn test_read_operator_unresolvable_run() {
        let table = OperatorTable::default();
        assert!(read_operator(&chars("!"), 0, &table).is_none());
        assert!(read_operator(&chars("x"), 0, &table).is_none());
    }
}
