use exprtok_protocol::{TokenId, TokenType};

use crate::error::GroupingError;
use crate::Tokenization;

/// A grouping start token and the end token that closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupPair {
    pub open: TokenId,
    pub close: TokenId,
    /// Number of groups enclosing this one.
    pub depth: usize,
}

/// Pairs grouping tokens with a stack. The tokenizer emits them without
/// checking balance; this is where an unmatched one is reported.
///
/// Pairs come out in the order their end tokens appear.
pub fn match_groups(tokenization: &Tokenization) -> Result<Vec<GroupPair>, GroupingError> {
    let mut open: Vec<(TokenId, usize)> = Vec::new();
    let mut pairs = Vec::new();

    for (position, token) in tokenization.tokens().iter().enumerate() {
        let id = TokenId::new(position as u32);
        let token_type = token.token_type();

        if token_type.contains(TokenType::GROUPING_START) {
            open.push((id, token.start()));
        } else if token_type.contains(TokenType::GROUPING_END) {
            match open.pop() {
                Some((start, _)) => pairs.push(GroupPair {
                    open: start,
                    close: id,
                    depth: open.len(),
                }),
                None => return Err(GroupingError::UnmatchedEnd { index: token.start() }),
            }
        }
    }

    match open.last() {
        Some((_, index)) => Err(GroupingError::UnclosedStart { index: *index }),
        None => Ok(pairs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tokenizer;

    #[test]
    fn test_nested_groups() {
        let tokens = Tokenizer::default().tokenize("((a+1)*(b))");
        let pairs = match_groups(&tokens).unwrap();

        // ( ( a + 1 ) * ( b ) )
        // 0 1 2 3 4 5 6 7 8 9 10
        assert_eq!(
            pairs,
            [
                GroupPair { open: TokenId(1), close: TokenId(5), depth: 1 },
                GroupPair { open: TokenId(7), close: TokenId(9), depth: 1 },
                GroupPair { open: TokenId(0), close: TokenId(10), depth: 0 },
            ]
        );
    }

    #[test]
    fn test_unmatched_end() {
        let tokens = Tokenizer::default().tokenize("1)");
        let err = match_groups(&tokens).unwrap_err();

        assert_eq!(err, GroupingError::UnmatchedEnd { index: 1 });
        assert_eq!(
            err.render(tokens.symbols()),
            "cannot end grouping at index 1: there is no open grouping to close\n1)\n-^"
        );
    }

    #[test]
    fn test_unclosed_start() {
        let tokens = Tokenizer::default().tokenize("(1 + (2)");
        let err = match_groups(&tokens).unwrap_err();

        assert_eq!(err, GroupingError::UnclosedStart { index: 0 });
    }

    #[test]
    fn test_no_groups() {
        let tokens = Tokenizer::default().tokenize("a == b");
        assert!(match_groups(&tokens).unwrap().is_empty());
    }
}
