use exprtok_protocol::OperatorKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VocabularyError {
    #[error("vocabulary defines no operators")]
    Empty,

    #[error("operator #{index} has empty text")]
    EmptyOperator { index: usize },

    #[error("operator {text:?} contains {symbol:?}, which is read as part of another token class")]
    ReservedSymbol { text: String, symbol: char },

    #[error("operator {text:?} is registered as both {first} and {second}")]
    ConflictingKind {
        text: String,
        first: OperatorKind,
        second: OperatorKind,
    },

    #[error("invalid vocabulary archive: {0}")]
    Archive(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupingError {
    #[error("cannot end grouping at index {index}: there is no open grouping to close")]
    UnmatchedEnd { index: usize },

    #[error("grouping opened at index {index} is never closed")]
    UnclosedStart { index: usize },
}

impl GroupingError {
    pub fn index(&self) -> usize {
        match self {
            GroupingError::UnmatchedEnd { index } | GroupingError::UnclosedStart { index } => *index,
        }
    }

    /// The message, the input line and a caret under the offending symbol.
    pub fn render(&self, symbols: &[char]) -> String {
        let line: String = symbols.iter().collect();
        format!("{}\n{}\n{}^", self, line, "-".repeat(self.index()))
    }
}
