pub mod error;
pub mod groups;
pub mod index;
pub mod reader;
pub mod table;
pub mod token;

use exprtok_protocol::{TokenId, TokenType, Vocabulary};
use rkyv::{AlignedVec, Deserialize, Infallible};

use crate::error::VocabularyError;
use crate::index::ClassificationIndex;
use crate::reader::{normalize_whitespace, read_literal, read_operator, read_variable, Reader};
use crate::table::OperatorTable;
use crate::token::Token;

pub use crate::groups::{match_groups, GroupPair};

/// Turns one expression line into classified tokens.
///
/// Holds only read-only tables, so one tokenizer can serve any number of
/// threads; each `tokenize` call keeps its own cursor.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    table: OperatorTable,
}

impl Tokenizer {
    pub fn new(vocab: &Vocabulary) -> Result<Self, VocabularyError> {
        Ok(Self {
            table: OperatorTable::new(vocab)?,
        })
    }

    /// Loads a vocabulary archive written by `vocab-compiler`.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, VocabularyError> {
        // The archive needs aligned storage regardless of where `bytes` came from
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archived = rkyv::check_archived_root::<Vocabulary>(&aligned)
            .map_err(|e| VocabularyError::Archive(e.to_string()))?;
        let vocab: Vocabulary = match archived.deserialize(&mut Infallible) {
            Ok(vocab) => vocab,
            Err(never) => match never {},
        };

        Self::new(&vocab)
    }

    pub fn table(&self) -> &OperatorTable {
        &self.table
    }

    /// Primary entry point: Text -> Classified Tokens
    pub fn tokenize(&self, input: &str) -> Tokenization {
        let symbols = normalize_whitespace(input);
        let mut tokens: Vec<Token> = Vec::new();
        let mut index = ClassificationIndex::new();
        let mut i = 0;

        while i < symbols.len() {
            // 1. Skip whitespace
            if symbols[i].is_whitespace() {
                i += 1;
                continue;
            }

            // 2. Try each reader; skip one symbol to recover when none applies
            match self.read_at(&symbols, i, tokens.last()) {
                Some(token) => {
                    let id = TokenId::new(tokens.len() as u32);
                    index.register(id, token.token_type());
                    i = token.end();
                    tokens.push(token);
                }
                None => {
                    log::trace!("skipping unrecognized symbol {:?} at {}", symbols[i], i);
                    i += 1;
                }
            }
        }

        Tokenization {
            symbols,
            tokens,
            index,
        }
    }

    fn read_at(&self, symbols: &[char], i: usize, previous: Option<&Token>) -> Option<Token> {
        Reader::ORDER.iter().find_map(|reader| match reader {
            Reader::Variable => read_variable(symbols, i),
            Reader::Literal => read_literal(symbols, i, sign_allowed(previous)),
            Reader::Operator => read_operator(symbols, i, &self.table),
        })
    }
}

/// A leading `-` joins a literal only at the start of input or after an
/// operator that does not close a group; otherwise `2-1` would read as `2`, `-1`.
fn sign_allowed(previous: Option<&Token>) -> bool {
    match previous {
        None => true,
        Some(token) => {
            let token_type = token.token_type();
            token_type.contains(TokenType::OPERATOR) && !token_type.contains(TokenType::GROUPING_END)
        }
    }
}

/// Output of [`Tokenizer::tokenize`].
///
/// Spans index into `symbols`, the input after whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenization {
    symbols: Vec<char>,
    tokens: Vec<Token>,
    index: ClassificationIndex,
}

impl Tokenization {
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    pub fn index(&self) -> &ClassificationIndex {
        &self.index
    }

    /// Tokens carrying every bit of `flags`, in input order.
    pub fn tokens_with(&self, flags: TokenType) -> impl Iterator<Item = &Token> + '_ {
        self.index
            .matching(flags)
            .into_iter()
            .filter_map(move |id| self.get(id))
    }

    /// Positions no token covers, ascending. Whitespace included.
    pub fn gaps(&self) -> Vec<usize> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for token in &self.tokens {
            gaps.extend(cursor..token.start());
            cursor = token.end();
        }
        gaps.extend(cursor..self.symbols.len());
        gaps
    }

    /// Gaps that are not whitespace: symbols no reader accepted.
    pub fn unrecognized(&self) -> Vec<usize> {
        self.gaps()
            .into_iter()
            .filter(|&i| !self.symbols[i].is_whitespace())
            .collect()
    }

    pub fn is_fully_recognized(&self) -> bool {
        self.unrecognized().is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}
