use std::collections::{HashMap, HashSet};

use exprtok_protocol::{OperatorKind, TokenType, Vocabulary};
use exprtok_trie::Trie;

use crate::error::VocabularyError;
use crate::reader::is_variable_char;

/// Lookup tables derived from a [`Vocabulary`]: the exact operator strings,
/// the symbols they are spelled with, and a trie over all of them.
#[derive(Debug, Clone)]
pub struct OperatorTable {
    operators: HashMap<String, OperatorKind>,
    symbols: HashSet<char>,
    trie: Trie<char>,
}

impl OperatorTable {
    pub fn new(vocab: &Vocabulary) -> Result<Self, VocabularyError> {
        validate(vocab)?;
        Ok(Self::build(vocab))
    }

    /// Skips validation; only for vocabularies already known to be valid.
    pub(crate) fn build(vocab: &Vocabulary) -> Self {
        let operators: HashMap<String, OperatorKind> = vocab
            .operators
            .iter()
            .map(|entry| (entry.text.clone(), entry.kind))
            .collect();
        let symbols: HashSet<char> = operators.keys().flat_map(|text| text.chars()).collect();
        let trie = Trie::from_strs(operators.keys());

        log::debug!(
            "operator table built: {} operators, {} symbols, {} trie nodes, depth {}",
            operators.len(),
            symbols.len(),
            trie.node_count(),
            trie.max_depth()
        );

        Self {
            operators,
            symbols,
            trie,
        }
    }

    pub fn kind_of(&self, text: &str) -> Option<OperatorKind> {
        self.operators.get(text).copied()
    }

    pub fn token_type_of(&self, text: &str) -> Option<TokenType> {
        self.kind_of(text).map(OperatorKind::token_type)
    }

    pub fn contains(&self, text: &str) -> bool {
        self.operators.contains_key(text)
    }

    pub fn is_operator_symbol(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn trie(&self) -> &Trie<char> {
        &self.trie
    }

    /// Length of the longest operator.
    pub fn max_len(&self) -> usize {
        self.trie.max_depth()
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::build(&Vocabulary::standard())
    }
}

/// Rejects vocabularies the readers could not tokenize consistently.
pub fn validate(vocab: &Vocabulary) -> Result<(), VocabularyError> {
    if vocab.is_empty() {
        return Err(VocabularyError::Empty);
    }

    let mut seen: HashMap<&str, OperatorKind> = HashMap::new();
    for (index, entry) in vocab.operators.iter().enumerate() {
        if entry.text.is_empty() {
            return Err(VocabularyError::EmptyOperator { index });
        }

        // Whitespace, digits and identifier characters belong to other readers
        if let Some(symbol) = entry
            .text
            .chars()
            .find(|c| c.is_whitespace() || c.is_ascii_digit() || is_variable_char(*c))
        {
            return Err(VocabularyError::ReservedSymbol {
                text: entry.text.clone(),
                symbol,
            });
        }

        match seen.get(entry.text.as_str()) {
            Some(first) if *first != entry.kind => {
                return Err(VocabularyError::ConflictingKind {
                    text: entry.text.clone(),
                    first: *first,
                    second: entry.kind,
                });
            }
            Some(_) => {}
            None => {
                seen.insert(&entry.text, entry.kind);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exprtok_protocol::OperatorEntry;

    fn vocab(entries: &[(&str, OperatorKind)]) -> Vocabulary {
        Vocabulary {
            version: 1,
            operators: entries.iter().map(|(t, k)| OperatorEntry::new(t, *k)).collect(),
        }
    }

    #[test]
    fn test_standard_table() {
        let table = OperatorTable::default();

        assert_eq!(table.len(), 14);
        assert_eq!(table.max_len(), 2);
        assert_eq!(table.kind_of("=="), Some(OperatorKind::Equal));
        assert_eq!(table.kind_of("="), Some(OperatorKind::Equal));
        assert_eq!(table.token_type_of(">="), Some(TokenType::EQUALITY_OPERATOR));
        assert_eq!(table.token_type_of("^"), Some(TokenType::MATH_OPERATOR));
        assert_eq!(table.token_type_of(")"), Some(TokenType::GROUPING_END_OPERATOR));
        assert!(table.is_operator_symbol('!'));
        assert!(!table.contains("!"));
        assert!(!table.is_operator_symbol('x'));
    }

    #[test]
    fn test_standard_vocabulary_is_valid() {
        assert_eq!(validate(&Vocabulary::standard()), Ok(()));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(validate(&vocab(&[])), Err(VocabularyError::Empty));
        assert_eq!(
            validate(&vocab(&[("+", OperatorKind::Add), ("", OperatorKind::Sub)])),
            Err(VocabularyError::EmptyOperator { index: 1 })
        );
    }

    #[test]
    fn test_rejects_reserved_symbols() {
        let err = OperatorTable::new(&vocab(&[("and", OperatorKind::Mul)])).unwrap_err();
        assert_eq!(
            err,
            VocabularyError::ReservedSymbol {
                text: "and".to_string(),
                symbol: 'a'
            }
        );
        assert!(validate(&vocab(&[("1+", OperatorKind::Add)])).is_err());
        assert!(validate(&vocab(&[("< =", OperatorKind::LessThanOrEqual)])).is_err());
    }

    #[test]
    fn test_duplicates() {
        // Exact duplicates are harmless
        assert!(validate(&vocab(&[("+", OperatorKind::Add), ("+", OperatorKind::Add)])).is_ok());

        let err = validate(&vocab(&[("+", OperatorKind::Add), ("+", OperatorKind::Sub)])).unwrap_err();
        assert_eq!(err.to_string(), "operator \"+\" is registered as both ADD and SUB");
    }
}
