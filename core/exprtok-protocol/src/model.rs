use rkyv::{Archive, Deserialize, Serialize};
use crate::classify::OperatorKind;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct OperatorEntry {
    pub text: String,
    pub kind: OperatorKind,
}

impl OperatorEntry {
    pub fn new(text: &str, kind: OperatorKind) -> Self {
        Self { text: text.to_string(), kind }
    }
}

/// The operator strings a tokenizer recognizes, with their semantics.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Vocabulary {
    pub version: u32,
    pub operators: Vec<OperatorEntry>,
}

impl Vocabulary {
    /// Equality, arithmetic and grouping operators of plain math expressions.
    pub fn standard() -> Self {
        use OperatorKind::*;

        let table: [(&str, OperatorKind); 14] = [
            // equality
            ("=", Equal),
            ("==", Equal),
            ("!=", NotEqual),
            ("<", LessThan),
            (">", GreaterThan),
            ("<=", LessThanOrEqual),
            (">=", GreaterThanOrEqual),
            // math
            ("*", Mul),
            ("/", Div),
            ("-", Sub),
            ("+", Add),
            ("^", Power),
            // grouping
            ("(", GroupingStart),
            (")", GroupingEnd),
        ];

        Self {
            version: 1,
            operators: table
                .iter()
                .map(|(text, kind)| OperatorEntry::new(text, *kind))
                .collect(),
        }
    }

    pub fn get(&self, text: &str) -> Option<&OperatorEntry> {
        self.operators.iter().find(|entry| entry.text == text)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
