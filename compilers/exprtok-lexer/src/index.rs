use std::collections::BTreeMap;

use exprtok_protocol::{TokenId, TokenType};

/// Token ids bucketed by each single-bit flag they carry.
///
/// Ids are registered in discovery order, so every bucket is ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationIndex {
    buckets: BTreeMap<TokenType, Vec<TokenId>>,
}

impl ClassificationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: TokenId, token_type: TokenType) {
        for flag in token_type.components() {
            self.buckets.entry(flag).or_default().push(id);
        }
    }

    /// Tokens carrying the single flag `flag`.
    pub fn bucket(&self, flag: TokenType) -> &[TokenId] {
        self.buckets.get(&flag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tokens carrying every bit of `flags`, in discovery order.
    pub fn matching(&self, flags: TokenType) -> Vec<TokenId> {
        let mut components = flags.components();
        let Some(first) = components.next() else {
            return Vec::new();
        };
        let rest: Vec<&[TokenId]> = components.map(|flag| self.bucket(flag)).collect();

        self.bucket(first)
            .iter()
            .copied()
            .filter(|id| rest.iter().all(|bucket| bucket.binary_search(id).is_ok()))
            .collect()
    }

    pub fn flags(&self) -> impl Iterator<Item = (TokenType, &[TokenId])> {
        self.buckets.iter().map(|(flag, ids)| (*flag, ids.as_slice()))
    }

    /// Number of non-empty buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
