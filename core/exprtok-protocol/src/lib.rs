#![no_std] // Shared with no_std consumers of the vocabulary archive

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod classify;

// Re-export core types for convenience
pub use ids::{NodeId, TokenId};
pub use classify::*;

pub mod model;
pub use model::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rkyv::{to_bytes, from_bytes};

    #[test]
    fn test_enum_serialization() {
        let original = OperatorKind::LessThanOrEqual;

        let bytes = to_bytes::<_, 256>(&original).expect("Failed to serialize OperatorKind");
        let deserialized: OperatorKind = from_bytes(&bytes).expect("Failed to deserialize OperatorKind");

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_vocabulary_serialization() {
        let original = Vocabulary::standard();

        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize Vocabulary");
        let deserialized: Vocabulary = from_bytes(&bytes).expect("Failed to deserialize Vocabulary");

        assert_eq!(original, deserialized);
        assert_eq!(deserialized.get("<=").map(|e| e.kind), Some(OperatorKind::LessThanOrEqual));
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<TokenId>(), 4);
        assert_eq!(core::mem::size_of::<Option<TokenId>>(), 8); // u32 + tag (padding)
    }

    #[test]
    fn test_composites_are_unions() {
        assert_eq!(TokenType::INT_LITERAL, TokenType::INT | TokenType::LITERAL);
        assert_eq!(TokenType::MATH_OPERATOR, TokenType::OPERATOR | TokenType::MATH_OPERATION);
        assert_eq!(TokenType::EQUALITY_OPERATOR, TokenType::OPERATOR | TokenType::EQUALITY);
        assert_eq!(TokenType::GROUPING_OPERATOR, TokenType::OPERATOR | TokenType::GROUPING);
        assert!(TokenType::GROUPING_END_OPERATOR.has_flags(TokenType::GROUPING_OPERATOR));
        assert!(!TokenType::GROUPING_END_OPERATOR.contains(TokenType::GROUPING_START));
    }

    #[test]
    fn test_known_types() {
        assert!(TokenType::VARIABLE.is_known());
        assert!(TokenType::EQUALITY_OPERATOR.is_known());
        assert!(!TokenType::INVALID.is_known());
        assert!(!TokenType::NOT_SET.is_known());
        assert!(!TokenType::empty().is_known());
    }

    #[test]
    fn test_components_are_single_bits() {
        let parts: Vec<TokenType> = TokenType::GROUPING_START_OPERATOR.components().collect();
        assert_eq!(
            parts,
            [TokenType::OPERATOR, TokenType::GROUPING, TokenType::GROUPING_START]
        );
        for flag in TokenType::COMPONENTS {
            assert_eq!(flag.bits().count_ones(), 1);
        }
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(OperatorKind::NotEqual.token_type(), TokenType::EQUALITY_OPERATOR);
        assert_eq!(OperatorKind::Power.token_type(), TokenType::MATH_OPERATOR);
        assert_eq!(OperatorKind::GroupingStart.token_type(), TokenType::GROUPING_START_OPERATOR);
        assert_eq!(OperatorKind::GroupingEnd.family(), OperatorFamily::Grouping);
    }

    #[test]
    fn test_standard_vocabulary() {
        let vocab = Vocabulary::standard();
        assert_eq!(vocab.len(), 14);
        assert_eq!(vocab.get("=").map(|e| e.kind), vocab.get("==").map(|e| e.kind));
        assert!(vocab.get("<<").is_none());
    }
}
