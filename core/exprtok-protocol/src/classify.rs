use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Composable classification of a token.
    ///
    /// Single-bit flags are the classification axes; the composite
    /// constants are plain unions of them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct TokenType: u16 {
        // Unknown state (Bits 0-1)
        const INVALID = 1;
        const NOT_SET = 1 << 1;

        // Values (Bits 2-5)
        const VARIABLE = 1 << 2;
        const LITERAL = 1 << 3;
        const INT = 1 << 4;
        const FLOAT = 1 << 5;

        // Operators (Bits 6-8)
        const OPERATOR = 1 << 6;
        const MATH_OPERATION = 1 << 7;
        const EQUALITY = 1 << 8;

        // Grouping (Bits 9-11)
        const GROUPING = 1 << 9;
        const GROUPING_START = 1 << 10;
        const GROUPING_END = 1 << 11;

        // Composites
        const INT_LITERAL = Self::INT.bits() | Self::LITERAL.bits();
        const FLOAT_LITERAL = Self::FLOAT.bits() | Self::LITERAL.bits();
        const MATH_OPERATOR = Self::OPERATOR.bits() | Self::MATH_OPERATION.bits();
        const EQUALITY_OPERATOR = Self::OPERATOR.bits() | Self::EQUALITY.bits();
        const GROUPING_OPERATOR = Self::OPERATOR.bits() | Self::GROUPING.bits();
        const GROUPING_START_OPERATOR = Self::GROUPING_OPERATOR.bits() | Self::GROUPING_START.bits();
        const GROUPING_END_OPERATOR = Self::GROUPING_OPERATOR.bits() | Self::GROUPING_END.bits();
    }
}

impl TokenType {
    /// Every single-bit flag, in bit order.
    pub const COMPONENTS: [TokenType; 12] = [
        TokenType::INVALID,
        TokenType::NOT_SET,
        TokenType::VARIABLE,
        TokenType::LITERAL,
        TokenType::INT,
        TokenType::FLOAT,
        TokenType::OPERATOR,
        TokenType::MATH_OPERATION,
        TokenType::EQUALITY,
        TokenType::GROUPING,
        TokenType::GROUPING_START,
        TokenType::GROUPING_END,
    ];

    /// Known means classified: not empty and neither sentinel is set.
    pub fn is_known(self) -> bool {
        !self.is_empty() && !self.intersects(TokenType::INVALID | TokenType::NOT_SET)
    }

    /// True when every bit of `flags` is present.
    pub fn has_flags(self, flags: TokenType) -> bool {
        self.contains(flags)
    }

    /// The single-bit flags carried by this value.
    pub fn components(self) -> impl Iterator<Item = TokenType> {
        TokenType::COMPONENTS
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

/// Which semantics an operator token carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum OperatorKind {
    // Equality
    Equal = 0,
    NotEqual = 1,
    LessThan = 2,
    GreaterThan = 3,
    LessThanOrEqual = 4,
    GreaterThanOrEqual = 5,
    // Arithmetic
    Mul = 6,
    Add = 7,
    Sub = 8,
    Div = 9,
    Power = 10,
    // Grouping
    GroupingStart = 11,
    GroupingEnd = 12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    Equality,
    Arithmetic,
    Grouping,
}

impl OperatorKind {
    pub fn family(self) -> OperatorFamily {
        match self {
            OperatorKind::Equal
            | OperatorKind::NotEqual
            | OperatorKind::LessThan
            | OperatorKind::GreaterThan
            | OperatorKind::LessThanOrEqual
            | OperatorKind::GreaterThanOrEqual => OperatorFamily::Equality,
            OperatorKind::Mul
            | OperatorKind::Add
            | OperatorKind::Sub
            | OperatorKind::Div
            | OperatorKind::Power => OperatorFamily::Arithmetic,
            OperatorKind::GroupingStart | OperatorKind::GroupingEnd => OperatorFamily::Grouping,
        }
    }

    /// Classification given to tokens of this kind.
    pub fn token_type(self) -> TokenType {
        match self {
            OperatorKind::GroupingStart => TokenType::GROUPING_START_OPERATOR,
            OperatorKind::GroupingEnd => TokenType::GROUPING_END_OPERATOR,
            kind => match kind.family() {
                OperatorFamily::Equality => TokenType::EQUALITY_OPERATOR,
                OperatorFamily::Arithmetic => TokenType::MATH_OPERATOR,
                OperatorFamily::Grouping => TokenType::GROUPING_OPERATOR,
            },
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperatorKind::Equal => "EQUAL",
            OperatorKind::NotEqual => "NOT_EQUAL",
            OperatorKind::LessThan => "LESS_THAN",
            OperatorKind::GreaterThan => "GREATER_THAN",
            OperatorKind::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            OperatorKind::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            OperatorKind::Mul => "MUL",
            OperatorKind::Add => "ADD",
            OperatorKind::Sub => "SUB",
            OperatorKind::Div => "DIV",
            OperatorKind::Power => "POWER",
            OperatorKind::GroupingStart => "GROUPING_START",
            OperatorKind::GroupingEnd => "GROUPING_END",
        };
        f.write_str(name)
    }
}
