use exprtok_protocol::{OperatorKind, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// An empty span is a failed read, never a token.
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

/// A classified run of symbols.
///
/// Refining a token (`with_type`, `with_operator_kind`) yields a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    value: Vec<char>,
    span: Span,
    token_type: TokenType,
    operator_kind: Option<OperatorKind>,
}

impl Token {
    pub fn new(value: &[char], span: Span) -> Self {
        Self {
            value: value.to_vec(),
            span,
            token_type: TokenType::NOT_SET,
            operator_kind: None,
        }
    }

    pub fn with_type(self, token_type: TokenType) -> Self {
        Self { token_type, ..self }
    }

    pub fn with_operator_kind(self, kind: OperatorKind) -> Self {
        Self {
            operator_kind: Some(kind),
            ..self
        }
    }

    pub fn value(&self) -> &[char] {
        &self.value
    }

    pub fn text(&self) -> String {
        self.value.iter().collect()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn operator_kind(&self) -> Option<OperatorKind> {
        self.operator_kind
    }

    pub fn is_known_type(&self) -> bool {
        self.token_type.is_known()
    }

    /// True when `next` starts exactly where this token ends.
    pub fn is_adjacent_to(&self, next: &Token) -> bool {
        self.span.end == next.span.start
    }
}
