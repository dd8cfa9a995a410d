use std::fmt;

/// One state of a trie walk: how much of the query has been accepted so far.
#[derive(Debug, PartialEq, Eq)]
pub struct SearchResult<'q, S> {
    query: &'q [S],
    matched_len: usize,
    depth: usize,
}

// Only borrows the query, so it is Copy whatever the symbol type.
impl<S> Clone for SearchResult<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SearchResult<'_, S> {}

impl<'q, S> SearchResult<'q, S> {
    pub(crate) fn new(query: &'q [S], matched_len: usize, depth: usize) -> Self {
        Self { query, matched_len, depth }
    }

    pub fn query(&self) -> &'q [S] {
        self.query
    }

    pub fn matched(&self) -> &'q [S] {
        &self.query[..self.matched_len]
    }

    pub fn unmatched(&self) -> &'q [S] {
        &self.query[self.matched_len..]
    }

    pub fn matched_len(&self) -> usize {
        self.matched_len
    }

    pub fn unmatched_len(&self) -> usize {
        self.query.len() - self.matched_len
    }

    /// Depth of the node that accepted the last matched symbol.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_full_match(&self) -> bool {
        self.matched_len == self.query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched_len == 0
    }
}

impl SearchResult<'_, char> {
    pub fn matched_string(&self) -> String {
        self.matched().iter().collect()
    }

    pub fn unmatched_string(&self) -> String {
        self.unmatched().iter().collect()
    }
}

impl fmt::Display for SearchResult<'_, char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}|{:?}", self.matched_string(), self.unmatched_string())
    }
}

/// Outcome of [`Trie::search`](crate::Trie::search).
///
/// `steps` holds one result per accepted symbol, shortest first. Validity of
/// a prefix is not monotonic in its length, so callers choose among them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search<'q, S> {
    query: &'q [S],
    steps: Vec<SearchResult<'q, S>>,
}

impl<'q, S> Search<'q, S> {
    pub(crate) fn new(query: &'q [S], steps: Vec<SearchResult<'q, S>>) -> Self {
        Self { query, steps }
    }

    pub fn query(&self) -> &'q [S] {
        self.query
    }

    pub fn steps(&self) -> &[SearchResult<'q, S>] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<SearchResult<'q, S>> {
        self.steps
    }

    /// Where the walk stopped. Zero-length when nothing was accepted.
    pub fn terminal(&self) -> SearchResult<'q, S> {
        match self.steps.last() {
            Some(last) => *last,
            None => SearchResult::new(self.query, 0, 0),
        }
    }

    pub fn matched_len(&self) -> usize {
        self.steps.len()
    }
}

/// Which accepted step [`Trie::search_filter`](crate::Trie::search_filter) returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Select {
    /// The shortest prefix satisfying the predicate.
    First,
    /// The longest prefix satisfying the predicate.
    Last,
}

impl Select {
    pub(crate) fn pick<'q, S, P>(self, steps: Vec<SearchResult<'q, S>>, mut predicate: P) -> Option<SearchResult<'q, S>>
    where
        P: FnMut(&SearchResult<'q, S>) -> bool,
    {
        match self {
            Select::First => steps.into_iter().find(|step| predicate(step)),
            Select::Last => steps.into_iter().rev().find(|step| predicate(step)),
        }
    }
}
