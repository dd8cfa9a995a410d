use exprtok_protocol::NodeId;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use std::collections::BTreeSet;
use std::fmt;

use crate::search::{Search, SearchResult, Select};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode<S> {
    values: BTreeSet<S>,
    depth: usize,
}

impl<S: Ord> TrieNode<S> {
    fn at_depth(depth: usize) -> Self {
        Self {
            values: BTreeSet::new(),
            depth,
        }
    }

    pub fn values(&self) -> &BTreeSet<S> {
        &self.values
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn accepts(&self, symbol: &S) -> bool {
        self.values.contains(symbol)
    }
}

/// Prefix tree over symbol sequences.
///
/// Nodes live in a graph arena and own their children through outgoing
/// edges; nothing points back up the tree. Each node records the symbols
/// acceptable at its depth, so a walk only ever follows one path.
#[derive(Debug, Clone)]
pub struct Trie<S> {
    graph: Graph<TrieNode<S>, (), Directed>,
    root: NodeIndex,
    max_depth: usize,
}

impl<S: Clone + Ord> Default for Trie<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + Ord> Trie<S> {
    pub fn new() -> Self {
        let mut graph = Graph::new();
        let root = graph.add_node(TrieNode::at_depth(0));
        Self {
            graph,
            root,
            max_depth: 0,
        }
    }

    /// Registers `sequence`. Inserting a sequence twice changes nothing.
    pub fn insert(&mut self, sequence: &[S]) -> &mut Self {
        match sequence {
            [] => {}
            [only] => {
                self.graph[self.root].values.insert(only.clone());
            }
            _ => {
                let mut node = self.root;
                for pair in sequence.windows(2) {
                    self.graph[node].values.insert(pair[0].clone());
                    node = self.child_or_insert(node, &pair[1]);
                    self.graph[node].values.insert(pair[1].clone());
                }
            }
        }
        self.max_depth = self.max_depth.max(sequence.len());
        self
    }

    pub fn insert_all<I, Q>(&mut self, sequences: I) -> &mut Self
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<[S]>,
    {
        let mut inserted = 0usize;
        for sequence in sequences {
            self.insert(sequence.as_ref());
            inserted += 1;
        }
        log::debug!(
            "trie holds {} nodes after inserting {} sequences",
            self.graph.node_count(),
            inserted
        );
        self
    }

    /// Walks from the root, one symbol of `query` per step, for as long as
    /// the current node accepts the next symbol.
    pub fn search<'q>(&self, query: &'q [S]) -> Search<'q, S> {
        let mut steps = Vec::new();
        let mut node = self.root;

        while let Some(symbol) = query.get(steps.len()) {
            let current = &self.graph[node];
            if !current.accepts(symbol) {
                break;
            }

            let matched = steps.len() + 1;
            steps.push(SearchResult::new(query, matched, current.depth));

            match query.get(matched).and_then(|next| self.child_with(node, next)) {
                Some(child) => node = child,
                None => break,
            }
        }

        Search::new(query, steps)
    }

    /// The first or last step of the walk for which `predicate` holds.
    /// `None` when no step qualifies.
    pub fn search_filter<'q, P>(&self, query: &'q [S], predicate: P, select: Select) -> Option<SearchResult<'q, S>>
    where
        P: FnMut(&SearchResult<'q, S>) -> bool,
    {
        select.pick(self.search(query).into_steps(), predicate)
    }

    pub fn search_filter_all<'q, P>(&self, query: &'q [S], mut predicate: P) -> Vec<SearchResult<'q, S>>
    where
        P: FnMut(&SearchResult<'q, S>) -> bool,
    {
        self.search(query)
            .into_steps()
            .into_iter()
            .filter(|step| predicate(step))
            .collect()
    }

    fn child_with(&self, node: NodeIndex, symbol: &S) -> Option<NodeIndex> {
        self.graph
            .neighbors(node)
            .find(|child| self.graph[*child].accepts(symbol))
    }

    fn child_or_insert(&mut self, node: NodeIndex, symbol: &S) -> NodeIndex {
        if let Some(child) = self.child_with(node, symbol) {
            return child;
        }
        let depth = self.graph[node].depth + 1;
        let child = self.graph.add_node(TrieNode::at_depth(depth));
        self.graph.add_edge(node, child, ());
        child
    }
}

impl<S> Trie<S> {
    pub fn root(&self) -> NodeId {
        to_id(self.root)
    }

    pub fn node(&self, id: NodeId) -> Option<&TrieNode<S>> {
        self.graph.node_weight(NodeIndex::new(id.index()))
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        // petgraph lists the most recently added edge first
        let mut children: Vec<NodeId> = self
            .graph
            .neighbors(NodeIndex::new(id.index()))
            .map(to_id)
            .collect();
        children.reverse();
        children
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Length of the longest inserted sequence. No walk gets further.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn is_empty(&self) -> bool {
        self.max_depth == 0
    }
}

impl Trie<char> {
    pub fn from_strs<I, T>(sequences: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut trie = Self::new();
        trie.insert_all(
            sequences
                .into_iter()
                .map(|s| s.as_ref().chars().collect::<Vec<char>>()),
        );
        trie
    }

    pub fn insert_str(&mut self, sequence: &str) -> &mut Self {
        let symbols: Vec<char> = sequence.chars().collect();
        self.insert(&symbols)
    }
}

fn to_id(index: NodeIndex) -> NodeId {
    NodeId::new(index.index() as u32)
}

impl<S: fmt::Display> Trie<S> {
    fn render(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(node) = self.node(id) {
            if !node.values.is_empty() {
                write!(f, "{}ID({}): ", "-".repeat(node.depth), id)?;
                for (i, value) in node.values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                writeln!(f)?;
            }
        }
        for child in self.children(id) {
            self.render(child, f)?;
        }
        Ok(())
    }
}

impl<S: fmt::Display> fmt::Display for Trie<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(self.root(), f)
    }
}
