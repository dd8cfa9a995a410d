pub mod search;
pub mod trie;

pub use search::{Search, SearchResult, Select};
pub use trie::{Trie, TrieNode};
