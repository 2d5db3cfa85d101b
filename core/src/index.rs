use crate::tokenizer::{tokenize, unique_tokens};
use std::collections::{HashMap, HashSet};

pub type DocId = u32;

/// In-memory inverted index from normalized tokens to the payloads whose text contains them.
///
/// Built once from an ordered sequence of `(text, payload)` pairs and never mutated
/// afterwards. Doc ids follow insertion order starting at 0, and query results come
/// back in that same order.
#[derive(Debug, Clone)]
pub struct FullTextIndex<T> {
    entries: HashMap<DocId, T>,
    postings: HashMap<String, HashSet<DocId>>,
}

impl<T> FullTextIndex<T> {
    pub fn build<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut index = Self { entries: HashMap::new(), postings: HashMap::new() };
        let mut next_doc_id: DocId = 0;
        for (text, payload) in items {
            index.index_entry(next_doc_id, text.as_ref(), payload);
            next_doc_id += 1;
        }
        tracing::debug!(num_docs = index.entries.len(), num_tokens = index.postings.len(), "built full-text index");
        index
    }

    fn index_entry(&mut self, doc_id: DocId, text: &str, payload: T) {
        self.entries.insert(doc_id, payload);
        for token in unique_tokens(text) {
            self.postings.entry(token).or_default().insert(doc_id);
        }
    }

    /// Payloads whose text contains every token of `query`, in insertion order.
    pub fn search(&self, query: &str) -> Vec<&T> {
        self.search_ids(query)
            .into_iter()
            .filter_map(|doc_id| self.entries.get(&doc_id))
            .collect()
    }

    /// Matching doc ids, ascending. A query without tokens matches nothing.
    pub fn search_ids(&self, query: &str) -> Vec<DocId> {
        let tokens = tokenize(query);
        let mut sets: Vec<&HashSet<DocId>> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            match self.postings.get(token) {
                Some(set) => sets.push(set),
                // unseen token: the AND can't be satisfied
                None => return Vec::new(),
            }
        }
        sets.sort_by_key(|s| s.len());
        let Some((smallest, rest)) = sets.split_first() else {
            return Vec::new();
        };
        let mut ids: Vec<DocId> = smallest
            .iter()
            .copied()
            .filter(|doc_id| rest.iter().all(|s| s.contains(doc_id)))
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Convert every payload, keeping ids and postings untouched.
    pub fn map_payloads<U, F: FnMut(T) -> U>(self, mut f: F) -> FullTextIndex<U> {
        FullTextIndex {
            entries: self.entries.into_iter().map(|(doc_id, payload)| (doc_id, f(payload))).collect(),
            postings: self.postings,
        }
    }

    pub fn get(&self, doc_id: DocId) -> Option<&T> {
        self.entries.get(&doc_id)
    }

    pub fn postings(&self, token: &str) -> Option<&HashSet<DocId>> {
        self.postings.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn num_tokens(&self) -> usize {
        self.postings.len()
    }
}

impl<S: AsRef<str>, T> FromIterator<(S, T)> for FullTextIndex<T> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self::build(iter)
    }
}

pub fn build_index<I, S, T>(items: I) -> FullTextIndex<T>
where
    I: IntoIterator<Item = (S, T)>,
    S: AsRef<str>,
{
    FullTextIndex::build(items)
}
