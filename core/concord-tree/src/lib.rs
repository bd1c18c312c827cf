pub mod edit;
pub mod validate;

use std::collections::VecDeque;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use concord_protocol::Token;
use thiserror::Error;

pub use validate::check_tree;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("{tokens} replacement tokens for {positions} positions")]
    ArityMismatch { tokens: usize, positions: usize },

    #[error("position {position} is out of range for a sentence of {len} tokens")]
    IndexOutOfRange { position: usize, len: usize },

    #[error("cannot redirect dependents to removed position {0}")]
    RedirectRemoved(usize),

    #[error("sentence has no tokens")]
    Empty,

    #[error("token at position {position} is numbered {found}")]
    Misnumbered { position: usize, found: usize },

    #[error("sentence has no root")]
    NoRoot,

    #[error("sentence has {0} roots")]
    MultipleRoots(usize),

    #[error("token {token} points at missing head {head}")]
    DanglingHead { token: usize, head: usize },

    #[error("dependency cycle through token {0}")]
    Cycle(usize),
}

pub type Result<T> = std::result::Result<T, TreeError>;

/// An immutable dependency-parsed sentence.
///
/// Edits return a new `Sentence` that shares every untouched token with
/// its source and remembers the source together with a description of the
/// edit, so the chain of operations can be replayed for debugging.
#[derive(Debug, Clone)]
pub struct Sentence {
    tokens: Vec<Arc<Token>>,
    origin: Option<Arc<Sentence>>,
    operation: String,
}

impl Sentence {
    /// Builds a sentence from parser output, checking the tree invariants.
    pub fn new(tokens: Vec<Token>) -> Result<Self> {
        let tokens: Vec<Arc<Token>> = tokens.into_iter().map(Arc::new).collect();
        check_tree(&tokens)?;
        let text = render(&tokens);
        Ok(Self { tokens, origin: None, operation: format!("parse({:?})", text) })
    }

    /// Derives a successor from `self`.
    pub(crate) fn derive(&self, tokens: Vec<Arc<Token>>, operation: String) -> Self {
        debug_assert_eq!(check_tree(&tokens), Ok(()), "edit {} broke the tree", operation);
        Self { tokens, origin: Some(Arc::new(self.clone())), operation }
    }

    /// Collapses a multi-step edit into one history entry on top of
    /// `previous`.
    pub fn rebase(mut self, previous: &Sentence, operation: impl Into<String>) -> Self {
        self.origin = Some(Arc::new(previous.clone()));
        self.operation = operation.into();
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Token> {
        self.tokens.get(i).map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().map(Arc::as_ref)
    }

    pub fn last(&self) -> Option<&Token> {
        self.tokens.last().map(Arc::as_ref)
    }

    /// True when both sentences hold the very same token allocation at `i`.
    pub fn shares_token(&self, other: &Sentence, i: usize) -> bool {
        match (self.tokens.get(i), other.tokens.get(i)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn text(&self) -> String {
        render(&self.tokens)
    }

    pub fn root(&self) -> Option<&Token> {
        self.iter().find(|t| t.is_root())
    }

    /// The head of `i`; the root is its own head.
    pub fn head(&self, i: usize) -> &Token {
        &self[self[i].head]
    }

    pub fn children(&self, i: usize) -> impl Iterator<Item = &Token> + '_ {
        self.iter().filter(move |t| t.head == i && t.i != i)
    }

    pub fn children_with<'a>(&'a self, i: usize, deps: &'a [&'a str]) -> impl Iterator<Item = &'a Token> + 'a {
        self.children(i).filter(move |t| deps.contains(&t.dep.as_str()))
    }

    pub fn rights(&self, i: usize) -> impl Iterator<Item = &Token> + '_ {
        self.children(i).filter(move |t| t.i > i)
    }

    /// `i` and everything it dominates, in sentence order.
    pub fn subtree(&self, i: usize) -> Vec<usize> {
        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::from([i]);
        while let Some(current) = queue.pop_front() {
            if current >= seen.len() || seen[current] {
                continue;
            }
            seen[current] = true;
            queue.extend(self.children(current).map(|t| t.i));
        }
        seen.iter().enumerate().filter(|(_, s)| **s).map(|(i, _)| i).collect()
    }

    /// Tokens from `from` up the head chain, stopping below `to`. `None`
    /// when `to` does not dominate `from`.
    pub fn path_to(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut current = from;
        for _ in 0..=self.len() {
            if current == to {
                return Some(path);
            }
            let token = self.get(current)?;
            if token.is_root() {
                return None;
            }
            path.push(current);
            current = token.head;
        }
        None
    }

    pub fn previous(&self) -> Option<&Sentence> {
        self.origin.as_deref()
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The chain of operations from the parsed origin, oldest first.
    pub fn operations(&self) -> Vec<&str> {
        let mut ops = Vec::new();
        let mut current = Some(self);
        while let Some(sentence) = current {
            ops.push(sentence.operation.as_str());
            current = sentence.previous();
        }
        ops.reverse();
        ops
    }

    /// Dotted call chain, e.g. `parse("The dog barks.").to_past_tense()`.
    pub fn history(&self) -> String {
        self.operations().join(".")
    }

    /// Multi-line form of [`Sentence::history`] followed by the rendered text.
    pub fn audit_trail(&self) -> String {
        format!("{}\n--> {}", self.operations().join(" \\\n    ."), self.text())
    }
}

fn render(tokens: &[Arc<Token>]) -> String {
    tokens.iter().map(|t| format!("{}{}", t.text, t.whitespace())).collect::<String>().trim_end().to_string()
}

impl Index<usize> for Sentence {
    type Output = Token;

    fn index(&self, i: usize) -> &Token {
        &self.tokens[i]
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl PartialEq for Sentence {
    /// Sentences compare by their tokens; history is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// "The dog barks ." with spaCy-style heads.
    pub(crate) fn the_dog_barks() -> Sentence {
        Sentence::new(vec![
            Token::new(0, "The").with_pos("DET", "DT").with_dep("det", 1),
            Token::new(1, "dog").with_pos("NOUN", "NN").with_dep("nsubj", 2),
            Token::new(2, "barks").with_pos("VERB", "VBZ").with_space(false),
            Token::new(3, ".").with_pos("PUNCT", ".").with_dep("punct", 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_render_and_queries() {
        let s = the_dog_barks();
        assert_eq!(s.text(), "The dog barks.");
        assert_eq!(s.root().unwrap().text, "barks");
        assert_eq!(s.children(2).map(|t| t.i).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(s.subtree(1), vec![0, 1]);
        assert_eq!(s.path_to(0, 2), Some(vec![0, 1]));
        assert_eq!(s.path_to(2, 1), None);
        assert_eq!(s.head(2).i, 2);
    }

    #[test]
    fn test_new_rejects_broken_trees() {
        let err = Sentence::new(vec![Token::new(0, "a").with_dep("dep", 1), Token::new(1, "b").with_dep("dep", 0)]);
        assert_eq!(err.unwrap_err(), TreeError::NoRoot);
    }

    #[test]
    fn test_history_starts_at_parse() {
        let s = the_dog_barks();
        assert_eq!(s.history(), "parse(\"The dog barks.\")");
        assert!(s.previous().is_none());
    }
}
