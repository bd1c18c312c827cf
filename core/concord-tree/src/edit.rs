//! Copy-on-write editing. Every operation returns a new [`Sentence`] and
//! leaves the source untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use concord_protocol::Token;
use tracing::trace;

use crate::{Result, Sentence, TreeError};

impl Sentence {
    fn check_position(&self, position: usize) -> Result<()> {
        if position >= self.len() {
            return Err(TreeError::IndexOutOfRange { position, len: self.len() });
        }
        Ok(())
    }

    /// Replaces the token at each position. Replacement tokens bring their
    /// own head index, expressed in this sentence's positions.
    pub fn replace(&self, tokens: Vec<Token>, positions: &[usize]) -> Result<Sentence> {
        if tokens.len() != positions.len() {
            return Err(TreeError::ArityMismatch { tokens: tokens.len(), positions: positions.len() });
        }
        for &position in positions {
            self.check_position(position)?;
        }

        let mut out = self.tokens.clone();
        let mut described = Vec::with_capacity(positions.len());
        for (mut token, &position) in tokens.into_iter().zip(positions) {
            token.i = position;
            token.set_sent_start(position == 0);
            described.push(format!("{}: {:?}", position, token.text));
            out[position] = Arc::new(token);
        }
        let operation = format!("replace({})", described.join(", "));
        trace!(%operation);
        Ok(self.derive(out, operation))
    }

    /// Removes the given positions.
    ///
    /// Dependents of a removed token are re-attached to `redirect_to`
    /// (a position in this sentence). If `redirect_to` itself sits below a
    /// removed token, the token on its head path takes over the removed
    /// token's attachment instead, becoming the root when the root goes.
    pub fn remove(&self, positions: &[usize], redirect_to: usize) -> Result<Sentence> {
        for &position in positions {
            self.check_position(position)?;
        }
        self.check_position(redirect_to)?;
        let removed: BTreeSet<usize> = positions.iter().copied().collect();
        if removed.contains(&redirect_to) {
            return Err(TreeError::RedirectRemoved(redirect_to));
        }

        // Tokens on the head path from the substitute up to the root.
        let mut on_path = vec![false; self.len()];
        let mut current = redirect_to;
        for _ in 0..self.len() {
            on_path[current] = true;
            if self[current].is_root() {
                break;
            }
            current = self[current].head;
        }

        let shift = |x: usize| x - removed.range(..x).count();
        let mut out = Vec::with_capacity(self.len() - removed.len());
        for (j, arc) in self.tokens.iter().enumerate() {
            if removed.contains(&j) {
                continue;
            }
            let (head, dep) = if !removed.contains(&arc.head) {
                (arc.head, None)
            } else if on_path[j] {
                self.takeover(j, &removed)
            } else {
                (redirect_to, None)
            };

            // A run of removed tokens after `j` lends its final whitespace.
            let mut next = j + 1;
            while removed.contains(&next) {
                next += 1;
            }
            let space = if next > j + 1 { self[next - 1].has_space_after() } else { arc.has_space_after() };

            let mut arc = Arc::clone(arc);
            if arc.i != shift(j) || arc.head != shift(head) || dep.is_some() || arc.has_space_after() != space {
                let token = Arc::make_mut(&mut arc);
                token.i = shift(j);
                token.head = shift(head);
                token.set_space_after(space);
                if let Some(dep) = dep {
                    token.dep = dep;
                }
            }
            out.push(arc);
        }

        if let Some(first) = out.first_mut() {
            if removed.contains(&0) || !first.is_sent_start() {
                let token = Arc::make_mut(first);
                token.set_sent_start(true);
                token.capitalize();
            }
        }

        let operation = format!("remove({:?}, {})", removed, redirect_to);
        trace!(%operation);
        Ok(self.derive(out, operation))
    }

    /// Head and label for a token on the substitute's head path whose head
    /// is removed: climb to the first surviving ancestor, or become the root.
    fn takeover(&self, j: usize, removed: &BTreeSet<usize>) -> (usize, Option<String>) {
        let mut r = self[j].head;
        for _ in 0..self.len() {
            let next = self[r].head;
            if next == r {
                return (j, Some(self[r].dep.clone()));
            }
            if !removed.contains(&next) {
                return (next, Some(self[r].dep.clone()));
            }
            r = next;
        }
        (j, Some(self[r].dep.clone()))
    }

    /// Inserts `token` at `position`. Its head is given in this sentence's
    /// positions and is shifted along with every other reference.
    pub fn insert(&self, mut token: Token, position: usize) -> Result<Sentence> {
        if position > self.len() {
            return Err(TreeError::IndexOutOfRange { position, len: self.len() });
        }
        self.check_position(token.head)?;

        let shift = |x: usize| if x >= position { x + 1 } else { x };
        let mut out = Vec::with_capacity(self.len() + 1);
        for (j, arc) in self.tokens.iter().enumerate() {
            let mut arc = Arc::clone(arc);
            if shift(j) != j || shift(arc.head) != arc.head {
                let moved = Arc::make_mut(&mut arc);
                moved.i = shift(j);
                moved.head = shift(moved.head);
            }
            out.push(arc);
        }

        token.i = position;
        token.head = shift(token.head);
        token.set_sent_start(position == 0);
        if position == 0 {
            token.capitalize();
            if let Some(old_first) = out.first_mut() {
                let demoted = Arc::make_mut(old_first);
                demoted.set_sent_start(false);
                if demoted.can_be_decapitalized() {
                    demoted.decapitalize();
                }
            }
        } else if position < self.len() && !self[position - 1].has_space_after() {
            // Glued to the previous token; keep the following token glued.
            token.set_space_after(false);
        }

        let operation = format!("insert({:?}, {})", token.text, position);
        out.insert(position, Arc::new(token));
        trace!(%operation);
        Ok(self.derive(out, operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check_tree;
    use crate::tests::the_dog_barks;
    use proptest::prelude::*;

    fn does(head: usize) -> Token {
        Token::new(0, "does").with_pos("AUX", "VBZ").with_lemma("do").with_dep("aux", head)
    }

    #[test]
    fn test_replace_shares_untouched_tokens() {
        let s = the_dog_barks();
        let bark = Token { text: "bark".to_string(), ..s[2].clone() };
        let out = s.replace(vec![bark], &[2]).unwrap();
        assert_eq!(out.text(), "The dog bark.");
        assert_eq!(s.text(), "The dog barks.");
        assert!(out.shares_token(&s, 0));
        assert!(!out.shares_token(&s, 2));
        assert_eq!(out.previous().unwrap().text(), "The dog barks.");
        assert_eq!(out.history(), "parse(\"The dog barks.\").replace(2: \"bark\")");
    }

    #[test]
    fn test_replace_arity_and_range() {
        let s = the_dog_barks();
        assert_eq!(
            s.replace(vec![], &[1]).unwrap_err(),
            TreeError::ArityMismatch { tokens: 0, positions: 1 }
        );
        assert_eq!(
            s.replace(vec![s[0].clone()], &[9]).unwrap_err(),
            TreeError::IndexOutOfRange { position: 9, len: 4 }
        );
    }

    #[test]
    fn test_insert_at_start_recapitalizes() {
        let s = the_dog_barks();
        let out = s.insert(does(2), 0).unwrap();
        assert_eq!(out.text(), "Does the dog barks.");
        assert_eq!(out[0].head, 3);
        assert_eq!(out[2].head, 3);
        assert_eq!(out[1].head, 2);
        assert!(out[0].is_sent_start());
        assert!(!out[1].is_sent_start());
        assert_eq!(check_tree(&out.tokens), Ok(()));
    }

    #[test]
    fn test_insert_before_glued_token_drops_space() {
        let s = the_dog_barks();
        let loudly = Token::new(0, "loudly").with_pos("ADV", "RB").with_dep("advmod", 2);
        let out = s.insert(loudly, 3).unwrap();
        assert_eq!(out.text(), "The dog barksloudly.");
    }

    #[test]
    fn test_remove_first_token() {
        let s = the_dog_barks();
        let out = s.remove(&[0], 1).unwrap();
        assert_eq!(out.text(), "Dog barks.");
        assert!(out[0].is_sent_start());
        assert_eq!(out[0].head, 1);
    }

    #[test]
    fn test_remove_redirects_dependents() {
        let s = the_dog_barks();
        let out = s.remove(&[1], 2).unwrap();
        assert_eq!(out.text(), "The barks.");
        assert_eq!(out[0].head, 1);
        assert_eq!(out[2].head, 1);
    }

    #[test]
    fn test_remove_root_promotes_substitute() {
        // "Does the dog does bark ." after inserting a copy of the root
        let s = the_dog_barks().insert(does(2), 0).unwrap();
        let out = s.remove(&[3], 0).unwrap();
        assert_eq!(out.root().unwrap().text, "Does");
        assert_eq!(out[0].dep, "ROOT");
        assert_eq!(out[2].head, 0);
        assert_eq!(out[3].head, 0);
    }

    #[test]
    fn test_remove_run_keeps_last_whitespace() {
        let s = Sentence::new(vec![
            Token::new(0, "It").with_dep("nsubj", 3),
            Token::new(1, "does").with_dep("aux", 3).with_space(false),
            Token::new(2, "n't").with_dep("neg", 3),
            Token::new(3, "work").with_space(false),
            Token::new(4, ".").with_dep("punct", 3),
        ])
        .unwrap();
        let out = s.remove(&[1, 2], 3).unwrap();
        assert_eq!(out.text(), "It work.");
    }

    #[test]
    fn test_remove_rejects_removed_substitute() {
        let s = the_dog_barks();
        assert_eq!(s.remove(&[1], 1).unwrap_err(), TreeError::RedirectRemoved(1));
        assert!(matches!(s.remove(&[4], 1), Err(TreeError::IndexOutOfRange { .. })));
    }

    /// Random trees: a shuffled order where each token attaches to one
    /// placed before it.
    fn arb_sentence() -> impl Strategy<Value = Sentence> {
        (1usize..10)
            .prop_flat_map(|n| {
                (
                    Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
                    prop::collection::vec(any::<prop::sample::Index>(), n),
                    prop::collection::vec(any::<bool>(), n),
                )
            })
            .prop_map(|(order, picks, spaces)| {
                let n = order.len();
                let mut heads = vec![order[0]; n];
                for k in 1..n {
                    heads[order[k]] = order[picks[k].index(k)];
                }
                let tokens = (0..n)
                    .map(|i| {
                        let dep = if heads[i] == i { "ROOT" } else { "dep" };
                        Token::new(i, format!("w{}", i)).with_dep(dep, heads[i]).with_space(spaces[i])
                    })
                    .collect();
                Sentence::new(tokens).unwrap()
            })
    }

    #[derive(Debug, Clone)]
    enum Edit {
        Replace(prop::sample::Index),
        Remove(Vec<prop::sample::Index>, prop::sample::Index),
        Insert(prop::sample::Index, prop::sample::Index),
    }

    fn arb_edit() -> impl Strategy<Value = Edit> {
        prop_oneof![
            any::<prop::sample::Index>().prop_map(Edit::Replace),
            (prop::collection::vec(any::<prop::sample::Index>(), 1..3), any::<prop::sample::Index>())
                .prop_map(|(drop, keep)| Edit::Remove(drop, keep)),
            (any::<prop::sample::Index>(), any::<prop::sample::Index>()).prop_map(|(at, head)| Edit::Insert(at, head)),
        ]
    }

    fn apply(s: &Sentence, edit: &Edit) -> Option<Sentence> {
        let n = s.len();
        match edit {
            Edit::Replace(at) => {
                let at = at.index(n);
                let token = Token { text: "x".to_string(), ..s[at].clone() };
                Some(s.replace(vec![token], &[at]).unwrap())
            }
            Edit::Remove(drop, keep) => {
                if n < 2 {
                    return None;
                }
                let keep = keep.index(n);
                let drop: Vec<usize> = drop.iter().map(|d| d.index(n)).filter(|d| *d != keep).collect();
                if drop.is_empty() {
                    return None;
                }
                Some(s.remove(&drop, keep).unwrap())
            }
            Edit::Insert(at, head) => {
                let token = Token::new(0, "new").with_dep("dep", head.index(n));
                Some(s.insert(token, at.index(n + 1)).unwrap())
            }
        }
    }

    proptest! {
        #[test]
        fn test_edits_preserve_tree(s in arb_sentence(), edits in prop::collection::vec(arb_edit(), 1..6)) {
            let mut current = s;
            for edit in &edits {
                if let Some(next) = apply(&current, edit) {
                    prop_assert_eq!(check_tree(&next.tokens), Ok(()));
                    prop_assert_eq!(next.iter().filter(|t| t.is_root()).count(), 1);
                    prop_assert!(next.iter().all(|t| t.head < next.len()));
                    prop_assert!(next[0].is_sent_start());
                    current = next;
                }
            }
        }
    }
}
