//! Grammatical relations of the main clause: verb, subject, object,
//! interveners and distractors.
//!
//! Positions are returned as sorted `Vec<usize>`; an empty vector means the
//! relation could not be found.

use concord_morph::tables::{is_partitive, partitive_kind, partitive_linkers, AMOD_DETERMINERS, VERB_PREFIXES};
use concord_morph::PartitiveKind;
use concord_protocol::labels::{dep, is_subject_dep, pos, tag, AUX_DEPS, NOUN_POS, OBJECT_DEPS, SUBJECT_DEPS};
use concord_protocol::Number;
use concord_tree::Sentence;
use serde::Serialize;

use crate::structure::StructurePath;
use crate::{GrammarError, Result};

/// Read-only queries over one sentence.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    s: &'a Sentence,
}

impl<'a> Resolver<'a> {
    pub fn new(sentence: &'a Sentence) -> Self {
        Self { s: sentence }
    }

    pub fn sentence(&self) -> &'a Sentence {
        self.s
    }

    pub fn root(&self) -> Option<usize> {
        self.s.root().map(|t| t.i)
    }

    pub fn root_is_verb(&self) -> bool {
        self.s.root().map_or(false, |t| t.is_verbal())
    }

    /// The tensed verb of the main clause: the root, or the top of its
    /// auxiliary chain ("would have been").
    pub fn main_verb(&self) -> Option<usize> {
        let mut v = self.root().filter(|_| self.root_is_verb())?;
        for _ in 0..self.s.len() {
            match self.s.children_with(v, AUX_DEPS).next() {
                Some(aux) => v = aux.i,
                None => break,
            }
        }
        Some(v)
    }

    pub fn require_main_verb(&self) -> Result<usize> {
        self.main_verb().ok_or(GrammarError::NoMainVerb)
    }

    fn subject_children(&self, i: usize) -> Vec<usize> {
        self.s.children_with(i, SUBJECT_DEPS).map(|t| t.i).collect()
    }

    fn object_children(&self, i: usize) -> Vec<usize> {
        self.s.children_with(i, OBJECT_DEPS).map(|t| t.i).collect()
    }

    fn has_child_labelled(&self, i: usize, label: &str) -> bool {
        self.s.children(i).any(|t| t.dep == label)
    }

    /// Subjects of the verb at `v`.
    ///
    /// Falls back to the head's subjects (passive participles carry them)
    /// and then up the head chain for auxiliaries. Expletive "there" is
    /// extended with the real subject. Predicative `attr` alone is not a
    /// subject.
    pub fn subject_of(&self, v: usize) -> Vec<usize> {
        let s = self.s;
        let verb = &s[v];

        let mut subjects = self.subject_children(v);
        if subjects.is_empty() {
            subjects = self.subject_children(verb.head);
        }
        if subjects.is_empty() && verb.is_aux() && !verb.is_root() {
            subjects = self.subject_of(verb.head);
        }
        if subjects.is_empty() {
            return subjects;
        }

        if subjects.iter().all(|&t| s[t].dep == dep::EXPL) {
            let has_be_child = |i: usize| s.children(i).any(|t| t.lemma == "be");
            let head_raises = verb.is_aux() && self.has_child_labelled(verb.head, dep::XCOMP);
            if self.has_child_labelled(v, dep::XCOMP) || head_raises {
                // there seems to be X / there used to have been X
                let reference = if head_raises { verb.head } else { v };
                if let Some(be) = s.children(reference).find(|t| t.lemma == "be") {
                    subjects.extend(self.subject_children(be.i));
                } else if let Some(embedded) = s.children(reference).find(|t| t.is_verb()) {
                    // unaccusative under raising: the real subject is parsed as an object
                    subjects.extend(self.object_children(embedded.i));
                }
            } else if verb.lemma != "be" || (verb.is_aux() && !has_be_child(verb.head)) {
                let reference = if verb.is_aux() && !has_be_child(verb.head) { verb.head } else { v };
                subjects.extend(self.object_children(reference));
            }
        }

        if subjects.iter().all(|&t| s[t].dep == dep::ATTR) {
            return Vec::new();
        }
        subjects.sort_unstable();
        subjects.dedup();
        subjects
    }

    pub fn main_subject(&self) -> Vec<usize> {
        let Some(v) = self.main_verb() else {
            return Vec::new();
        };
        let mut subjects = self.subject_of(v);
        let Some(&first) = subjects.first() else {
            return subjects;
        };
        subjects.extend(self.conjuncts(first));

        // "co-wrote": the split prefix is parsed as the subject
        if subjects.len() == 1 && VERB_PREFIXES.contains(self.s[first].lower().as_str()) {
            subjects = self
                .s
                .children(first)
                .filter(|t| is_subject_dep(&t.dep) || t.dep == dep::COMPOUND)
                .map(|t| t.i)
                .collect();
            if let Some(&head) = subjects.first() {
                subjects.extend(self.conjuncts(head));
            }
        }
        subjects.sort_unstable();
        subjects.dedup();
        subjects
    }

    pub fn require_main_subject(&self) -> Result<Vec<usize>> {
        self.require_main_verb()?;
        let subjects = self.main_subject();
        if subjects.is_empty() {
            return Err(GrammarError::NoMainSubject);
        }
        Ok(subjects)
    }

    pub fn has_conjoined_subject(&self) -> bool {
        self.main_subject().first().map_or(false, |&s| !self.conjuncts(s).is_empty())
    }

    /// Conjuncts hanging off `t`, transitively. A partitive conjunct is
    /// replaced by its head noun.
    pub fn conjuncts(&self, t: usize) -> Vec<usize> {
        let mut out = Vec::new();
        for c in self.s.rights(t).filter(|c| c.dep == dep::CONJ) {
            if is_partitive(&c.text) {
                out.extend(self.conjuncts(c.i));
                out.extend(self.partitive_head(c.i));
            } else {
                out.push(c.i);
            }
        }
        let direct = out.clone();
        for c in direct {
            for next in self.conjuncts(c) {
                if !out.contains(&next) {
                    out.push(next);
                }
            }
        }
        out
    }

    fn linker(&self, t: usize) -> Option<usize> {
        let linkers = partitive_linkers(&self.s[t].text);
        self.s.children(t).find(|c| linkers.contains(&c.lower().as_str())).map(|c| c.i)
    }

    fn linked_head(&self, t: usize) -> Vec<usize> {
        let Some(linker) = self.linker(t) else {
            return vec![t];
        };
        let mut heads: Vec<usize> = self.s.children(linker).map(|c| c.i).collect();
        let direct = heads.clone();
        for head in direct {
            heads.extend(self.conjuncts(head));
        }
        heads
    }

    /// The noun(s) that decide agreement for the partitive at `t` ("some of
    /// the dogs"). Tokens that are not acting as partitives resolve to
    /// themselves.
    pub fn partitive_head(&self, t: usize) -> Vec<usize> {
        match partitive_kind(&self.s[t].text) {
            None => vec![t],
            Some(PartitiveKind::WithLinker) => self.linked_head(t),
            Some(PartitiveKind::OptionalLinker) => {
                if self.linker(t).is_some() {
                    self.linked_head(t)
                } else {
                    self.s.children(t).filter(|c| NOUN_POS.contains(&c.pos.as_str())).map(|c| c.i).collect()
                }
            }
            Some(PartitiveKind::IndefiniteOnly) => {
                let indefinite = self.s.children_with(t, &[dep::DET]).next().map_or(false, |d| d.morph.is_indefinite());
                if indefinite {
                    self.linked_head(t)
                } else {
                    vec![t]
                }
            }
        }
    }

    /// Whether `t` is a partitive whose agreement is passed to another noun.
    pub fn acts_as_partitive(&self, t: usize) -> bool {
        is_partitive(&self.s[t].text) && self.partitive_head(t) != [t]
    }

    pub fn determiners(&self, t: usize) -> Vec<usize> {
        self.s
            .children(t)
            .filter(|c| {
                c.dep == dep::DET
                    || c.dep == dep::NUMMOD
                    || (c.dep == dep::AMOD && AMOD_DETERMINERS.contains(c.lower().as_str()))
            })
            .map(|c| c.i)
            .collect()
    }

    /// Objects of the verb at `v` that are not also its subjects.
    pub fn objects(&self, v: usize) -> Vec<usize> {
        let subjects = self.subject_of(v);
        self.object_children(v).into_iter().filter(|o| !subjects.contains(o)).collect()
    }

    pub fn is_transitive(&self, v: usize) -> bool {
        !self.subject_of(v).is_empty() && !self.objects(v).is_empty()
    }

    pub fn main_object(&self) -> Vec<usize> {
        let Some(v) = self.main_verb() else {
            return Vec::new();
        };
        let mut objects = self.objects(v);
        let direct = objects.clone();
        for o in direct {
            objects.extend(self.conjuncts(o));
        }
        objects.sort_unstable();
        objects.dedup();
        objects
    }

    /// "Neg" when the verb (or, for an auxiliary, its head) has a negation.
    pub fn is_negative(&self, v: usize) -> bool {
        !self.negations(v).is_empty()
    }

    pub(crate) fn negations(&self, v: usize) -> Vec<usize> {
        let verb = &self.s[v];
        let mut negs: Vec<usize> = self.s.children_with(v, &[dep::NEG]).map(|t| t.i).collect();
        if verb.is_aux() && !verb.is_root() {
            negs.extend(self.s.children_with(verb.head, &[dep::NEG]).map(|t| t.i));
        }
        negs
    }

    /// The main verb, its verbal conjuncts (and the root's, when the main
    /// verb is an auxiliary), each replaced by its auxiliary when it has
    /// one. Gerunds are dropped.
    pub fn main_clause_verbs(&self) -> Vec<usize> {
        let Some(v) = self.main_verb() else {
            return Vec::new();
        };
        let verbal = |i: &usize| self.s[*i].is_verbal();

        let mut verbs = vec![v];
        verbs.extend(self.conjuncts(v).into_iter().filter(verbal));
        if self.s[v].is_aux() {
            if let Some(root) = self.root() {
                verbs.extend(self.conjuncts(root));
            }
        }
        let mut k = 0;
        while k < verbs.len() {
            for c in self.conjuncts(verbs[k]).into_iter().filter(verbal) {
                if !verbs.contains(&c) {
                    verbs.push(c);
                }
            }
            k += 1;
        }

        let mut out: Vec<usize> = verbs
            .into_iter()
            .map(|i| self.s.children_with(i, AUX_DEPS).next().map_or(i, |aux| aux.i))
            .filter(verbal)
            .collect();
        out.sort_unstable();
        out.dedup();
        out.retain(|&i| self.s[i].tag != tag::VBG);
        out
    }

    /// Head nouns strictly between the last subject position and the main
    /// verb.
    pub fn interveners(&self) -> Vec<usize> {
        let subjects = self.main_subject();
        let Some(verb) = self.main_verb() else {
            return Vec::new();
        };
        let mut span = subjects.clone();
        for &t in &subjects {
            if is_partitive(&self.s[t].text) {
                span.extend(self.partitive_head(t));
            }
        }
        let Some(last) = span.into_iter().max() else {
            return Vec::new();
        };
        if last + 1 >= verb {
            return Vec::new();
        }

        let window: Vec<usize> = (last + 1..verb).collect();
        window
            .iter()
            .enumerate()
            .filter(|&(k, &i)| {
                let t = &self.s[i];
                // only the last of a run of same-tagged tokens counts
                let next_differs = window.get(k + 1).map_or(true, |&n| {
                    let next = &self.s[n];
                    next.tag != t.tag && next.pos != t.pos
                });
                next_differs
                    && (t.pos == pos::NOUN || t.pos == pos::PROPN)
                    && t.dep != dep::COMPOUND
                    && t.dep != dep::NMOD
                    && !self.acts_as_partitive(i)
            })
            .map(|(_, &i)| i)
            .collect()
    }

    /// Interveners whose number (singular when unmarked) differs from the
    /// subject's.
    pub fn distractors(&self) -> Vec<usize> {
        let Some(number) = self.main_subject_number() else {
            return Vec::new();
        };
        self.interveners()
            .into_iter()
            .filter(|&i| self.s[i].number().unwrap_or(Number::Singular) != number)
            .collect()
    }

    /// Structure path from `t` up to the last subject token, or up to the
    /// root when `t` is not inside the subject.
    pub fn structure_of(&self, t: usize) -> StructurePath {
        let subject_path = self
            .main_subject()
            .last()
            .and_then(|&subject| self.s.path_to(t, subject))
            .filter(|path| !path.is_empty());
        let path = subject_path
            .or_else(|| self.root().and_then(|root| self.s.path_to(t, root)))
            .unwrap_or_default();
        StructurePath::from_deps(path.iter().map(|&i| self.s[i].dep.as_str()))
    }

    pub fn structures(&self, tokens: &[usize]) -> Vec<StructurePath> {
        tokens.iter().map(|&t| self.structure_of(t)).collect()
    }
}

/// Everything the resolver knows about a sentence, computed once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relations {
    pub main_verb: usize,
    pub main_subject: Vec<usize>,
    pub subject_number: Number,
    pub main_object: Vec<usize>,
    pub object_number: Option<Number>,
    pub interveners: Vec<usize>,
    pub distractors: Vec<usize>,
    pub intervener_structures: Vec<StructurePath>,
    pub distractor_structures: Vec<StructurePath>,
}

impl Relations {
    pub fn has_distractors(&self) -> bool {
        !self.distractors.is_empty()
    }

    /// Labels of the non-empty distractor structures, in order.
    pub fn distractor_labels(&self) -> Vec<String> {
        labels(&self.distractor_structures)
    }

    pub fn intervener_labels(&self) -> Vec<String> {
        labels(&self.intervener_structures)
    }
}

fn labels(paths: &[StructurePath]) -> Vec<String> {
    paths.iter().filter(|p| !p.is_empty()).map(|p| p.to_string()).collect()
}

/// Resolves the main-clause relations of `sentence`.
pub fn resolve(sentence: &Sentence) -> Result<Relations> {
    let r = Resolver::new(sentence);
    let main_verb = r.require_main_verb()?;
    let main_subject = r.require_main_subject()?;
    let subject_number = r.main_subject_number().ok_or(GrammarError::NoMainSubject)?;
    let interveners = r.interveners();
    let distractors: Vec<usize> = interveners
        .iter()
        .copied()
        .filter(|&i| sentence[i].number().unwrap_or(Number::Singular) != subject_number)
        .collect();

    Ok(Relations {
        main_verb,
        main_subject,
        subject_number,
        main_object: r.main_object(),
        object_number: r.object_number(),
        intervener_structures: r.structures(&interveners),
        distractor_structures: r.structures(&distractors),
        interveners,
        distractors,
    })
}
