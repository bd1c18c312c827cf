//! Declarative to polar question: "The dog barks." becomes
//! "Does the dog bark?".
//!
//! Every main-clause verb with its own subject gets an auxiliary in front of
//! that subject. Auxiliaries move; other verbs get a "do" and drop to the
//! infinitive. A clitic "n't" travels with the auxiliary.

use std::collections::{BTreeMap, BTreeSet};

use concord_morph::tables::is_partitive;
use concord_morph::{reinflect, Inflection, MorphError};
use concord_protocol::labels::{dep, pos, tag, CLAUSAL_SUBJECT_DEPS, SUBJECT_DEPS};
use concord_protocol::{Morph, Number, Person, Tense, Token};
use concord_tree::{Sentence, TreeError};
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::TokenContext;
use crate::number::Role;
use crate::resolver::Resolver;
use crate::{GrammarError, Result};

/// How far up the head chain a verb may look for its subject.
const LOOK_FOR_SUBJECTS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("sentence does not end in a declarative full stop")]
    NotDeclarative,

    #[error("no main-clause verb")]
    NoMainClauseVerb,

    #[error("contracted verb {0:?}")]
    Contraction(String),

    #[error("subject of {verb:?} cannot be inverted")]
    SubjectNotInvertible { verb: String },

    #[error("no subject found for {verb:?}")]
    SubjectNotFound { verb: String },

    #[error("subject is a relative pronoun")]
    RelativeSubject,

    #[error("non-finite main-clause verb {0:?}")]
    NonFinite(String),

    #[error("subject at {position} needs different auxiliaries: {auxiliaries:?}")]
    MixedAuxiliaries { position: usize, auxiliaries: Vec<String> },

    #[error("token {0} was lost while editing")]
    Displaced(usize),

    #[error(transparent)]
    Reinflection(#[from] MorphError),

    #[error(transparent)]
    Edit(#[from] TreeError),
}

type Checked<T> = std::result::Result<T, Rejection>;

/// Subjects of `v`, climbing the head chain when the verb has none.
fn find_subject(r: &Resolver<'_>, v: usize) -> Option<Vec<usize>> {
    let s = r.sentence();
    let mut current = v;
    for _ in 0..LOOK_FOR_SUBJECTS_LIMIT {
        let subjects = r.subject_of(current);
        if !subjects.is_empty() {
            return Some(subjects);
        }
        if s[current].is_root() {
            return None;
        }
        current = s[current].head;
    }
    warn!(verb = %s[v].text, limit = LOOK_FOR_SUBJECTS_LIMIT, "gave up looking for a subject");
    None
}

/// The subject precedes the verb and is not an untensed clause.
fn is_invertible(s: &Sentence, subjects: &[usize], v: usize) -> bool {
    let Some(&first) = subjects.first() else {
        return false;
    };
    let subject = &s[first];
    if CLAUSAL_SUBJECT_DEPS.contains(&subject.dep.as_str()) {
        let tensed = [tag::VBG, tag::VBN, tag::VB, tag::VBZ].contains(&subject.tag.as_str());
        if !tensed || subject.morph.is_infinitive() {
            return false;
        }
    }
    first < v
}

/// Auxiliary a question on `verb` is formed with.
fn required_aux(verb: &Token) -> &str {
    if verb.is_aux() && verb.lemma != "get" {
        &verb.lemma
    } else {
        "do"
    }
}

/// Checks that `sentence` can be turned into a polar question.
pub fn eligibility(sentence: &Sentence) -> Checked<()> {
    let s = sentence;
    let r = Resolver::new(s);

    match s.last() {
        Some(last) if matches!(last.text.as_str(), "." | "!") && last.dep == dep::PUNCT => {}
        _ => return Err(Rejection::NotDeclarative),
    }

    let verbs = r.main_clause_verbs();
    if verbs.is_empty() {
        return Err(Rejection::NoMainClauseVerb);
    }
    if let Some(&v) = verbs.iter().find(|&&v| s[v].text.starts_with('\'')) {
        return Err(Rejection::Contraction(s[v].text.clone()));
    }

    let mut needed: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for &v in &verbs {
        let verb = &s[v];
        let subjects = find_subject(&r, v).ok_or_else(|| Rejection::SubjectNotFound { verb: verb.text.clone() })?;
        if !is_invertible(s, &subjects, v) {
            return Err(Rejection::SubjectNotInvertible { verb: verb.text.clone() });
        }
        let relative = subjects
            .iter()
            .flat_map(|&t| std::iter::once(t).chain(r.determiners(t)))
            .any(|t| s[t].lower() == "which");
        if relative {
            return Err(Rejection::RelativeSubject);
        }
        if verb.morph.is_infinitive() || (!verb.is_aux() && !verb.can_be_inflected()) {
            return Err(Rejection::NonFinite(verb.text.clone()));
        }

        let aux = required_aux(verb).to_string();
        let entry = needed.entry(subjects[0]).or_default();
        if !entry.contains(&aux) {
            entry.push(aux);
        }
    }

    if let Some((&position, auxiliaries)) = needed.iter().find(|(_, auxes)| auxes.len() > 1) {
        return Err(Rejection::MixedAuxiliaries { position, auxiliaries: auxiliaries.clone() });
    }
    Ok(())
}

pub fn can_form_question(sentence: &Sentence) -> bool {
    eligibility(sentence).is_ok()
}

/// Where each token of the source sentence (and each inserted token) sits
/// in the sentence being edited.
#[derive(Debug)]
struct Positions(Vec<Option<usize>>);

impl Positions {
    fn new(len: usize) -> Self {
        Self((0..len).map(Some).collect())
    }

    fn get(&self, id: usize) -> Checked<usize> {
        self.0.get(id).copied().flatten().ok_or(Rejection::Displaced(id))
    }

    /// Records an insertion at `at` and returns the new token's id.
    fn inserted(&mut self, at: usize) -> usize {
        for p in self.0.iter_mut().flatten() {
            if *p >= at {
                *p += 1;
            }
        }
        self.0.push(Some(at));
        self.0.len() - 1
    }

    fn removed(&mut self, ids: &[usize]) {
        let gone: BTreeSet<usize> = ids.iter().filter_map(|&id| self.0.get(id).copied().flatten()).collect();
        for slot in self.0.iter_mut() {
            *slot = match *slot {
                Some(p) if gone.contains(&p) => None,
                Some(p) => Some(p - gone.range(..p).count()),
                None => None,
            };
        }
    }
}

/// Subjects hanging off the verb itself, or off the verb an auxiliary
/// chain leads to. A lone predicative `attr` does not count.
fn own_subject(s: &Sentence, v: usize) -> Vec<usize> {
    let mut subjects: Vec<usize> = s.children_with(v, SUBJECT_DEPS).map(|t| t.i).collect();
    if subjects.is_empty() && s[v].is_aux() {
        let mut head = v;
        for _ in 0..s.len() {
            if s[head].is_root() {
                break;
            }
            head = s[head].head;
            if !s[head].is_aux() {
                break;
            }
        }
        subjects = s.children_with(head, SUBJECT_DEPS).map(|t| t.i).collect();
    }
    if subjects.iter().all(|&t| s[t].dep == dep::ATTR) {
        return Vec::new();
    }
    subjects
}

/// Number and person the fronted auxiliary agrees with.
fn agreement(r: &Resolver<'_>, v: usize, subjects: &[usize]) -> (Option<Number>, Option<Person>) {
    let s = r.sentence();
    let verb = &s[v];
    if let Some(number) = verb.number() {
        return (Some(number), verb.person());
    }
    match subjects {
        [] => (None, verb.person()),
        [only] => {
            let conjuncts = r.conjuncts(*only);
            if !conjuncts.is_empty() {
                let mut list = vec![*only];
                list.extend(conjuncts);
                (Some(r.list_number(&list, Role::Subject)), Some(Person::Third))
            } else if is_partitive(&s[*only].text) {
                (Some(r.partitive_number(*only, Role::Subject)), Some(Person::Third))
            } else {
                let person = s[*only].person().unwrap_or(Person::Third);
                (Some(r.noun_number(*only, Role::Subject)), Some(person))
            }
        }
        list => (Some(r.list_number(list, Role::Subject)), Some(Person::Third)),
    }
}

fn do_support() -> Token {
    let mut morph = Morph::new();
    morph.insert("Tense", "Pres");
    morph.insert("VerbForm", "Fin");
    Token::new(0, "do").with_pos(pos::AUX, tag::VBP).with_lemma("do").with_morph(morph)
}

fn question(sentence: &Sentence) -> Checked<Sentence> {
    let s = sentence;
    let r = Resolver::new(s);
    let mut out = s.clone();
    let mut at = Positions::new(s.len());

    for v in r.main_clause_verbs() {
        let verb = &s[v];
        let reused = verb.is_aux() && verb.lemma != "get";
        let own = own_subject(s, v);
        let has_own_subject = !own.is_empty() && is_invertible(s, &own, v);

        // shares the subject of an earlier verb, whose auxiliary now leads
        if !has_own_subject {
            if reused {
                out = out.remove(&[at.get(v)?], at.get(verb.head)?)?;
                at.removed(&[v]);
            } else {
                let cur = at.get(v)?;
                let bare = reinflect(&out[cur], Inflection::tense(Tense::Infinitive), &TokenContext::new(&out, cur))?;
                out = out.replace(vec![bare], &[cur])?;
            }
            continue;
        }

        // 1. build the auxiliary
        let subjects = find_subject(&r, v).unwrap_or_else(|| own.clone());
        let (number, person) = agreement(&r, v, &subjects);
        let mut aux = if reused { verb.clone() } else { do_support() };
        aux.set_sent_start(false);
        if aux.can_be_inflected() {
            let tense = verb.tense().unwrap_or(Tense::Present);
            let inflection = Inflection::new(number, Some(tense)).with_person(person);
            aux = reinflect(&aux, inflection, &TokenContext::new(s, v))?;
        }
        aux.set_space_after(true);
        let governor = if reused { verb.head } else { v };
        if !reused {
            aux.dep = dep::AUX.to_string();
        }
        aux.head = at.get(governor)?;

        // 2. put it in front of the subject phrase
        let front = own.iter().flat_map(|&t| s.subtree(t)).min().unwrap_or(own[0]);
        let position = at.get(front)?;
        out = out.insert(aux, position)?;
        let aux_id = at.inserted(position);

        // 3. "n't" follows the auxiliary
        let clitic = r.negations(v).into_iter().find(|&n| s[n].lower() == "n't");
        if let Some(n) = clitic {
            let mut copy = s[n].clone();
            copy.set_sent_start(false);
            copy.head = at.get(s[n].head)?;
            let after = at.get(aux_id)? + 1;
            out = out.insert(copy, after)?;
            at.inserted(after);

            let cur = at.get(aux_id)?;
            let mut glued = out[cur].clone();
            glued.set_space_after(false);
            out = out.replace(vec![glued], &[cur])?;
        }

        // 4. drop what moved
        let mut gone: Vec<usize> = Vec::new();
        if reused {
            gone.push(v);
        }
        gone.extend(clitic);
        if !gone.is_empty() {
            let positions = gone.iter().map(|&id| at.get(id)).collect::<Checked<Vec<_>>>()?;
            out = out.remove(&positions, at.get(aux_id)?)?;
            at.removed(&gone);
        }

        // 5. the verb itself goes bare
        if !reused {
            let cur = at.get(v)?;
            let bare = reinflect(&out[cur], Inflection::tense(Tense::Infinitive), &TokenContext::new(&out, cur))?;
            out = out.replace(vec![bare], &[cur])?;
        }

        // 6. "cannot" lost its glue
        let glued_not = s
            .get(v + 1)
            .filter(|t| reused && verb.lower() == "can" && !verb.has_space_after() && t.lower() == "not");
        if let Some(not) = glued_not {
            let cur = at.get(not.i)?;
            if cur > 0 {
                let mut before = out[cur - 1].clone();
                before.set_space_after(true);
                out = out.replace(vec![before], &[cur - 1])?;
            }
        }
    }

    let last = out.len() - 1;
    let mut mark = out[last].clone();
    mark.text = "?".to_string();
    out = out.replace(vec![mark], &[last])?;
    Ok(out)
}

/// Turns a declarative sentence into a yes/no question.
pub fn to_polar_question(sentence: &Sentence) -> Result<Sentence> {
    eligibility(sentence).map_err(GrammarError::QuestionFormationFailed)?;
    let out = question(sentence).map_err(GrammarError::QuestionFormationFailed)?;
    debug!(from = %sentence.text(), to = %out.text(), "formed polar question");
    Ok(out.rebase(sentence, "to_polar_question()"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::tests::{parse, DOG_BARKS, DOG_IS_BARKING, KEYS_MAN_OWNS};

    #[test]
    fn test_do_support() {
        let s = parse(DOG_BARKS);
        assert!(can_form_question(&s));
        let q = to_polar_question(&s).unwrap();
        assert_eq!(q.text(), "Does the dog bark?");
        assert_eq!(q.history(), "parse(\"The dog barks.\").to_polar_question()");
        // the source is untouched
        assert_eq!(s.text(), "The dog barks.");
    }

    #[test]
    fn test_auxiliary_moves() {
        let s = parse(DOG_IS_BARKING);
        assert_eq!(to_polar_question(&s).unwrap().text(), "Is the dog barking?");

        let s = parse(KEYS_MAN_OWNS);
        assert_eq!(to_polar_question(&s).unwrap().text(), "Are the keys that the man owns rusty?");
    }

    #[test]
    fn test_clitic_negation_moves_with_auxiliary() {
        let s = parse(
            "
            1  The   the   DET   DT   Definite=Def|PronType=Art  2  det    _  _
            2  dog   dog   NOUN  NN   Number=Sing                5  nsubj  _  _
            3  does  do    AUX   VBZ  Mood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin  5  aux  _  SpaceAfter=No
            4  n't   not   PART  RB   Polarity=Neg               5  neg    _  _
            5  bark  bark  VERB  VB   VerbForm=Inf               0  ROOT   _  SpaceAfter=No
            6  .     .     PUNCT .    PunctType=Peri             5  punct  _  _
            ",
        );
        assert_eq!(to_polar_question(&s).unwrap().text(), "Doesn't the dog bark?");
    }

    #[test]
    fn test_past_tense_do() {
        let s = parse(
            "
            1  The     the   DET   DT   Definite=Def|PronType=Art  2  det    _  _
            2  dogs    dog   NOUN  NNS  Number=Plur                3  nsubj  _  _
            3  barked  bark  VERB  VBD  Tense=Past|VerbForm=Fin    0  ROOT   _  SpaceAfter=No
            4  .       .     PUNCT .    PunctType=Peri             3  punct  _  _
            ",
        );
        assert_eq!(to_polar_question(&s).unwrap().text(), "Did the dogs bark?");
    }

    #[test]
    fn test_conjoined_verbs_share_the_fronted_auxiliary() {
        let s = parse(
            "
            1  The      the   DET    DT   Definite=Def|PronType=Art  2  det    _  _
            2  dog      dog   NOUN   NN   Number=Sing                4  nsubj  _  _
            3  is       be    AUX    VBZ  Mood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin  4  aux  _  _
            4  barking  bark  VERB   VBG  Aspect=Prog|Tense=Pres|VerbForm=Part  0  ROOT  _  _
            5  and      and   CCONJ  CC   ConjType=Cmp               4  cc     _  _
            6  is       be    AUX    VBZ  Mood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin  7  aux  _  _
            7  running  run   VERB   VBG  Aspect=Prog|Tense=Pres|VerbForm=Part  4  conj  _  SpaceAfter=No
            8  .        .     PUNCT  .    PunctType=Peri             4  punct  _  _
            ",
        );
        let q = to_polar_question(&s).unwrap();
        assert_eq!(q.text(), "Is the dog barking and running?");
        assert_eq!(q.iter().filter(|t| t.lower() == "is").count(), 1);
    }

    #[test]
    fn test_cannot_is_split() {
        let s = parse(
            "
            1  The   the   DET   DT   Definite=Def|PronType=Art  2  det    _  _
            2  dog   dog   NOUN  NN   Number=Sing                5  nsubj  _  _
            3  can   can   AUX   MD   VerbForm=Fin               5  aux    _  SpaceAfter=No
            4  not   not   PART  RB   Polarity=Neg               5  neg    _  _
            5  bark  bark  VERB  VB   VerbForm=Inf               0  ROOT   _  SpaceAfter=No
            6  .     .     PUNCT .    PunctType=Peri             5  punct  _  _
            ",
        );
        assert_eq!(s.text(), "The dog cannot bark.");
        assert_eq!(to_polar_question(&s).unwrap().text(), "Can the dog not bark?");
    }

    #[test]
    fn test_used_to_takes_past_do() {
        let s = parse(
            "
            1  The   the   DET   DT   Definite=Def|PronType=Art  2  det    _  _
            2  dog   dog   NOUN  NN   Number=Sing                3  nsubj  _  _
            3  used  use   VERB  VBD  Tense=Past|VerbForm=Fin    0  ROOT   _  _
            4  to    to    PART  TO   _                          5  aux    _  _
            5  bark  bark  VERB  VB   VerbForm=Inf               3  xcomp  _  SpaceAfter=No
            6  .     .     PUNCT .    PunctType=Peri             3  punct  _  _
            ",
        );
        let q = to_polar_question(&s).unwrap();
        assert_ne!(q.text(), "Does the dog use to bark?");
        assert_eq!(q.text(), "Did the dog use to bark?");
    }

    #[test]
    fn test_rejects_questions() {
        let s = parse(DOG_BARKS);
        let mark = Token { text: "?".to_string(), ..s[3].clone() };
        let asked = s.replace(vec![mark], &[3]).unwrap();
        assert_eq!(eligibility(&asked), Err(Rejection::NotDeclarative));
        assert!(matches!(
            to_polar_question(&asked),
            Err(GrammarError::QuestionFormationFailed(Rejection::NotDeclarative))
        ));
    }

    #[test]
    fn test_rejects_mixed_auxiliaries() {
        let s = parse(
            "
            1  The      the   DET    DT   Definite=Def|PronType=Art  2  det    _  _
            2  dog      dog   NOUN   NN   Number=Sing                4  nsubj  _  _
            3  is       be    AUX    VBZ  Mood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin  4  aux  _  _
            4  barking  bark  VERB   VBG  Aspect=Prog|Tense=Pres|VerbForm=Part  0  ROOT  _  _
            5  and      and   CCONJ  CC   ConjType=Cmp               4  cc     _  _
            6  runs     run   VERB   VBZ  Number=Sing|Person=3|Tense=Pres|VerbForm=Fin  4  conj  _  SpaceAfter=No
            7  .        .     PUNCT  .    PunctType=Peri             4  punct  _  _
            ",
        );
        match eligibility(&s) {
            Err(Rejection::MixedAuxiliaries { position, auxiliaries }) => {
                assert_eq!(position, 1);
                assert_eq!(auxiliaries, vec!["be".to_string(), "do".to_string()]);
            }
            other => panic!("expected mixed auxiliaries, got {:?}", other),
        }
    }

    #[test]
    fn test_positions_follow_edits() {
        let mut at = Positions::new(4);
        let new = at.inserted(0);
        assert_eq!(at.get(new), Ok(0));
        assert_eq!(at.get(2), Ok(3));
        at.removed(&[1]);
        assert_eq!(at.get(1), Err(Rejection::Displaced(1)));
        assert_eq!(at.get(2), Ok(2));
        assert_eq!(at.get(new), Ok(0));
    }
}
