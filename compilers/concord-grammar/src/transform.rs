//! Sentence-level reinflection: tense changes on the main clause and
//! number changes on the subject or its distractors.

use std::collections::BTreeMap;

use concord_morph::tables::is_partitive;
use concord_morph::{reinflect, renumber, Inflection, MorphError};
use concord_protocol::labels::dep;
use concord_protocol::{Number, Person, Tense, Token};
use concord_tree::Sentence;
use tracing::debug;

use crate::context::TokenContext;
use crate::resolver::Resolver;
use crate::{GrammarError, Result};

/// Person of the verb's subject when it is a single token that marks one.
fn subject_person(r: &Resolver<'_>, v: usize) -> Option<Person> {
    match r.subject_of(v).as_slice() {
        [single] => r.sentence()[*single].person(),
        _ => None,
    }
}

/// A "do" auxiliary under "use to" ("Did he use to go?").
fn supports_used_to(s: &Sentence, v: usize) -> bool {
    let verb = &s[v];
    verb.lemma == "do"
        && verb.is_aux()
        && !verb.is_root()
        && matches!(s.head(v).lower().as_str(), "use" | "used")
        && s.children_with(verb.head, &[dep::XCOMP]).next().is_some()
}

fn apply(sentence: &Sentence, edits: BTreeMap<usize, Token>) -> Result<Sentence> {
    if edits.is_empty() {
        return Ok(sentence.clone());
    }
    let (positions, tokens): (Vec<usize>, Vec<Token>) = edits.into_iter().unzip();
    Ok(sentence.replace(tokens, &positions)?)
}

/// Moves every main-clause verb not already in `tense` into it, agreeing
/// with the main subject. The result is a single replace.
pub fn reinflect_main_verbs(sentence: &Sentence, tense: Tense) -> Result<Sentence> {
    let r = Resolver::new(sentence);
    let v = r.require_main_verb()?;
    let main = &sentence[v];
    if !main.can_be_inflected() || main.morph.is_infinitive() {
        return Err(MorphError::not_inflectable(main, "main verb is non-finite").into());
    }

    let verbs = r.main_clause_verbs();
    if tense == Tense::Present {
        if let Some(&used) = verbs.iter().find(|&&v| supports_used_to(sentence, v)) {
            return Err(MorphError::failed(&sentence[used], "\"use to\" has no present tense").into());
        }
    }

    let number = r.main_subject_number().ok_or(GrammarError::NoMainVerb)?;
    let mut edits = BTreeMap::new();
    for &i in &verbs {
        let verb = &sentence[i];
        if verb.tense() == Some(tense) {
            continue;
        }
        let person = verb.person().or_else(|| subject_person(&r, i));
        let inflection = Inflection::new(Some(number), Some(tense)).with_person(person);
        let out = reinflect(verb, inflection, &TokenContext::new(sentence, i))?;

        // "'s" became "was": the host word needs its space back
        if verb.text.starts_with('\'') && !out.text.starts_with('\'') && i > 0 {
            let mut host = sentence[i - 1].clone();
            host.set_space_after(true);
            edits.insert(i - 1, host);
        }
        edits.insert(i, out);
    }
    apply(sentence, edits)
}

fn to_tense(sentence: &Sentence, tense: Tense, operation: &str) -> Result<Sentence> {
    let r = Resolver::new(sentence);
    r.require_main_verb()?;
    if r.main_clause_verbs().iter().all(|&v| sentence[v].tense() == Some(tense)) {
        return Ok(sentence.clone());
    }
    let out = reinflect_main_verbs(sentence, tense)?;
    debug!(from = %sentence.text(), to = %out.text(), ?tense, "reinflected main clause");
    Ok(out.rebase(sentence, operation))
}

pub fn to_past_tense(sentence: &Sentence) -> Result<Sentence> {
    to_tense(sentence, Tense::Past, "to_past_tense()")
}

pub fn to_present_tense(sentence: &Sentence) -> Result<Sentence> {
    to_tense(sentence, Tense::Present, "to_present_tense()")
}

/// Renumbers the main subject, its determiners and the verbs agreeing with
/// it. Conjuncts are dropped when going to singular.
pub fn renumber_subject(sentence: &Sentence, number: Number) -> Result<Sentence> {
    let r = Resolver::new(sentence);
    let subjects = r.require_main_subject()?;

    let working = if number == Number::Singular && r.has_conjoined_subject() {
        let first = subjects[0];
        let last = subjects.iter().copied().max().unwrap_or(first);
        let span: Vec<usize> = (first + 1..=last).collect();
        sentence.remove(&span, first)?
    } else if subjects.len() == 1 && is_partitive(&sentence[subjects[0]].text) && !r.distractors().is_empty() {
        // "a lot of people are" has no safe singular
        return Err(MorphError::failed(&sentence[subjects[0]], "partitive subject with distractors").into());
    } else {
        sentence.clone()
    };

    let r = Resolver::new(&working);
    let subjects = r.require_main_subject()?;
    let mut edits = BTreeMap::new();
    for &t in subjects.iter().filter(|&&t| working[t].dep != dep::EXPL) {
        edits.insert(t, renumber(&working[t], number)?);
        for d in r.determiners(t) {
            edits.insert(d, renumber(&working[d], number)?);
        }
    }

    let head = subjects[0];
    for v in r.main_clause_verbs() {
        let verb = &working[v];
        if verb.tense().is_none() || !verb.can_be_inflected() || !r.subject_of(v).contains(&head) {
            continue;
        }
        let person = verb.person().or_else(|| subject_person(&r, v));
        let out = reinflect(verb, Inflection::number(number).with_person(person), &TokenContext::new(&working, v))?;
        edits.insert(v, out);
    }

    let out = apply(&working, edits)?;
    debug!(from = %sentence.text(), to = %out.text(), ?number, "renumbered subject");
    Ok(out.rebase(sentence, format!("renumber_subject({})", number.as_feature())))
}

/// Renumbers every distractor together with its determiners.
pub fn renumber_distractors(sentence: &Sentence, number: Number) -> Result<Sentence> {
    let r = Resolver::new(sentence);
    r.require_main_subject()?;

    let mut edits = BTreeMap::new();
    for d in r.distractors() {
        edits.insert(d, renumber(&sentence[d], number)?);
        for det in sentence.children_with(d, &[dep::DET]) {
            edits.insert(det.i, renumber(det, number)?);
        }
    }
    if edits.is_empty() {
        return Ok(sentence.clone());
    }
    let out = apply(sentence, edits)?;
    Ok(out.rebase(sentence, format!("renumber_distractors({})", number.as_feature())))
}

/// Makes every distractor agree with the main subject.
pub fn renumber_distractors_to_subject(sentence: &Sentence) -> Result<Sentence> {
    let number = Resolver::new(sentence).main_subject_number().ok_or(GrammarError::NoMainVerb)?;
    renumber_distractors(sentence, number)
}
