use concord_protocol::labels::{dep, pos, tag};
use concord_protocol::{capitalize, Number, Person, Tense, Token};
use tracing::trace;

use crate::conjugate::conjugate;
use crate::inflect::{pluralize_word, singularize_word};
use crate::paradigm::Condition;
use crate::tables::{homophones, CONJUGATION_EXCEPTIONS, PLURAL_OVERRIDES, SINGULAR_OVERRIDES};
use crate::{MorphError, Result};

/// Syntactic facts about a verb that homophone conditions may ask for.
pub trait VerbContext {
    fn is_transitive(&self) -> bool;

    /// Child with label `dep`, optionally with the given lowercase text.
    fn has_child(&self, dep: &str, text: Option<&str>) -> bool;

    fn subject_is(&self, word: &str) -> bool;
}

/// A verb seen in isolation: intransitive, childless, no subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContext;

impl VerbContext for NoContext {
    fn is_transitive(&self) -> bool {
        false
    }

    fn has_child(&self, _dep: &str, _text: Option<&str>) -> bool {
        false
    }

    fn subject_is(&self, _word: &str) -> bool {
        false
    }
}

impl Condition {
    pub fn holds(&self, ctx: &dyn VerbContext) -> bool {
        match self {
            Condition::Intransitive => !ctx.is_transitive(),
            Condition::Transitive => ctx.is_transitive(),
            Condition::IntransitiveWithoutTopic => {
                !ctx.is_transitive() && !ctx.has_child(dep::PREP, Some("about")) && !ctx.has_child(dep::CCOMP, None)
            }
            Condition::Particle(text) => ctx.has_child(dep::PRT, Some(text)),
            Condition::ArchaicSecondPerson => ctx.subject_is("thou"),
        }
    }
}

/// Target features for [`reinflect`]. Unset fields keep the token's own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inflection {
    pub number: Option<Number>,
    pub tense: Option<Tense>,
    pub person: Option<Person>,
}

impl Inflection {
    pub fn new(number: Option<Number>, tense: Option<Tense>) -> Self {
        Self { number, tense, person: None }
    }

    pub fn tense(tense: Tense) -> Self {
        Self::new(None, Some(tense))
    }

    pub fn number(number: Number) -> Self {
        Self::new(Some(number), None)
    }

    pub fn with_person(mut self, person: Option<Person>) -> Self {
        self.person = person;
        self
    }
}

fn canonical_tag(number: Option<Number>, tense: Tense, person: Option<Person>) -> &'static str {
    match tense {
        Tense::Past => tag::VBD,
        Tense::Infinitive => tag::VB,
        Tense::Present => match (number, person) {
            (Some(Number::Plural), _) | (_, Some(Person::First | Person::Second)) => tag::VBP,
            _ => tag::VBZ,
        },
    }
}

/// Table lookups use English agreement: first and second person singular
/// present share the plural form.
fn lookup_number(number: Option<Number>, tense: Tense, person: Option<Person>) -> Option<Number> {
    match (tense, person) {
        (Tense::Present, Some(Person::First | Person::Second)) => Some(Number::Plural),
        _ => number,
    }
}

/// Reinflects a verb for number, tense and person.
pub fn reinflect(token: &Token, inflection: Inflection, ctx: &dyn VerbContext) -> Result<Token> {
    if !token.can_be_inflected() {
        return Err(MorphError::not_inflectable(token, "not a finite verb or inflectable auxiliary"));
    }
    if inflection.number.is_none() && inflection.tense.is_none() {
        return Err(MorphError::not_inflectable(token, "no target number or tense"));
    }

    let number = inflection.number.or_else(|| token.number());
    let person = inflection.person.or_else(|| token.person());
    let tense = match inflection.tense.or_else(|| token.tense()) {
        Some(tense) => tense,
        None if token.morph.is_infinitive() => Tense::Infinitive,
        None => return Err(MorphError::failed(token, "token has no tense to keep")),
    };

    let lower = token.lower();
    if lower == "used" && tense == Tense::Present && ctx.has_child(dep::XCOMP, None) {
        return Err(MorphError::failed(token, "\"used to\" has no present tense"));
    }

    let key = lookup_number(number, tense, person);
    let homophone = homophones(&lower)
        .iter()
        .find(|entry| entry.condition.holds(ctx))
        .and_then(|entry| entry.forms.lookup(key, tense));
    let form = match homophone {
        Some(form) => form.to_string(),
        None => match CONJUGATION_EXCEPTIONS.get(lower.as_str()).and_then(|p| p.lookup(key, tense)) {
            Some(form) => form.to_string(),
            None => conjugate(&token.lemma, number, tense, person).unwrap_or_default(),
        },
    };
    if form.is_empty() {
        return Err(MorphError::failed(token, "conjugation produced no form"));
    }

    let mut out = token.clone();
    out.text = if token.is_sent_start() { capitalize(&form) } else { form };
    out.tag = canonical_tag(number, tense, person).to_string();
    out.morph.set_tense(tense);
    if tense == Tense::Infinitive {
        out.morph.set_number(None);
        out.morph.set_person(None);
    } else {
        if number.is_some() {
            out.morph.set_number(number);
        }
        if inflection.person.is_some() {
            out.morph.set_person(inflection.person);
        }
    }
    trace!(from = %token.text, to = %out.text, ?tense, ?number, "reinflected");
    Ok(out)
}

/// Changes the number of a noun, pronoun or determiner. A token already at
/// `number` is returned unchanged.
pub fn renumber(token: &Token, number: Number) -> Result<Token> {
    if !token.can_be_numbered() {
        return Err(MorphError::not_inflectable(token, "only nouns, pronouns and determiners carry number"));
    }
    if token.number() == Some(number) {
        return Ok(token.clone());
    }

    let lower = token.lower();
    let form = match number {
        Number::Singular => SINGULAR_OVERRIDES
            .get(lower.as_str())
            .map(|form| form.to_string())
            .unwrap_or_else(|| singularize_word(&token.text)),
        Number::Plural => PLURAL_OVERRIDES
            .get(lower.as_str())
            .map(|form| form.to_string())
            .unwrap_or_else(|| pluralize_word(&token.text)),
    };

    let mut out = token.clone();
    out.text = if token.is_sent_start() { capitalize(&form) } else { form };
    out.morph.set_number(Some(number));
    match (out.pos.as_str(), number) {
        (pos::NOUN, Number::Singular) => out.tag = tag::NN.to_string(),
        (pos::NOUN, Number::Plural) => out.tag = tag::NNS.to_string(),
        (pos::PROPN, Number::Singular) => out.tag = "NNP".to_string(),
        (pos::PROPN, Number::Plural) => out.tag = "NNPS".to_string(),
        _ => {}
    }
    Ok(out)
}

pub fn singularize(token: &Token) -> Result<Token> {
    renumber(token, Number::Singular)
}

pub fn pluralize(token: &Token) -> Result<Token> {
    renumber(token, Number::Plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_protocol::Morph;

    struct Ctx {
        transitive: bool,
        children: Vec<(&'static str, &'static str)>,
        subject: &'static str,
    }

    impl VerbContext for Ctx {
        fn is_transitive(&self) -> bool {
            self.transitive
        }

        fn has_child(&self, dep: &str, text: Option<&str>) -> bool {
            self.children.iter().any(|(d, t)| *d == dep && text.map_or(true, |text| *t == text))
        }

        fn subject_is(&self, word: &str) -> bool {
            self.subject == word
        }
    }

    fn intransitive() -> Ctx {
        Ctx { transitive: false, children: vec![], subject: "dogs" }
    }

    fn transitive() -> Ctx {
        Ctx { transitive: true, children: vec![], subject: "he" }
    }

    fn verb(text: &str, lemma: &str, tag: &str, features: &[(&str, &str)]) -> Token {
        let morph: Morph = features.iter().copied().collect();
        Token::new(2, text).with_pos("VERB", tag).with_lemma(lemma).with_morph(morph)
    }

    fn sang() -> Token {
        verb("sang", "sing", "VBD", &[("Tense", "Past"), ("VerbForm", "Fin")])
    }

    #[test]
    fn test_sang_to_present_singular() {
        let out = reinflect(&sang(), Inflection::new(Some(Number::Singular), Some(Tense::Present)), &NoContext).unwrap();
        assert_eq!(out.text, "sings");
        assert_eq!(out.tag, "VBZ");
        assert_eq!(out.morph.get("Tense"), Some("Pres"));
        assert_eq!(out.number(), Some(Number::Singular));
    }

    #[test]
    fn test_sang_to_past_is_unchanged() {
        let out = reinflect(&sang(), Inflection::tense(Tense::Past), &NoContext).unwrap();
        assert_eq!(out.text, "sang");
        assert_eq!(out.tag, "VBD");
    }

    #[test]
    fn test_intransitive_lay_uses_lie_paradigm() {
        let lay = verb("lay", "lie", "VBD", &[("Tense", "Past")]);
        let sing = reinflect(&lay, Inflection::new(Some(Number::Singular), Some(Tense::Present)), &intransitive()).unwrap();
        let plur = reinflect(&lay, Inflection::new(Some(Number::Plural), Some(Tense::Present)), &intransitive()).unwrap();
        let past = reinflect(&lay, Inflection::tense(Tense::Past), &intransitive()).unwrap();
        assert_eq!(sing.text, "lies");
        assert_eq!(plur.text, "lie");
        assert_eq!(past.text, "lay");
    }

    #[test]
    fn test_transitive_lay_uses_lay_paradigm() {
        let lay = verb("lay", "lay", "VBP", &[("Tense", "Pres")]);
        let out = reinflect(&lay, Inflection::new(Some(Number::Plural), Some(Tense::Past)), &transitive()).unwrap();
        assert_eq!(out.text, "laid");
    }

    #[test]
    fn test_particle_condition() {
        let secreted = verb("secreted", "secrete", "VBD", &[("Tense", "Past")]);
        let away = Ctx { transitive: true, children: vec![("prt", "away")], subject: "she" };
        let out = reinflect(&secreted, Inflection::new(Some(Number::Singular), Some(Tense::Present)), &away).unwrap();
        assert_eq!(out.text, "secrets");
        let plain = reinflect(&secreted, Inflection::new(Some(Number::Singular), Some(Tense::Present)), &transitive()).unwrap();
        assert_eq!(plain.text, "secretes");
    }

    #[test]
    fn test_archaic_subject_condition() {
        let art = Token::new(1, "art").with_pos("AUX", "VBP").with_lemma("be").with_morph([("Tense", "Pres")].into_iter().collect());
        let thou = Ctx { transitive: false, children: vec![], subject: "thou" };
        let out = reinflect(&art, Inflection::tense(Tense::Past), &thou).unwrap();
        assert_eq!(out.text, "wast");
    }

    #[test]
    fn test_used_to_has_no_present() {
        let used = verb("used", "use", "VBD", &[("Tense", "Past")]);
        let ctx = Ctx { transitive: false, children: vec![("xcomp", "bark")], subject: "dog" };
        let err = reinflect(&used, Inflection::new(Some(Number::Singular), Some(Tense::Present)), &ctx).unwrap_err();
        assert!(matches!(err, MorphError::ReinflectionFailed { .. }));
        let inf = reinflect(&used, Inflection::tense(Tense::Infinitive), &ctx).unwrap();
        assert_eq!(inf.text, "use");
    }

    #[test]
    fn test_participles_are_rejected() {
        let walking = verb("walking", "walk", "VBG", &[("VerbForm", "Part")]);
        let err = reinflect(&walking, Inflection::tense(Tense::Past), &NoContext).unwrap_err();
        assert!(matches!(err, MorphError::NotInflectable { .. }));
    }

    #[test]
    fn test_missing_target_is_rejected() {
        let err = reinflect(&sang(), Inflection::default(), &NoContext).unwrap_err();
        assert!(matches!(err, MorphError::NotInflectable { .. }));
    }

    #[test]
    fn test_infinitive_clears_tense() {
        let barks = verb("barks", "bark", "VBZ", &[("Number", "Sing"), ("Person", "3"), ("Tense", "Pres"), ("VerbForm", "Fin")]);
        let out = reinflect(&barks, Inflection::tense(Tense::Infinitive), &NoContext).unwrap();
        assert_eq!(out.text, "bark");
        assert_eq!(out.tag, "VB");
        assert_eq!(out.morph.to_string(), "VerbForm=Inf");
    }

    #[test]
    fn test_first_person_present() {
        let walked = Token::new(1, "walked").with_pos("VERB", "VBD").with_lemma("walk").with_morph([("Tense", "Past")].into_iter().collect());
        let out = reinflect(&walked, Inflection::new(Some(Number::Singular), Some(Tense::Present)).with_person(Some(Person::First)), &NoContext).unwrap();
        assert_eq!(out.text, "walk");
        assert_eq!(out.tag, "VBP");
    }

    #[test]
    fn test_sentence_initial_capitalization() {
        let mut is = Token::new(0, "Is").with_pos("AUX", "VBZ").with_lemma("be");
        is.morph = [("Number", "Sing"), ("Tense", "Pres")].into_iter().collect();
        let out = reinflect(&is, Inflection::tense(Tense::Past), &NoContext).unwrap();
        assert_eq!(out.text, "Was");
    }

    #[test]
    fn test_renumber_nouns_and_determiners() {
        let doors = Token::new(4, "doors").with_pos("NOUN", "NNS").with_morph([("Number", "Plur")].into_iter().collect());
        let door = singularize(&doors).unwrap();
        assert_eq!(door.text, "door");
        assert_eq!(door.tag, "NN");

        let these = Token::new(0, "These").with_pos("DET", "DT").with_morph([("Number", "Plur")].into_iter().collect());
        assert_eq!(singularize(&these).unwrap().text, "This");

        let the = Token::new(3, "the").with_pos("DET", "DT");
        assert_eq!(pluralize(&the).unwrap().text, "the");
    }

    #[test]
    fn test_renumber_is_noop_at_target() {
        let dog = Token::new(1, "dog").with_pos("NOUN", "NN").with_morph([("Number", "Sing")].into_iter().collect());
        assert_eq!(singularize(&dog).unwrap(), dog);
        let bark = verb("barks", "bark", "VBZ", &[]);
        assert!(pluralize(&bark).is_err());
    }
}
