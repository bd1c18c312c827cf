#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use bitflags::bitflags;

use crate::features::{Morph, Number, Person, Tense};
use crate::labels::{dep, pos, INFLECTED_AUXES, NON_FINITE_TAGS, NOUN_POS};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct TokenFlags: u8 {
        const SPACE_AFTER = 1;
        const SENT_START = 2;
    }
}

/// One parsed token. `head == i` marks the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub i: usize,
    pub text: String,
    pub flags: TokenFlags,
    pub pos: String,
    pub tag: String,
    pub morph: Morph,
    pub lemma: String,
    pub dep: String,
    pub head: usize,
    /// IOB entity marker, carried through untouched.
    pub ent_iob: String,
}

impl Token {
    /// A root token with trailing whitespace and no annotation.
    pub fn new(i: usize, text: impl Into<String>) -> Self {
        let mut flags = TokenFlags::SPACE_AFTER;
        flags.set(TokenFlags::SENT_START, i == 0);
        Self {
            i,
            text: text.into(),
            flags,
            pos: String::new(),
            tag: String::new(),
            morph: Morph::new(),
            lemma: String::new(),
            dep: dep::ROOT.to_string(),
            head: i,
            ent_iob: String::new(),
        }
    }

    pub fn with_pos(mut self, pos: &str, tag: &str) -> Self {
        self.pos = pos.to_string();
        self.tag = tag.to_string();
        self
    }

    pub fn with_lemma(mut self, lemma: &str) -> Self {
        self.lemma = lemma.to_string();
        self
    }

    pub fn with_dep(mut self, dep: &str, head: usize) -> Self {
        self.dep = dep.to_string();
        self.head = head;
        self
    }

    pub fn with_morph(mut self, morph: Morph) -> Self {
        self.morph = morph;
        self
    }

    pub fn with_space(mut self, space_after: bool) -> Self {
        self.flags.set(TokenFlags::SPACE_AFTER, space_after);
        self
    }

    pub fn has_space_after(&self) -> bool {
        self.flags.contains(TokenFlags::SPACE_AFTER)
    }

    pub fn set_space_after(&mut self, space_after: bool) {
        self.flags.set(TokenFlags::SPACE_AFTER, space_after);
    }

    pub fn whitespace(&self) -> &'static str {
        if self.has_space_after() {
            " "
        } else {
            ""
        }
    }

    pub fn is_sent_start(&self) -> bool {
        self.flags.contains(TokenFlags::SENT_START)
    }

    pub fn set_sent_start(&mut self, sent_start: bool) {
        self.flags.set(TokenFlags::SENT_START, sent_start);
    }

    pub fn is_root(&self) -> bool {
        self.head == self.i
    }

    pub fn is_aux(&self) -> bool {
        self.pos == pos::AUX || self.lemma == "be"
    }

    pub fn is_verb(&self) -> bool {
        self.pos == pos::VERB
    }

    pub fn is_verbal(&self) -> bool {
        self.is_verb() || self.is_aux()
    }

    pub fn is_noun(&self) -> bool {
        NOUN_POS.contains(&self.pos.as_str())
    }

    pub fn is_determiner(&self) -> bool {
        self.pos == pos::DET
    }

    /// Nouns, pronouns and determiners carry a number that can be changed.
    pub fn can_be_numbered(&self) -> bool {
        self.is_noun() || self.is_determiner()
    }

    /// Finite verbs and the auxiliaries be/have/do. Participles are excluded.
    pub fn can_be_inflected(&self) -> bool {
        if NON_FINITE_TAGS.contains(&self.tag.as_str()) {
            return false;
        }
        self.is_verb() || (self.is_aux() && INFLECTED_AUXES.contains(&self.lemma.as_str()))
    }

    pub fn can_be_decapitalized(&self) -> bool {
        self.pos != pos::PROPN && self.text != "I"
    }

    pub fn number(&self) -> Option<Number> {
        self.morph.number()
    }

    pub fn tense(&self) -> Option<Tense> {
        self.morph.tense()
    }

    pub fn person(&self) -> Option<Person> {
        self.morph.person()
    }

    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    pub fn capitalize(&mut self) {
        self.text = capitalize(&self.text);
    }

    pub fn decapitalize(&mut self) {
        self.text = decapitalize(&self.text);
    }
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verb(text: &str, tag: &str, lemma: &str) -> Token {
        Token::new(1, text).with_pos(pos::VERB, tag).with_lemma(lemma)
    }

    #[test]
    fn test_participles_cannot_be_inflected() {
        assert!(verb("walked", "VBD", "walk").can_be_inflected());
        assert!(!verb("walking", "VBG", "walk").can_be_inflected());
        assert!(!verb("walked", "VBN", "walk").can_be_inflected());
    }

    #[test]
    fn test_modal_auxiliaries_cannot_be_inflected() {
        let can = Token::new(1, "can").with_pos(pos::AUX, "MD").with_lemma("can");
        let is = Token::new(1, "is").with_pos(pos::AUX, "VBZ").with_lemma("be");
        assert!(!can.can_be_inflected());
        assert!(is.can_be_inflected());
    }

    #[test]
    fn test_capitalization_helpers() {
        assert_eq!(capitalize("does"), "Does");
        assert_eq!(decapitalize("The"), "the");
        assert_eq!(capitalize(""), "");
        let pronoun = Token::new(0, "I").with_pos(pos::PRON, "PRP");
        assert!(!pronoun.can_be_decapitalized());
    }
}
