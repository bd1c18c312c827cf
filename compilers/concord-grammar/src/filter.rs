//! Acceptability filter chain.
//!
//! Two phases, cheapest first: [`check_string`] on the raw text before it is
//! parsed, [`check_parsed`] on the parse. Each check short-circuits with the
//! reason for the rejection.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use concord_morph::is_number;
use concord_protocol::labels::{pos, UNKNOWN_TAGS};
use concord_tree::Sentence;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::resolver::{resolve, Relations, Resolver};
use crate::structure::Structure;
use crate::GrammarError;

/// Substrings that mark markup, stray punctuation or tokenization debris.
const EXCLUSION_STRINGS: &[&str] = &[
    ";", "\"", " ,", " .", "<", ">", "|", "http", "www.", "/", "' ", "\\", "_", ".com", ".gov", ".edu", ".net", "@",
    "#", "^", "*", "+", "~", "`", "{", "}", "[", "]",
];

/// ASCII punctuation with a word character on both sides. The apostrophe is
/// allowed.
const PUNCTUATION_JOINED: &str = r##"\w[!"#$%&()*+,\-./:;<=>?@\[\\\]^_`{|}~]\w"##;

/// Abbreviations that end a string without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "Prof.", "Blvd.", "Mrs.", "Ave.", "Ltd.", "Inc.", "Mr.", "Dr.", "Ms.", "St.", "Av.",
];

const BRACKETS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}')];

/// What to do with sentences whose subject and verb are separated by a
/// noun of the other number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistractorPolicy {
    Allow,
    #[default]
    Forbid,
    Require,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub min_chars: usize,
    pub max_words: usize,
    pub distractors: DistractorPolicy,
    /// With [`DistractorPolicy::Require`], a distractor must sit in one of
    /// these structures.
    pub required_structures: BTreeSet<Structure>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_chars: 2,
            max_words: 50,
            distractors: DistractorPolicy::default(),
            required_structures: [Structure::PP, Structure::RC, Structure::CC].into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterRejection {
    #[error("{chars} characters, at least {min} required")]
    TooShort { chars: usize, min: usize },

    #[error("{words} words, at most {max} allowed")]
    TooLong { words: usize, max: usize },

    #[error("does not start with an uppercase letter")]
    NotCapitalized,

    #[error("opens with an all-caps word")]
    AllCapsOpening,

    #[error("no sentence-final punctuation")]
    NoFinalPunctuation,

    #[error("contains a control character")]
    ControlCharacter,

    #[error("contains {0:?}")]
    Excluded(&'static str),

    #[error("contains punctuation between word characters")]
    PunctuationJoined,

    #[error("ends in the abbreviation {0:?}")]
    Abbreviation(&'static str),

    #[error("uppercase letter before the final period")]
    UppercaseBeforePeriod,

    #[error("unbalanced {0:?}")]
    Unbalanced(char),

    #[error("root is not a verb")]
    VerblessRoot,

    #[error("unidentified token {0:?}")]
    UnknownToken(String),

    #[error(transparent)]
    Unresolved(#[from] GrammarError),

    #[error("main verb {0:?} cannot be inflected")]
    NotInflectable(String),

    #[error("argument head {0:?} is not a noun")]
    BadArgument(String),

    #[error("has distractors")]
    Distractors,

    #[error("no distractor in a required structure")]
    NoDistractors,
}

type Verdict<T> = std::result::Result<T, FilterRejection>;

fn punctuation_joined() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PUNCTUATION_JOINED).expect("constant pattern"))
}

/// An opener must precede its closer and every opener must be closed.
fn check_brackets(text: &str) -> Verdict<()> {
    for &(open, close) in BRACKETS {
        let mut depth = 0i32;
        for c in text.chars() {
            if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth < 0 {
                    return Err(FilterRejection::Unbalanced(close));
                }
            }
        }
        if depth != 0 {
            return Err(FilterRejection::Unbalanced(open));
        }
    }
    Ok(())
}

/// String-phase checks, run before parsing.
pub fn check_string(raw: &str, config: &FilterConfig) -> Verdict<()> {
    let text = raw.trim();

    let chars = text.chars().count();
    if chars < config.min_chars {
        return Err(FilterRejection::TooShort { chars, min: config.min_chars });
    }
    let words = text.split_whitespace().count();
    if words > config.max_words {
        return Err(FilterRejection::TooLong { words, max: config.max_words });
    }

    if !text.chars().next().map_or(false, char::is_uppercase) {
        return Err(FilterRejection::NotCapitalized);
    }
    let first_word = text.split_whitespace().next().unwrap_or_default();
    let letters: Vec<char> = first_word.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| !c.is_lowercase()) {
        return Err(FilterRejection::AllCapsOpening);
    }

    if !text.ends_with(&['.', '?', '!'][..]) {
        return Err(FilterRejection::NoFinalPunctuation);
    }
    if text.chars().any(char::is_control) {
        return Err(FilterRejection::ControlCharacter);
    }
    if let Some(found) = EXCLUSION_STRINGS.iter().find(|s| text.contains(*s)) {
        return Err(FilterRejection::Excluded(*found));
    }
    if punctuation_joined().is_match(text) {
        return Err(FilterRejection::PunctuationJoined);
    }

    if let Some(abbreviation) = ABBREVIATIONS.iter().find(|a| text.ends_with(*a)) {
        return Err(FilterRejection::Abbreviation(*abbreviation));
    }
    if text.ends_with('.') && text.chars().rev().nth(1).map_or(false, char::is_uppercase) {
        return Err(FilterRejection::UppercaseBeforePeriod);
    }

    check_brackets(text)
}

/// Whether `raw` survives the string phase.
pub fn accepts(raw: &str, config: &FilterConfig) -> bool {
    match check_string(raw, config) {
        Ok(()) => true,
        Err(reason) => {
            debug!(text = raw, %reason, "rejected before parsing");
            false
        }
    }
}

/// Structural checks on a parsed sentence. Returns the resolved relations
/// of an accepted sentence.
pub fn check_parsed(sentence: &Sentence, config: &FilterConfig) -> Verdict<Relations> {
    let s = sentence;
    if !Resolver::new(s).root_is_verb() {
        return Err(FilterRejection::VerblessRoot);
    }
    if let Some(unknown) = s.iter().find(|t| t.pos == pos::X || UNKNOWN_TAGS.contains(&t.tag.as_str())) {
        return Err(FilterRejection::UnknownToken(unknown.text.clone()));
    }

    let relations = resolve(s)?;
    let verb = &s[relations.main_verb];
    if !verb.can_be_inflected() {
        return Err(FilterRejection::NotInflectable(verb.text.clone()));
    }
    let mut arguments = relations.main_subject.iter().chain(&relations.main_object);
    if let Some(&bad) = arguments.find(|&&t| is_number(&s[t].text) || s[t].lower() == "the") {
        return Err(FilterRejection::BadArgument(s[bad].text.clone()));
    }

    match config.distractors {
        DistractorPolicy::Allow => {}
        DistractorPolicy::Forbid if relations.has_distractors() => return Err(FilterRejection::Distractors),
        DistractorPolicy::Forbid => {}
        DistractorPolicy::Require => {
            let required = relations
                .distractor_structures
                .iter()
                .filter_map(|path| path.dominant())
                .any(|structure| config.required_structures.contains(structure));
            if !required {
                return Err(FilterRejection::NoDistractors);
            }
        }
    }
    Ok(relations)
}

/// [`check_parsed`] with the rejection logged.
pub fn accepts_parsed(sentence: &Sentence, config: &FilterConfig) -> Verdict<Relations> {
    check_parsed(sentence, config).map_err(|reason| {
        debug!(text = %sentence.text(), %reason, "rejected after parsing");
        reason
    })
}
