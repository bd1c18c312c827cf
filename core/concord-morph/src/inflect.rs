//! Rule-based English noun number.

use concord_protocol::capitalize;

use crate::tables::INVARIANT_PLURALS;

// Linear scan is fine at this size.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("person", "people"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("thesis", "theses"),
    ("hypothesis", "hypotheses"),
    ("datum", "data"),
    ("medium", "media"),
    ("cactus", "cacti"),
    ("fungus", "fungi"),
    ("nucleus", "nuclei"),
    ("radius", "radii"),
    ("index", "indices"),
    ("appendix", "appendices"),
    ("matrix", "matrices"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("wolf", "wolves"),
    ("shelf", "shelves"),
    ("calf", "calves"),
    ("thief", "thieves"),
    ("loaf", "loaves"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("hero", "heroes"),
    ("i", "we"),
    ("me", "us"),
    ("he", "they"),
    ("she", "they"),
    ("it", "they"),
    ("him", "them"),
    ("her", "them"),
    ("this", "these"),
    ("that", "those"),
];

fn with_case_of(original: &str, form: String) -> String {
    if original.chars().next().is_some_and(char::is_uppercase) {
        capitalize(&form)
    } else {
        form
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

pub fn pluralize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if INVARIANT_PLURALS.contains(lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR_NOUNS.iter().find(|(singular, _)| *singular == lower) {
        return with_case_of(word, plural.to_string());
    }
    let mut rev = lower.chars().rev();
    match (rev.next(), rev.next()) {
        (Some('y'), Some(c)) if !is_vowel(c) => format!("{}ies", &word[..word.len() - 1]),
        _ if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) => format!("{}es", word),
        _ => format!("{}s", word),
    }
}

pub fn singularize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    if INVARIANT_PLURALS.contains(lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR_NOUNS.iter().find(|(_, plural)| *plural == lower) {
        return with_case_of(word, singular.to_string());
    }
    let stem = |n: usize| word[..word.len() - n].to_string();
    if lower.ends_with("ies") && lower.len() > 3 {
        format!("{}y", stem(3))
    } else if ["sses", "xes", "zes", "ches", "shes"].iter().any(|s| lower.ends_with(s)) {
        stem(2)
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.to_string()
    } else if lower.ends_with('s') && lower.len() > 1 {
        stem(1)
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize_word("dog"), "dogs");
        assert_eq!(pluralize_word("box"), "boxes");
        assert_eq!(pluralize_word("city"), "cities");
        assert_eq!(pluralize_word("key"), "keys");
        assert_eq!(pluralize_word("Child"), "Children");
        assert_eq!(pluralize_word("sheep"), "sheep");
    }

    #[test]
    fn test_singularize_rules() {
        assert_eq!(singularize_word("doors"), "door");
        assert_eq!(singularize_word("churches"), "church");
        assert_eq!(singularize_word("cities"), "city");
        assert_eq!(singularize_word("people"), "person");
        assert_eq!(singularize_word("glass"), "glass");
        assert_eq!(singularize_word("series"), "series");
    }

    proptest! {
        #[test]
        fn test_regular_nouns_round_trip(stem in "[a-z]{2,8}[bdfgklmnprt]") {
            prop_assume!(!IRREGULAR_NOUNS.iter().any(|(s, p)| *s == stem || *p == stem));
            prop_assume!(!INVARIANT_PLURALS.contains(stem.as_str()));
            let plural = pluralize_word(&stem);
            prop_assert_eq!(singularize_word(&plural), stem);
        }
    }
}
