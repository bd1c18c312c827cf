use concord_protocol::{Number, Tense, Token};

use crate::numerals::is_number;
use crate::tables::{FEATURE_CORRECTIONS, POS_CORRECTIONS, PRESENT_FEATURE_CORRECTIONS, WRONG_LEMMAS};

fn apply(token: &mut Token, features: &[(&str, &str)]) {
    for (key, value) in features {
        token.morph.insert(*key, *value);
    }
}

/// Repairs known systematic parser errors in place: lemmas, number
/// features and coarse POS.
pub fn normalize(token: &mut Token) {
    let lower = token.lower();

    if let Some(lemma) = WRONG_LEMMAS.get(lower.as_str()) {
        token.lemma = lemma.to_string();
    }

    if token.i == 0 {
        token.set_sent_start(true);
    }

    let present = token.tense() == Some(Tense::Present);
    if let Some(features) = FEATURE_CORRECTIONS.get(lower.as_str()) {
        apply(token, features);
    } else if let Some(features) = PRESENT_FEATURE_CORRECTIONS.get(lower.as_str()).filter(|_| present) {
        apply(token, features);
    } else if token.is_verb() && present && token.lemma == token.text {
        // base-form present verbs are non-3sg
        token.morph.set_number(Some(Number::Plural));
    } else if is_number(&token.text) {
        let number = if lower == "one" { Number::Singular } else { Number::Plural };
        token.morph.set_number(Some(number));
    }

    if let Some(pos) = POS_CORRECTIONS.get(lower.as_str()) {
        token.pos = pos.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_protocol::Morph;

    #[test]
    fn test_wrong_lemma_is_replaced() {
        let mut token = Token::new(2, "got").with_pos("VERB", "VBD").with_lemma("got");
        normalize(&mut token);
        assert_eq!(token.lemma, "get");
    }

    #[test]
    fn test_feature_corrections() {
        let mut were = Token::new(1, "were").with_pos("AUX", "VBD").with_lemma("be");
        normalize(&mut were);
        assert_eq!(were.number(), Some(Number::Plural));

        let morph: Morph = [("Tense", "Pres")].into_iter().collect();
        let mut say = Token::new(1, "say").with_pos("VERB", "VBP").with_lemma("say").with_morph(morph);
        normalize(&mut say);
        assert_eq!(say.number(), Some(Number::Plural));

        let mut two = Token::new(0, "Two").with_pos("NUM", "CD");
        normalize(&mut two);
        assert_eq!(two.number(), Some(Number::Plural));
        assert!(two.is_sent_start());
    }

    #[test]
    fn test_tense_scoped_correction_needs_present() {
        let mut have = Token::new(1, "have").with_pos("AUX", "VB").with_lemma("have");
        normalize(&mut have);
        assert_eq!(have.number(), None);
    }
}
