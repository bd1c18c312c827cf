//! Per-example annotations written next to each source/target pair.

use concord_protocol::{Number, Tense};
use concord_tree::Sentence;
use serde::Serialize;

use crate::resolver::resolve;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub subject_number: Number,
    pub object_number: Option<Number>,
    pub main_verb: String,
    pub main_verb_lemma: String,
    pub n_interveners: usize,
    pub n_distractors: usize,
    pub final_intervener_number: Option<Number>,
    pub distractor_structures: Vec<String>,
    pub final_distractor_structure: Option<String>,
    pub pos_seq: Vec<String>,
    pub tag_seq: Vec<String>,
    pub tense: Option<Tense>,
    pub source: String,
    pub target: String,
}

impl Metadata {
    /// Describes `source`; `target` only contributes its history.
    pub fn describe(source: &Sentence, target: &Sentence) -> Result<Self> {
        let relations = resolve(source)?;
        let verb = &source[relations.main_verb];

        Ok(Self {
            subject_number: relations.subject_number,
            object_number: relations.object_number,
            main_verb: verb.text.clone(),
            main_verb_lemma: verb.lemma.clone(),
            n_interveners: relations.interveners.len(),
            n_distractors: relations.distractors.len(),
            final_intervener_number: relations
                .interveners
                .last()
                .map(|&i| source[i].number().unwrap_or(Number::Singular)),
            distractor_structures: relations.distractor_labels(),
            final_distractor_structure: relations
                .distractor_structures
                .last()
                .and_then(|path| path.dominant())
                .map(|structure| structure.to_string()),
            pos_seq: source.iter().map(|t| t.pos.clone()).collect(),
            tag_seq: source.iter().map(|t| t.tag.clone()).collect(),
            tense: verb.tense(),
            source: source.history(),
            target: target.history(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::tests::{parse, DOG_BARKS, KEY_TO_DOORS};
    use crate::transform::to_past_tense;

    #[test]
    fn test_describe_pair() {
        let src = parse(DOG_BARKS);
        let tgt = to_past_tense(&src).unwrap();
        let meta = Metadata::describe(&src, &tgt).unwrap();
        assert_eq!(meta.main_verb, "barks");
        assert_eq!(meta.main_verb_lemma, "bark");
        assert_eq!(meta.tense, Some(Tense::Present));
        assert_eq!(meta.n_interveners, 0);
        assert_eq!(meta.final_intervener_number, None);
        assert_eq!(meta.pos_seq, vec!["DET", "NOUN", "VERB", "PUNCT"]);
        assert_eq!(meta.source, "parse(\"The dog barks.\")");
        assert!(meta.target.ends_with(".to_past_tense()"));
    }

    #[test]
    fn test_distractor_fields() {
        let src = parse(KEY_TO_DOORS);
        let meta = Metadata::describe(&src, &src).unwrap();
        assert_eq!(meta.subject_number, Number::Singular);
        assert_eq!(meta.n_distractors, 1);
        assert_eq!(meta.final_intervener_number, Some(Number::Plural));
        assert_eq!(meta.distractor_structures, vec!["PP".to_string()]);
        assert_eq!(meta.final_distractor_structure.as_deref(), Some("PP"));

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["n_distractors"], 1);
        assert_eq!(json["main_verb"], "is");
    }
}
