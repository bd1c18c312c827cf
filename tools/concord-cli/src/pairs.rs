use clap::ValueEnum;
use concord_grammar::{
    renumber_distractors_to_subject, renumber_subject, to_past_tense, to_polar_question, to_present_tense, Metadata,
};
use concord_protocol::Number;
use concord_tree::Sentence;
use serde::Serialize;

/// Which transformation a pair demonstrates. Serialized as the pair's
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Past source, past target
    Past,
    /// Past source, present target
    Present,
    /// Declarative source, polar question target
    Question,
    Singular,
    Plural,
}

#[derive(Debug, Serialize)]
pub struct Pair {
    pub src: String,
    pub prefix: Op,
    pub tgt: String,
    pub metadata: Metadata,
}

/// Builds one training pair from a parsed sentence.
///
/// With `clean_present`, distractors in present pairs are renumbered to
/// match the subject on both sides.
pub fn make_pair(sentence: &Sentence, op: Op, clean_present: bool) -> concord_grammar::Result<Pair> {
    let (src, tgt) = match op {
        Op::Past => {
            let past = to_past_tense(sentence)?;
            (past.clone(), past)
        }
        Op::Present => {
            let mut src = to_past_tense(sentence)?;
            if clean_present {
                src = renumber_distractors_to_subject(&src)?;
            }
            let tgt = to_present_tense(&src)?;
            (src, tgt)
        }
        Op::Question => (sentence.clone(), to_polar_question(sentence)?),
        Op::Singular => (sentence.clone(), renumber_subject(sentence, Number::Singular)?),
        Op::Plural => (sentence.clone(), renumber_subject(sentence, Number::Plural)?),
    };
    let metadata = Metadata::describe(&src, &tgt)?;
    Ok(Pair { src: src.text(), prefix: op, tgt: tgt.text(), metadata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_parser::read_sentence;

    const DOG: &str = "
        1  The    the   DET   DT   Definite=Def|PronType=Art  2  det    _  _
        2  dog    dog   NOUN  NN   Number=Sing                3  nsubj  _  _
        3  barks  bark  VERB  VBZ  Number=Sing|Person=3|Tense=Pres|VerbForm=Fin  0  ROOT  _  SpaceAfter=No
        4  .      .     PUNCT .    PunctType=Peri             3  punct  _  _
    ";

    const KEY_TO_DOORS: &str = "
        1  The    the   DET   DT   Definite=Def|PronType=Art  2  det    _  _
        2  key    key   NOUN  NN   Number=Sing                6  nsubj  _  _
        3  to     to    ADP   IN   _                          2  prep   _  _
        4  the    the   DET   DT   Definite=Def|PronType=Art  5  det    _  _
        5  doors  door  NOUN  NNS  Number=Plur                3  pobj   _  _
        6  is     be    AUX   VBZ  Mood=Ind|Number=Sing|Person=3|Tense=Pres|VerbForm=Fin  0  ROOT  _  _
        7  lost   lose  VERB  VBN  Tense=Past|VerbForm=Part   6  acomp  _  SpaceAfter=No
        8  .      .     PUNCT .    PunctType=Peri             6  punct  _  _
    ";

    #[test]
    fn test_tense_pairs() {
        let s = read_sentence(DOG).unwrap();

        let pair = make_pair(&s, Op::Past, false).unwrap();
        assert_eq!((pair.src.as_str(), pair.tgt.as_str()), ("The dog barked.", "The dog barked."));

        let pair = make_pair(&s, Op::Present, false).unwrap();
        assert_eq!((pair.src.as_str(), pair.tgt.as_str()), ("The dog barked.", "The dog barks."));
        assert_eq!(pair.metadata.tense, Some(concord_protocol::Tense::Past));
    }

    #[test]
    fn test_question_and_number_pairs() {
        let s = read_sentence(DOG).unwrap();
        assert_eq!(make_pair(&s, Op::Question, false).unwrap().tgt, "Does the dog bark?");
        assert_eq!(make_pair(&s, Op::Plural, false).unwrap().tgt, "The dogs bark.");
    }

    #[test]
    fn test_clean_present_drops_distractors() {
        let s = read_sentence(KEY_TO_DOORS).unwrap();

        let pair = make_pair(&s, Op::Present, false).unwrap();
        assert_eq!(pair.tgt, "The key to the doors is lost.");
        assert_eq!(pair.metadata.n_distractors, 1);

        let pair = make_pair(&s, Op::Present, true).unwrap();
        assert_eq!(pair.src, "The key to the door was lost.");
        assert_eq!(pair.tgt, "The key to the door is lost.");
        assert_eq!(pair.metadata.n_distractors, 0);
    }

    #[test]
    fn test_prefix_serializes_lowercase() {
        let s = read_sentence(DOG).unwrap();
        let json = serde_json::to_value(make_pair(&s, Op::Question, false).unwrap()).unwrap();
        assert_eq!(json["prefix"], "question");
        assert_eq!(json["src"], "The dog barks.");
    }
}
