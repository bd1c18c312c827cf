//! Grammatical number of subjects and objects.
//!
//! Number resolution is best-effort: when nothing decides it, the noun is
//! taken to be singular and a warning is logged.

use concord_morph::tables::{is_partitive, INVARIANT_PLURALS, NOMINAL_ADJECTIVES};
use concord_protocol::labels::{
    dep, is_object_dep, pos, CLAUSAL_SUBJECT_DEPS, DETERMINER_TAGS, OBJECT_DEPS, SUBJECT_DEPS, WH_TAGS,
};
use concord_protocol::{Number, Token};
use tracing::warn;

use crate::resolver::Resolver;

/// Which argument of the verb a noun fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Subject,
    Object,
}

impl Role {
    fn deps(self) -> &'static [&'static str] {
        match self {
            Role::Subject => SUBJECT_DEPS,
            Role::Object => OBJECT_DEPS,
        }
    }
}

impl Resolver<'_> {
    /// The verb's own number feature when it has one, else the subject's.
    pub fn main_subject_number(&self) -> Option<Number> {
        let v = self.main_verb()?;
        if let Some(number) = self.sentence()[v].number() {
            return Some(number);
        }
        let subjects = self.main_subject();
        Some(match subjects.as_slice() {
            [] => Number::Singular,
            [single] => self.noun_number(*single, Role::Subject),
            list => self.list_number(list, Role::Subject),
        })
    }

    pub fn object_number(&self) -> Option<Number> {
        let objects = self.main_object();
        match objects.as_slice() {
            [] => None,
            [single] if is_partitive(&self.sentence()[*single].text) => {
                Some(self.partitive_number(*single, Role::Object))
            }
            [single] => Some(self.noun_number(*single, Role::Object)),
            list => Some(self.list_number(list, Role::Object)),
        }
    }

    fn guess_singular(&self, what: &str) -> Number {
        warn!(
            noun = what,
            sentence = %self.sentence().text(),
            "no number feature found, assuming singular"
        );
        Number::Singular
    }

    /// First determiner-tagged determiner with a number, unless it is itself
    /// a partitive ("all the X").
    fn determiner_number(&self, t: usize) -> Option<Number> {
        let s = self.sentence();
        let det = self
            .determiners(t)
            .into_iter()
            .map(|d| &s[d])
            .find(|d| DETERMINER_TAGS.contains(&d.tag.as_str()))?;
        det.number().filter(|_| !is_partitive(&det.text))
    }

    pub fn noun_number(&self, t: usize, role: Role) -> Number {
        let s = self.sentence();
        let noun = &s[t];

        if noun.is_verb() && !noun.can_be_inflected() {
            // gerunds
            return Number::Singular;
        }
        if CLAUSAL_SUBJECT_DEPS.contains(&noun.dep.as_str())
            || (is_object_dep(&noun.dep) && WH_TAGS.contains(&noun.tag.as_str()))
        {
            return Number::Singular;
        }
        if is_partitive(&noun.text) {
            return self.partitive_number(t, role);
        }
        if let Some(number) = self.determiner_number(t) {
            return number;
        }
        let lower = noun.lower();
        if INVARIANT_PLURALS.contains(lower.as_str()) {
            let dets = self.determiners(t);
            let bare = match dets.as_slice() {
                [] => true,
                [only] => s[*only].lower() == "all",
                _ => false,
            };
            if bare {
                return Number::Plural;
            }
        }
        if let Some(number) = noun.number() {
            return number;
        }
        if noun.pos == pos::ADJ {
            if let Some(number) = NOMINAL_ADJECTIVES.get(lower.as_str()) {
                return *number;
            }
        }
        self.guess_singular(&noun.text)
    }

    /// Number of a partitive phrase, decided by its head noun(s).
    pub fn partitive_number(&self, t: usize, role: Role) -> Number {
        let heads = self.partitive_head(t);
        match heads.as_slice() {
            [] => self.partitive_default(t),
            [single] => self.partitive_default(*single),
            list => self.list_number(list, role),
        }
    }

    fn partitive_default(&self, t: usize) -> Number {
        let s = self.sentence();
        let noun: &Token = &s[t];
        let lower = noun.lower();
        let dets: Vec<&Token> = self.determiners(t).into_iter().map(|d| &s[d]).collect();
        let has_linker = s.children(t).any(|c| c.lower() == "of");

        if lower == "number" && dets.iter().any(|d| d.morph.is_indefinite()) && has_linker {
            // "a number of the most prominent": plural even without a noun
            return Number::Plural;
        }
        if noun.pos == pos::ADJ
            && (s.children(t).any(|c| c.lower() == "most") || noun.morph.get("Degree") == Some("Sup"))
        {
            return Number::Plural;
        }
        if let Some(number) = noun.number() {
            return number;
        }
        if lower == "some" || lower == "any" {
            return Number::Plural;
        }
        if noun.is_verb() && !noun.can_be_inflected() {
            return Number::Singular;
        }
        if let Some(number) = self.determiner_number(t) {
            return number;
        }
        self.guess_singular(&noun.text)
    }

    /// Number of several co-indexed arguments: conjuncts, a subject with a
    /// predicative `attr`, or an expletive with its displaced subject.
    pub fn list_number(&self, list: &[usize], role: Role) -> Number {
        let s = self.sentence();
        if let [single] = list {
            return self.noun_number(*single, role);
        }
        let count = |label: &str| list.iter().filter(|&&t| s[t].dep == label).count();

        if role.deps().iter().any(|d| count(d) == 1) && count(dep::ATTR) == 1 {
            let numbers: Vec<Option<Number>> = list
                .iter()
                .map(|&t| {
                    let token = &s[t];
                    if token.is_verb() && token.can_be_inflected() {
                        Some(Number::Singular)
                    } else {
                        token.number()
                    }
                })
                .collect();
            if numbers.iter().all(|n| *n == Some(Number::Singular)) {
                return Number::Singular;
            }
            // objects do not agree with the verb
            if role == Role::Subject {
                if let Some(number) = self.main_verb().and_then(|v| s[v].number()) {
                    return number;
                }
            }
            if is_partitive(&s[list[0]].text) {
                return self.partitive_number(list[0], role);
            }
            if let Some(number) = numbers.into_iter().flatten().next() {
                return number;
            }
            return self.guess_singular(&s[list[0]].text);
        }

        if count(dep::EXPL) == 1 && OBJECT_DEPS.iter().any(|d| count(d) == 1) {
            // there-inversion misparsed with the subject as an object
            let displaced: Vec<usize> = list.iter().copied().filter(|&t| is_object_dep(&s[t].dep)).collect();
            return self.list_number(&displaced, Role::Subject);
        }

        Number::Plural
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::tests::parse;

    #[test]
    fn test_determiner_number_wins_over_noun_feature() {
        let s = parse(
            "
            1  These  this   DET   DT   Number=Plur|PronType=Dem  2  det    _  _
            2  sheep  sheep  NOUN  NN   Number=Sing               3  nsubj  _  _
            3  grazed graze  VERB  VBD  Tense=Past|VerbForm=Fin   0  ROOT   _  SpaceAfter=No
            4  .      .      PUNCT .    PunctType=Peri            3  punct  _  _
            ",
        );
        let r = Resolver::new(&s);
        assert_eq!(r.noun_number(1, Role::Subject), Number::Plural);
    }

    #[test]
    fn test_bare_invariant_plural() {
        let s = parse(
            "
            1  Sheep  sheep  NOUN  NN   Number=Sing               2  nsubj  _  _
            2  grazed graze  VERB  VBD  Tense=Past|VerbForm=Fin   0  ROOT   _  SpaceAfter=No
            3  .      .      PUNCT .    PunctType=Peri            2  punct  _  _
            ",
        );
        let r = Resolver::new(&s);
        assert_eq!(r.main_subject_number(), Some(Number::Plural));
    }

    #[test]
    fn test_unmarked_noun_defaults_to_singular() {
        let s = parse(
            "
            1  Nobody nobody PRON  NN   _                         2  nsubj  _  _
            2  came   come   VERB  VBD  Tense=Past|VerbForm=Fin   0  ROOT   _  SpaceAfter=No
            3  .      .      PUNCT .    PunctType=Peri            2  punct  _  _
            ",
        );
        assert_eq!(Resolver::new(&s).main_subject_number(), Some(Number::Singular));
    }

    #[test]
    fn test_nominal_adjective() {
        let s = parse(
            "
            1  The    the    DET   DT   Definite=Def|PronType=Art  2  det    _  _
            2  rich   rich   ADJ   JJ   Degree=Pos                 3  nsubj  _  _
            3  won    win    VERB  VBD  Tense=Past|VerbForm=Fin    0  ROOT   _  SpaceAfter=No
            4  .      .      PUNCT .    PunctType=Peri             3  punct  _  _
            ",
        );
        assert_eq!(Resolver::new(&s).main_subject_number(), Some(Number::Plural));
    }

    #[test]
    fn test_a_number_of_is_plural() {
        let s = parse(
            "
            1  A      a      DET   DT   Definite=Ind|PronType=Art  2  det    _  _
            2  number number NOUN  NN   Number=Sing                5  nsubj  _  _
            3  of     of     ADP   IN   _                          2  prep   _  _
            4  dogs   dog    NOUN  NNS  Number=Plur                3  pobj   _  _
            5  barked bark   VERB  VBD  Tense=Past|VerbForm=Fin    0  ROOT   _  SpaceAfter=No
            6  .      .      PUNCT .    PunctType=Peri             5  punct  _  _
            ",
        );
        let r = Resolver::new(&s);
        assert_eq!(r.partitive_head(1), vec![3]);
        assert_eq!(r.main_subject_number(), Some(Number::Plural));

        let s = parse(
            "
            1  The    the    DET   DT   Definite=Def|PronType=Art  2  det    _  _
            2  number number NOUN  NN   Number=Sing                5  nsubj  _  _
            3  of     of     ADP   IN   _                          2  prep   _  _
            4  dogs   dog    NOUN  NNS  Number=Plur                3  pobj   _  _
            5  grew   grow   VERB  VBD  Tense=Past|VerbForm=Fin    0  ROOT   _  SpaceAfter=No
            6  .      .      PUNCT .    PunctType=Peri             5  punct  _  _
            ",
        );
        let r = Resolver::new(&s);
        assert_eq!(r.main_subject_number(), Some(Number::Singular));
        // "the number" is an ordinary noun, so "dogs" intervenes
        assert_eq!(r.distractors(), vec![3]);
    }
}
