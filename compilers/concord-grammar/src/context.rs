use concord_morph::VerbContext;
use concord_tree::Sentence;

use crate::resolver::Resolver;

/// A verb inside its parsed sentence, as seen by homophone conditions.
#[derive(Debug, Clone, Copy)]
pub struct TokenContext<'a> {
    sentence: &'a Sentence,
    i: usize,
}

impl<'a> TokenContext<'a> {
    pub fn new(sentence: &'a Sentence, i: usize) -> Self {
        Self { sentence, i }
    }
}

impl VerbContext for TokenContext<'_> {
    fn is_transitive(&self) -> bool {
        Resolver::new(self.sentence).is_transitive(self.i)
    }

    fn has_child(&self, dep: &str, text: Option<&str>) -> bool {
        self.sentence
            .children(self.i)
            .any(|c| c.dep == dep && text.map_or(true, |text| c.lower() == text))
    }

    fn subject_is(&self, word: &str) -> bool {
        let sentence = self.sentence;
        Resolver::new(sentence).subject_of(self.i).iter().any(|&s| sentence[s].lower() == word)
    }
}
