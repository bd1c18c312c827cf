use concord_protocol::{Number, Tense};

/// Forms for one number (or the number-invariant bucket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub present: Option<&'static str>,
    pub past: Option<&'static str>,
}

impl Cell {
    pub const EMPTY: Cell = Cell { present: None, past: None };

    pub const fn get(&self, tense: Tense) -> Option<&'static str> {
        match tense {
            Tense::Present => self.present,
            Tense::Past => self.past,
            Tense::Infinitive => None,
        }
    }
}

/// A number x tense table of surface forms with an `any` fallback bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paradigm {
    pub singular: Cell,
    pub plural: Cell,
    pub any: Cell,
}

impl Paradigm {
    /// Number-invariant past form only.
    pub const fn past(form: &'static str) -> Self {
        Self {
            singular: Cell::EMPTY,
            plural: Cell::EMPTY,
            any: Cell { present: None, past: Some(form) },
        }
    }

    pub const fn present(singular: &'static str, plural: &'static str) -> Self {
        Self {
            singular: Cell { present: Some(singular), past: None },
            plural: Cell { present: Some(plural), past: None },
            any: Cell::EMPTY,
        }
    }

    pub const fn full(singular: &'static str, plural: &'static str, past: &'static str) -> Self {
        Self {
            singular: Cell { present: Some(singular), past: None },
            plural: Cell { present: Some(plural), past: None },
            any: Cell { present: None, past: Some(past) },
        }
    }

    /// Number-invariant present and past.
    pub const fn invariant(present: &'static str, past: &'static str) -> Self {
        Self {
            singular: Cell::EMPTY,
            plural: Cell::EMPTY,
            any: Cell { present: Some(present), past: Some(past) },
        }
    }

    /// Numbered cell first, then the `any` bucket. An unknown number reads
    /// the singular cell.
    pub fn lookup(&self, number: Option<Number>, tense: Tense) -> Option<&'static str> {
        let cell = match number.unwrap_or(Number::Singular) {
            Number::Singular => self.singular,
            Number::Plural => self.plural,
        };
        cell.get(tense).or_else(|| self.any.get(tense))
    }
}

/// Context predicates that select a homophone entry. Each variant is one
/// query against [`crate::VerbContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Intransitive,
    Transitive,
    /// Intransitive, with no "about" prepositional or clausal complement.
    IntransitiveWithoutTopic,
    /// Has a particle child with this text.
    Particle(&'static str),
    /// Subject is archaic second-person singular "thou".
    ArchaicSecondPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Homophone {
    pub forms: Paradigm,
    pub condition: Condition,
}
