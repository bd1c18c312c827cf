//! Classification of the syntactic structure an intervening noun sits in,
//! read off the dependency labels between it and the subject.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Structure {
    /// Prepositional phrase
    PP,
    /// Relative clause
    RC,
    /// Clausal complement or adnominal clause
    CC,
    AdvP,
    AP,
    /// Parenthetical: apposition, parataxis
    ParenP,
    ConjP,
    QP,
    NumP,
    /// A label with no entry in the vocabulary, kept verbatim.
    Other(String),
}

/// Labels that say nothing about embedding.
const UNINFORMATIVE_DEPS: &[&str] = &[
    "nsubj", "nsubjpass", "dobj", "iobj", "dative", "attr", "oprd", "compound", "poss", "det",
    "nmod", "case", "expl", "ROOT", "punct", "aux", "auxpass", "neg",
];

impl Structure {
    /// Maps a dependency label into the vocabulary. `None` for labels that
    /// carry no structural information.
    pub fn from_dep(dep: &str) -> Option<Structure> {
        if UNINFORMATIVE_DEPS.contains(&dep) {
            return None;
        }
        Some(match dep {
            "prep" | "pcomp" | "pobj" | "agent" => Structure::PP,
            "relcl" => Structure::RC,
            "acl" | "ccomp" => Structure::CC,
            "advmod" | "advcl" | "npadvmod" | "acomp" => Structure::AdvP,
            "amod" => Structure::AP,
            "appos" | "parataxis" => Structure::ParenP,
            "cc" => Structure::ConjP,
            "quantmod" => Structure::QP,
            "nummod" => Structure::NumP,
            other => Structure::Other(other.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Structure::PP => "PP",
            Structure::RC => "RC",
            Structure::CC => "CC",
            Structure::AdvP => "AdvP",
            Structure::AP => "AP",
            Structure::ParenP => "ParenP",
            Structure::ConjP => "ConjP",
            Structure::QP => "QP",
            Structure::NumP => "NumP",
            Structure::Other(label) => label,
        }
    }
}

impl From<&str> for Structure {
    fn from(label: &str) -> Self {
        match label {
            "PP" => Structure::PP,
            "RC" => Structure::RC,
            "CC" => Structure::CC,
            "AdvP" => Structure::AdvP,
            "AP" => Structure::AP,
            "ParenP" => Structure::ParenP,
            "ConjP" => Structure::ConjP,
            "QP" => Structure::QP,
            "NumP" => Structure::NumP,
            other => Structure::Other(other.to_string()),
        }
    }
}

impl From<String> for Structure {
    fn from(label: String) -> Self {
        Structure::from(label.as_str())
    }
}

impl From<Structure> for String {
    fn from(structure: Structure) -> Self {
        structure.as_str().to_string()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structures from the innermost (next to the noun) outward, with adjacent
/// repeats collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructurePath(pub Vec<Structure>);

impl StructurePath {
    pub fn from_deps<'a>(deps: impl IntoIterator<Item = &'a str>) -> Self {
        let mut labels: Vec<Structure> = Vec::new();
        for structure in deps.into_iter().filter_map(Structure::from_dep) {
            if labels.last() != Some(&structure) {
                labels.push(structure);
            }
        }
        StructurePath(labels)
    }

    /// The outermost structure, closest to the subject.
    pub fn dominant(&self) -> Option<&Structure> {
        self.0.last()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StructurePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.0.iter().map(Structure::as_str).collect();
        f.write_str(&labels.join(","))
    }
}
