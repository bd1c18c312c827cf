//! Dependency labels, coarse POS values and fine tags produced by the
//! upstream parser (ClearNLP-style labels, Universal POS, Penn tags).

pub mod dep {
    pub const ROOT: &str = "ROOT";
    pub const NSUBJ: &str = "nsubj";
    pub const NSUBJPASS: &str = "nsubjpass";
    pub const CSUBJ: &str = "csubj";
    pub const CSUBJPASS: &str = "csubjpass";
    pub const ATTR: &str = "attr";
    pub const EXPL: &str = "expl";
    pub const DOBJ: &str = "dobj";
    pub const AUX: &str = "aux";
    pub const AUXPASS: &str = "auxpass";
    pub const CONJ: &str = "conj";
    pub const NEG: &str = "neg";
    pub const DET: &str = "det";
    pub const NUMMOD: &str = "nummod";
    pub const AMOD: &str = "amod";
    pub const COMPOUND: &str = "compound";
    pub const NMOD: &str = "nmod";
    pub const PREP: &str = "prep";
    pub const POBJ: &str = "pobj";
    pub const PRT: &str = "prt";
    pub const PUNCT: &str = "punct";
    pub const XCOMP: &str = "xcomp";
    pub const CCOMP: &str = "ccomp";
}

pub mod pos {
    pub const VERB: &str = "VERB";
    pub const AUX: &str = "AUX";
    pub const NOUN: &str = "NOUN";
    pub const PROPN: &str = "PROPN";
    pub const PRON: &str = "PRON";
    pub const DET: &str = "DET";
    pub const ADJ: &str = "ADJ";
    pub const NUM: &str = "NUM";
    pub const X: &str = "X";
}

pub mod tag {
    pub const VBD: &str = "VBD";
    pub const VB: &str = "VB";
    pub const VBZ: &str = "VBZ";
    pub const VBP: &str = "VBP";
    pub const VBN: &str = "VBN";
    pub const VBG: &str = "VBG";
    pub const NN: &str = "NN";
    pub const NNS: &str = "NNS";
}

/// Labels that mark a (possibly expletive or predicative) subject.
pub const SUBJECT_DEPS: &[&str] = &[
    dep::CSUBJ,
    dep::CSUBJPASS,
    dep::ATTR,
    dep::NSUBJ,
    dep::NSUBJPASS,
    dep::EXPL,
];

pub const CLAUSAL_SUBJECT_DEPS: &[&str] = &[dep::CSUBJ, dep::CSUBJPASS];

pub const OBJECT_DEPS: &[&str] = &["cobj", "nobj", dep::DOBJ];

pub const AUX_DEPS: &[&str] = &[dep::AUX, dep::AUXPASS];

pub const NOUN_POS: &[&str] = &[pos::NOUN, pos::PRON, pos::PROPN];

pub const WH_TAGS: &[&str] = &["WP", "WD", "WDT"];

pub const DETERMINER_TAGS: &[&str] = &["DT", "PDT"];

/// Participles cannot be reinflected in place.
pub const NON_FINITE_TAGS: &[&str] = &[tag::VBN, tag::VBG];

/// Tags the parser uses for tokens it could not identify.
pub const UNKNOWN_TAGS: &[&str] = &["FW", "XX", "ADD", "NIL"];

pub const INFLECTED_AUXES: &[&str] = &["be", "have", "do"];

pub fn is_subject_dep(dep: &str) -> bool {
    SUBJECT_DEPS.contains(&dep)
}

pub fn is_object_dep(dep: &str) -> bool {
    OBJECT_DEPS.contains(&dep)
}

pub fn is_aux_dep(dep: &str) -> bool {
    AUX_DEPS.contains(&dep)
}
