//! Static lexical exception data. Keys are lowercase; callers lowercase
//! surface forms before lookup.

use concord_protocol::Number;
use phf::{phf_map, phf_set};

use crate::paradigm::{Condition, Homophone, Paradigm};

/// Surface forms whose reinflection the generic conjugator gets wrong.
pub static CONJUGATION_EXCEPTIONS: phf::Map<&'static str, Paradigm> = phf_map! {
    "founded" => Paradigm::present("founds", "found"),
    "leave" => Paradigm::past("left"),
    "leaves" => Paradigm::past("left"),
    "left" => Paradigm::present("leaves", "leave"),
    "bear" => Paradigm::past("bore"),
    "bears" => Paradigm::past("bore"),
    "bore" => Paradigm::present("bears", "bear"),
    "sang" => Paradigm::full("sings", "sing", "sang"),
    "sing" => Paradigm::past("sang"),
    "sings" => Paradigm::past("sang"),
    "lay" => Paradigm::full("lays", "lay", "laid"),
    "lays" => Paradigm::full("lays", "lay", "laid"),
    "laid" => Paradigm::full("lays", "lay", "laid"),
    "escape" => Paradigm::past("escaped"),
    "escapes" => Paradigm::past("escaped"),
    "escaped" => Paradigm::full("escapes", "escape", "escaped"),
    "paid" => Paradigm::full("pays", "pay", "paid"),
    "pay" => Paradigm::past("paid"),
    "pays" => Paradigm::past("paid"),
    "center" => Paradigm::past("centered"),
    "centers" => Paradigm::past("centered"),
    "centered" => Paradigm::past("centered"),
    "quit" => Paradigm::past("quit"),
    "benefit" => Paradigm::past("benefitted"),
    "benefits" => Paradigm::past("benefitted"),
    "benefitted" => Paradigm::past("benefitted"),
    "address" => Paradigm::past("addressed"),
    "addresses" => Paradigm::past("addressed"),
    "addressed" => Paradigm::past("addressed"),
    "paralleled" => Paradigm::present("parallels", "parallel"),
    "parallel" => Paradigm::past("paralleled"),
    "parallels" => Paradigm::past("paralleled"),
    "sank" => Paradigm::full("sinks", "sink", "sank"),
    "sink" => Paradigm::past("sank"),
    "sinks" => Paradigm::past("sank"),
    "pen" => Paradigm::past("penned"),
    "pens" => Paradigm::past("penned"),
    "penned" => Paradigm::past("penned"),
    "plead" => Paradigm::past("pleaded"),
    "pleads" => Paradigm::past("pleaded"),
    "pleaded" => Paradigm::past("pleaded"),
    "fit" => Paradigm::past("fit"),
    "curse" => Paradigm::past("cursed"),
    "curses" => Paradigm::past("cursed"),
    "cursed" => Paradigm::past("cursed"),
    "sprang" => Paradigm::full("springs", "spring", "sprang"),
    "spring" => Paradigm::past("sprang"),
    "springs" => Paradigm::past("sprang"),
    "swap" => Paradigm::past("swapped"),
    "swaps" => Paradigm::past("swapped"),
    "swapped" => Paradigm::past("swapped"),
    "favored" => Paradigm::present("favors", "favor"),
    "favor" => Paradigm::past("favored"),
    "favors" => Paradigm::past("favored"),
    "bless" => Paradigm::past("blessed"),
    "blesses" => Paradigm::past("blessed"),
    "blessed" => Paradigm::past("blessed"),
    "broker" => Paradigm::past("brokered"),
    "brokers" => Paradigm::past("brokered"),
    "brokered" => Paradigm::past("brokered"),
    "endeavored" => Paradigm::present("endeavors", "endeavor"),
    "endeavor" => Paradigm::past("endeavored"),
    "endeavors" => Paradigm::past("endeavored"),
    "heat" => Paradigm::past("heated"),
    "heats" => Paradigm::past("heated"),
    "heated" => Paradigm::past("heated"),
    "shrank" => Paradigm::full("shrinks", "shrink", "shrank"),
    "shrink" => Paradigm::past("shrank"),
    "shrinks" => Paradigm::past("shrank"),
    "bet" => Paradigm::past("bet"),
    "bets" => Paradigm::past("bet"),
    "shutout" => Paradigm::past("shutout"),
    "shutouts" => Paradigm::past("shutout"),
    "bit" => Paradigm::full("bites", "bite", "bit"),
    "bite" => Paradigm::past("bit"),
    "bites" => Paradigm::past("bit"),
    "bringest" => Paradigm::past("broughtest"),
    "setup" => Paradigm::past("setup"),
    "setups" => Paradigm::past("setup"),
    "mentored" => Paradigm::present("mentors", "mentor"),
    "mentor" => Paradigm::past("mentored"),
    "mentors" => Paradigm::past("mentored"),
    "wrapped" => Paradigm::full("wraps", "wrap", "wrapped"),
    "wraps" => Paradigm::full("wraps", "wrap", "wrapped"),
    "felled" => Paradigm::present("fells", "fell"),
    "secret" => Paradigm::past("secreted"),
    "secrets" => Paradigm::past("secreted"),
    "teared" => Paradigm::past("teared"),
};

/// Forms whose reinflection depends on syntactic context. The first entry
/// whose condition holds wins.
pub static HOMOPHONES: phf::Map<&'static str, &'static [Homophone]> = phf_map! {
    // "lay" as the past of intransitive "lie"
    "lay" => &[Homophone {
        forms: Paradigm::full("lies", "lie", "lay"),
        condition: Condition::Intransitive,
    }],
    "lie" => &[Homophone { forms: Paradigm::past("lay"), condition: Condition::IntransitiveWithoutTopic }],
    "lies" => &[Homophone { forms: Paradigm::past("lay"), condition: Condition::IntransitiveWithoutTopic }],
    "secreted" => &[Homophone {
        forms: Paradigm::present("secrets", "secret"),
        condition: Condition::Particle("away"),
    }],
    "tear" => &[Homophone { forms: Paradigm::past("teared"), condition: Condition::Intransitive }],
    "tears" => &[Homophone { forms: Paradigm::past("teared"), condition: Condition::Intransitive }],
    // "fell" as transitive "cut down"
    "fell" => &[Homophone {
        forms: Paradigm::full("fells", "fell", "felled"),
        condition: Condition::Transitive,
    }],
    "art" => &[Homophone { forms: Paradigm::invariant("art", "wast"), condition: Condition::ArchaicSecondPerson }],
    "wast" => &[Homophone { forms: Paradigm::invariant("art", "wast"), condition: Condition::ArchaicSecondPerson }],
    "hast" => &[Homophone { forms: Paradigm::invariant("hast", "hadst"), condition: Condition::ArchaicSecondPerson }],
    "hadst" => &[Homophone { forms: Paradigm::invariant("hast", "hadst"), condition: Condition::ArchaicSecondPerson }],
    "dost" => &[Homophone { forms: Paradigm::invariant("dost", "didst"), condition: Condition::ArchaicSecondPerson }],
    "didst" => &[Homophone { forms: Paradigm::invariant("dost", "didst"), condition: Condition::ArchaicSecondPerson }],
};

/// Known lemmatizer mistakes, keyed by surface form.
pub static WRONG_LEMMAS: phf::Map<&'static str, &'static str> = phf_map! {
    "guested" => "guest",
    "remedied" => "remedy",
    "costarred" => "costar",
    "rebranded" => "rebrand",
    "bringest" => "bring",
    "broughtest" => "bring",
    "rerecorded" => "rerecord",
    "photobleached" => "photobleach",
    "photobleaches" => "photobleach",
    "bogged" => "bog",
    "recrossed" => "recross",
    "recrosses" => "recross",
    "gimballed" => "gimbal",
    "overdubbed" => "overdub",
    "homeschooled" => "homeschool",
    "restudies" => "restudy",
    "restudied" => "restudy",
    "rematches" => "rematch",
    "rematched" => "rematch",
    "lifeguarded" => "lifeguard",
    "focusses" => "focus",
    "focussed" => "focus",
    "trialled" => "trial",
    "trialed" => "trial",
    "redshirted" => "redshirt",
    "fulfilled" => "fulfill",
    "fulfils" => "fulfill",
    "fulfil" => "fulfill",
    "installed" => "install",
    "enrolled" => "enroll",
    "got" => "get",
};

const SING: &[(&str, &str)] = &[("Number", "Sing")];
const PLUR: &[(&str, &str)] = &[("Number", "Plur")];

/// Known tagger mistakes: features to force onto a surface form.
pub static FEATURE_CORRECTIONS: phf::Map<&'static str, &'static [(&'static str, &'static str)]> = phf_map! {
    "was" => SING, "is" => SING, "much" => SING, "each" => SING, "last" => SING,
    "a" => SING, "that" => SING, "another" => SING,
    "were" => PLUR, "are" => PLUR, "many" => PLUR, "you" => PLUR, "both" => PLUR,
    "few" => PLUR, "all" => PLUR, "most" => PLUR, "more" => PLUR, "several" => PLUR,
    "they" => PLUR,
    "second" => SING, "third" => SING, "fourth" => SING, "fifth" => SING, "sixth" => SING,
    "seventh" => SING, "eighth" => SING, "ninth" => SING, "tenth" => SING,
    "eleventh" => SING, "twelfth" => SING, "thirteenth" => SING, "fourteenth" => SING,
    "fifteenth" => SING, "sixteenth" => SING, "seventeenth" => SING, "eighteenth" => SING,
    "nineteenth" => SING, "twentieth" => SING, "thirtieth" => SING, "fortieth" => SING,
    "fiftieth" => SING, "sixtieth" => SING, "seventieth" => SING, "eightieth" => SING,
    "ninetieth" => SING, "hundredth" => SING, "thousandth" => SING, "millionth" => SING,
    "billionth" => SING, "trillionth" => SING, "quadrillionth" => SING,
    "quintillionth" => SING, "sextillionth" => SING, "septillionth" => SING,
    "octillionth" => SING, "nonillionth" => SING,
};

/// Corrections applied only when the token is tagged present tense.
pub static PRESENT_FEATURE_CORRECTIONS: phf::Map<&'static str, &'static [(&'static str, &'static str)]> = phf_map! {
    "say" => PLUR,
    "have" => PLUR,
    "remain" => PLUR,
};

pub static POS_CORRECTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "thou" => "PRON",
    "thee" => "PRON",
    "ye" => "PRON",
};

/// Nouns with identical singular and plural forms. Without a determiner
/// they read as plural.
pub static INVARIANT_PLURALS: phf::Set<&'static str> = phf_set! {
    "deer", "fish", "sheep", "species", "aircraft", "barracks", "bison", "binoculars",
    "caribou", "cattle", "cod", "elk", "eyeglasses", "goldfish", "haddock", "halibut",
    "moose", "pike", "police", "premises", "pliers", "reindeer", "salmon", "scissors",
    "series", "shellfish", "shrimp", "spacecraft", "watercraft", "squid", "swine",
    "tongs", "trout", "tuna", "hovercraft", "offspring", "boar", "buffalo", "gallows",
    "insignia",
};

/// Adjectives used as nouns ("the rich", "the latter").
pub static NOMINAL_ADJECTIVES: phf::Map<&'static str, Number> = phf_map! {
    "latter" => Number::Singular,
    "former" => Number::Singular,
    "rich" => Number::Plural,
    "poor" => Number::Plural,
    "wealthy" => Number::Plural,
    "elderly" => Number::Plural,
    "young" => Number::Plural,
    "homeless" => Number::Plural,
    "unemployed" => Number::Plural,
    "injured" => Number::Plural,
    "wounded" => Number::Plural,
    "dead" => Number::Plural,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitiveKind {
    /// "some of the X"
    WithLinker,
    /// "all (of) the X"
    OptionalLinker,
    /// "a number of X", but not "the number of X"
    IndefiniteOnly,
}

pub static PARTITIVES: phf::Map<&'static str, PartitiveKind> = phf_map! {
    "some" => PartitiveKind::WithLinker,
    "all" => PartitiveKind::OptionalLinker,
    "most" => PartitiveKind::OptionalLinker,
    "more" => PartitiveKind::OptionalLinker,
    "first" => PartitiveKind::OptionalLinker,
    "last" => PartitiveKind::OptionalLinker,
    "amount" => PartitiveKind::IndefiniteOnly,
    "group" => PartitiveKind::IndefiniteOnly,
    "lot" => PartitiveKind::IndefiniteOnly,
    "number" => PartitiveKind::IndefiniteOnly,
    "quantity" => PartitiveKind::IndefiniteOnly,
    "ton" => PartitiveKind::IndefiniteOnly,
};

const OF: &[&str] = &["of"];

/// Prepositions linking a partitive to its real head noun. Absent words
/// use "of".
pub static PARTITIVE_LINKERS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "more" => &["of", "than"],
    "first" => &["of", "among"],
    "last" => &["of", "among"],
};

/// Adjectives that behave as determiners under an `amod` label.
pub static AMOD_DETERMINERS: phf::Set<&'static str> = phf_set! {
    "few", "several", "many", "much", "numerous", "various", "multiple",
};

/// Split-off prefixes the parser mistakes for a subject ("co-wrote").
pub static VERB_PREFIXES: phf::Set<&'static str> = phf_set! {
    "co",
};

pub static SINGULAR_OVERRIDES: phf::Map<&'static str, &'static str> = phf_map! {
    "these" => "this",
    "those" => "that",
    "all" => "every",
};

pub static PLURAL_OVERRIDES: phf::Map<&'static str, &'static str> = phf_map! {
    "the" => "the",
    "a" => "some",
    "an" => "some",
    "this" => "these",
    "that" => "those",
    "every" => "all",
    "each" => "all",
    "another" => "other",
};

pub fn partitive_kind(word: &str) -> Option<PartitiveKind> {
    PARTITIVES.get(word.to_lowercase().as_str()).copied()
}

pub fn is_partitive(word: &str) -> bool {
    partitive_kind(word).is_some()
}

pub fn partitive_linkers(word: &str) -> &'static [&'static str] {
    PARTITIVE_LINKERS.get(word.to_lowercase().as_str()).copied().unwrap_or(OF)
}

pub fn homophones(word: &str) -> &'static [Homophone] {
    HOMOPHONES.get(word.to_lowercase().as_str()).copied().unwrap_or(&[])
}
