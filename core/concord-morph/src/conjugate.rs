//! Rule-based English verb conjugation from a lemma.

use concord_protocol::{Number, Person, Tense};
use phf::{phf_map, phf_set};

/// Strong and otherwise irregular simple-past forms.
static IRREGULAR_PAST: phf::Map<&'static str, &'static str> = phf_map! {
    "arise" => "arose", "awake" => "awoke", "bear" => "bore", "beat" => "beat",
    "become" => "became", "befall" => "befell", "beget" => "begot", "begin" => "began",
    "behold" => "beheld", "bend" => "bent", "bet" => "bet", "bid" => "bid",
    "bind" => "bound", "bite" => "bit", "bleed" => "bled", "blow" => "blew",
    "break" => "broke", "breed" => "bred", "bring" => "brought", "broadcast" => "broadcast",
    "build" => "built", "burst" => "burst", "buy" => "bought", "cast" => "cast",
    "catch" => "caught", "choose" => "chose", "cling" => "clung", "come" => "came",
    "cost" => "cost", "creep" => "crept", "cut" => "cut", "deal" => "dealt",
    "dig" => "dug", "do" => "did", "draw" => "drew", "drink" => "drank",
    "drive" => "drove", "eat" => "ate", "fall" => "fell", "feed" => "fed",
    "feel" => "felt", "fight" => "fought", "find" => "found", "flee" => "fled",
    "fling" => "flung", "fly" => "flew", "forbid" => "forbade", "forecast" => "forecast",
    "foresee" => "foresaw", "forget" => "forgot", "forgive" => "forgave", "freeze" => "froze",
    "get" => "got", "give" => "gave", "go" => "went", "grind" => "ground",
    "grow" => "grew", "hang" => "hung", "have" => "had", "hear" => "heard",
    "hide" => "hid", "hit" => "hit", "hold" => "held", "hurt" => "hurt",
    "keep" => "kept", "kneel" => "knelt", "know" => "knew", "lay" => "laid",
    "lead" => "led", "leave" => "left", "lend" => "lent", "let" => "let",
    "light" => "lit", "lose" => "lost", "make" => "made", "mean" => "meant",
    "meet" => "met", "mislead" => "misled", "mistake" => "mistook",
    "misunderstand" => "misunderstood", "outgrow" => "outgrew", "overcome" => "overcame",
    "override" => "overrode", "oversee" => "oversaw", "overtake" => "overtook",
    "partake" => "partook", "pay" => "paid", "put" => "put", "quit" => "quit",
    "read" => "read", "rebuild" => "rebuilt", "remake" => "remade", "retell" => "retold",
    "rewrite" => "rewrote", "rid" => "rid", "ride" => "rode", "ring" => "rang",
    "rise" => "rose", "run" => "ran", "say" => "said", "see" => "saw",
    "seek" => "sought", "sell" => "sold", "send" => "sent", "set" => "set",
    "shake" => "shook", "shed" => "shed", "shine" => "shone", "shoot" => "shot",
    "shrink" => "shrank", "shut" => "shut", "sing" => "sang", "sink" => "sank",
    "sit" => "sat", "slay" => "slew", "sleep" => "slept", "slide" => "slid",
    "sling" => "slung", "slit" => "slit", "speak" => "spoke", "speed" => "sped",
    "spend" => "spent", "spin" => "spun", "spit" => "spat", "split" => "split",
    "spread" => "spread", "spring" => "sprang", "stand" => "stood", "steal" => "stole",
    "stick" => "stuck", "sting" => "stung", "stink" => "stank", "stride" => "strode",
    "strike" => "struck", "string" => "strung", "strive" => "strove", "swear" => "swore",
    "sweep" => "swept", "swim" => "swam", "swing" => "swung", "take" => "took",
    "teach" => "taught", "tear" => "tore", "tell" => "told", "think" => "thought",
    "throw" => "threw", "thrust" => "thrust", "tread" => "trod", "undergo" => "underwent",
    "understand" => "understood", "undertake" => "undertook", "uphold" => "upheld",
    "upset" => "upset", "wake" => "woke", "wear" => "wore", "weave" => "wove",
    "weep" => "wept", "win" => "won", "wind" => "wound", "withdraw" => "withdrew",
    "withhold" => "withheld", "withstand" => "withstood", "wring" => "wrung",
    "write" => "wrote",
};

/// Multi-syllable verbs with stress on the final syllable double their
/// last consonant.
static FINAL_STRESS: phf::Set<&'static str> = phf_set! {
    "admit", "commit", "compel", "control", "equip", "occur", "omit", "patrol",
    "permit", "prefer", "propel", "rebel", "recur", "refer", "regret", "repel",
    "submit", "transfer", "transmit", "acquit", "deter", "expel", "incur", "infer",
};

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn vowel_groups(word: &str) -> usize {
    let mut groups = 0;
    let mut previous = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous {
            groups += 1;
        }
        previous = vowel;
    }
    groups
}

fn ends_with_consonant_y(word: &str) -> bool {
    let mut rev = word.chars().rev();
    matches!((rev.next(), rev.next()), (Some('y'), Some(c)) if !is_vowel(c))
}

/// Consonant-vowel-consonant ending of a stressed final syllable.
fn doubles_final_consonant(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    if n < 3 {
        return false;
    }
    let (c1, v, c2) = (chars[n - 3], chars[n - 2], chars[n - 1]);
    let cvc = !is_vowel(c1) && is_vowel(v) && !is_vowel(c2) && !matches!(c2, 'w' | 'x' | 'y');
    cvc && (vowel_groups(word) == 1 || FINAL_STRESS.contains(word))
}

/// Third-person singular present.
pub fn third_singular(lemma: &str) -> String {
    match lemma {
        "be" => "is".to_string(),
        "have" => "has".to_string(),
        _ if ends_with_consonant_y(lemma) => format!("{}ies", &lemma[..lemma.len() - 1]),
        _ if ["s", "sh", "ch", "x", "z", "o"].iter().any(|s| lemma.ends_with(s)) => format!("{}es", lemma),
        _ => format!("{}s", lemma),
    }
}

pub fn simple_past(lemma: &str) -> String {
    if let Some(form) = IRREGULAR_PAST.get(lemma) {
        return form.to_string();
    }
    if lemma.ends_with('e') {
        format!("{}d", lemma)
    } else if ends_with_consonant_y(lemma) {
        format!("{}ied", &lemma[..lemma.len() - 1])
    } else if lemma.ends_with('c') {
        format!("{}ked", lemma)
    } else if doubles_final_consonant(lemma) {
        let last = lemma.chars().last().unwrap_or_default();
        format!("{}{}ed", lemma, last)
    } else {
        format!("{}ed", lemma)
    }
}

/// Conjugates `lemma`. A missing number reads as singular and a missing
/// person as third. Returns `None` for an empty lemma.
pub fn conjugate(lemma: &str, number: Option<Number>, tense: Tense, person: Option<Person>) -> Option<String> {
    let lemma = lemma.trim().to_lowercase();
    if lemma.is_empty() {
        return None;
    }
    let number = number.unwrap_or(Number::Singular);
    let person = person.unwrap_or(Person::Third);

    let form = match (lemma.as_str(), tense) {
        (_, Tense::Infinitive) => lemma.clone(),
        ("be", Tense::Present) => match (number, person) {
            (Number::Singular, Person::First) => "am".to_string(),
            (Number::Singular, Person::Third) => "is".to_string(),
            _ => "are".to_string(),
        },
        ("be", Tense::Past) => match (number, person) {
            (Number::Singular, Person::First | Person::Third) => "was".to_string(),
            _ => "were".to_string(),
        },
        (_, Tense::Present) => match (number, person) {
            (Number::Singular, Person::Third) => third_singular(&lemma),
            _ => lemma.clone(),
        },
        (_, Tense::Past) => simple_past(&lemma),
    };
    Some(form)
}
