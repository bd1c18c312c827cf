use phf::phf_set;

static NUMBER_WORDS: phf::Set<&'static str> = phf_set! {
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    "ten", "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen",
    "seventeen", "eighteen", "nineteen", "twenty", "thirty", "forty", "fifty",
    "sixty", "seventy", "eighty", "ninety", "hundred", "thousand", "million",
    "billion", "trillion",
};

/// Digits (with optional thousands separators and decimals) or a spelled-out
/// cardinal such as "twenty-one".
pub fn is_number(word: &str) -> bool {
    let digits: String = word.chars().filter(|c| *c != ',').collect();
    if digits.chars().any(|c| c.is_ascii_digit()) && digits.parse::<f64>().is_ok() {
        return true;
    }
    let lower = word.to_lowercase();
    let mut parts = lower.split(&['-', ' '][..]).filter(|p| !p.is_empty()).peekable();
    parts.peek().is_some() && parts.all(|p| NUMBER_WORDS.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert!(is_number("1,000"));
        assert!(is_number("3.5"));
        assert!(is_number("Twenty-one"));
        assert!(is_number("one"));
        assert!(!is_number("second"));
        assert!(!is_number("nan"));
        assert!(!is_number("-"));
    }
}
