use concord_protocol::Morph;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::sequence::separated_pair;
use nom::IResult;

fn feature(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        take_while1(|c: char| c != '=' && c != '|'),
        char('='),
        take_while1(|c: char| c != '|'),
    )(input)
}

/// Parses a `Key=Value|Key=Value` feature string. `_` and the empty string
/// are the empty set.
pub fn parse_features(input: &str) -> Result<Morph, String> {
    let input = input.trim();
    if input.is_empty() || input == "_" {
        return Ok(Morph::new());
    }
    let (_, pairs) = all_consuming(separated_list1(char('|'), feature))(input)
        .map_err(|e| format!("bad feature string {:?}: {}", input, e))?;
    Ok(pairs.into_iter().collect())
}
