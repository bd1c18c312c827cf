//! CoNLL-U reader. Columns may be separated by tabs or runs of spaces.

use concord_tree::Sentence;
use nom::bytes::complete::is_not;
use nom::character::complete::{space0, space1};
use nom::combinator::all_consuming;
use nom::multi::separated_list1;
use nom::sequence::delimited;
use nom::IResult;

use crate::record::TokenRecord;
use crate::{build_sentence, ParseError, Result};

fn columns(line: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(delimited(space0, separated_list1(space1, is_not(" \t")), space0))(line)
}

fn malformed(line: usize, message: impl Into<String>) -> ParseError {
    ParseError::Malformed { line, message: message.into() }
}

fn parse_row(number: usize, line: &str) -> Result<Option<TokenRecord>> {
    let (_, cols) = columns(line).map_err(|e| malformed(number, e.to_string()))?;
    if cols.len() < 8 {
        return Err(malformed(number, format!("expected at least 8 columns, found {}", cols.len())));
    }
    // multi-word ranges and empty nodes
    if cols[0].contains(&['-', '.'][..]) {
        return Ok(None);
    }
    let id: usize = cols[0].parse().map_err(|_| malformed(number, format!("bad id {:?}", cols[0])))?;
    let head: usize = cols[6].parse().map_err(|_| malformed(number, format!("bad head {:?}", cols[6])))?;
    if id == 0 {
        return Err(malformed(number, "token ids start at 1"));
    }
    let misc = cols.get(9).copied().unwrap_or("_");
    let mut record = TokenRecord {
        text: cols[1].to_string(),
        space_after: !misc.split('|').any(|m| m == "SpaceAfter=No"),
        pos: cols[3].to_string(),
        tag: cols[4].to_string(),
        dep: cols[7].to_string(),
        head: if head == 0 { id - 1 } else { head - 1 },
        morph: cols[5].to_string(),
        lemma: cols[2].to_string(),
        sent_start: id == 1,
        ent_iob: String::new(),
    };
    if let Some(ent) = misc.split('|').find_map(|m| m.strip_prefix("Ent=")) {
        record.ent_iob = ent.to_string();
    }
    Ok(Some(record))
}

/// Token records of every sentence block in `input`.
pub fn read_records(input: &str) -> Result<Vec<Vec<TokenRecord>>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();
    for (n, line) in input.lines().enumerate() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        if line.trim_start().starts_with('#') {
            continue;
        }
        if let Some(record) = parse_row(n + 1, line)? {
            current.push(record);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    Ok(blocks)
}

pub fn read_sentences(input: &str) -> Result<Vec<Sentence>> {
    read_records(input)?.into_iter().map(build_sentence).collect()
}

/// The first sentence in `input`.
pub fn read_sentence(input: &str) -> Result<Sentence> {
    read_records(input)?
        .into_iter()
        .next()
        .ok_or_else(|| malformed(0, "no sentence found"))
        .and_then(build_sentence)
}
