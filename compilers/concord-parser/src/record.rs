use concord_protocol::labels::dep;
use concord_protocol::{Token, TokenFlags};
use serde::{Deserialize, Serialize};

use crate::features::parse_features;
use crate::{ParseError, Result};

fn default_true() -> bool {
    true
}

/// One token as delivered by the external parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text: String,
    #[serde(default = "default_true")]
    pub space_after: bool,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    /// Absolute position of the head within the sentence.
    pub head: usize,
    #[serde(default)]
    pub morph: String,
    #[serde(default)]
    pub lemma: String,
    #[serde(default)]
    pub sent_start: bool,
    #[serde(default)]
    pub ent_iob: String,
}

impl TokenRecord {
    pub fn into_token(self, i: usize) -> Result<Token> {
        let morph = parse_features(&self.morph).map_err(|message| ParseError::Malformed { line: i + 1, message })?;
        let mut flags = TokenFlags::empty();
        flags.set(TokenFlags::SPACE_AFTER, self.space_after);
        flags.set(TokenFlags::SENT_START, self.sent_start);
        let label = if self.head == i { dep::ROOT.to_string() } else { self.dep };
        Ok(Token {
            i,
            text: self.text,
            flags,
            pos: self.pos,
            tag: self.tag,
            morph,
            lemma: self.lemma,
            dep: label,
            head: self.head,
            ent_iob: self.ent_iob,
        })
    }
}

/// One JSON array of token records per line.
pub fn records_from_json(line: &str) -> Result<Vec<TokenRecord>> {
    serde_json::from_str(line).map_err(|e| ParseError::Malformed { line: e.line(), message: e.to_string() })
}
