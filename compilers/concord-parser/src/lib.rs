pub mod conllu;
pub mod features;
pub mod record;

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use concord_morph::corrections::normalize;
use concord_tree::{Sentence, TreeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use conllu::{read_records, read_sentence, read_sentences};
pub use features::parse_features;
pub use record::{records_from_json, TokenRecord};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("dependency parser unavailable: {0}")]
    Unavailable(String),

    #[error("dependency parser did not answer within {0:?}")]
    Timeout(Duration),

    #[error("malformed parser output at line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl ParseError {
    /// The parser itself failed, as opposed to handing back a bad analysis.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ParseError::Unavailable(_) | ParseError::Timeout(_))
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Turns parser records into a normalized sentence.
pub fn build_sentence(records: Vec<TokenRecord>) -> Result<Sentence> {
    let mut tokens = Vec::with_capacity(records.len());
    for (i, record) in records.into_iter().enumerate() {
        let mut token = record.into_token(i)?;
        normalize(&mut token);
        tokens.push(token);
    }
    Ok(Sentence::new(tokens)?)
}

/// An external dependency parser producing Universal-Dependencies-style
/// analyses.
pub trait DependencyParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Vec<TokenRecord>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub timeout_secs: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig { timeout_secs: 120 }
    }
}

impl ParserConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parses `text` on a worker thread, giving up after the configured
/// timeout. A worker that overruns is left detached.
pub fn parse_sentence<P>(parser: Arc<P>, text: &str, config: &ParserConfig) -> Result<Sentence>
where
    P: DependencyParser + ?Sized + 'static,
{
    let (tx, rx) = mpsc::channel();
    let owned = text.to_string();
    thread::spawn(move || {
        // the receiver may be gone after a timeout
        let _ = tx.send(parser.parse(&owned));
    });

    let timeout = config.timeout();
    let records = match rx.recv_timeout(timeout) {
        Ok(result) => result?,
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(text, ?timeout, "parse timed out");
            return Err(ParseError::Timeout(timeout));
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            return Err(ParseError::Unavailable("parser worker exited without a result".into()));
        }
    };
    debug!(text, tokens = records.len(), "parsed");
    build_sentence(records)
}

/// Serves analyses produced ahead of time, keyed by sentence text.
#[derive(Debug, Default, Clone)]
pub struct Preparsed {
    by_text: HashMap<String, Vec<TokenRecord>>,
}

impl Preparsed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, records: Vec<TokenRecord>) {
        let text: String = records
            .iter()
            .map(|r| if r.space_after { format!("{} ", r.text) } else { r.text.clone() })
            .collect();
        self.by_text.insert(text.trim_end().to_string(), records);
    }

    pub fn from_conllu(input: &str) -> Result<Self> {
        let mut parsed = Preparsed::new();
        for block in read_records(input)? {
            parsed.add(block);
        }
        Ok(parsed)
    }

    pub fn len(&self) -> usize {
        self.by_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty()
    }
}

impl DependencyParser for Preparsed {
    fn parse(&self, text: &str) -> Result<Vec<TokenRecord>> {
        self.by_text
            .get(text.trim())
            .cloned()
            .ok_or_else(|| ParseError::Unavailable(format!("no analysis for {:?}", text)))
    }
}
