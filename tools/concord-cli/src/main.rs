use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use concord_grammar::{accepts_parsed, check_string, resolve, DistractorPolicy, FilterConfig};
use concord_parser::{build_sentence, read_records, records_from_json, TokenRecord};
use concord_tree::Sentence;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod pairs;

use pairs::{make_pair, Op};

#[derive(Parser)]
#[command(author, version, about = "Filters and transforms parsed sentences into agreement datasets")]
struct Cli {
    /// Parser output to read
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// JSON lines are written here, or to stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Conllu)]
    format: Format,

    /// Repeat for more detail; RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Blank-line separated CoNLL-U blocks
    Conllu,
    /// One JSON array of token records per line
    Jsonl,
}

#[derive(Subcommand)]
enum Command {
    /// Keep the sentences that pass both filter phases
    Filter(FilterArgs),
    /// Print the grammatical relations of every sentence
    Resolve,
    /// Build source/target pairs
    Transform {
        #[arg(long, value_enum)]
        op: Op,

        /// Match distractors to the subject in present pairs
        #[arg(long)]
        clean_present: bool,

        /// Skip the filter chain
        #[arg(long)]
        unfiltered: bool,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    Allow,
    Forbid,
    Require,
}

impl From<Policy> for DistractorPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Allow => DistractorPolicy::Allow,
            Policy::Forbid => DistractorPolicy::Forbid,
            Policy::Require => DistractorPolicy::Require,
        }
    }
}

#[derive(Args)]
struct FilterArgs {
    /// JSON filter configuration; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    distractors: Option<Policy>,

    #[arg(long)]
    min_chars: Option<usize>,

    #[arg(long)]
    max_words: Option<usize>,
}

impl FilterArgs {
    fn load(&self) -> Result<FilterConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&raw).with_context(|| format!("decoding {}", path.display()))?
            }
            None => FilterConfig::default(),
        };
        if let Some(policy) = self.distractors {
            config.distractors = policy.into();
        }
        if let Some(min_chars) = self.min_chars {
            config.min_chars = min_chars;
        }
        if let Some(max_words) = self.max_words {
            config.max_words = max_words;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_writer(io::stderr).compact().init();
}

fn load_records(path: &Path, format: Format) -> Result<Vec<Vec<TokenRecord>>> {
    let input = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match format {
        Format::Conllu => read_records(&input).context("decoding CoNLL-U"),
        Format::Jsonl => input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| records_from_json(line).with_context(|| format!("decoding line {}", n + 1)))
            .collect(),
    }
}

/// Builds every sentence, logging and skipping the ones whose analysis is
/// not a tree.
fn sentences(blocks: Vec<Vec<TokenRecord>>) -> Vec<Sentence> {
    blocks
        .into_iter()
        .enumerate()
        .filter_map(|(n, block)| match build_sentence(block) {
            Ok(sentence) => Some(sentence),
            Err(e) => {
                warn!(sentence = n + 1, error = %e, "skipping unusable analysis");
                None
            }
        })
        .collect()
}

/// Both filter phases. Rejections are logged at debug level.
fn passes(sentence: &Sentence, config: &FilterConfig) -> bool {
    if let Err(reason) = check_string(&sentence.text(), config) {
        debug!(text = %sentence.text(), %reason, "rejected before parsing");
        return false;
    }
    accepts_parsed(sentence, config).is_ok()
}

fn emit<W: Write + ?Sized, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value)?;
    out.write_all(b"\n")?;
    Ok(())
}

#[derive(Serialize)]
struct Resolved<'a, R: Serialize> {
    text: String,
    #[serde(flatten)]
    relations: &'a R,
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let all = sentences(load_records(&cli.input, cli.format)?);
    info!(sentences = all.len(), input = %cli.input.display(), "loaded");

    let mut written = 0usize;
    match &cli.command {
        Command::Filter(args) => {
            let config = args.load()?;
            for sentence in &all {
                let text = sentence.text();
                if let Err(reason) = check_string(&text, &config) {
                    debug!(%text, %reason, "rejected before parsing");
                    continue;
                }
                if let Ok(relations) = accepts_parsed(sentence, &config) {
                    emit(out, &Resolved { text, relations: &relations })?;
                    written += 1;
                }
            }
        }
        Command::Resolve => {
            for sentence in &all {
                match resolve(sentence) {
                    Ok(relations) => {
                        emit(out, &Resolved { text: sentence.text(), relations: &relations })?;
                        written += 1;
                    }
                    Err(e) => warn!(text = %sentence.text(), error = %e, "cannot resolve"),
                }
            }
        }
        Command::Transform { op, clean_present, unfiltered, filter } => {
            let config = filter.load()?;
            for sentence in all.iter().filter(|s| *unfiltered || passes(s, &config)) {
                match make_pair(sentence, *op, *clean_present) {
                    Ok(pair) => {
                        emit(out, &pair)?;
                        written += 1;
                    }
                    Err(e) => warn!(text = %sentence.text(), error = %e, ?op, "skipping"),
                }
            }
        }
    }

    info!(written, "done");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.output.clone() {
        Some(path) => {
            let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            let mut out = BufWriter::new(file);
            run(cli, &mut out)?;
            out.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            run(cli, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
