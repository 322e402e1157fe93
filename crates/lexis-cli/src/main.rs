//! Lexis CLI
//!
//! Command-line interface over a WordNet JSON Lines dataset:
//! - Synset, lemma, sense and exception lookups
//! - One-hop relation traversal (hypernyms, hyponyms, meronyms, holonyms)
//! - Load statistics
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `lexis=info`).

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use lexis_store::{
    default_data_path, Category, LoadReport, LoaderConfig, Relation, SynsetId, WordNetLoader,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod render;

#[derive(Parser, Debug)]
#[command(name = "lexis")]
#[command(author, version, about = "Lexis: WordNet lookups over JSON Lines data")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct GlobalArgs {
    /// Primary data file (default: $LEXIS_DATA_DIR/wordnet.jsonl, else data/wordnet.jsonl)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// JSON loader config. Explicit flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Decode records on demand through a bounded cache
    #[arg(long, global = true)]
    lazy: bool,

    /// Cache capacity for --lazy
    #[arg(long, global = true)]
    cache_size: Option<usize>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show one synset by its 8-digit id
    Synset { id: String },

    /// Synsets containing a lemma (eager mode only)
    Lemma {
        word: String,
        /// Restrict to one category: n, v, a, r, s
        #[arg(long)]
        pos: Option<Category>,
    },

    /// Senses of a lemma, sorted by sense number
    Senses {
        word: String,
        #[arg(long)]
        pos: Option<Category>,
    },

    /// One sense by its sense key
    Sense { key: String },

    /// One-hop related synsets (eager mode only)
    Related {
        id: String,
        #[arg(long)]
        relation: Relation,
    },

    /// Irregular inflections for a category
    Exceptions {
        #[arg(long)]
        pos: Category,
        /// Look up one inflected form instead of listing all
        form: Option<String>,
    },

    /// Load report and index sizes
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    Found,
    NotFound,
}

#[derive(Debug, Serialize)]
pub(crate) struct Stats<'a> {
    data_path: &'a Path,
    lazy: bool,
    report: &'a LoadReport,
    synsets: usize,
    lemmas: usize,
    senses: usize,
    exceptions: usize,
    relations: BTreeMap<&'static str, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cache_capacity: Option<usize>,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = resolve_config(&cli.global)?;
    tracing::debug!(
        path = %config.data_path.display(),
        lazy = config.lazy,
        cache_size = config.cache_size,
        "resolved loader config"
    );
    let data_path = config.data_path.clone();
    let mut loader = WordNetLoader::new(config)
        .with_context(|| format!("failed to load {}", data_path.display()))?;
    loader
        .load()
        .with_context(|| format!("failed to load {}", data_path.display()))?;

    let lookup = run(&loader, &cli.command, cli.global.json)?;
    Ok(match lookup {
        Lookup::Found => ExitCode::SUCCESS,
        Lookup::NotFound => ExitCode::from(1),
    })
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lexis=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (if any) first, then explicit flags on top.
fn resolve_config(args: &GlobalArgs) -> Result<LoaderConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<LoaderConfig>(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => LoaderConfig::new(default_data_path()),
    };
    if let Some(data) = &args.data {
        config.data_path = data.clone();
    }
    if args.lazy {
        config.lazy = true;
    }
    if let Some(cache_size) = args.cache_size {
        config.cache_size = cache_size;
    }
    Ok(config)
}

fn parse_id(text: &str) -> Result<SynsetId> {
    text.parse()
        .with_context(|| format!("invalid synset id {text:?}"))
}

fn not_found(what: impl std::fmt::Display) -> Lookup {
    eprintln!("{} {}", "not found:".yellow().bold(), what);
    Lookup::NotFound
}

fn run(loader: &WordNetLoader, command: &Commands, json: bool) -> Result<Lookup> {
    match command {
        Commands::Synset { id } => cmd_synset(loader, id, json),
        Commands::Lemma { word, pos } => cmd_lemma(loader, word, *pos, json),
        Commands::Senses { word, pos } => cmd_senses(loader, word, *pos, json),
        Commands::Sense { key } => cmd_sense(loader, key, json),
        Commands::Related { id, relation } => cmd_related(loader, id, *relation, json),
        Commands::Exceptions { pos, form } => cmd_exceptions(loader, *pos, form.as_deref(), json),
        Commands::Stats => cmd_stats(loader, json),
    }
}

fn cmd_synset(loader: &WordNetLoader, id: &str, json: bool) -> Result<Lookup> {
    let id = parse_id(id)?;
    let synset = loader
        .try_get_synset(&id)
        .with_context(|| format!("failed to read synset {id}"))?;
    let Some(synset) = synset else {
        return Ok(not_found(format_args!("synset {id}")));
    };
    if json {
        render::json(&*synset)?;
    } else {
        render::synset(&synset);
    }
    Ok(Lookup::Found)
}

fn cmd_lemma(
    loader: &WordNetLoader,
    word: &str,
    pos: Option<Category>,
    json: bool,
) -> Result<Lookup> {
    if loader.is_lazy() {
        bail!("lemma lookup needs the eager index; run without --lazy");
    }
    let synsets = loader.get_synsets_by_lemma(word, pos);
    if synsets.is_empty() {
        return Ok(not_found(format_args!("lemma {word:?}")));
    }
    if json {
        let records: Vec<_> = synsets.iter().map(|s| &**s).collect();
        render::json(&records)?;
    } else {
        render::synsets(&synsets);
    }
    Ok(Lookup::Found)
}

fn cmd_senses(
    loader: &WordNetLoader,
    word: &str,
    pos: Option<Category>,
    json: bool,
) -> Result<Lookup> {
    let senses = loader.get_senses_by_lemma(word, pos);
    if senses.is_empty() {
        return Ok(not_found(format_args!("senses for {word:?}")));
    }
    if json {
        render::json(&senses)?;
    } else {
        render::senses(&senses);
    }
    Ok(Lookup::Found)
}

fn cmd_sense(loader: &WordNetLoader, key: &str, json: bool) -> Result<Lookup> {
    let Some(sense) = loader.get_sense_by_key(key) else {
        return Ok(not_found(format_args!("sense {key:?}")));
    };
    if json {
        render::json(sense)?;
    } else {
        render::senses(&[sense]);
    }
    Ok(Lookup::Found)
}

fn cmd_related(
    loader: &WordNetLoader,
    id: &str,
    relation: Relation,
    json: bool,
) -> Result<Lookup> {
    if loader.is_lazy() {
        bail!("relation lookup needs the eager index; run without --lazy");
    }
    let id = parse_id(id)?;
    if loader.get_synset(&id).is_none() {
        return Ok(not_found(format_args!("synset {id}")));
    }
    let related = loader.related(&id, relation);
    if json {
        let records: Vec<_> = related.iter().map(|s| &**s).collect();
        render::json(&records)?;
    } else if related.is_empty() {
        println!("{} {} has no {}", "info:".yellow().bold(), id, relation);
    } else {
        render::synsets(&related);
    }
    Ok(Lookup::Found)
}

fn cmd_exceptions(
    loader: &WordNetLoader,
    pos: Category,
    form: Option<&str>,
    json: bool,
) -> Result<Lookup> {
    let Some(form) = form else {
        let map = loader.get_exceptions(pos);
        if json {
            render::json(map)?;
        } else {
            render::exceptions(pos, map);
        }
        return Ok(Lookup::Found);
    };

    let bases = loader.base_forms(form, pos);
    if bases.is_empty() {
        return Ok(not_found(format_args!("exception {form:?} ({pos})")));
    }
    if json {
        render::json(bases)?;
    } else {
        println!("{}", bases.join(", "));
    }
    Ok(Lookup::Found)
}

fn cmd_stats(loader: &WordNetLoader, json: bool) -> Result<Lookup> {
    let stats = Stats {
        data_path: loader.data_path(),
        lazy: loader.is_lazy(),
        report: loader.load_report(),
        synsets: loader.synset_count(),
        lemmas: loader.lemma_count(),
        senses: loader.sense_count(),
        exceptions: loader.exception_count(),
        relations: Relation::ALL
            .into_iter()
            .map(|r| (r.as_str(), loader.relation_edge_count(r)))
            .collect(),
        cache_capacity: loader.cache_capacity(),
    };
    if json {
        render::json(&stats)?;
    } else {
        render::stats(&stats);
    }
    Ok(Lookup::Found)
}
