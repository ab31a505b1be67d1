//! crossie CLI - crossword helper tools.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crossie::server::{self, ServerConfig};
use crossie::{
    AnagramQuery, ClientConfig, Crossie, PatternQuery, SortOrder, SynonymQuery,
    MAX_PATTERN_SYNONYMS,
};

/// crossie - crossword tools
#[derive(Parser)]
#[command(name = "crossie")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Upstream request timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Get synonyms for the specified word or phrase from wordhippo
    #[command(visible_alias = "syn")]
    Synonyms(SynonymArgs),

    /// Find words with missing letters indicated by the . character
    #[command(visible_alias = "find")]
    FindWords(FindWordsArgs),

    /// Get anagrams for the supplied phrase
    #[command(visible_alias = "anag")]
    Anagrams(AnagramArgs),

    /// Run the HTTP API server, optionally serving static files
    Serve(ServeArgs),
}

#[derive(Args)]
struct SynonymArgs {
    /// Word or phrase
    #[arg(required = true)]
    words: Vec<String>,

    /// Letters that the synonym should start with
    #[arg(short, long)]
    starts: Option<String>,

    /// Letters that the synonym should end with
    #[arg(short, long)]
    ends: Option<String>,

    /// Regular expression the synonym must match
    #[arg(short, long)]
    pattern: Option<String>,

    /// Minimum letters in the synonym
    #[arg(short, long)]
    min: Option<usize>,

    /// Maximum letters in the synonym
    #[arg(short = 'M', long)]
    max: Option<usize>,

    /// Return synonyms in alphabetical order
    #[arg(long)]
    sort: bool,

    /// Include synonyms hidden behind wordhippo's "More..." link
    #[arg(long)]
    all: bool,
}

#[derive(Args)]
struct FindWordsArgs {
    /// Letters and . wildcards, e.g. CR.SS
    frame: String,

    /// Words whose synonyms are marked with * among the results (up to two)
    #[arg(long = "syn")]
    synonyms: Vec<String>,
}

#[derive(Args)]
struct AnagramArgs {
    /// Word or phrase
    #[arg(required = true)]
    words: Vec<String>,

    /// Also return anagrams shorter than the phrase
    #[arg(short, long)]
    partial: bool,
}

#[derive(Args)]
struct ServeArgs {
    /// Port to run the server on
    #[arg(short, long, default_value = "8989")]
    port: u16,

    /// Root directory for static files
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; RUST_LOG overrides the verbosity flag
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::default().with_timeout(cli.timeout);
    let crossie = Crossie::new(&config).context("create HTTP client")?;

    match cli.command {
        Commands::Synonyms(args) => run_synonyms(&crossie, args).await,
        Commands::FindWords(args) => run_find_words(&crossie, args).await,
        Commands::Anagrams(args) => run_anagrams(&crossie, args).await,
        Commands::Serve(args) => run_serve(crossie, args).await,
    }
}

async fn run_synonyms(crossie: &Crossie, args: SynonymArgs) -> Result<()> {
    let mut query = SynonymQuery::new(args.words.join(" "))
        .with_sort(if args.sort {
            SortOrder::Alpha
        } else {
            SortOrder::Display
        })
        .with_all(args.all);
    query.starts_with = args.starts;
    query.ends_with = args.ends;
    query.pattern = args.pattern;
    query.min_letters = args.min;
    query.max_letters = args.max;

    let result = crossie.synonyms(query).await.context("find synonyms")?;
    for synonym in result.synonyms() {
        println!("{synonym}");
    }
    Ok(())
}

async fn run_find_words(crossie: &Crossie, args: FindWordsArgs) -> Result<()> {
    if args.synonyms.len() > MAX_PATTERN_SYNONYMS {
        anyhow::bail!("at most {MAX_PATTERN_SYNONYMS} --syn words may be given");
    }
    let query = PatternQuery::new(args.frame).with_synonyms(args.synonyms);
    let result = crossie.find_all_words(query).await.context("find words")?;
    for word in &result.words {
        if result.synonym_matches.contains(word) {
            println!("{word} *");
        } else {
            println!("{word}");
        }
    }
    Ok(())
}

async fn run_anagrams(crossie: &Crossie, args: AnagramArgs) -> Result<()> {
    let query = AnagramQuery::new(args.words.join(" ")).with_partial(args.partial);
    let result = crossie.anagrams(query).await.context("find anagrams")?;
    for phrase in &result.phrases {
        println!("{phrase}");
    }
    Ok(())
}

async fn run_serve(crossie: Crossie, args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        addr: ([127, 0, 0, 1], args.port).into(),
        static_root: args.root,
    };
    server::serve(config, crossie).await?;
    Ok(())
}
