use anyhow::Result;
use clap::{Parser, Subcommand};
use cosearch_core::builder::build_and_persist;
use cosearch_core::persist::CollectionPaths;
use cosearch_core::tokenizer::tokenize;
use cosearch_core::{execute_query, load_index, read_corpus, Index};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cosearch")]
#[command(about = "TF-IDF vector-space search over a static document collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index from <collection>.xml and write <collection>.idf / <collection>.tf
    Build {
        /// Collection name, without extension
        #[arg(long)]
        collection: String,
    },
    /// Load <collection>.idf / <collection>.tf and run the interactive query console
    Search {
        /// Collection name, without extension
        #[arg(long)]
        collection: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { collection } => build(&collection),
        Commands::Search { collection } => search(&collection),
    }
}

fn build(collection: &str) -> Result<()> {
    let paths = CollectionPaths::new(collection);
    let docs = read_corpus(paths.corpus())?;
    build_and_persist(docs, &paths)?;
    Ok(())
}

fn search(collection: &str) -> Result<()> {
    let paths = CollectionPaths::new(collection);
    let index = load_index(&paths.idf(), &paths.tf())?;
    console_loop(&index)
}

/// Prompt for query terms until the user enters an empty line.
fn console_loop(index: &Index) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Please enter query terms, separated by whitespace: ");
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if line.trim().is_empty() {
            break;
        }

        let terms = tokenize(&line);
        tracing::debug!(num_terms = terms.len(), "running query");
        let results = execute_query(index, &terms);
        if results.is_empty() {
            println!("Sorry, no documents matched this query.");
        } else {
            println!("Found the following documents:");
            for (doc_id, score) in results {
                println!("{doc_id}\t{score}");
            }
        }
    }
    Ok(())
}
