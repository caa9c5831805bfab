use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use worksheet::customer::sample_records;
use worksheet::ingest::load_records;
use worksheet::Worksheet;

#[derive(Parser)]
#[command(name = "worksheet")]
#[command(about = "Index customers and search them by keyword", long_about = None)]
struct Cli {
    /// Customer input (.json, .jsonl, or a directory of them). Uses the built-in sample when absent.
    #[arg(long, global = true, env = "WORKSHEET_INPUT")]
    input: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every customer, sorted by name
    Report,
    /// Search customers; each keyword narrows the previous matches
    Search {
        /// Keywords, applied in order
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Print the response as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Give up collecting matches after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let records = match &cli.input {
        Some(path) => load_records(path)?,
        None => sample_records(),
    };
    let ws = Worksheet::with_records(records);

    match cli.command {
        Commands::Report => {
            println!("Customer report (sorted by name):");
            for line in ws.report() {
                println!("{line}");
            }
        }
        Commands::Search { keywords, json, timeout_ms } => {
            // a single argument may carry several space separated keywords
            let words: Vec<&str> = keywords.iter().flat_map(|k| k.split_whitespace()).collect();
            let resp = ws.respond(&words, timeout_ms.map(Duration::from_millis))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resp)?);
            } else {
                println!("Query: [{}]", resp.query.join(", "));
                println!("Matches [{}]:", resp.total_hits);
                for hit in &resp.results {
                    println!("<{}> {}", hit.title, hit.count);
                }
            }
        }
    }
    Ok(())
}
