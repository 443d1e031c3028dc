use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use quarry_search::cli::{load_documents, Args};
use quarry_search::search::paginate;
use quarry_search::{remove_duplicates, ExecutionPolicy, SearchEngine};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut engine = SearchEngine::with_stop_words_text(&args.stop_words)
        .context("invalid stop words")?;
    for record in load_documents(&args.documents)? {
        engine
            .add_document(record.id, &record.text, record.status, &record.ratings)
            .with_context(|| format!("failed to index document {}", record.id))?;
    }

    if args.dedup {
        let removed = remove_duplicates(&mut engine);
        if !removed.is_empty() {
            eprintln!("Removed {} duplicate document(s)", removed.len());
        }
    }

    let policy = if args.parallel {
        ExecutionPolicy::Parallel
    } else {
        ExecutionPolicy::Sequential
    };

    for query in &args.queries {
        let results = match args.status {
            Some(status) => engine.find_top_documents_by_status(policy, query, status),
            None => engine.find_top_documents_by(policy, query),
        }
        .with_context(|| format!("query `{query}` failed"))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
            continue;
        }

        println!("Results for: {query}");
        if results.is_empty() {
            println!("  (no documents)");
            continue;
        }
        match args.page_size {
            Some(page_size) if page_size > 0 => {
                for (number, page) in paginate(&results, page_size).iter().enumerate() {
                    println!("  page {}", number + 1);
                    for document in page {
                        println!("    {document}");
                    }
                }
            }
            _ => {
                for document in &results {
                    println!("  {document}");
                }
            }
        }
    }

    Ok(())
}
