//! schemata CLI: learn image-schema patterns from experience and infer from them.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use schemata::config::SchemataConfig;
use schemata::detect::detect_schemas;
use schemata::error::StoreError;
use schemata::experience::Experience;
use schemata::infer::infer;
use schemata::pattern::Pattern;
use schemata::similarity::most_similar;
use schemata::store::{LearnOutcome, PatternStore};

#[derive(Parser)]
#[command(name = "schemata", version, about = "Image-schema pattern learner")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learn patterns from a JSON array of experiences.
    Learn {
        /// Path to JSON file with experiences.
        #[arg(long)]
        experiences: PathBuf,

        /// Existing pattern store to extend.
        #[arg(long)]
        store: Option<PathBuf>,

        /// Learn everything under this schema instead of the detected ones.
        #[arg(long)]
        schema: Option<String>,

        /// Where to write the resulting store.
        #[arg(long)]
        out: PathBuf,
    },

    /// Print every schema and its patterns.
    Show {
        #[arg(long)]
        store: PathBuf,
    },

    /// Find the stored pattern most similar to a query pattern.
    Similar {
        #[arg(long)]
        store: PathBuf,

        /// Path to JSON file with the query pattern.
        #[arg(long)]
        pattern: PathBuf,
    },

    /// Complete a partial pattern from the most similar stored one.
    Infer {
        #[arg(long)]
        store: PathBuf,

        /// Path to JSON file with the partial pattern.
        #[arg(long)]
        pattern: PathBuf,
    },
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content)
        .map_err(|e| StoreError::Serialization {
            message: format!("{}: {e}", path.display()),
        })
        .map_err(Into::into)
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();
    let config = SchemataConfig::load_or_default(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    match cli.command {
        Commands::Learn {
            experiences,
            store,
            schema,
            out,
        } => {
            let experiences: Vec<Experience> = read_json(&experiences)?;
            let mut learned = match &store {
                Some(path) => PatternStore::load(path)?,
                None => PatternStore::new(),
            };

            let (mut generalized, mut exceptions, mut skipped) = (0usize, 0usize, 0usize);
            for experience in &experiences {
                let pattern = experience.to_pattern(config.diff_experiences);
                let mut names: Vec<&str> = Vec::new();
                match &schema {
                    Some(name) => names.push(name),
                    None => {
                        for detected in detect_schemas(&pattern, &config) {
                            if !names.contains(&detected.store_name()) {
                                names.push(detected.store_name());
                            }
                        }
                    }
                }
                if names.is_empty() {
                    skipped += 1;
                    continue;
                }
                for name in &names {
                    let (next, outcome) = learned.learn_with_outcome(&pattern, name);
                    match outcome {
                        LearnOutcome::Generalized { .. } => generalized += 1,
                        LearnOutcome::Exception { .. } => exceptions += 1,
                        _ => {}
                    }
                    learned = next;
                }
            }

            learned.save(&out)?;
            tracing::info!(
                experiences = experiences.len(),
                generalized,
                exceptions,
                skipped,
                "learning finished"
            );
            println!(
                "Learned {} experience(s) into {} schema(s), {} pattern(s); wrote {}",
                experiences.len() - skipped,
                learned.len(),
                learned.pattern_count(),
                out.display()
            );
        }

        Commands::Show { store } => {
            let store = PatternStore::load(&store)?;
            if store.is_empty() {
                println!("No patterns stored.");
            }
            for schema in store.schemas() {
                println!("{} ({}):", schema.name, schema.patterns.len());
                for (i, pattern) in schema.patterns.iter().enumerate() {
                    println!("  {}. {pattern}", i + 1);
                }
            }
        }

        Commands::Similar { store, pattern } => {
            let store = PatternStore::load(&store)?;
            let query: Pattern = read_json(&pattern)?;
            match most_similar(&query, &store) {
                Some(found) => {
                    println!("Schema: {}", found.schema);
                    println!("Score:  {}", found.score);
                    println!("Pattern: {}", found.pattern);
                }
                None => println!("No comparable pattern stored."),
            }
        }

        Commands::Infer { store, pattern } => {
            let store = PatternStore::load(&store)?;
            let query: Pattern = read_json(&pattern)?;
            let Some(found) = most_similar(&query, &store) else {
                miette::bail!("no stored pattern is comparable with {query}");
            };
            let Some(inference) = infer(found.pattern, &query) else {
                miette::bail!(
                    "best match under {} does not agree with {query}: {}",
                    found.schema,
                    found.pattern
                );
            };

            println!("Schema:   {} (score {})", found.schema, found.score);
            println!("Inferred: {}", inference.pattern);
            if !inference.bindings.is_empty() {
                println!("Bindings:");
                for (placeholder, symbol) in &inference.bindings {
                    println!("  {placeholder} = {symbol}");
                }
            }
            let json = serde_json::to_string_pretty(&inference.pattern).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}
