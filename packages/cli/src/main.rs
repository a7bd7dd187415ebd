#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the mock disaster feed generator.
//!
//! Generates batches of synthetic disaster posts and writes them as CSV or
//! JSON, or derives trend summaries and chart series from them. Running
//! without a subcommand opens an interactive menu.

mod commands;
mod interactive;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use disaster_feed_analytics::DEFAULT_MAX_WORDS;
use disaster_feed_cli_utils::LevelFilter;
use disaster_feed_disaster_models::{CategorySelector, DisasterCategory};

#[derive(Parser)]
#[command(name = "disaster_feed", about = "Mock disaster social-media feed generator")]
struct Cli {
    /// Log at info level unless `RUST_LOG` says otherwise
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a batch of mock posts
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
        /// File to write to (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Generate a batch and print its trend summary as JSON
    Trends {
        #[command(flatten)]
        generation: GenerationArgs,
        /// File to write to (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Generate a batch and print its chart series as JSON
    Charts {
        #[command(flatten)]
        generation: GenerationArgs,
        /// Maximum number of words in the word cloud series
        #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
        max_words: usize,
        /// File to write to (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List search keywords for a category (or "All")
    Keywords {
        /// Category name, case-insensitive (e.g., "flood", "All")
        category: Option<String>,
    },
    /// List the concrete disaster categories
    Categories,
}

/// Flags shared by every subcommand that generates a batch.
#[derive(Args, Clone)]
struct GenerationArgs {
    /// Number of posts to generate; negative values generate none
    #[arg(long, short = 'n', default_value_t = 100, allow_negative_numbers = true)]
    count: i64,
    /// Disaster category, or "All" to pick one per post
    #[arg(long, short, default_value_t = CategorySelector::All)]
    category: CategorySelector,
    /// Window start (RFC 3339); requires `--end`
    #[arg(long, requires = "end")]
    start: Option<DateTime<Utc>>,
    /// Window end (RFC 3339); requires `--start`
    #[arg(long, requires = "start")]
    end: Option<DateTime<Utc>>,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Generator settings file (overrides `DISASTER_FEED_CONFIG`)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let multi = disaster_feed_cli_utils::init_logger(if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    });

    let Some(command) = cli.command else {
        return interactive::run(&multi);
    };

    match command {
        Commands::Generate {
            generation,
            format,
            output,
        } => {
            let request = generation.into_request()?;
            let mut rng = request.rng();
            let batch = commands::generate(&multi, &request, &mut rng)?;
            commands::write_batch(&batch, format, output.as_deref())?;
        }
        Commands::Trends { generation, output } => {
            let request = generation.into_request()?;
            let mut rng = request.rng();
            let batch = commands::generate(&multi, &request, &mut rng)?;
            let summary = commands::trends(&batch, &mut rng);
            commands::write_json(&summary, output.as_deref())?;
        }
        Commands::Charts {
            generation,
            max_words,
            output,
        } => {
            let request = generation.into_request()?;
            let batch = commands::generate(&multi, &request, &mut request.rng())?;
            let charts = disaster_feed_analytics::chart_data(&batch, max_words);
            commands::write_json(&charts, output.as_deref())?;
        }
        Commands::Keywords { category } => {
            for keyword in keywords(category.as_deref()) {
                println!("{keyword}");
            }
        }
        Commands::Categories => {
            println!("{:<12} KEYWORDS", "CATEGORY");
            println!("{}", "-".repeat(50));
            for category in DisasterCategory::all() {
                println!(
                    "{:<12} {}",
                    category.as_ref(),
                    disaster_feed_keywords::category_keywords(*category).join(", ")
                );
            }
        }
    }

    Ok(())
}

/// Search terms for a category name. Unrecognized names get the general
/// terms; no name means "All".
fn keywords(category: Option<&str>) -> Vec<&'static str> {
    category.map_or_else(
        || disaster_feed_keywords::keywords_for_selector(CategorySelector::All),
        disaster_feed_keywords::keywords_for,
    )
}

impl GenerationArgs {
    fn into_request(self) -> Result<commands::GenerationRequest, commands::RequestError> {
        commands::GenerationRequest::new(
            self.count,
            self.category,
            self.start.zip(self.end),
            self.seed,
            self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "disaster_feed",
            "generate",
            "--count",
            "25",
            "--category",
            "flood",
            "--start",
            "2024-09-01T00:00:00Z",
            "--end",
            "2024-09-01T01:00:00Z",
            "--seed",
            "9",
            "--format",
            "json",
        ])
        .unwrap();

        let Some(Commands::Generate {
            generation, format, ..
        }) = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(generation.count, 25);
        assert_eq!(
            generation.category,
            CategorySelector::Category(DisasterCategory::Flood)
        );
        assert_eq!(generation.seed, Some(9));
        assert_eq!(format, OutputFormat::Json);
        assert!(generation.start.is_some() && generation.end.is_some());
    }

    #[test]
    fn negative_count_is_accepted() {
        let cli = Cli::try_parse_from(["disaster_feed", "trends", "--count", "-5"]).unwrap();
        let Some(Commands::Trends { generation, .. }) = cli.command else {
            panic!("expected trends");
        };
        assert_eq!(generation.count, -5);
    }

    #[test]
    fn start_without_end_is_rejected() {
        assert!(
            Cli::try_parse_from([
                "disaster_feed",
                "generate",
                "--start",
                "2024-09-01T00:00:00Z",
            ])
            .is_err()
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(
            Cli::try_parse_from(["disaster_feed", "generate", "--category", "volcano"]).is_err()
        );
    }

    #[test]
    fn unknown_keyword_category_lists_general_terms() {
        let cli = Cli::try_parse_from(["disaster_feed", "keywords", "volcano"]).unwrap();
        let Some(Commands::Keywords { category }) = cli.command else {
            panic!("expected keywords");
        };
        assert_eq!(
            keywords(category.as_deref()),
            disaster_feed_keywords::category_keywords(DisasterCategory::General)
        );
    }

    #[test]
    fn keywords_without_category_cover_all() {
        assert_eq!(
            keywords(None),
            disaster_feed_keywords::keywords_for_selector(CategorySelector::All)
        );
        assert_eq!(keywords(Some("FLOOD")), keywords(Some("flood")));
    }

    #[test]
    fn no_subcommand_is_interactive() {
        let cli = Cli::try_parse_from(["disaster_feed"]).unwrap();
        assert!(cli.command.is_none());
    }
}
