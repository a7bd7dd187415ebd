//! Menu-driven front end using `dialoguer`, for running the generator
//! without memorizing flags.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use disaster_feed_analytics::DEFAULT_MAX_WORDS;
use disaster_feed_cli_utils::MultiProgress;
use disaster_feed_disaster_models::{CategorySelector, DisasterCategory};

use crate::OutputFormat;
use crate::commands::{self, GenerationRequest};

enum Action {
    Generate,
    Trends,
    Charts,
    Keywords,
    Categories,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Generate,
        Self::Trends,
        Self::Charts,
        Self::Keywords,
        Self::Categories,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Generate => "Generate mock posts",
            Self::Trends => "Summarize trends",
            Self::Charts => "Build chart data",
            Self::Keywords => "Show search keywords",
            Self::Categories => "List disaster categories",
        }
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if a prompt fails or the selected operation fails.
pub fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("Disaster Feed Generator");
    println!();

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Action::ALL[idx] {
        Action::Generate => {
            let request = prompt_request()?;
            let format = prompt_format()?;
            let output = prompt_output()?;
            let batch = commands::generate(multi, &request, &mut request.rng())?;
            commands::write_batch(&batch, format, output.as_deref())?;
        }
        Action::Trends => {
            let request = prompt_request()?;
            let output = prompt_output()?;
            let mut rng = request.rng();
            let batch = commands::generate(multi, &request, &mut rng)?;
            let summary = commands::trends(&batch, &mut rng);
            commands::write_json(&summary, output.as_deref())?;
        }
        Action::Charts => {
            let request = prompt_request()?;
            let max_words: usize = Input::new()
                .with_prompt("Maximum words in the word cloud")
                .default(DEFAULT_MAX_WORDS)
                .interact_text()?;
            let output = prompt_output()?;
            let batch = commands::generate(multi, &request, &mut request.rng())?;
            let charts = disaster_feed_analytics::chart_data(&batch, max_words);
            commands::write_json(&charts, output.as_deref())?;
        }
        Action::Keywords => {
            let selector = prompt_selector()?;
            println!(
                "{}",
                disaster_feed_keywords::keywords_for_selector(selector).join(", ")
            );
        }
        Action::Categories => {
            for category in DisasterCategory::all() {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn prompt_selector() -> Result<CategorySelector, Box<dyn std::error::Error>> {
    let mut options = vec![CategorySelector::All];
    options.extend(DisasterCategory::all().iter().copied().map(CategorySelector::from));
    let labels: Vec<String> = options.iter().map(ToString::to_string).collect();

    let idx = Select::new()
        .with_prompt("Disaster category")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[idx])
}

/// Prompts for category, count and seed. The window is left to the
/// generator's configured default.
fn prompt_request() -> Result<GenerationRequest, Box<dyn std::error::Error>> {
    let selector = prompt_selector()?;
    let count: i64 = Input::new()
        .with_prompt("Number of posts")
        .default(100)
        .interact_text()?;
    let seed = prompt_optional_u64("Seed (empty for random)")?;

    Ok(GenerationRequest::new(count, selector, None, seed, None)?)
}

fn prompt_format() -> Result<OutputFormat, Box<dyn std::error::Error>> {
    let idx = Select::new()
        .with_prompt("Output format")
        .items(&["CSV", "JSON"])
        .default(0)
        .interact()?;

    Ok(if idx == 0 {
        OutputFormat::Csv
    } else {
        OutputFormat::Json
    })
}

fn prompt_output() -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt("Output file (empty for stdout)")
        .allow_empty(true)
        .interact_text()?;

    let trimmed = input.trim();
    Ok((!trimmed.is_empty()).then(|| PathBuf::from(trimmed)))
}

fn prompt_optional_u64(prompt: &str) -> Result<Option<u64>, Box<dyn std::error::Error>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    if input.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(input.trim().parse()?))
    }
}
