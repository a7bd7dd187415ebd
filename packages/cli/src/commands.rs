//! Shared plumbing behind the subcommands and the interactive menu.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use disaster_feed_classifier::LexiconClassifier;
use disaster_feed_cli_utils::{IndicatifProgress, MultiProgress};
use disaster_feed_disaster_models::CategorySelector;
use disaster_feed_mock::export::{self, ExportError};
use disaster_feed_mock::{GeneratorConfig, MockGenerator, RecordBatch, TimeWindow, TrendSummary};
use disaster_feed_mock_models::TimeWindowError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::OutputFormat;

/// Environment variable naming a generator settings file.
pub const CONFIG_ENV: &str = "DISASTER_FEED_CONFIG";

/// Errors in user-supplied generation parameters.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The window ends before it starts.
    #[error(transparent)]
    Window(#[from] TimeWindowError),
}

/// A validated generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub count: usize,
    pub selector: CategorySelector,
    pub window: Option<TimeWindow>,
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
}

impl GenerationRequest {
    /// Validates raw parameters. Negative counts become zero.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Window`] if `window` ends before it starts.
    pub fn new(
        count: i64,
        selector: CategorySelector,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
        seed: Option<u64>,
        config: Option<PathBuf>,
    ) -> Result<Self, RequestError> {
        if count < 0 {
            log::warn!("Negative count {count}; generating no records");
        }
        let count = usize::try_from(count.max(0)).unwrap_or(usize::MAX);

        let window = window
            .map(|(start, end)| TimeWindow::new(start, end))
            .transpose()?;

        Ok(Self {
            count,
            selector,
            window,
            seed,
            config,
        })
    }

    /// A seeded RNG when a seed was given, otherwise one seeded from the OS.
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }

    /// The settings file to load: the explicit path, else `DISASTER_FEED_CONFIG`.
    fn config_path(&self) -> Option<PathBuf> {
        self.config
            .clone()
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }
}

/// Loads the generator settings for `request`.
///
/// # Errors
///
/// Returns an error if the settings file cannot be read, parsed, or fails
/// validation.
pub fn load_generator(
    request: &GenerationRequest,
) -> Result<MockGenerator, Box<dyn std::error::Error>> {
    let config = match request.config_path() {
        Some(path) => {
            log::info!("Loading generator settings from {}", path.display());
            GeneratorConfig::from_file(&path)?
        }
        None => GeneratorConfig::default(),
    };
    Ok(MockGenerator::with_config(config, LexiconClassifier)?)
}

/// Generates the batch `request` describes, drawing a progress bar on `multi`.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded or classification
/// fails.
pub fn generate(
    multi: &MultiProgress,
    request: &GenerationRequest,
    rng: &mut StdRng,
) -> Result<RecordBatch, Box<dyn std::error::Error>> {
    let generator = load_generator(request)?;
    let progress = IndicatifProgress::posts_bar(multi, &request.selector.to_string());

    let batch = generator.generate_batch_with_progress(
        rng,
        request.count,
        request.selector,
        request.window,
        progress.as_ref(),
    )?;

    log::info!("Generated {} {} posts", batch.len(), request.selector);

    Ok(batch)
}

/// Summarizes `batch`, logging the most used hashtag.
pub fn trends(batch: &RecordBatch, rng: &mut StdRng) -> TrendSummary {
    let summary = disaster_feed_mock::summarize_trends(batch, rng);
    if let Some((tag, count)) = summary.ranked_hashtags().first() {
        log::info!("Top hashtag: #{tag} ({count} uses)");
    }
    summary
}

fn open_output(output: Option<&Path>) -> io::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    })
}

/// Writes `batch` in `format` to `output`, or stdout.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn write_batch(
    batch: &RecordBatch,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), ExportError> {
    let writer = open_output(output)?;
    match format {
        OutputFormat::Csv => export::write_csv(batch, writer)?,
        OutputFormat::Json => export::write_json(batch, writer)?,
    }
    if let Some(path) = output {
        log::info!("Wrote {} records to {}", batch.len(), path.display());
    }
    Ok(())
}

/// Writes `value` as pretty JSON to `output`, or stdout.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or writing fails.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<(), ExportError> {
    let mut writer = open_output(output)?;
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use disaster_feed_disaster_models::DisasterCategory;

    use super::*;

    fn hour(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, h, 0, 0).unwrap()
    }

    fn flood_request(count: i64, seed: u64) -> GenerationRequest {
        GenerationRequest::new(
            count,
            DisasterCategory::Flood.into(),
            Some((hour(0), hour(1))),
            Some(seed),
            None,
        )
        .unwrap()
    }

    #[test]
    fn negative_count_becomes_zero() {
        let request = GenerationRequest::new(-3, CategorySelector::All, None, None, None).unwrap();
        assert_eq!(request.count, 0);
        assert!(request.window.is_none());
    }

    #[test]
    fn reversed_window_is_rejected() {
        let result = GenerationRequest::new(
            10,
            CategorySelector::All,
            Some((hour(2), hour(1))),
            None,
            None,
        );
        assert!(matches!(result, Err(RequestError::Window(_))));
    }

    #[test]
    fn seeded_requests_generate_identical_batches() {
        let multi = MultiProgress::new();
        let request = flood_request(15, 42);

        let first = generate(&multi, &request, &mut request.rng()).unwrap();
        let second = generate(&multi, &request, &mut request.rng()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 15);
        for record in &first {
            assert_eq!(record.disaster_type, DisasterCategory::Flood);
            assert!(record.created_at >= hour(0) && record.created_at <= hour(1));
        }
    }

    #[test]
    fn explicit_config_file_is_loaded() {
        let path = std::env::temp_dir().join(format!(
            "disaster_feed_cli_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "mention_probability = 0.0\n").unwrap();

        let mut request = flood_request(50, 1);
        request.config = Some(path.clone());
        let multi = MultiProgress::new();
        let batch = generate(&multi, &request, &mut request.rng()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(batch.iter().all(|record| record.mentions.is_empty()));
    }

    #[test]
    fn trends_count_every_hashtag() {
        let request = flood_request(40, 3);
        let mut rng = request.rng();
        let batch = generate(&MultiProgress::new(), &request, &mut rng).unwrap();
        let summary = trends(&batch, &mut rng);

        let tagged: usize = batch.iter().map(|record| record.hashtags.len()).sum();
        let ranked = summary.ranked_hashtags();
        assert_eq!(ranked.iter().map(|(_, count)| *count).sum::<u64>(), tagged as u64);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let mut request = flood_request(1, 1);
        request.config = Some(PathBuf::from("/nonexistent/disaster_feed.toml"));
        assert!(load_generator(&request).is_err());
    }

    #[test]
    fn batch_written_as_csv_file() {
        let request = flood_request(4, 7);
        let batch = generate(&MultiProgress::new(), &request, &mut request.rng()).unwrap();

        let path = std::env::temp_dir().join(format!(
            "disaster_feed_cli_batch_{}.csv",
            std::process::id()
        ));
        write_batch(&batch, OutputFormat::Csv, Some(&path)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(text.lines().count(), 5);
        assert!(text.starts_with("id,text,"));
    }
}
