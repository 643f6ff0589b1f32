pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod logger;
pub mod path;
pub mod report;

use std::path::Path;

use csv::Writer;
use log::info;
use reqwest::Client;

pub use config::{GridLayout, ScrapeConfig};
pub use error::{FetchError, LocateError, PathError, ScrapeError};
pub use path::{ElementPath, NameSelectors};
pub use report::{ErrorReporter, LogReporter, RecordingReporter};

use extract::extract_names;
use fetch::{build_client, fetch_page};

pub struct Scraper<R = LogReporter> {
    config: ScrapeConfig,
    selectors: Vec<ElementPath>,
    expected_total: usize,
    client: Client,
    reporter: R,
}

impl Scraper<LogReporter> {
    pub fn new(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        Self::with_reporter(config, LogReporter)
    }
}

impl<R: ErrorReporter> Scraper<R> {
    pub fn with_reporter(config: ScrapeConfig, reporter: R) -> Result<Self, ScrapeError> {
        config.validate()?;
        let expected_total = config.expected_total()?;
        let selectors = NameSelectors::from_template(&config.name_path, &config.layout)
            .map_err(|source| ScrapeError::Path {
                path: config.name_path.clone(),
                source,
            })?;

        Ok(Self {
            config,
            selectors,
            expected_total,
            client: build_client()?,
            reporter,
        })
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Names from one listing page, misses dropped. A failed fetch is
    /// reported and contributes nothing.
    pub async fn scrape_page(&self, offset: usize) -> Vec<String> {
        let url = self.config.page_url(offset);

        match fetch_page(&self.client, &url).await {
            Ok(document) => extract_names(&document, &self.selectors, &self.reporter)
                .into_iter()
                .flatten()
                .collect(),
            Err(err) => {
                self.reporter.report(&err.to_string());
                Vec::new()
            }
        }
    }

    /// Every page in offset order, one request at a time.
    pub async fn collect_names(&self) -> Vec<String> {
        let mut names = Vec::new();

        // Validated at construction: per-page count is non-zero and the total fits.
        let offsets = (0..self.expected_total).step_by(self.config.results_per_page);
        for (page_index, offset) in offsets.enumerate() {
            info!(
                "Scraping page {} of {} (skip={}).",
                page_index + 1,
                self.config.page_count,
                offset
            );

            let page = self.scrape_page(offset).await;
            info!("Found {} names at skip={}.", page.len(), offset);
            names.extend(page);
        }

        names
    }

    /// Collects every page and checks the total against the configured count.
    pub async fn run(&self) -> Result<Vec<String>, ScrapeError> {
        let names = self.collect_names().await;
        verify_count(&names, self.expected_total)?;
        Ok(names)
    }
}

pub fn verify_count(names: &[String], expected: usize) -> Result<(), ScrapeError> {
    if names.len() == expected {
        Ok(())
    } else {
        Err(ScrapeError::CountMismatch {
            expected,
            actual: names.len(),
        })
    }
}

pub fn write_to_csv<P: AsRef<Path>>(names: &[String], path: P) -> Result<(), ScrapeError> {
    let mut writer = Writer::from_path(path)?;

    writer.write_record(["Name"])?;
    for name in names {
        writer.write_record([name])?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_check_reports_expected_and_actual() {
        let names = vec!["A".to_owned(), "B".to_owned()];
        assert!(verify_count(&names, 2).is_ok());

        match verify_count(&names, 3) {
            Err(ScrapeError::CountMismatch { expected, actual }) => {
                assert_eq!((expected, actual), (3, 2));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn per_page_out_of_step_with_the_grid_is_rejected() {
        let config = ScrapeConfig {
            results_per_page: 20,
            ..ScrapeConfig::default()
        };

        match Scraper::new(config) {
            Err(ScrapeError::LayoutMismatch { per_page, cells }) => {
                assert_eq!((per_page, cells), (20, 21));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected a layout mismatch"),
        }
    }

    #[test]
    fn overflowing_page_count_is_rejected() {
        let config = ScrapeConfig {
            page_count: usize::MAX,
            ..ScrapeConfig::default()
        };

        assert!(matches!(
            Scraper::new(config),
            Err(ScrapeError::Overflow { .. })
        ));
    }

    #[test]
    fn bad_name_path_is_rejected_up_front() {
        let config = ScrapeConfig {
            name_path: "div[{row}]".to_owned(),
            ..ScrapeConfig::default()
        };

        match Scraper::new(config) {
            Err(ScrapeError::Path { path, source }) => {
                assert_eq!(path, "div[{row}]");
                assert!(matches!(source, PathError::Relative(_)));
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("expected a path error"),
        }
    }
}
