use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use trucking_company_scraper::{config, logger, write_to_csv, ScrapeConfig, Scraper};

/// Collects trucking company names from the paginated listing.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Number of listing pages to fetch
    #[arg(long, default_value_t = config::PAGE_COUNT)]
    pages: usize,

    /// Names expected on each page; must match the listing grid
    #[arg(long, default_value_t = config::RESULTS_PER_PAGE)]
    per_page: usize,

    /// Listing endpoint, without the query string
    #[arg(long, default_value = config::BASE_URL)]
    base_url: String,

    /// Also write the names to this CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> (ScrapeConfig, Option<PathBuf>) {
        let config = ScrapeConfig {
            base_url: self.base_url,
            page_count: self.pages,
            results_per_page: self.per_page,
            ..ScrapeConfig::default()
        };
        (config, self.csv)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    logger::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let (config, csv_path) = args.into_config();
    let scraper = Scraper::new(config)?;
    let names = scraper.run().await?;

    if let Some(path) = csv_path {
        write_to_csv(&names, &path)
            .with_context(|| format!("Failed to write to csv {}", path.display()))?;
        info!("Wrote {} names to {}.", names.len(), path.display());
    }

    println!("{:#?}", names);

    Ok(())
}
