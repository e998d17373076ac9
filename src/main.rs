use std::io;

use clap::{ArgGroup, Parser};
use tokio::io::BufReader;
use tracing::{debug, instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use forecast_command::config::Config;
use forecast_command::converter::UnitConverter;
use forecast_command::extractor::ForecastExtractor;
use forecast_command::fetcher::ForecastFetcher;
use forecast_command::output::WrappedWriter;
use forecast_command::services::{ForecastReport, ForecastService};
use forecast_command::session::{self, ForecastSession};
use forecast_command::temp_scale::TempScale;
use forecast_command::zip_codes::ZipCodeTable;

#[derive(Parser, Debug)]
#[command(name = "forecast")]
#[command(about = "Print the weather.gov forecast for a US zip code", long_about = None)]
#[command(group(ArgGroup::new("scale").args(["celsius", "fahrenheit"])))]
struct Cli {
    /// Get the forecast in Celsius
    #[arg(short, long)]
    celsius: bool,

    /// Get the forecast in Fahrenheit
    #[arg(short, long)]
    fahrenheit: bool,

    /// Print a JSON report per zip code instead of wrapped text
    #[arg(long, requires = "zip_codes")]
    json: bool,

    /// Zip codes to look up once, skipping the interactive prompt
    zip_codes: Vec<String>,
}

impl Cli {
    fn scale(&self) -> Option<TempScale> {
        if self.celsius {
            Some(TempScale::Celsius)
        } else if self.fahrenheit {
            Some(TempScale::Fahrenheit)
        } else {
            None
        }
    }
}

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout only carries forecasts
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let cli = Cli::parse();
    let config = Config::from_env();
    debug!("Starting forecast with config: {:?}", config);

    // Load zip code table
    let zip_codes = ZipCodeTable::load(&config.zip_codes_file)?;

    // Create fetcher and service
    let fetcher = match &config.base_url {
        Some(base_url) => ForecastFetcher::with_base_url(config.request_timeout(), base_url.clone())?,
        None => ForecastFetcher::new(config.request_timeout())?,
    };
    let service = ForecastService::new(fetcher, ForecastExtractor::new(), UnitConverter::new());

    // Create output writer
    let output = match config.wrap_width {
        Some(width) => WrappedWriter::new(io::stdout(), width),
        None => WrappedWriter::for_terminal(io::stdout()),
    };
    let scale = cli.scale().or(config.default_scale);

    if cli.json {
        return print_json_reports(&zip_codes, &service, &cli.zip_codes, scale).await;
    }

    let mut session = ForecastSession::new(
        BufReader::new(tokio::io::stdin()),
        output,
        zip_codes,
        service,
    );

    // One-shot lookups for zip codes given on the command line
    if !cli.zip_codes.is_empty() {
        let scale = scale.unwrap_or(TempScale::Fahrenheit);
        for zip_code in &cli.zip_codes {
            session.print_zip_code(zip_code, scale).await?;
        }
        return Ok(());
    }

    // Interactive session until the user quits or presses Ctrl-C
    tokio::select! {
        result = session.run(scale) => result?,
        _ = tokio::signal::ctrl_c() => {
            let mut output = WrappedWriter::for_terminal(io::stdout());
            session::print_interrupted(&mut output)?;
            // The pending stdin read cannot be cancelled, so dropping the
            // runtime would block until the next newline
            std::process::exit(0);
        }
    }

    Ok(())
}

async fn print_json_reports(
    zip_codes: &ZipCodeTable,
    service: &ForecastService,
    requested: &[String],
    scale: Option<TempScale>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scale = scale.unwrap_or(TempScale::Fahrenheit);
    let mut reports = Vec::with_capacity(requested.len());

    for zip_code in requested {
        let url = zip_codes.lookup(zip_code)?;
        reports.push(ForecastReport {
            zip_code: zip_code.trim().to_string(),
            scale,
            forecasts: service.forecast(url, scale).await?,
        });
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
