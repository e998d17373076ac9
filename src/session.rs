use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

use crate::output::WrappedWriter;
use crate::services::ForecastService;
use crate::temp_scale::TempScale;
use crate::zip_codes::ZipCodeTable;

pub const ANY_OTHER_ZIP_PROMPT: &str = "Any other zip code? (5 digits):";
pub const ENTER_TEMP_SCALE_PROMPT: &str =
    "Enter a temperature scale (Celsius [C] or Fahrenheit [F]):";
pub const ENTER_VALID_TEMP_SCALE_PROMPT: &str = "Please enter Celsius (C) or Fahrenheit (F):";
pub const ENTER_VALID_ZIP_PROMPT: &str = "Please enter a valid zip code:";
pub const ENTER_ZIP_PROMPT: &str = "Enter zip code (5 digits):";
pub const EXIT_MESSAGE: &str = "Exiting the program...";

const EXIT_INPUTS: &[&str] = &["no", "n", "quit", "q", "exit", "e"];
const YES_INPUTS: &[&str] = &["yes", "y"];

/// Print the goodbye message.
pub fn print_exit<W: Write>(output: &mut WrappedWriter<W>) -> io::Result<()> {
    output.print_wrapped(EXIT_MESSAGE)?;
    output.print_padding()
}

/// Goodbye after Ctrl-C: the pending prompt line is closed off first.
pub fn print_interrupted<W: Write>(output: &mut WrappedWriter<W>) -> io::Result<()> {
    output.print_padding()?;
    print_exit(output)
}

/// Interactive prompt loop: pick a scale, then print forecasts for zip codes
/// until the user quits or input ends.
pub struct ForecastSession<R, W> {
    input: Lines<R>,
    output: WrappedWriter<W>,
    zip_codes: ZipCodeTable,
    service: ForecastService,
}

impl<R, W> ForecastSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        input: R,
        output: WrappedWriter<W>,
        zip_codes: ZipCodeTable,
        service: ForecastService,
    ) -> Self {
        Self {
            input: input.lines(),
            output,
            zip_codes,
            service,
        }
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    pub async fn run(&mut self, scale: Option<TempScale>) -> io::Result<()> {
        // Scale from the command line, otherwise ask for it
        let scale = match scale {
            Some(scale) => scale,
            None => {
                self.output.print_wrapped(ENTER_TEMP_SCALE_PROMPT)?;
                match self.prompt_for_temp_scale().await? {
                    Some(scale) => scale,
                    None => return print_exit(&mut self.output),
                }
            }
        };
        debug!("Session running in {}", scale);

        self.output.print_wrapped(ENTER_ZIP_PROMPT)?;
        // One forecast per accepted zip code until the user quits
        while let Some(url) = self.prompt_for_url().await? {
            self.print_forecast(&url, scale).await?;
            self.output.print_wrapped(ANY_OTHER_ZIP_PROMPT)?;
        }
        print_exit(&mut self.output)
    }

    /// Print the forecast for a single zip code, or why there is none.
    pub async fn print_zip_code(&mut self, zip_code: &str, scale: TempScale) -> io::Result<()> {
        match self.zip_codes.lookup(zip_code).map(str::to_string) {
            Ok(url) => self.print_forecast(&url, scale).await,
            Err(e) => self.output.print_wrapped(&e.to_string()),
        }
    }

    async fn print_forecast(&mut self, url: &str, scale: TempScale) -> io::Result<()> {
        match self.service.forecast(url, scale).await {
            Ok(forecasts) => {
                for forecast in &forecasts {
                    self.output.print_wrapped(forecast)?;
                }
                Ok(())
            }
            Err(e) => {
                warn!("Forecast lookup failed: {}", e);
                self.output.print_wrapped(&e.user_message())
            }
        }
    }

    /// Next trimmed, lowercased line, or `None` at end of input.
    async fn read_input(&mut self) -> io::Result<Option<String>> {
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_lowercase()))
    }

    async fn prompt_for_temp_scale(&mut self) -> io::Result<Option<TempScale>> {
        while let Some(input) = self.read_input().await? {
            if EXIT_INPUTS.contains(&input.as_str()) {
                return Ok(None);
            }
            match input.parse::<TempScale>() {
                Ok(scale) => return Ok(Some(scale)),
                Err(e) => {
                    self.output.print_wrapped(&e.to_string())?;
                    self.output.print_wrapped(ENTER_VALID_TEMP_SCALE_PROMPT)?;
                }
            }
        }
        Ok(None)
    }

    async fn prompt_for_url(&mut self) -> io::Result<Option<String>> {
        while let Some(input) = self.read_input().await? {
            if EXIT_INPUTS.contains(&input.as_str()) {
                return Ok(None);
            }
            // "yes" to "Any other zip code?" just asks for the zip itself
            if YES_INPUTS.contains(&input.as_str()) {
                self.output.print_wrapped(ENTER_VALID_ZIP_PROMPT)?;
                continue;
            }

            match self.zip_codes.lookup(&input).map(str::to_string) {
                Ok(url) => return Ok(Some(url)),
                Err(e) => {
                    debug!("Rejected zip code input {:?}: {}", input, e);
                    self.output.print_wrapped(&e.to_string())?;
                    if e.is_input_error() {
                        self.output.print_wrapped(ENTER_VALID_ZIP_PROMPT)?;
                    } else {
                        self.output.print_wrapped(ANY_OTHER_ZIP_PROMPT)?;
                    }
                }
            }
        }
        Ok(None)
    }
}
