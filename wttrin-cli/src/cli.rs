use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use inquire::Text;
use tokio::io::{self, AsyncWriteExt};
use tracing::{info, warn};
use wttrin_core::{Config, Forecast, ForecastRequest, ForecastStream, Mode, WttrClient, WttrError};

/// Output path meaning "write to stdout".
const STDOUT: &str = "-";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wttrin", version, about = "wttr.in weather forecasts in the terminal")]
pub struct Cli {
    /// Log requests and responses to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every forecast command.
#[derive(Debug, Args)]
pub struct Target {
    /// City, airport code, landmark (`~Eiffel+tower`) or coordinates.
    pub location: Option<String>,

    /// Language code, e.g. "zh", "en", "de".
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Display flags forwarded to wttr.in, e.g. `-q 0,A,Q`.
    #[arg(short = 'q', long = "flags", value_delimiter = ',')]
    pub flags: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default language and location.
    Configure,

    /// Print a one-line forecast.
    Line {
        #[command(flatten)]
        target: Target,

        /// Format template, e.g. "%l: %c %t %w".
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print the ASCII forecast report.
    Ascii {
        #[command(flatten)]
        target: Target,
    },

    /// Save the forecast as a PNG image.
    Image {
        #[command(flatten)]
        target: Target,

        /// Output file, `-` for stdout. Defaults to a timestamped file name.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the body of an arbitrary path, e.g. "Chengdu?0ATp".
    Raw {
        path: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Line { target, format } => {
                let client = load_client()?;
                let request = target.request(Mode::Line).with_format(format.unwrap_or_default());
                print_forecast(&client, &request, None).await.map_err(with_help)
            }
            Command::Ascii { target } => {
                let client = load_client()?;
                print_forecast(&client, &target.request(Mode::Ascii), None).await.map_err(with_help)
            }
            Command::Image { target, output } => {
                let client = load_client()?;
                let request = target.request(Mode::Image);
                let output = output.unwrap_or_else(|| {
                    default_image_path(request.resolved_location(client.defaults()))
                });
                print_forecast(&client, &request, Some(&output)).await.map_err(with_help)
            }
            Command::Raw { path } => {
                let client = load_client()?;
                let stream = client.fetch_raw(&path).await.map_err(with_help)?;
                write_stream(stream, Path::new(STDOUT)).await.map_err(with_help)
            }
        }
    }
}

impl Target {
    fn request(self, mode: Mode) -> ForecastRequest {
        ForecastRequest::new(mode)
            .with_language(self.lang.unwrap_or_default())
            .with_location(self.location.unwrap_or_default())
            .with_flags(&self.flags)
    }
}

fn load_client() -> anyhow::Result<WttrClient> {
    let config = Config::load()?;
    WttrClient::from_config(&config).context("Failed to create wttr.in client")
}

async fn print_forecast(
    client: &WttrClient,
    request: &ForecastRequest,
    output: Option<&Path>,
) -> wttrin_core::Result<()> {
    match client.forecast(request).await? {
        Forecast::Text(text) => {
            let mut stdout = io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n").await?;
            }
            stdout.flush().await?;
            Ok(())
        }
        Forecast::Image(stream) => write_stream(stream, output.unwrap_or(Path::new(STDOUT))).await,
    }
}

async fn write_stream(stream: ForecastStream, output: &Path) -> wttrin_core::Result<()> {
    if output == Path::new(STDOUT) {
        stream.copy_to(&mut io::stdout()).await?;
        return Ok(());
    }

    let mut file = tokio::fs::File::create(output).await?;
    let result = stream.copy_to(&mut file).await;
    drop(file);
    let written = discard_partial(output, result).await?;
    info!(path = %output.display(), bytes = written, "saved forecast image");
    eprintln!("Saved {}", output.display());

    Ok(())
}

/// Remove a file left behind by a failed download.
async fn discard_partial<T>(path: &Path, result: wttrin_core::Result<T>) -> wttrin_core::Result<T> {
    if result.is_err() {
        let removed = tokio::fs::remove_file(path).await;
        if let Err(err) = removed {
            warn!(path = %path.display(), %err, "failed to remove partial image");
        }
    }
    result
}

fn default_image_path(location: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let location: String = location
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();

    PathBuf::from(format!("wttrin_{location}_{stamp}.png"))
}

fn with_help(err: WttrError) -> anyhow::Error {
    match err.help_text() {
        Some(help) => anyhow::anyhow!("{:#}\nHint: {help}", anyhow::Error::new(err)),
        None => err.into(),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;
    let defaults = config.defaults();

    let language = Text::new("Default language:")
        .with_default(&defaults.language)
        .with_help_message("wttr.in language code, e.g. zh, en, de, fr")
        .prompt()
        .context("Failed to read language")?;

    let location = Text::new("Default location:")
        .with_default(&defaults.location)
        .with_help_message("City name, airport code or coordinates")
        .prompt()
        .context("Failed to read location")?;

    config.language = Some(language.trim().to_string());
    config.location = Some(location.trim().to_string());

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}
