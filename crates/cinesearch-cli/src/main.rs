//! cinesearch - search movies, TV series and episodes on OMDb.

/// Application configuration (TOML).
mod config;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use cinesearch_api::omdb::{LocalOmdbApi, OmdbClient, SearchParams, TitleType, imdb_url};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, log_file_path, resolve_api_key, resolve_config_path};

/// Environment variable holding the OMDb API key.
const API_KEY_ENV: &str = "OMDB_API_KEY";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// OMDb API key (overrides `OMDB_API_KEY` and the config file).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Subcommand to run (default: tui).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive search UI.
    Tui(TuiArgs),
    /// Search titles and print the first page of results.
    Search(SearchArgs),
    /// Show full details for one title.
    Details(DetailsArgs),
}

/// Arguments for the `tui` subcommand.
#[derive(clap::Args, Default)]
struct TuiArgs {
    /// Initial search query.
    #[arg(long)]
    query: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Filter by release year.
    #[arg(long)]
    year: Option<u32>,
    /// Filter by type: movie, series or episode.
    #[arg(long = "type")]
    kind: Option<TitleType>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// IMDb ID (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
}

/// Builds the OMDb client from flags, environment and config.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the client fails to build.
fn build_omdb_client(api_key: Option<&str>, config_path: &Path) -> Result<OmdbClient> {
    let config = AppConfig::load(config_path)?;
    let env_key = std::env::var(API_KEY_ENV).ok();
    let key = resolve_api_key(api_key, env_key.as_deref(), &config);

    let mut builder = OmdbClient::builder().api_key(key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(url) = config.base_url()? {
        tracing::debug!(%url, "using configured OMDb endpoint");
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build OMDb client")
}

/// Runs the interactive UI.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or restored.
async fn run_tui(args: TuiArgs, client: OmdbClient) -> Result<()> {
    tracing::info!("starting interactive UI");
    cinesearch_tui::run_app(client, args.query).await
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails or OMDb reports no match.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, client: &OmdbClient) -> Result<()> {
    let mut params = SearchParams::new(&args.query);
    if let Some(year) = args.year {
        params = params.year(year.to_string());
    }
    if let Some(kind) = args.kind {
        params = params.kind(kind);
    }
    if params.is_blank() {
        bail!("--query must not be blank");
    }

    let response = client
        .search(&params)
        .await
        .context("OMDb search request failed")?;
    if !response.response {
        bail!(
            "{}",
            response.error.as_deref().unwrap_or("No movies found")
        );
    }

    tracing::info!(
        "Total results: {}",
        response.total_results.as_deref().unwrap_or("0")
    );
    tracing::info!("imdbID\t\tType\tYear\t\tTitle");
    for item in &response.search {
        tracing::info!("{}\t{}\t{}\t\t{}", item.id, item.kind, item.year, item.title);
    }

    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails or OMDb reports no match.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, client: &OmdbClient) -> Result<()> {
    let response = client
        .lookup(&args.id)
        .await
        .context("OMDb lookup request failed")?;
    if !response.response {
        bail!(
            "{}",
            response
                .error
                .as_deref()
                .unwrap_or("Failed to fetch movie details")
        );
    }

    let detail = &response.detail;
    let summary = &detail.summary;
    tracing::info!("{} ({}) [{}]", summary.title, summary.year, summary.kind);
    tracing::info!("Runtime: {}  Rated: {}", detail.runtime, detail.rated);
    tracing::info!("Genre: {}", detail.genres().join(", "));
    if let Some(rating) = detail.imdb_rating.as_deref() {
        tracing::info!(
            "IMDb rating: {rating} ({} votes)",
            detail.imdb_votes.as_deref().unwrap_or("0")
        );
    }
    for rating in &detail.ratings {
        tracing::info!("{}: {} ({:?})", rating.label(), rating.value, rating.tier());
    }
    tracing::info!("Director: {}", detail.director);
    tracing::info!("Writer: {}", detail.writer);
    tracing::info!("Cast: {}", detail.actors);
    tracing::info!("Country: {}", detail.country);
    tracing::info!("Awards: {}", detail.awards);
    if let Some(box_office) = detail.box_office.as_deref() {
        tracing::info!("Box office: {box_office}");
    }
    tracing::info!("---");
    tracing::info!("{}", detail.plot);
    tracing::info!("{}", imdb_url(&summary.id));

    Ok(())
}

/// Log output target: stdout for one-shot commands, a file while the
/// terminal UI owns the screen.
fn log_writer(tui: bool, config_path: &Path) -> Result<BoxMakeWriter> {
    if !tui {
        return Ok(BoxMakeWriter::new(std::io::stdout));
    }
    let path = log_file_path(config_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Installs the global tracing subscriber.
fn init_tracing(writer: BoxMakeWriter, ansi: bool) {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Tui(TuiArgs::default()));
    let config_path = resolve_config_path(cli.dir.as_ref())?;

    let tui = matches!(command, Commands::Tui(_));
    init_tracing(log_writer(tui, &config_path)?, !tui);

    let client = build_omdb_client(cli.api_key.as_deref(), &config_path)?;
    match command {
        Commands::Tui(args) => run_tui(args, client).await,
        Commands::Search(args) => run_search(&args, &client).await,
        Commands::Details(args) => run_details(&args, &client).await,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[test]
    fn test_tui_log_writer_appends_to_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        // Act
        let writer = log_writer(true, &config_path).unwrap();
        writer.make_writer().write_all(b"first\n").unwrap();
        let writer = log_writer(true, &config_path).unwrap();
        writer.make_writer().write_all(b"second\n").unwrap();

        // Assert
        let content = std::fs::read_to_string(log_file_path(&config_path)).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_one_shot_log_writer_creates_no_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        // Act
        let _writer = log_writer(false, &config_path).unwrap();

        // Assert
        assert!(!log_file_path(&config_path).exists());
    }
}
