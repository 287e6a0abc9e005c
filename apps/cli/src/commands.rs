//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use topicpress_core::{
    BatchOptions, BatchRunner, BatchSummary, FailedTopic, ProgressReporter, write_indexes,
};
use topicpress_shared::{
    AppConfig, Catalog, TopicPressError, init_config, load_catalog, load_config,
    load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// TopicPress: batch-generate a documentation directory from a topic catalog.
#[derive(Parser)]
#[command(
    name = "topicpress",
    version,
    about = "Generate directory pages for every topic in a catalog using an LLM.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.topicpress/topicpress.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Generate a page for every topic, then rebuild the indexes.
    Generate {
        /// Catalog file (TOML).
        #[arg(long)]
        catalog: PathBuf,

        /// Output directory (defaults to config `defaults.output_dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Only generate these output ids (comma-separated).
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,

        /// Render date, YYYY-MM-DD (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Skip writing index pages and the nav snippet.
        #[arg(long)]
        no_indexes: bool,
    },

    /// Rebuild index pages and the nav snippet only. Needs no API key.
    Index {
        /// Catalog file (TOML).
        #[arg(long)]
        catalog: PathBuf,

        /// Output directory (defaults to config `defaults.output_dir`).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Render date, YYYY-MM-DD (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Inspect a catalog file.
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Catalog subcommands.
#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// Load and validate a catalog.
    Check {
        #[arg(long)]
        catalog: PathBuf,
    },
    /// List topics grouped by category.
    List {
        #[arg(long)]
        catalog: PathBuf,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "topicpress=info",
        1 => "topicpress=debug",
        _ => "topicpress=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config;
    match cli.command {
        Command::Generate {
            catalog,
            out,
            only,
            date,
            no_indexes,
        } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_generate(&config, &catalog, out, only, date, !no_indexes).await
        }
        Command::Index { catalog, out, date } => {
            let config = resolve_config(config_path.as_deref())?;
            cmd_index(&config, &catalog, out, date)
        }
        Command::Catalog { action } => match action {
            CatalogAction::Check { catalog } => cmd_catalog_check(&catalog),
            CatalogAction::List { catalog } => cmd_catalog_list(&catalog),
        },
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn resolve_output_dir(config: &AppConfig, out: Option<PathBuf>) -> PathBuf {
    out.unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir))
}

fn open_catalog(path: &Path) -> Result<Catalog> {
    load_catalog(path).wrap_err_with(|| format!("could not load catalog '{}'", path.display()))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_generate(
    config: &AppConfig,
    catalog_path: &Path,
    out: Option<PathBuf>,
    only: Vec<String>,
    date: Option<NaiveDate>,
    with_indexes: bool,
) -> Result<ExitCode> {
    let catalog = open_catalog(catalog_path)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let options = BatchOptions {
        output_dir: resolve_output_dir(config, out),
        only,
        write_indexes: with_indexes,
    };

    // Credential check happens here, before any file is touched.
    let runner = match BatchRunner::from_config(config, &catalog, options) {
        Ok(runner) => runner,
        Err(e) => match precondition_exit(&e) {
            Some(code) => {
                error!(error = %e, "cannot start batch");
                return Ok(ExitCode::from(code));
            }
            None => return Err(e.into()),
        },
    };

    info!(
        catalog = %catalog_path.display(),
        topics = catalog.topics.len(),
        %date,
        "generating directory pages"
    );

    let reporter = CliProgress::new();
    let summary = runner.run(&catalog, date, &reporter).await?;

    print_summary(
        &summary,
        config.generation.cost_per_topic_usd,
        catalog_path,
        &runner.options().output_dir,
        catalog.essentials.as_ref().map(|e| e.nav_file.as_str()),
    );

    Ok(ExitCode::from(exit_status(&summary)))
}

fn cmd_index(
    config: &AppConfig,
    catalog_path: &Path,
    out: Option<PathBuf>,
    date: Option<NaiveDate>,
) -> Result<ExitCode> {
    let catalog = open_catalog(catalog_path)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let output_dir = resolve_output_dir(config, out);

    let report = write_indexes(&catalog, date, &output_dir)?;

    println!();
    println!("  Index pages written to {}", output_dir.display());
    for name in &report.written {
        println!("    {name}");
    }
    if !report.failed.is_empty() {
        println!("  Failed:");
        for name in &report.failed {
            println!("    {name}");
        }
        println!();
        return Ok(ExitCode::FAILURE);
    }
    println!();

    Ok(ExitCode::SUCCESS)
}

fn cmd_catalog_check(catalog_path: &Path) -> Result<ExitCode> {
    let catalog = open_catalog(catalog_path)?;
    println!(
        "Catalog OK: {} topics in {} categories (style: {})",
        catalog.topics.len(),
        catalog.categories().len(),
        catalog.style
    );
    if let Some(essentials) = &catalog.essentials {
        let curated: usize = essentials.sections.iter().map(|s| s.entries.len()).sum();
        println!(
            "Essentials: {} curated entries in {} sections",
            curated,
            essentials.sections.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_catalog_list(catalog_path: &Path) -> Result<ExitCode> {
    let catalog = open_catalog(catalog_path)?;
    for (category, members) in catalog.group_by_category() {
        println!("{category} ({})", members.len());
        for topic in members {
            println!("  {:<32} {}", topic.output_id, topic.title);
        }
        println!();
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_config_init() -> Result<ExitCode> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_config_show(path: Option<&Path>) -> Result<ExitCode> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// Summary output
// ---------------------------------------------------------------------------

/// `0` when any page was produced, `1` when none were.
fn exit_status(summary: &BatchSummary) -> u8 {
    if summary.is_success() { 0 } else { 1 }
}

/// Exit code for errors that stop a batch before any topic is attempted.
fn precondition_exit(err: &TopicPressError) -> Option<u8> {
    err.is_precondition().then_some(2)
}

fn estimated_cost(summary: &BatchSummary, cost_per_topic_usd: f64) -> f64 {
    summary.attempted() as f64 * cost_per_topic_usd
}

fn print_summary(
    summary: &BatchSummary,
    cost_per_topic_usd: f64,
    catalog_path: &Path,
    output_dir: &Path,
    nav_file: Option<&str>,
) {
    println!();
    println!("  Generation complete");
    println!("  Generated: {}", summary.generated.len());
    println!("  Failed:    {}", summary.failed.len());
    if summary.skipped > 0 {
        println!("  Skipped:   {}", summary.skipped);
    }
    println!("  Indexes:   {}", summary.indexes_written.len());
    println!("  Output:    {}", output_dir.display());
    println!(
        "  Est. cost: ${:.2}",
        estimated_cost(summary, cost_per_topic_usd)
    );

    if !summary.failed.is_empty() {
        println!();
        println!("  Failed topics:");
        for failed in &summary.failed {
            println!("    - {} ({})", failed.title, failed.kind);
        }
        let ids: Vec<&str> = summary.failed.iter().map(|f| f.output_id.as_str()).collect();
        println!();
        println!(
            "  Retry with: topicpress generate --catalog {} --only {}",
            catalog_path.display(),
            ids.join(",")
        );
    }

    if !summary.index_failures.is_empty() {
        println!();
        println!("  Index files not written:");
        for name in &summary.index_failures {
            println!("    - {name}");
        }
    }

    if summary.is_success() {
        println!();
        println!("  Next steps:");
        println!("    1. Review the generated pages for accuracy");
        if let Some(nav) = nav_file {
            println!("    2. Add the navigation from {nav} to your home page");
            println!("    3. Render and publish the site");
        } else {
            println!("    2. Render and publish the site");
        }
    }
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn topic_started(&self, title: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Generating [{current}/{total}] {title}"));
    }

    fn topic_written(&self, output_id: &str) {
        self.spinner.println(format!("  ✓ {output_id}"));
    }

    fn topic_failed(&self, failure: &FailedTopic) {
        self.spinner.println(format!(
            "  ✗ {} ({} failed): {}",
            failure.title, failure.kind, failure.reason
        ));
    }

    fn done(&self, _summary: &BatchSummary) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topicpress_core::FailureKind;

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "topicpress",
            "generate",
            "--catalog",
            "catalogs/wildfire-models.toml",
            "--only",
            "farsite,flammap",
            "--date",
            "2025-06-15",
            "--no-indexes",
        ])
        .unwrap();

        match cli.command {
            Command::Generate {
                catalog,
                only,
                date,
                no_indexes,
                out,
            } => {
                assert_eq!(catalog, PathBuf::from("catalogs/wildfire-models.toml"));
                assert_eq!(only, ["farsite", "flammap"]);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 15));
                assert!(no_indexes);
                assert!(out.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn rejects_bad_date() {
        assert!(
            Cli::try_parse_from([
                "topicpress",
                "index",
                "--catalog",
                "c.toml",
                "--date",
                "June 15"
            ])
            .is_err()
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "topicpress",
            "catalog",
            "check",
            "--catalog",
            "c.toml",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.log_format, LogFormat::Json));
    }

    #[test]
    fn output_dir_flag_overrides_config() {
        let config = AppConfig::default();
        assert_eq!(resolve_output_dir(&config, None), PathBuf::from("."));
        assert_eq!(
            resolve_output_dir(&config, Some("site".into())),
            PathBuf::from("site")
        );
    }

    #[test]
    fn cost_counts_attempted_topics() {
        let summary = BatchSummary {
            generated: vec!["a".into(), "c".into()],
            failed: vec![FailedTopic {
                output_id: "b".into(),
                title: "Topic B".into(),
                kind: FailureKind::Generation,
                reason: "HTTP 500".into(),
            }],
            ..BatchSummary::default()
        };
        assert!((estimated_cost(&summary, 0.15) - 0.45).abs() < 1e-9);
        assert_eq!(exit_status(&summary), 0);
        assert_eq!(exit_status(&BatchSummary::default()), 1);
    }

    #[test]
    fn missing_credential_exits_with_two() {
        let missing = TopicPressError::MissingCredential {
            var: "OPENAI_API_KEY".into(),
        };
        assert_eq!(precondition_exit(&missing), Some(2));
        assert_eq!(
            precondition_exit(&TopicPressError::config("bad base_url")),
            None
        );
        assert_eq!(
            precondition_exit(&TopicPressError::Network("refused".into())),
            None
        );
    }
}
