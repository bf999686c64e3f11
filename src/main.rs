use analytics::{AnalyticsEngine, Dashboard, Selection};
use anyhow::Context;
use clap::{Parser, Subcommand};
use core_types::{Dimension, StarPolicy};
use data_source::{DATASET, SalesSheet};
use std::path::PathBuf;

mod render;

/// The main entry point for the sales dashboard.
fn main() -> anyhow::Result<()> {
    // Optional .env file with SALES__* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = configuration::init_tracing(&config.logging)?;

    let sheet = SalesSheet::from_settings(&config.data_source);
    let records = DATASET
        .get_or_load(&sheet)
        .with_context(|| format!("Failed to load sales data from {}", sheet.path().display()))?;

    let star_policy = cli.star_policy.unwrap_or(config.display.star_policy);
    let dashboard = Dashboard::new(records, AnalyticsEngine::new(star_policy));

    // Execute the appropriate command
    match cli.command {
        Commands::Summary(args) => handle_summary(&dashboard, args, &config.display.currency_label),
        Commands::Options(args) => handle_options(&dashboard, args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Filter retail transactions and show their KPIs and breakdowns.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = configuration::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Overrides `display.star_policy` from the configuration file.
    #[arg(long, global = true, value_enum)]
    star_policy: Option<StarPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show KPIs and chart data for a filter selection.
    Summary(SummaryArgs),
    /// List the values each filter accepts.
    Options(OptionsArgs),
}

#[derive(Parser)]
struct SummaryArgs {
    /// Keep only these cities (repeatable). Omit to keep every city.
    #[arg(long = "city")]
    cities: Vec<String>,

    /// Keep only these customer types (repeatable). Omit to keep every type.
    #[arg(long = "customer-type")]
    customer_types: Vec<String>,

    /// Keep only these genders (repeatable). Omit to keep every gender.
    #[arg(long = "gender")]
    genders: Vec<String>,

    /// Print the full report as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct OptionsArgs {
    /// Print the options as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

/// Builds the selection from the flags, refreshes the dashboard and prints it.
fn handle_summary(dashboard: &Dashboard, args: SummaryArgs, currency_label: &str) -> anyhow::Result<()> {
    let selection = build_selection(dashboard.default_selection(), &args)?;
    let report = dashboard.refresh(selection)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&*report)?);
    } else {
        println!("{}", render::report(&report, currency_label));
    }
    Ok(())
}

fn handle_options(dashboard: &Dashboard, args: OptionsArgs) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(dashboard.options())?);
    } else {
        println!("{}", render::options(dashboard.options()));
    }
    Ok(())
}

/// Starts from the full domain and narrows each dimension that was given on
/// the command line.
fn build_selection(mut selection: Selection, args: &SummaryArgs) -> anyhow::Result<Selection> {
    let flags = [
        (Dimension::City, &args.cities),
        (Dimension::CustomerType, &args.customer_types),
        (Dimension::Gender, &args.genders),
    ];
    for (dimension, values) in flags {
        if !values.is_empty() {
            selection.restrict(dimension, values.iter().cloned())?;
        }
    }
    tracing::debug!(?selection, "Built filter selection.");
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn full() -> Selection {
        let set = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<BTreeSet<_>>();
        Selection {
            cities: set(&["Yangon", "Mandalay"]),
            customer_types: set(&["Member", "Normal"]),
            genders: set(&["Female", "Male"]),
        }
    }

    #[test]
    fn omitted_flags_keep_the_full_domain() {
        let args = SummaryArgs::parse_from(["summary", "--gender", "Male"]);
        let selection = build_selection(full(), &args).unwrap();

        assert_eq!(selection.cities, full().cities);
        assert_eq!(selection.customer_types, full().customer_types);
        assert_eq!(selection.genders, BTreeSet::from(["Male".to_string()]));
    }

    #[test]
    fn repeated_flags_accumulate() {
        let args = SummaryArgs::parse_from(["summary", "--city", "Yangon", "--city", "Naypyitaw"]);
        let selection = build_selection(full(), &args).unwrap();
        assert_eq!(
            selection.cities,
            BTreeSet::from(["Naypyitaw".to_string(), "Yangon".to_string()])
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
