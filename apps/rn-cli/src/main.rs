use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use rn_app::{AppResult, AttributionReport, RowStatus, YearSelection};
use rn_records::PipelineConfig;

#[derive(Parser)]
#[command(name = "rn-cli")]
#[command(about = "railnet CLI - rail network reconciliation and analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Attribute stations to the region of their nearest gazetteer city
    AssignRegions {
        /// Station table (CSV)
        stations: PathBuf,
        /// Reference gazetteer (CSV, delimiter from config)
        gazetteer: PathBuf,
        /// Pipeline configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Attribution report path (JSON, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the stations with their attributed regions (CSV)
        #[arg(long)]
        stations_out: Option<PathBuf>,
    },
    /// Build the station/track network and report its connectivity
    Build {
        /// Station table (CSV)
        stations: PathBuf,
        /// Track table (CSV)
        tracks: PathBuf,
        /// Attribution report whose regions are merged onto stations first
        #[arg(long)]
        regions: Option<PathBuf>,
        /// Category substring for the filtered track counts (defaults to config)
        #[arg(long)]
        category: Option<String>,
        /// Snapshot year to analyze (defaults to the latest station year)
        #[arg(long)]
        year: Option<i32>,
        /// Analyze every row regardless of its year
        #[arg(long, conflicts_with = "year")]
        all_years: bool,
        /// Pipeline configuration (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Network report path (JSON, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    ValidateConfig {
        /// Pipeline configuration (YAML)
        config: PathBuf,
    },
    /// Write the default configuration
    DefaultConfig {
        /// Output YAML path
        output: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::AssignRegions {
            stations,
            gazetteer,
            config,
            output,
            stations_out,
        } => cmd_assign_regions(
            &stations,
            &gazetteer,
            config.as_deref(),
            output.as_deref(),
            stations_out.as_deref(),
        ),
        Commands::Build {
            stations,
            tracks,
            regions,
            category,
            year,
            all_years,
            config,
            output,
        } => {
            let selection = match (year, all_years) {
                (_, true) => YearSelection::All,
                (Some(y), false) => YearSelection::Year(y),
                (None, false) => YearSelection::Latest,
            };
            cmd_build(
                &stations,
                &tracks,
                regions.as_deref(),
                category.as_deref(),
                selection,
                config.as_deref(),
                output.as_deref(),
            )
        }
        Commands::ValidateConfig { config } => cmd_validate_config(&config),
        Commands::DefaultConfig { output } => cmd_default_config(&output),
    }
}

fn cmd_assign_regions(
    stations_path: &Path,
    gazetteer_path: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
    stations_out: Option<&Path>,
) -> AppResult<()> {
    let config = rn_app::load_config(config_path)?;
    let stations = rn_app::load_stations(stations_path)?.records;
    let gazetteer = rn_app::load_gazetteer(gazetteer_path, &config)?.records;

    let report = rn_app::run_attribution(&config, &stations, &gazetteer);
    print_attribution_summary(&report);

    if let Some(path) = stations_out {
        let merged = rn_app::merge_regions(&stations, &report);
        rn_app::save_stations(path, &merged)?;
        eprintln!("✓ Stations with regions written to {}", path.display());
    }

    emit(output, &report)
}

fn cmd_build(
    stations_path: &Path,
    tracks_path: &Path,
    regions: Option<&Path>,
    category: Option<&str>,
    selection: YearSelection,
    config_path: Option<&Path>,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = rn_app::load_config(config_path)?;
    let mut stations = rn_app::load_stations(stations_path)?.records;
    let tracks = rn_app::load_tracks(tracks_path)?.records;

    if let Some(path) = regions {
        let attribution: AttributionReport = rn_app::load_report(path)?;
        stations = rn_app::merge_regions(&stations, &attribution);
    }

    let snapshot = rn_app::select_snapshot(&stations, &tracks, selection);
    if let Some(year) = snapshot.year {
        eprintln!(
            "✓ Snapshot {}: {} station rows, {} track rows",
            year,
            snapshot.stations.len(),
            snapshot.tracks.len()
        );
    }

    let (_build, report) = rn_app::build_and_analyze(&config, &snapshot, category)?;

    let c = &report.connectivity;
    eprintln!(
        "✓ Network: {} stations, {} tracks, {} component(s), density {:.6}",
        c.vertex_count, c.edge_count, c.component_count, c.density
    );
    if !c.is_connected && c.component_count > 1 {
        eprintln!(
            "  Not connected; largest component has {} stations",
            c.largest_component_size
        );
    }
    let d = &report.diagnostics;
    if d.skipped_tracks > 0 {
        eprintln!(
            "  {} tracks skipped ({} unresolved station names)",
            d.skipped_tracks,
            d.unresolved_endpoints.len()
        );
    }
    eprintln!(
        "  {} stations with a region",
        report.stations_with_region
    );
    eprintln!(
        "  '{}' tracks: {} ({} drawable)",
        report.filtered.filter, report.filtered.total, report.filtered.drawable
    );

    emit(output, &report)
}

fn cmd_validate_config(path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", path.display());
    rn_app::load_config(Some(path))?;
    println!("✓ Configuration is valid");
    Ok(())
}

fn cmd_default_config(path: &Path) -> AppResult<()> {
    rn_records::save_config_yaml(path, &PipelineConfig::default())?;
    println!("✓ Default configuration written to {}", path.display());
    Ok(())
}

fn print_attribution_summary(report: &AttributionReport) {
    eprintln!(
        "✓ Attributed {} of {} stations ({} without coordinates)",
        report.matched, report.station_count, report.no_coordinates
    );
    if report.duplicate_stations > 0 {
        eprintln!("  {} duplicate station rows ignored", report.duplicate_stations);
    }
    if report.excluded_references > 0 {
        eprintln!(
            "  {} gazetteer rows without coordinates excluded",
            report.excluded_references
        );
    }
    if report.rows.iter().any(|r| r.status == RowStatus::NoReference) {
        eprintln!("  No usable gazetteer points; nothing could be matched");
    }
    if let Some(d) = &report.distances {
        eprintln!(
            "  Distance km: mean {:.2}, median {:.2}, min {:.2}, max {:.2}",
            d.mean_km, d.median_km, d.min_km, d.max_km
        );
    }
    for entry in &report.distribution {
        eprintln!("  {}: {}", entry.category, entry.count);
    }
}

/// Write a report to `output`, or print it to stdout.
fn emit<T: serde::Serialize>(output: Option<&Path>, report: &T) -> AppResult<()> {
    match output {
        Some(path) => {
            rn_app::save_report(path, report)?;
            eprintln!("✓ Report written to {}", path.display());
        }
        None => println!("{}", rn_app::to_json(report)?),
    }
    Ok(())
}
