#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line interface for satark queries.
//!
//! Runs the query pipeline against a JSON incident file so the
//! aggregation layer can be exercised without a live store. `seed`
//! fabricates a demo data file; the remaining subcommands print the
//! pipeline's JSON response envelopes to stdout.

mod data;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use satark_generate::RandomScatterGenerator;
use satark_incident_models::Location;
use satark_query::{
    FallbackPolicy, GridParams, HeatmapParams, HotspotsParams, IncidentsParams, Pipeline,
    PredictParams, StatisticsParams, TimeSeriesParams,
};

#[derive(Parser)]
#[command(name = "satark_cli", about = "Crime incident aggregation queries")]
struct Cli {
    /// JSON data file holding incidents and predictions.
    #[arg(long, global = true, default_value = "data/incidents.json")]
    input: String,

    /// When to substitute synthetic fallback output.
    #[arg(long, global = true, default_value = "on_error")]
    fallback_policy: FallbackPolicy,

    /// Seed for synthetic output, making runs reproducible.
    #[arg(long, global = true, default_value_t = 0)]
    seed: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a demo incident file scattered around the default center
    Seed {
        /// Output path.
        #[arg(long, default_value = "data/incidents.json")]
        output: String,
        /// Number of incidents to fabricate.
        #[arg(long, default_value_t = 500)]
        count: u64,
    },
    /// Aggregate incidents into a time series
    TimeSeries {
        /// Bucketing interval: hour, day, week, or month.
        #[arg(long, default_value = "day")]
        interval: String,
        /// Window start (YYYY-MM-DD or RFC 3339).
        #[arg(long, value_parser = parse_instant)]
        start_date: Option<DateTime<Utc>>,
        /// Window end (YYYY-MM-DD or RFC 3339).
        #[arg(long, value_parser = parse_instant)]
        end_date: Option<DateTime<Utc>>,
        /// Exact crime-type filter.
        #[arg(long)]
        crime_type: Option<String>,
    },
    /// Shape incidents into weighted heatmap points
    Heatmap {
        /// Merge prediction points into the output.
        #[arg(long)]
        include_predictions: bool,
        /// Exact crime-type filter.
        #[arg(long)]
        crime_type: Option<String>,
    },
    /// Bin incidents into a spatial density grid
    Grid {
        /// Grid rows.
        #[arg(long)]
        rows: Option<usize>,
        /// Grid columns.
        #[arg(long)]
        cols: Option<usize>,
    },
    /// Statistics rollup with high-risk area summaries
    Stats {
        /// Exact crime-type filter.
        #[arg(long)]
        crime_type: Option<String>,
    },
    /// List incidents newest first
    Incidents {
        /// Page size.
        #[arg(long)]
        limit: Option<usize>,
        /// Records to skip.
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Generate hotspot points around the default center
    Hotspots {
        /// Forecast horizon in hours.
        #[arg(long, default_value_t = 24)]
        hours_ahead: u64,
        /// Fixed crime type for every hotspot.
        #[arg(long)]
        crime_type: Option<String>,
    },
    /// Generate random scatter predictions around a point
    Predict {
        /// Center latitude.
        #[arg(long)]
        latitude: f64,
        /// Center longitude.
        #[arg(long)]
        longitude: f64,
        /// Hours ahead to cover.
        #[arg(long, default_value_t = 24)]
        hours_ahead: u64,
        /// Candidate crime types (repeatable).
        #[arg(long)]
        crime_type: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    if let Commands::Seed { output, count } = &cli.command {
        return seed(output, *count, cli.seed);
    }

    let store = data::load_store(&cli.input)?;
    let pipeline = Pipeline::new(store)
        .with_policy(cli.fallback_policy)
        .with_seed(cli.seed);

    let rendered = match cli.command {
        Commands::Seed { .. } => unreachable!("handled above"),
        Commands::TimeSeries {
            interval,
            start_date,
            end_date,
            crime_type,
        } => {
            let response = pipeline
                .time_series(&TimeSeriesParams {
                    start_date,
                    end_date,
                    crime_type,
                    interval: Some(interval),
                })
                .await?;
            serde_json::to_string_pretty(&response)?
        }
        Commands::Heatmap {
            include_predictions,
            crime_type,
        } => {
            let response = pipeline
                .heatmap(&HeatmapParams {
                    include_predictions,
                    crime_type,
                    ..HeatmapParams::default()
                })
                .await;
            serde_json::to_string_pretty(&response)?
        }
        Commands::Grid { rows, cols } => {
            let response = pipeline
                .density_grid(&GridParams {
                    rows,
                    cols,
                    ..GridParams::default()
                })
                .await?;
            serde_json::to_string_pretty(&response)?
        }
        Commands::Stats { crime_type } => {
            let response = pipeline
                .statistics(&StatisticsParams {
                    crime_type,
                    ..StatisticsParams::default()
                })
                .await;
            serde_json::to_string_pretty(&response)?
        }
        Commands::Incidents { limit, offset } => {
            let response = pipeline
                .incidents(&IncidentsParams {
                    limit,
                    offset,
                    ..IncidentsParams::default()
                })
                .await;
            serde_json::to_string_pretty(&response)?
        }
        Commands::Hotspots {
            hours_ahead,
            crime_type,
        } => {
            let response = pipeline.hotspots(&HotspotsParams {
                hours_ahead,
                crime_type,
            });
            serde_json::to_string_pretty(&response)?
        }
        Commands::Predict {
            latitude,
            longitude,
            hours_ahead,
            crime_type,
        } => {
            let now = Utc::now();
            #[allow(clippy::cast_possible_wrap)]
            let end = now + chrono::Duration::hours(hours_ahead as i64);
            let response = pipeline.predict(&PredictParams {
                location: Location::new(latitude, longitude),
                start_time: now,
                end_time: end,
                crime_types: crime_type,
            });
            serde_json::to_string_pretty(&response)?
        }
    };

    println!("{rendered}");
    Ok(())
}

/// Fabricates a demo data file around the default map center.
fn seed(output: &str, count: u64, seed: u64) -> Result<(), Box<dyn std::error::Error>> {
    let mut generator =
        RandomScatterGenerator::new(Location::new(19.076, 72.8777), 0.1, seed);
    let incidents = generator.mock_incidents(count);
    log::info!("Writing {} mock incidents to {output}", incidents.len());
    data::write_store(output, &incidents)?;
    Ok(())
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 instant.
fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date '{s}': expected YYYY-MM-DD or RFC 3339"))
}
