use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use itl3_compare::selection::{REGION_1_PARAM, REGION_2_PARAM};
use itl3_compare::{
    CompareConfig, ComparisonEngine, DataLoader, IndicatorRegistry, RegionPair, default_registry,
};

/// Compare two ITL3 regions and print the chart data as JSON
///
/// Paths not given as flags come from the `ITL3_*` environment variables,
/// then from the built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "itl3-compare", version, about)]
struct Args {
    /// Regional observations table (CSV or Parquet)
    #[arg(long)]
    data: Option<PathBuf>,

    /// National reference table (CSV or Parquet)
    #[arg(long)]
    national: Option<PathBuf>,

    /// Indicator registry JSON; the built-in registry is used when omitted
    #[arg(long)]
    registry: Option<PathBuf>,

    /// Code of the first region
    #[arg(long = "region-1")]
    region_1: Option<String>,

    /// Code of the second region
    #[arg(long = "region-2")]
    region_2: Option<String>,

    /// Headline indicator for the gauges and the time series
    #[arg(long)]
    indicator: Option<String>,

    /// List the available regions and exit
    #[arg(long)]
    list_regions: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = CompareConfig::from_env();
    if let Some(path) = args.data {
        config.regional_path = path;
    }
    if let Some(path) = args.national {
        config.national_path = path;
    }
    if let Some(path) = args.registry {
        config.registry_path = Some(path);
    }
    if let Some(indicator) = args.indicator {
        config.headline_indicator = indicator;
    }

    let custom_registry = config
        .registry_path
        .as_deref()
        .map(|path| IndicatorRegistry::from_json_file(path, &config))
        .transpose()?;
    let registry = match custom_registry.as_ref() {
        Some(registry) => registry,
        None => default_registry(),
    };

    let start = Instant::now();
    let loader = DataLoader::new(config.clone());
    let tables = loader.load().context("Failed to load observation tables")?;
    info!("Loaded observation tables in {:?}", start.elapsed());

    if args.list_regions {
        for region in tables.regional.regions() {
            println!("{}\t{}", region.code, region.name);
        }
        return Ok(());
    }

    let params = [
        (REGION_1_PARAM, args.region_1.as_deref()),
        (REGION_2_PARAM, args.region_2.as_deref()),
    ];
    let pair = RegionPair::from_query(
        &tables.regional,
        params
            .iter()
            .filter_map(|&(key, value)| value.map(|value| (key, value))),
    )?;
    info!("Comparing {} with {}", pair.first().name, pair.second().name);

    let engine = ComparisonEngine::new(&tables.regional, Some(&tables.national), registry)?;
    let report = engine
        .compare(&pair, &config.headline_indicator)
        .with_context(|| {
            format!(
                "Failed to compare {} and {}",
                pair.first().code,
                pair.second().code
            )
        })?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}
