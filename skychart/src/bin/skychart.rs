//! Render a night-sky chart to SVG or PNG.
//!
//! ```text
//! skychart --location tokyo --time "2024-01-15 12:00:00" --output tokyo.svg
//! skychart --lat 64.15 --lon -21.94 --city Reykjavik --catalog hipparcos
//! skychart --style night.json --save-style
//! ```

use chrono::Utc;
use clap::Parser;
use log::{info, warn};
use skychart::location::PRESETS;
use skychart::shared_args::SkyChartArgs;
use skychart::{ChartComposer, ChartStyle, ConfigStorage};
use starfield::{CatalogLoad, StarCatalog};
use viz::{write_chart, SvgCanvas};

fn list_locations() {
    println!("Available preset locations:");
    for preset in PRESETS {
        println!(
            "  {:<10} {} ({:.4}°, {:.4}°)",
            preset.key, preset.name, preset.latitude, preset.longitude
        );
    }
}

fn load_style(
    args: &SkyChartArgs,
    storage: &ConfigStorage,
) -> Result<ChartStyle, Box<dyn std::error::Error>> {
    if let Some(path) = &args.style {
        info!("Loading chart style from {}", path.display());
        return ChartStyle::load_from_file(path)
            .map_err(|e| format!("Failed to load style '{}': {}", path.display(), e).into());
    }
    match storage.get_chart_style() {
        Some(Ok(style)) => Ok(style),
        Some(Err(e)) => {
            warn!("Ignoring saved chart style: {e}");
            Ok(ChartStyle::default())
        }
        None => Ok(ChartStyle::default()),
    }
}

fn run(args: SkyChartArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.list_locations {
        list_locations();
        return Ok(());
    }

    let storage = args.config_storage();
    if args.is_maintenance() {
        for message in args.run_maintenance(&storage)? {
            println!("{message}");
        }
        return Ok(());
    }

    let resolved = args.location_provider()?.locate()?;
    println!("Location:\n{}", resolved.describe());

    let time = args.time.unwrap_or_else(Utc::now);
    let style = load_style(&args, &storage)?;

    let catalog = match args.load_catalog(&storage)? {
        CatalogLoad::Loaded(catalog) => catalog,
        CatalogLoad::Fallback { catalog, reason } => {
            println!("Star catalog unavailable ({reason}); using the built-in sample");
            catalog
        }
    };
    info!("Catalog has {} stars", catalog.len());

    let canvas = SvgCanvas::new(args.width, args.height, style.canvas_extent())?;
    let composer = ChartComposer::new(style)?;
    let chart = composer.compose_named(
        &catalog,
        &resolved.location,
        resolved.display_name.as_deref(),
        time,
    )?;

    write_chart(&chart.primitives, &canvas, &args.output)?;
    println!(
        "Sky chart saved to {} ({} of {} stars visible, {} constellation lines)",
        args.output.display(),
        chart.stats.visible_stars,
        chart.stats.total_stars,
        chart.stats.drawn_edges
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let args = SkyChartArgs::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
