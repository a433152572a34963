use aidmap::config::ExplorerConfig;
use aidmap::error::{AidmapError, Result};
use aidmap::explorer::Explorer;
use aidmap::filters::LocationChoice;
use aidmap::loader;
use aidmap::model::Coordinate;
use clap::Parser;
use std::collections::{BTreeMap, BTreeSet};

mod args;
mod cli;

use args::{Cli, Commands, FilterArgs};
use cli::print;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut explorer = init_explorer(&cli)?;

    match cli.command {
        Some(Commands::List { filters, details }) => handle_list(&mut explorer, &filters, details),
        Some(Commands::Groups { key, filters }) => handle_groups(&mut explorer, &key, &filters),
        Some(Commands::Regions) => {
            print::print_regions(explorer.region());
            Ok(())
        }
        None => handle_list(&mut explorer, &FilterArgs::default(), false),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();
}

fn init_explorer(cli: &Cli) -> Result<Explorer> {
    let config = match &cli.config {
        Some(path) => ExplorerConfig::load(path)?,
        None => ExplorerConfig::default(),
    };

    let mut explorer = Explorer::new(&config)?;
    explorer.add_features(loader::read_features(&cli.features)?);
    if let Some(path) = &cli.regions {
        explorer.add_regions(loader::read_regions(path, &config.region.name_property)?);
    }
    Ok(explorer)
}

/// Drive the explorer with the command line's filter selections, the
/// same way an interactive renderer would.
fn apply_filters(explorer: &mut Explorer, args: &FilterArgs) -> Result<()> {
    let mut by_key: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for selector in &args.categories {
        let (key, label) = selector
            .split_once('=')
            .ok_or_else(|| AidmapError::Data(format!("expected KEY=LABEL, got {}", selector)))?;
        by_key
            .entry(key.to_string())
            .or_default()
            .insert(label.to_string());
    }
    for (key, labels) in by_key {
        explorer.set_category(&key, labels)?;
    }

    if let Some(near) = &args.near {
        let coordinate = Coordinate::parse(near)
            .ok_or_else(|| AidmapError::InvalidCoordinate(near.clone()))?;
        explorer.set_proximity_location(LocationChoice::Picked(coordinate))?;
    }
    if let Some(km) = args.within {
        explorer.set_proximity_distance(km)?;
    }

    let region_ids: Vec<String> = args
        .region_names
        .iter()
        .map(|name| {
            explorer
                .region()
                .find_by_name(name)
                .map(|r| r.id.clone())
                .ok_or_else(|| AidmapError::UnknownRegion(name.clone()))
        })
        .collect::<Result<_>>()?;
    for id in region_ids {
        explorer.toggle_region(&id)?;
    }

    Ok(())
}

fn handle_list(explorer: &mut Explorer, args: &FilterArgs, details: bool) -> Result<()> {
    apply_filters(explorer, args)?;

    let features = explorer.visible();
    print::print_features(&features, details);
    print::print_summary(features.len(), explorer.store().len());
    Ok(())
}

fn handle_groups(explorer: &mut Explorer, key: &str, args: &FilterArgs) -> Result<()> {
    apply_filters(explorer, args)?;

    if key == "region" {
        print::print_regions(explorer.region());
        return Ok(());
    }
    match explorer.category(key) {
        Some(filter) => {
            print::print_groups(filter.widget());
            Ok(())
        }
        None => Err(AidmapError::UnknownFilter(key.to_string())),
    }
}
