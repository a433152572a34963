use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aidmap")]
#[command(about = "Explore humanitarian service locations from GeoJSON", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Compiled service-point FeatureCollection
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        default_value = "compiled.json"
    )]
    pub features: PathBuf,

    /// Region polygon FeatureCollection
    #[arg(short, long, global = true, value_name = "FILE")]
    pub regions: Option<PathBuf>,

    /// Filter configuration (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Filter selections shared by the querying subcommands.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Category selection, KEY=LABEL (repeat to select several labels)
    #[arg(long = "category", value_name = "KEY=LABEL")]
    pub categories: Vec<String>,

    /// Proximity origin, "lat,lng"
    #[arg(long, value_name = "LAT,LNG")]
    pub near: Option<String>,

    /// Proximity radius in kilometres
    #[arg(long, value_name = "KM")]
    pub within: Option<f64>,

    /// Region selection by name (repeatable)
    #[arg(long = "region", value_name = "NAME")]
    pub region_names: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the services visible under the given filters
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Show the full field breakdown per service
        #[arg(long)]
        details: bool,
    },

    /// Show one filter's option counts under the other filters
    Groups {
        /// Filter key (e.g. activityName, partnerName, region)
        key: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// List the known regions
    Regions,
}
