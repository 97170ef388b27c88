use around_core::config::parse_radius;
use around_core::models::{GeoPosition, Topic};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Around - discover posts near you
#[derive(Parser, Debug)]
#[command(name = "around")]
#[command(about = "Discover and publish geo-tagged posts near a location", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .around/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Session state file holding the last location and token
    /// (defaults to .around/state.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_root: Option<String>,

    /// Auth token for this invocation, instead of the stored one
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// IP-geolocation service used by `start`
    #[arg(long, global = true, value_name = "URL")]
    pub geolocation_url: Option<String>,

    /// Radius used when none is given, in kilometers
    #[arg(long, global = true, value_name = "KM", value_parser = parse_radius)]
    pub default_radius: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Locate this device, remember the fix and list posts around it
    Start(StartArgs),

    /// List posts near the remembered location or a given position
    Nearby(NearbyArgs),

    /// List posts in a map viewport
    Map(MapArgs),

    /// Switch topic and list posts around the remembered location
    Topic(TopicArgs),

    /// Publish an image post at the remembered location
    Post(PostArgs),

    /// Store, show or clear the auth token
    Token(TokenArgs),

    /// Show effective configuration and where each value comes from
    Config,
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Use this fix instead of asking a geolocation service
    #[arg(long, value_name = "LAT,LON", value_parser = parse_position, allow_hyphen_values = true)]
    pub at: Option<GeoPosition>,

    /// Topic to query (around or face)
    #[arg(long, default_value = "around")]
    pub topic: Topic,

    /// Geolocation retries after a failure
    #[arg(long, default_value = "0")]
    pub retries: u32,

    /// Print posts with locations as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,
}

#[derive(Args, Debug)]
pub struct NearbyArgs {
    /// Query around this position instead of the remembered location
    #[arg(long, value_name = "LAT,LON", value_parser = parse_position, allow_hyphen_values = true)]
    pub at: Option<GeoPosition>,

    /// Search radius in kilometers
    #[arg(long, value_name = "KM", value_parser = parse_radius)]
    pub radius: Option<f64>,

    /// Topic to query (around or face)
    #[arg(long, default_value = "around")]
    pub topic: Topic,

    /// Print posts with locations as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Map center
    #[arg(long, value_name = "LAT,LON", value_parser = parse_position, allow_hyphen_values = true)]
    pub center: Option<GeoPosition>,

    /// North-east corner of the visible bounds
    #[arg(long, value_name = "LAT,LON", value_parser = parse_position, allow_hyphen_values = true)]
    pub north_east: Option<GeoPosition>,

    /// Topic to query (around or face)
    #[arg(long, default_value = "around")]
    pub topic: Topic,

    /// Print posts with locations as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,
}

#[derive(Args, Debug)]
pub struct TopicArgs {
    /// Topic to switch to (around or face)
    pub topic: Topic,

    /// Print posts with locations as a GeoJSON FeatureCollection
    #[arg(long)]
    pub geojson: bool,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Image file to upload
    pub image: PathBuf,

    /// Post message (prompted for when omitted)
    #[arg(long, short = 'm')]
    pub message: Option<String>,
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Token to store
    #[arg(value_name = "TOKEN")]
    pub value: Option<String>,

    /// Remove the stored token
    #[arg(long, conflicts_with = "value")]
    pub clear: bool,
}

/// Parse `LAT,LON` into a validated position
pub fn parse_position(s: &str) -> Result<GeoPosition, String> {
    let (lat, lon) =
        s.split_once(',').ok_or_else(|| format!("expected LAT,LON, got '{}'", s))?;

    let latitude: f64 =
        lat.trim().parse().map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let longitude: f64 =
        lon.trim().parse().map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;

    GeoPosition::new(latitude, longitude).map_err(|e| e.to_string())
}
