use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use geonames::{
    Config, FileConfig, GeoNames, NearbyPlace, NearbyQuery, PostalCode, PostalCodeQuery, Style,
    TimezonePolicy, WeatherObservation, WikipediaEntry,
};

/// Query the GeoNames geocoding web services
///
/// Examples:
///   # Look up a UK postcode
///   geonames -u demo postal-code "SW1A 1AA"
///
///   # Populated places within 5km of a point
///   geonames -u demo place-name 51.5 -0.12 --radius 5
///
///   # Wikipedia articles nearby, as JSON
///   geonames -u demo --json wikipedia 48.8584 2.2945 --limit 3
///
///   # Current weather, timestamps read as UTC
///   geonames -u demo --timezone UTC weather 40.71 -74.0
///
///   # Use a config file holding the account name
///   geonames --config my-geonames.toml nearby 35.68 139.76
#[derive(Parser, Debug)]
#[command(name = "geonames")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches geonames.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GeoNames account name
    #[arg(short = 'u', long, global = true)]
    username: Option<String>,

    /// Service root, for private or mirrored deployments
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Response verbosity requested from the service
    #[arg(long, global = true, value_enum)]
    style: Option<Style>,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Timezone for weather timestamps: "local" or an IANA name like "Europe/London"
    #[arg(long, global = true)]
    timezone: Option<TimezonePolicy>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Places matching a postal code
    PostalCode {
        code: String,

        /// Maximum number of matches
        #[arg(short = 'l', long, default_value_t = 1)]
        limit: u32,

        /// ISO country code
        #[arg(short = 'C', long, default_value = "GB")]
        country: String,
    },
    /// Closest populated places to a point
    PlaceName(PointArgs),
    /// Closest toponyms of any kind to a point
    Nearby(PointArgs),
    /// Wikipedia articles near a point
    Wikipedia(PointArgs),
    /// Latest observation from the nearest weather station
    Weather {
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        #[arg(allow_negative_numbers = true)]
        lng: f64,
    },
}

#[derive(clap::Args, Debug)]
struct PointArgs {
    #[arg(allow_negative_numbers = true)]
    lat: f64,

    #[arg(allow_negative_numbers = true)]
    lng: f64,

    /// Search radius in km
    #[arg(short = 'r', long, default_value_t = 10.0)]
    radius: f64,

    /// Maximum number of results (defaults per command)
    #[arg(short = 'l', long)]
    limit: Option<u32>,
}

impl PointArgs {
    fn query(&self) -> NearbyQuery {
        let query = NearbyQuery::new(self.lat, self.lng).with_radius(self.radius);
        match self.limit {
            Some(limit) => query.with_limit(limit),
            None => query,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = build_config(&args)?;
    let geonames = GeoNames::new(config).context("Failed to create GeoNames client")?;

    let spinner = create_spinner("Querying GeoNames...")?;
    let start = Instant::now();
    let result = run(&geonames, &args.command, args.json);
    spinner.finish_and_clear();

    let output = result?;
    tracing::debug!(elapsed = ?start.elapsed(), "query finished");
    print!("{output}");

    Ok(())
}

fn run(geonames: &GeoNames, command: &Command, json: bool) -> Result<String> {
    match command {
        Command::PostalCode {
            code,
            limit,
            country,
        } => {
            let query = PostalCodeQuery::new(code.as_str())
                .with_limit(*limit)
                .with_country(country.as_str());
            let results = geonames
                .postal_code_search(&query)
                .with_context(|| format!("Failed to geocode postal code {code}"))?;
            render(results.as_slice(), json, render_postal_codes)
        }
        Command::PlaceName(point) => {
            let results = geonames
                .find_nearby_place_name(&point.query())
                .context("Failed to find nearby place names")?;
            render(results.as_slice(), json, render_places)
        }
        Command::Nearby(point) => {
            let results = geonames
                .find_nearby(&point.query())
                .context("Failed to find nearby toponyms")?;
            render(results.as_slice(), json, render_places)
        }
        Command::Wikipedia(point) => {
            let results = geonames
                .find_nearby_wikipedia(&point.query())
                .context("Failed to find nearby Wikipedia articles")?;
            render(results.as_slice(), json, render_wikipedia)
        }
        Command::Weather { lat, lng } => {
            let observation = geonames
                .find_nearby_weather(*lat, *lng)
                .context("Failed to find nearby weather")?;
            render(&observation, json, render_weather)
        }
    }
}

fn build_config(args: &Args) -> Result<Config> {
    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {}", config_path.display());
        }
        Some(
            FileConfig::from_path(config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path.display()))?,
        )
    } else {
        FileConfig::load()
    };

    let mut config = match file_config {
        Some(file_config) => file_config
            .apply(Config::default())
            .context("Invalid config file")?,
        None => Config::default(),
    };

    if let Some(ref username) = args.username {
        config = config.with_username(username.as_str());
    }
    if let Some(ref base_url) = args.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(style) = args.style {
        config = config.with_style(style);
    }
    if let Some(secs) = args.timeout {
        config = config.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }
    if let Some(timezone) = args.timezone {
        config = config.with_timezone(timezone);
    }

    tracing::debug!(
        base_url = %config.base_url,
        style = %config.style,
        timeout = ?config.timeout,
        timezone = ?config.timezone,
        "configuration loaded"
    );

    Ok(config)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "geonames=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render<T: Serialize + ?Sized>(
    value: &T,
    json: bool,
    human: fn(&T) -> String,
) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(human(value))
    }
}

fn render_postal_codes(results: &[PostalCode]) -> String {
    let mut out = String::new();
    for postal in results {
        let _ = writeln!(
            out,
            "{}  {}  ({:.5}, {:.5})",
            postal.code, postal.name, postal.lat, postal.lng
        );
    }
    out
}

fn render_places(results: &[NearbyPlace]) -> String {
    let mut out = String::new();
    for place in results {
        let _ = writeln!(
            out,
            "{} - {}, {:.2} km ({:.5}, {:.5})",
            place.name, place.feature_type, place.distance, place.lat, place.lng
        );
    }
    out
}

fn render_wikipedia(results: &[WikipediaEntry]) -> String {
    let mut out = String::new();
    for entry in results {
        let _ = writeln!(
            out,
            "{} [{}, rank {}] {:.2} km",
            entry.title, entry.feature, entry.rank, entry.distance
        );
        let _ = writeln!(out, "    {}", entry.url);
        if !entry.summary.is_empty() {
            let _ = writeln!(out, "    {}", entry.summary);
        }
    }
    out
}

fn render_weather(observation: &WeatherObservation) -> String {
    let observed = chrono::DateTime::from_timestamp(observation.observed_at, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| observation.observed_at.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Station:     {}", observation.station_name);
    let _ = writeln!(out, "Observed:    {observed}");
    let _ = writeln!(out, "Temperature: {:.1} C", observation.temperature);
    let _ = writeln!(out, "Humidity:    {:.0}%", observation.humidity);
    let _ = writeln!(out, "Wind speed:  {:.0} kt", observation.wind_speed);
    let _ = writeln!(out, "Clouds:      {}", observation.clouds);
    let _ = writeln!(out, "Conditions:  {}", observation.weather_condition);
    let _ = writeln!(
        out,
        "Location:    ({:.4}, {:.4})",
        observation.lat, observation.lng
    );
    out
}

fn create_spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .context("Invalid spinner template")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}
