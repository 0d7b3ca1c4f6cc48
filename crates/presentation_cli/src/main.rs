//! Homerun CLI
//!
//! Plans trips across walking, cycling, driving, taxi and public transit,
//! lists transport nearby and manages the home preference.

#![allow(clippy::print_stdout)]

mod app;
mod args;
mod render;

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use domain::{Location, ShareLink};
use infrastructure::{AppConfig, init_logging};
use serde::Serialize;

use crate::app::{App, Trip};
use crate::args::{PlaceArg, parse_departure};
use crate::render::{RouteView, Units};

/// Homerun trip planner
#[derive(Parser)]
#[command(name = "homerun")]
#[command(author, version, about = "Multi-modal trip planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./homerun.toml if present)
    #[arg(short, long, env = "HOMERUN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output options for route listings
#[derive(Args, Debug, Clone, Copy)]
struct ViewArgs {
    /// Show turn-by-turn steps
    #[arg(long)]
    steps: bool,

    /// Show distances in miles
    #[arg(long)]
    miles: bool,
}

impl ViewArgs {
    const fn units(self) -> Units {
        if self.miles { Units::Imperial } else { Units::Metric }
    }

    const fn route_view(self) -> RouteView {
        RouteView {
            units: self.units(),
            steps: self.steps,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a trip and list every way to make it, fastest first
    ///
    /// Places are "lat,lon" pairs or free text.
    /// Example: homerun plan --from "Trafalgar Square" --to 51.5303,-0.1238
    Plan {
        /// Origin
        #[arg(short, long, allow_hyphen_values = true)]
        from: PlaceArg,

        /// Destination (default: home)
        #[arg(short, long, allow_hyphen_values = true)]
        to: Option<PlaceArg>,

        /// Transit departure, "HH:MM" today or RFC 3339
        #[arg(long, value_parser = parse_departure)]
        at: Option<DateTime<Utc>>,

        /// Also list transport near the origin
        #[arg(long)]
        nearby: bool,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// List bus stops, stations, cycle hire and taxi ranks near a place
    Nearby {
        /// Place to search around (default: home)
        #[arg(allow_hyphen_values = true)]
        place: Option<PlaceArg>,

        /// Show distances in miles
        #[arg(long)]
        miles: bool,
    },

    /// Search for places by name
    Search {
        /// Free text
        text: String,

        /// Maximum number of candidates (default from config)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=50))]
        limit: Option<u8>,
    },

    /// Name a pair of coordinates
    #[command(allow_negative_numbers = true)]
    Locate {
        /// Latitude
        lat: f64,

        /// Longitude
        lon: f64,
    },

    /// Print a share link, a directions link or a message for a trip
    Share {
        /// Origin
        #[arg(short, long, allow_hyphen_values = true)]
        from: PlaceArg,

        /// Destination (default: home)
        #[arg(short, long, allow_hyphen_values = true)]
        to: Option<PlaceArg>,

        /// Page URL the query is appended to
        #[arg(long)]
        base: Option<String>,

        /// What to print
        #[arg(long, value_enum, default_value_t = ShareFormat::Link)]
        format: ShareFormat,
    },

    /// Plan the trip described by a share link or query string
    Open {
        /// Link or query string
        link: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Manage the home location
    Home {
        #[command(subcommand)]
        action: HomeAction,
    },
}

/// Output of `homerun share`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum ShareFormat {
    /// Homerun link (query string without `--base`)
    Link,
    /// Google Maps directions
    Gmaps,
    /// Citymapper directions
    Citymapper,
    /// Origin coordinates
    Coords,
    /// "I've landed" text message
    Sms,
    /// Emergency text message
    Sos,
}

impl ShareFormat {
    const fn needs_destination(self) -> bool {
        matches!(self, Self::Link | Self::Gmaps | Self::Citymapper)
    }
}

#[derive(Subcommand)]
enum HomeAction {
    /// Store a place as home
    Set {
        /// Place
        #[arg(allow_hyphen_values = true)]
        place: PlaceArg,
    },
    /// Print the stored home
    Show,
    /// Forget the stored home
    Clear,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load_from(path).context("could not load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow!("invalid configuration: {e}"))?;
    Ok(config)
}

#[derive(Serialize)]
struct TripOutput<'a> {
    from: &'a Location,
    to: &'a Location,
    #[serde(flatten)]
    journey: &'a application::PlannedJourney,
    #[serde(skip_serializing_if = "Option::is_none")]
    nearby: Option<&'a application::NearbyStops>,
}

fn share_text(link: &ShareLink, format: ShareFormat, base: Option<&str>) -> anyhow::Result<String> {
    let url = base.map_or_else(|| link.to_query(), |base| link.to_url(base));
    let text = match format {
        ShareFormat::Link => Some(url),
        ShareFormat::Gmaps => link.google_maps_url(),
        ShareFormat::Citymapper => link.citymapper_url(),
        ShareFormat::Coords => link.origin_coordinates(),
        ShareFormat::Sms => link.landing_message(&url),
        ShareFormat::Sos => link.sos_message(&url),
    };
    text.ok_or_else(|| anyhow!("trip is missing an origin or destination"))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_trip(trip: &Trip, view: RouteView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&TripOutput {
            from: &trip.from,
            to: &trip.to,
            journey: &trip.journey,
            nearby: trip.nearby.as_ref(),
        });
    }

    print!("{}", render::render_trip(&trip.from, &trip.to));
    println!();
    print!("{}", render::render_routes(&trip.journey.routes, view));
    if let Some(nearby) = &trip.nearby {
        println!();
        print!("{}", render::render_stops(&nearby.stops, view.units));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let verbosity = (cli.verbose > 0).then(|| log_filter_from_verbosity(cli.verbose));
    init_logging(&config.logging, verbosity)?;

    let app = App::from_config(&config)?;

    match cli.command {
        Commands::Plan {
            from,
            to,
            at,
            nearby,
            view,
        } => {
            let (from, to) =
                tokio::try_join!(app.resolve(&from), app.resolve_or_home(to.as_ref()))?;
            let trip = app.plan(from, to, at, nearby).await;
            print_trip(&trip, view.route_view(), cli.json)?;
        },

        Commands::Nearby { place, miles } => {
            let origin = app.resolve_or_home(place.as_ref()).await?;
            let nearby = app.nearby(&origin).await?;
            if cli.json {
                print_json(&nearby)?;
            } else {
                let units = if miles { Units::Imperial } else { Units::Metric };
                print!("{}", render::render_location(&origin));
                println!();
                print!("{}", render::render_stops(&nearby.stops, units));
            }
        },

        Commands::Search { text, limit } => {
            let limit = limit.unwrap_or_else(|| app.search_limit());
            let places = app.search(&text, limit).await?;
            if cli.json {
                print_json(&places)?;
            } else {
                print!("{}", render::render_locations(&places));
            }
        },

        Commands::Locate { lat, lon } => {
            let place = app.resolve(&PlaceArg::Coordinates { lat, lon }).await?;
            if cli.json {
                print_json(&place)?;
            } else {
                print!("{}", render::render_location(&place));
            }
        },

        Commands::Share {
            from,
            to,
            base,
            format,
        } => {
            let destination = async {
                match &to {
                    Some(place) => app.resolve(place).await.map(Some),
                    None if format.needs_destination() => app.resolve_or_home(None).await.map(Some),
                    None => app.home().await,
                }
            };
            let (from, to) = tokio::try_join!(app.resolve(&from), destination)?;
            let link = ShareLink::new(Some(from), to);
            println!("{}", share_text(&link, format, base.as_deref())?);
        },

        Commands::Open { link, view } => {
            let link = ShareLink::parse(&link);
            let from = link
                .from
                .ok_or_else(|| anyhow!("link has no valid origin (flat/flon)"))?;
            let to = match link.to {
                Some(to) => to,
                None => app.resolve_or_home(None).await?,
            };
            let trip = app.plan(from, to, None, false).await;
            print_trip(&trip, view.route_view(), cli.json)?;
        },

        Commands::Home { action } => match action {
            HomeAction::Set { place } => {
                let home = app.resolve(&place).await?;
                app.set_home(&home).await?;
                println!("🏠 Home set to {}", render::render_location(&home).trim_end());
            },
            HomeAction::Show => match app.home().await? {
                Some(home) if cli.json => print_json(&home)?,
                Some(home) => print!("🏠 {}", render::render_location(&home)),
                None => println!("No home set."),
            },
            HomeAction::Clear => {
                app.clear_home().await?;
                println!("Home cleared.");
            },
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_from_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(3), "trace");
        assert_eq!(log_filter_from_verbosity(10), "trace");
    }

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_places_parse_through_place_arg() {
        let cli = Cli::try_parse_from([
            "homerun",
            "plan",
            "--from",
            "-33.86,151.21",
            "--to",
            "King's Cross",
        ])
        .unwrap();
        let Commands::Plan { from, to, .. } = cli.command else {
            unreachable!("plan parses as Plan");
        };
        assert_eq!(
            from,
            PlaceArg::Coordinates {
                lat: -33.86,
                lon: 151.21
            }
        );
        assert_eq!(to, Some(PlaceArg::Query("King's Cross".to_string())));
    }

    #[test]
    fn test_empty_place_is_rejected() {
        assert!(Cli::try_parse_from(["homerun", "plan", "--from", "  "]).is_err());
        assert!(Cli::try_parse_from(["homerun", "home", "set", ""]).is_err());
    }

    #[test]
    fn test_search_limit_bounds() {
        assert!(Cli::try_parse_from(["homerun", "search", "Soho", "--limit", "0"]).is_err());
        let cli = Cli::try_parse_from(["homerun", "search", "Soho", "-l", "3"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { limit: Some(3), .. }));
    }

    fn trip_link() -> ShareLink {
        ShareLink::new(
            Some(Location::new(51.5, -0.1, "Strand").unwrap()),
            Some(Location::new(51.53, -0.12, "Home").unwrap()),
        )
    }

    #[test]
    fn test_share_text_link_with_and_without_base() {
        let link = trip_link();
        let query = share_text(&link, ShareFormat::Link, None).unwrap();
        assert!(query.starts_with("flat=51.500000&flon=-0.100000&fname=Strand"));
        let url = share_text(&link, ShareFormat::Link, Some("https://example.org/")).unwrap();
        assert_eq!(url, format!("https://example.org/?{query}"));
    }

    #[test]
    fn test_share_text_handoffs() {
        let link = trip_link();
        assert_eq!(
            share_text(&link, ShareFormat::Gmaps, None).unwrap(),
            "https://www.google.com/maps/dir/51.5,-0.1/51.53,-0.12"
        );
        assert!(
            share_text(&link, ShareFormat::Citymapper, None)
                .unwrap()
                .ends_with("startcoord=51.5,-0.1&endcoord=51.53,-0.12")
        );
        assert_eq!(
            share_text(&link, ShareFormat::Coords, None).unwrap(),
            "51.500000, -0.100000"
        );
    }

    #[test]
    fn test_share_text_messages_carry_link() {
        let link = trip_link();
        let sms = share_text(&link, ShareFormat::Sms, Some("https://example.org/")).unwrap();
        assert!(sms.starts_with("I've landed at: Strand\nhttps://example.org/?flat=51.500000"));
        let sos = share_text(&link, ShareFormat::Sos, None).unwrap();
        assert!(sos.contains("Coords: 51.50000, -0.10000"));
        assert!(sos.ends_with(&link.to_query()));
    }

    #[test]
    fn test_share_text_without_destination() {
        let link = ShareLink::new(Some(Location::new(51.5, -0.1, "Strand").unwrap()), None);
        assert!(share_text(&link, ShareFormat::Gmaps, None).is_err());
        assert!(share_text(&link, ShareFormat::Sms, None).is_ok());
        assert!(!ShareFormat::Sos.needs_destination());
        assert!(ShareFormat::Citymapper.needs_destination());
    }

    #[test]
    fn test_share_format_parses() {
        let cli = Cli::try_parse_from(["homerun", "share", "-f", "51.5,-0.1", "--format", "gmaps"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Share {
                format: ShareFormat::Gmaps,
                ..
            }
        ));
    }

    #[test]
    fn test_view_args_units() {
        let view = ViewArgs {
            steps: true,
            miles: true,
        };
        assert_eq!(view.units(), Units::Imperial);
        assert!(view.route_view().steps);
    }
}
