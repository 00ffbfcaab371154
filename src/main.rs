#![deny(clippy::all)]
#![forbid(unsafe_code)]

use std::error::Error;
use std::io::prelude::*;
use std::path::PathBuf;

use itertools::Itertools;
use log::{info, LevelFilter};
use serde_json::{json, Value};
use structopt::clap::AppSettings;
use structopt::StructOpt;

use navaid_lookup::{Decoder, Engine, Kind, Layout, QueryError, Scope, Sources};

#[derive(StructOpt)]
#[structopt(
    name = "navaid-lookup",
    global_settings = &[AppSettings::AllowNegativeNumbers]
)]
struct Args {
    /// Directory holding NAV.txt, FIX.txt and APT.txt
    #[structopt(
        short = "d",
        long = "data-dir",
        env = "NAVAID_DATA_DIR",
        default_value = "./data",
        parse(from_os_str)
    )]
    data_dir: PathBuf,
    /// NASR subscription ZIP to read the files from instead of --data-dir
    #[structopt(short = "a", long = "archive", parse(from_os_str))]
    archive: Option<PathBuf>,
    /// JSON column layout overriding the built-in one
    #[structopt(short = "l", long = "layout", parse(from_os_str))]
    layout: Option<PathBuf>,
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,
    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt)]
enum Command {
    /// Print catalog sizes
    Health,
    /// Look up an airport by FAA LID or ICAO code
    Airport(Target),
    /// Look up a VOR, TACAN or NDB
    Navaid(Target),
    /// Look up a fix
    Waypoint(Target),
    /// Search airports, then navaids, then fixes
    Point(Target),
    /// Answer one query per stdin line: `<airport|navaid|waypoint|point> <id> [radial distance]` or `reload`
    Batch,
}

#[derive(StructOpt)]
struct Target {
    identifier: String,
    #[structopt(requires = "distance")]
    radial: Option<f64>,
    distance: Option<f64>,
}

fn scope_for(route: &str) -> Option<Scope> {
    match route {
        "airport" | "airports" => Some(Scope::Only(Kind::Airport)),
        "navaid" | "navaids" => Some(Scope::Only(Kind::Navaid)),
        "waypoint" | "waypoints" => Some(Scope::Only(Kind::Waypoint)),
        "point" | "points" => Some(Scope::Any),
        _ => None,
    }
}

fn run_query(engine: &Engine, scope: Scope, target: &Target) -> Result<Value, QueryError> {
    match (target.radial, target.distance) {
        (Some(radial), Some(distance)) => Ok(json!(engine.lookup_projected(
            scope,
            &target.identifier,
            radial,
            distance
        )?)),
        _ => Ok(json!(engine.lookup_token(scope, &target.identifier)?)),
    }
}

fn failure(status: u16, detail: String) -> Value {
    json!({ "status": status, "detail": detail })
}

fn respond(result: Result<Value, QueryError>) -> (bool, Value) {
    match result {
        Ok(value) => (true, value),
        Err(e) => {
            let status = match e {
                QueryError::NotFound { .. } => 404,
                QueryError::InvalidArgument { .. } => 400,
            };
            (false, failure(status, e.to_string()))
        }
    }
}

fn parse_target(words: &[&str]) -> Result<Target, String> {
    let number = |name: &str, w: &str| {
        w.parse::<f64>()
            .map_err(|_| format!("{} must be a number", name))
    };
    match *words {
        [identifier] => Ok(Target {
            identifier: identifier.to_owned(),
            radial: None,
            distance: None,
        }),
        [identifier, radial, distance] => Ok(Target {
            identifier: identifier.to_owned(),
            radial: Some(number("radial", radial)?),
            distance: Some(number("distance", distance)?),
        }),
        _ => Err("expected <id> or <id> <radial> <distance>".to_owned()),
    }
}

fn batch<R: BufRead, W: Write>(
    engine: &Engine,
    sources: &Sources,
    decoder: &Decoder,
    input: R,
    mut out: W,
) -> Result<(), Box<dyn Error>> {
    for line in input.lines() {
        let line = line?;
        let words = line.split_whitespace().collect_vec();
        let value = match words.split_first() {
            None => continue,
            Some((&"reload", [])) => {
                engine.store().publish(sources.load(decoder)?);
                json!({ "status": "reloaded", "counts": engine.health() })
            }
            Some((route, rest)) => match (scope_for(route), parse_target(rest)) {
                (None, _) => failure(404, format!("no route '{}'", route)),
                (_, Err(detail)) => failure(400, detail),
                (Some(scope), Ok(target)) => respond(run_query(engine, scope, &target)).1,
            },
        };
        writeln!(out, "{}", value)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::from_args();

    env_logger::Builder::new()
        .filter_level(match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        })
        .parse_default_env()
        .init();

    let decoder = Decoder::new(match &args.layout {
        Some(path) => Layout::from_file(path)?,
        None => Layout::default(),
    });
    let sources = match &args.archive {
        Some(zip) => Sources::Archive(zip.clone()),
        None => Sources::Directory(args.data_dir.clone()),
    };

    info!("Loading {:?}", sources);
    let engine = Engine::new(sources.load(&decoder)?);
    let snapshot = engine.store().snapshot();
    info!(
        "Catalogs ready: {}",
        Kind::ALL
            .iter()
            .map(|&k| format!("{}={}", k.as_str(), snapshot.len(k)))
            .join(", ")
    );
    drop(snapshot);

    let (ok, value) = match &args.command {
        Command::Health => (true, json!(engine.health())),
        Command::Batch => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            return batch(&engine, &sources, &decoder, stdin.lock(), stdout.lock());
        }
        Command::Airport(t) => respond(run_query(&engine, Scope::Only(Kind::Airport), t)),
        Command::Navaid(t) => respond(run_query(&engine, Scope::Only(Kind::Navaid), t)),
        Command::Waypoint(t) => respond(run_query(&engine, Scope::Only(Kind::Waypoint), t)),
        Command::Point(t) => respond(run_query(&engine, Scope::Any, t)),
    };

    println!("{}", serde_json::to_string_pretty(&value)?);
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
