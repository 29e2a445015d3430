use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use space_scanner_cipher::{generate_key, read_hex_key_file, write_hex_key_file, XChaChaCipher};
use space_scanner_core::{Catalog, Cipher, MissionStatus, RocketStatus, SpaceScanner};
use time::macros::format_description;
use time::Date;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const CLI_CONTRACT_VERSION: &str = "cli.v1";

#[derive(Debug, Parser)]
#[command(name = "space-scanner")]
#[command(about = "Space missions and rockets analytics")]
struct Cli {
    /// Missions table; omitted means no missions.
    #[arg(long, env = "SPACE_SCANNER_MISSIONS")]
    missions: Option<PathBuf>,

    /// Rockets table; omitted means no rockets.
    #[arg(long, env = "SPACE_SCANNER_ROCKETS")]
    rockets: Option<PathBuf>,

    /// Tracing filter directive, logged to stderr.
    #[arg(long, env = "SPACE_SCANNER_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Missions {
        #[command(subcommand)]
        command: Box<MissionsCommand>,
    },
    Rockets {
        #[command(subcommand)]
        command: Box<RocketsCommand>,
    },
    Report {
        #[command(subcommand)]
        command: Box<ReportCommand>,
    },
    Key {
        #[command(subcommand)]
        command: Box<KeyCommand>,
    },
}

#[derive(Debug, Subcommand)]
enum MissionsCommand {
    List(MissionsListArgs),
    TopCompany(WindowArgs),
    PerCountry,
    Cheapest(RankArgs),
    DesiredLocations,
    SuccessfulLocations(WindowArgs),
}

#[derive(Debug, Subcommand)]
enum RocketsCommand {
    List,
    Tallest(TallestArgs),
    Wiki,
    ExpensiveWiki(RankArgs),
    Reliability,
}

#[derive(Debug, Subcommand)]
enum ReportCommand {
    Save(ReportSaveArgs),
    Decrypt(ReportDecryptArgs),
}

#[derive(Debug, Subcommand)]
enum KeyCommand {
    Generate(KeyGenerateArgs),
}

#[derive(Debug, Args)]
struct MissionsListArgs {
    #[arg(long, value_enum)]
    status: Option<MissionStatusArg>,
}

#[derive(Debug, Args)]
struct WindowArgs {
    /// First day of the window, `YYYY-MM-DD`.
    #[arg(long)]
    from: String,
    /// Last day of the window, `YYYY-MM-DD`.
    #[arg(long)]
    to: String,
}

#[derive(Debug, Args)]
struct RankArgs {
    #[arg(long)]
    n: usize,
    #[arg(long, value_enum)]
    mission_status: MissionStatusArg,
    #[arg(long, value_enum)]
    rocket_status: RocketStatusArg,
}

#[derive(Debug, Args)]
struct TallestArgs {
    #[arg(long)]
    n: usize,
}

#[derive(Debug, Args)]
struct ReportSaveArgs {
    #[command(flatten)]
    window: WindowArgs,
    #[arg(long)]
    key_file: PathBuf,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Args)]
struct ReportDecryptArgs {
    #[arg(long)]
    key_file: PathBuf,
    #[arg(long = "in")]
    input: PathBuf,
}

#[derive(Debug, Args)]
struct KeyGenerateArgs {
    #[arg(long)]
    out: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MissionStatusArg {
    Success,
    Failure,
    PartialFailure,
    PrelaunchFailure,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RocketStatusArg {
    Active,
    Retired,
}

#[derive(Debug, Serialize)]
struct RocketScore<'a> {
    name: &'a str,
    score: u64,
}

fn with_contract_version(value: Value) -> Value {
    match value {
        Value::Object(mut object) => {
            object.insert(
                "contract_version".to_string(),
                Value::String(CLI_CONTRACT_VERSION.to_string()),
            );
            Value::Object(object)
        }
        other => serde_json::json!({
            "contract_version": CLI_CONTRACT_VERSION,
            "payload": other
        }),
    }
}

fn emit_json(value: Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&with_contract_version(value))?);
    Ok(())
}

fn init_tracing(filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter: {filter}"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("failed to install tracing subscriber")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Command::Missions { command } => {
            let catalog = load_catalog(cli.missions.as_deref(), cli.rockets.as_deref())?;
            run_missions(*command, &catalog)
        }
        Command::Rockets { command } => {
            let catalog = load_catalog(cli.missions.as_deref(), cli.rockets.as_deref())?;
            run_rockets(*command, &catalog)
        }
        Command::Report { command } => {
            run_report(*command, cli.missions.as_deref(), cli.rockets.as_deref())
        }
        Command::Key { command } => run_key(*command),
    }
}

fn open_table(path: Option<&Path>) -> Result<Option<BufReader<File>>> {
    path.map(|path| {
        File::open(path)
            .map(BufReader::new)
            .with_context(|| format!("failed to open table {}", path.display()))
    })
    .transpose()
}

fn load_catalog(missions: Option<&Path>, rockets: Option<&Path>) -> Result<Catalog> {
    let catalog = Catalog::from_readers(open_table(missions)?, open_table(rockets)?)
        .context("failed to load datasets")?;
    tracing::debug!(
        missions = catalog.mission_count(),
        rockets = catalog.rocket_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn run_missions(command: MissionsCommand, catalog: &Catalog) -> Result<()> {
    match command {
        MissionsCommand::List(args) => {
            let missions = match args.status {
                Some(status) => catalog.missions_with_status(status.into_mission_status()),
                None => catalog.all_missions().iter().collect(),
            };
            emit_json(serde_json::json!({
                "count": missions.len(),
                "missions": missions
            }))
        }
        MissionsCommand::TopCompany(args) => {
            let (from, to) = args.parse()?;
            let company = catalog.company_with_most_successful_missions(from, to)?;
            emit_json(serde_json::json!({
                "from": args.from,
                "to": args.to,
                "company": company
            }))
        }
        MissionsCommand::PerCountry => emit_json(serde_json::json!({
            "countries": catalog.missions_per_country()
        })),
        MissionsCommand::Cheapest(args) => {
            let missions = catalog.top_n_least_expensive_missions(
                args.n,
                args.mission_status.into_mission_status(),
                args.rocket_status.into_rocket_status(),
            )?;
            emit_json(serde_json::json!({
                "n": args.n,
                "mission_status": args.mission_status.into_mission_status(),
                "rocket_status": args.rocket_status.into_rocket_status(),
                "missions": missions
            }))
        }
        MissionsCommand::DesiredLocations => emit_json(serde_json::json!({
            "locations": catalog.most_desired_location_per_company()
        })),
        MissionsCommand::SuccessfulLocations(args) => {
            let (from, to) = args.parse()?;
            let locations = catalog.location_with_most_successful_missions_per_company(from, to)?;
            emit_json(serde_json::json!({
                "from": args.from,
                "to": args.to,
                "locations": locations
            }))
        }
    }
}

fn run_rockets(command: RocketsCommand, catalog: &Catalog) -> Result<()> {
    match command {
        RocketsCommand::List => emit_json(serde_json::json!({
            "count": catalog.rocket_count(),
            "rockets": catalog.all_rockets()
        })),
        RocketsCommand::Tallest(args) => {
            let rockets = catalog.top_n_tallest_rockets(args.n)?;
            emit_json(serde_json::json!({
                "n": args.n,
                "rockets": rockets
            }))
        }
        RocketsCommand::Wiki => emit_json(serde_json::json!({
            "wiki_pages": catalog.wiki_page_per_rocket()
        })),
        RocketsCommand::ExpensiveWiki(args) => {
            let pages = catalog.wiki_pages_for_rockets_used_in_most_expensive_missions(
                args.n,
                args.mission_status.into_mission_status(),
                args.rocket_status.into_rocket_status(),
            )?;
            emit_json(serde_json::json!({
                "n": args.n,
                "mission_status": args.mission_status.into_mission_status(),
                "rocket_status": args.rocket_status.into_rocket_status(),
                "wiki_pages": pages
            }))
        }
        RocketsCommand::Reliability => {
            let scores = catalog
                .all_rockets()
                .iter()
                .map(|rocket| RocketScore {
                    name: rocket.name.as_str(),
                    score: catalog.reliability_score(rocket),
                })
                .collect::<Vec<_>>();
            emit_json(serde_json::json!({
                "scores": scores,
                "most_reliable": catalog.most_reliable_rocket().map(|rocket| rocket.name.as_str())
            }))
        }
    }
}

fn run_report(
    command: ReportCommand,
    missions: Option<&Path>,
    rockets: Option<&Path>,
) -> Result<()> {
    match command {
        ReportCommand::Save(args) => {
            let (from, to) = args.window.parse()?;
            let key = read_hex_key_file(&args.key_file).context("failed to load report key")?;
            let scanner =
                SpaceScanner::new(load_catalog(missions, rockets)?, XChaChaCipher::new(key));

            // Seal in memory so a failed report never leaves a file behind.
            let mut sealed = Vec::new();
            scanner
                .save_most_reliable_rocket(&mut sealed, from, to)
                .context("failed to save most reliable rocket report")?;
            fs::write(&args.out, &sealed)
                .with_context(|| format!("failed to write report file {}", args.out.display()))?;

            emit_json(serde_json::json!({
                "out": args.out.display().to_string(),
                "bytes": sealed.len()
            }))
        }
        ReportCommand::Decrypt(args) => {
            let key = read_hex_key_file(&args.key_file).context("failed to load report key")?;
            let sealed = fs::read(&args.input)
                .with_context(|| format!("failed to read report file {}", args.input.display()))?;
            let plaintext = XChaChaCipher::new(key)
                .decrypt(&sealed)
                .with_context(|| format!("failed to decrypt report {}", args.input.display()))?;
            let rocket = String::from_utf8(plaintext).context("decrypted report is not UTF-8")?;
            emit_json(serde_json::json!({
                "rocket": rocket
            }))
        }
    }
}

fn run_key(command: KeyCommand) -> Result<()> {
    match command {
        KeyCommand::Generate(args) => {
            let key = generate_key();
            write_hex_key_file(&args.out, &key).context("failed to write key file")?;
            emit_json(serde_json::json!({
                "out": args.out.display().to_string(),
                "key_bytes": key.as_bytes().len()
            }))
        }
    }
}

impl WindowArgs {
    fn parse(&self) -> Result<(Date, Date)> {
        Ok((parse_day(&self.from)?, parse_day(&self.to)?))
    }
}

fn parse_day(value: &str) -> Result<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .with_context(|| format!("invalid date (expected YYYY-MM-DD): {value}"))
}

impl MissionStatusArg {
    fn into_mission_status(self) -> MissionStatus {
        match self {
            Self::Success => MissionStatus::Success,
            Self::Failure => MissionStatus::Failure,
            Self::PartialFailure => MissionStatus::PartialFailure,
            Self::PrelaunchFailure => MissionStatus::PrelaunchFailure,
        }
    }
}

impl RocketStatusArg {
    fn into_rocket_status(self) -> RocketStatus {
        match self {
            Self::Active => RocketStatus::Active,
            Self::Retired => RocketStatus::Retired,
        }
    }
}
