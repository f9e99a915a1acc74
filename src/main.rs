use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::*;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};

use hackersim::{
    bruteforce::{hash_password, Complexity, HashCracker, Wordlist},
    output::{OutputConfig, OutputFormat, OutputManager},
    utils::{target::describe_target, Logger},
    BruteforceSimulator, ScanSimulator, SimConfig,
};

fn build_cli() -> Command {
    let count_arg = Arg::new("count")
        .short('n')
        .long("count")
        .value_name("N")
        .help("Run N independent simulations concurrently")
        .value_parser(clap::value_parser!(u32).range(1..=64))
        .default_value("1");

    let stealth_arg = Arg::new("stealth")
        .short('s')
        .long("stealth")
        .help("Slower, quieter operation with a lower detection level")
        .action(ArgAction::SetTrue);

    Command::new("hackersim")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Simulated recon and password cracking for terminal hacking games")
        .subcommand_required(true)
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format: text or json")
                .default_value("text")
                .global(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for reproducible results")
                .value_parser(clap::value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Load settings from a TOML file instead of ~/.hackersim.toml")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("scan")
                .about("Simulate a network scan")
                .arg(Arg::new("target").value_name("TARGET").required(true).index(1))
                .arg(stealth_arg.clone())
                .arg(count_arg.clone()),
        )
        .subcommand(
            Command::new("crack")
                .about("Simulate a password bruteforce")
                .arg(Arg::new("target").value_name("URL").required(true).index(1))
                .arg(stealth_arg)
                .arg(
                    Arg::new("hint")
                        .short('H')
                        .long("hint")
                        .value_name("HINT")
                        .help("Clue about the password (repeatable), e.g. \"birth year\"")
                        .action(ArgAction::Append),
                )
                .arg(count_arg),
        )
        .subcommand(
            Command::new("wordlist")
                .about("Print candidate passwords")
                .arg(level_arg("1"))
                .arg(
                    Arg::new("limit")
                        .short('l')
                        .long("limit")
                        .value_name("N")
                        .help("Stop after N candidates")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("hash")
                .about("Hash a password with an optional salt")
                .arg(Arg::new("password").value_name("PASSWORD").required(true).index(1))
                .arg(salt_arg()),
        )
        .subcommand(
            Command::new("crack-hash")
                .about("Search a wordlist for a salted SHA-256 hash")
                .arg(Arg::new("hash").value_name("HASH").required(true).index(1))
                .arg(salt_arg())
                .arg(level_arg("2")),
        )
}

fn level_arg(default: &'static str) -> Arg {
    Arg::new("level")
        .short('L')
        .long("level")
        .value_name("LEVEL")
        .help("Wordlist complexity: 1 dictionary, 2 numeric variants, 3 exhaustive")
        .value_parser(clap::value_parser!(Complexity))
        .default_value(default)
}

fn salt_arg() -> Arg {
    Arg::new("salt")
        .long("salt")
        .value_name("SALT")
        .help("Salt appended to the password before hashing")
        .default_value("")
}

fn load_config(matches: &ArgMatches) -> Result<SimConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SimConfig::from_toml_file(Path::new(path))
            .with_context(|| format!("loading {}", path))?,
        None => SimConfig::load_default_config(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    Ok(config)
}

fn spinner(output: &OutputManager, message: String) -> Option<ProgressBar> {
    if output.format() != OutputFormat::Text {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

async fn run_scan(config: &SimConfig, output: &OutputManager, sub: &ArgMatches) -> Result<()> {
    let target = sub.get_one::<String>("target").map(String::as_str).unwrap_or_default();
    let stealth = sub.get_flag("stealth");
    let count = sub.get_one::<u32>("count").copied().unwrap_or(1);

    log::debug!("Scanning {:?} (stealth={}, runs={})", describe_target(target), stealth, count);
    let progress = spinner(output, format!("Scanning {}...", target));

    let simulator = ScanSimulator::new();
    let runs = (0..count).map(|i| {
        let simulator = &simulator;
        let mut rng = config.rng(u64::from(i));
        async move { simulator.scan_with_rng(target, stealth, &mut rng).await }
    });
    let results = join_all(runs).await;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let results = results.into_iter().collect::<hackersim::Result<Vec<_>>>()?;
    for result in &results {
        Logger::log_scan_complete(target, result);
    }
    println!("{}", output.render_scans(target, &results)?);
    Ok(())
}

async fn run_crack(config: &SimConfig, output: &OutputManager, sub: &ArgMatches) -> Result<()> {
    let target = sub.get_one::<String>("target").map(String::as_str).unwrap_or_default();
    let stealth = sub.get_flag("stealth");
    let count = sub.get_one::<u32>("count").copied().unwrap_or(1);
    let hints: Vec<String> = sub
        .get_many::<String>("hint")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let hints = (!hints.is_empty()).then_some(hints);

    log::debug!("Cracking {} (stealth={}, hints={:?}, runs={})", target, stealth, hints, count);
    let progress = spinner(output, format!("Bruteforcing {}...", target));

    let simulator = BruteforceSimulator::new();
    let runs = (0..count).map(|i| {
        let simulator = &simulator;
        let hints = hints.as_deref();
        let mut rng = config.rng(u64::from(i));
        async move { simulator.crack_with_rng(target, stealth, hints, &mut rng).await }
    });
    let results = join_all(runs).await;

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let results = results.into_iter().collect::<hackersim::Result<Vec<_>>>()?;
    for result in &results {
        Logger::log_crack_complete(target, result);
    }
    println!("{}", output.render_cracks(target, &results)?);
    Ok(())
}

fn run_wordlist(sub: &ArgMatches) {
    let level = sub.get_one::<Complexity>("level").copied().unwrap_or(Complexity::Dictionary);
    let wordlist = Wordlist::new(level);
    let limit = match (sub.get_one::<u64>("limit"), level) {
        (Some(limit), _) => *limit,
        // The exhaustive sweep never ends on its own
        (None, Complexity::Exhaustive) => 10_000,
        (None, _) => u64::MAX,
    };
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);

    for candidate in wordlist.take(limit) {
        println!("{}", candidate);
    }
}

fn run_crack_hash(config: &SimConfig, sub: &ArgMatches) {
    let hash = sub.get_one::<String>("hash").map(String::as_str).unwrap_or_default();
    let salt = sub.get_one::<String>("salt").map(String::as_str).unwrap_or_default();
    let level = sub.get_one::<Complexity>("level").copied().unwrap_or(Complexity::Numeric);

    let limit = config.hash_attempt_limit.or(match level {
        Complexity::Exhaustive => Some(1_000_000),
        _ => None,
    });
    let wordlist = Wordlist::new(level);
    let search_space = wordlist.total_candidates();
    log::debug!(
        "Searching level {} ({}) wordlist of {} candidates, limit {:?}",
        wordlist.complexity().level(),
        wordlist.complexity(),
        search_space,
        limit
    );

    let outcome = HashCracker::new(salt).with_limit(limit).crack(hash, wordlist);

    match outcome.password {
        Some(password) => println!(
            "{} {} ({} of {} candidates tried)",
            "[✓] Match:".bright_green(),
            password.bright_green().bold(),
            outcome.attempts,
            search_space
        ),
        None => println!(
            "{} ({} of {} candidates tried, level {})",
            "[!] No match".bright_red(),
            outcome.attempts,
            search_space,
            level.level()
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    Logger::init(Logger::level_for(matches.get_flag("verbose")));

    let config = load_config(&matches)?;
    let format = matches
        .get_one::<String>("format")
        .map(|f| f.parse::<OutputFormat>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or(OutputFormat::Text);
    let output = OutputManager::new(OutputConfig {
        format,
        ..OutputConfig::default()
    });

    match matches.subcommand() {
        Some(("scan", sub)) => run_scan(&config, &output, sub).await?,
        Some(("crack", sub)) => run_crack(&config, &output, sub).await?,
        Some(("wordlist", sub)) => run_wordlist(sub),
        Some(("hash", sub)) => {
            let password = sub.get_one::<String>("password").map(String::as_str).unwrap_or_default();
            let salt = sub.get_one::<String>("salt").map(String::as_str).unwrap_or_default();
            println!("{}", hash_password(password, salt));
        }
        Some(("crack-hash", sub)) => run_crack_hash(&config, sub),
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
