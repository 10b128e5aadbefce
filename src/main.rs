use clap::Parser;
use voicevault::cli::commands::{Cli, Commands};
use voicevault::config::VaultConfig;
use voicevault::domain::values::category_kind::CategoryKind;
use voicevault::domain::values::lane::Lane;
use voicevault::VoiceVault;

fn main() {
    let cli = Cli::parse();

    let config = match VaultConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config.log_level);

    let vault = match VoiceVault::new(&cli.db, config) {
        Ok(vault) => vault,
        Err(e) => {
            eprintln!("Error initializing VoiceVault: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(&vault, cli.command);
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries only JSON results.
fn init_tracing(log_level: &str) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }
}

fn run_command(vault: &VoiceVault, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let mutating = cmd.is_mutating();

    match cmd {
        Commands::Create { kind, name } => {
            let kind: CategoryKind = kind.parse()?;
            if vault.create_category(kind, &name)? {
                println!("Created {kind} category '{}'", name.trim());
            } else {
                println!("{kind} category '{}' already exists", name.trim());
            }
        }
        Commands::Add {
            kind,
            category,
            lane,
            text,
        } => {
            let kind: CategoryKind = kind.parse()?;
            let lane: Lane = lane.parse()?;
            let sample = vault.add_sample(kind, &category, lane, &text)?;
            println!("{}", serde_json::to_string_pretty(&sample)?);
        }
        Commands::Samples {
            kind,
            category,
            lane,
        } => {
            let kind: CategoryKind = kind.parse()?;
            let lane: Lane = lane.parse()?;
            let samples = vault.list_samples(kind, &category, lane)?;
            println!("{}", serde_json::to_string_pretty(&samples)?);
        }
        Commands::Retrieve {
            kind,
            category,
            lane,
            query,
            k,
            lane_only,
        } => {
            let kind: CategoryKind = kind.parse()?;
            let lane: Lane = lane.parse()?;
            let results = if lane_only {
                vault.retrieve_in_lane(kind, &category, lane, &query, k)?
            } else {
                vault.retrieve(kind, &category, lane, &query, k)?
            };
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Commands::Categories { kind } => {
            let kind: CategoryKind = kind.parse()?;
            for name in vault.list_categories(kind)? {
                println!("{name}");
            }
        }
        Commands::Stats { kind, category } => {
            let kind: CategoryKind = kind.parse()?;
            let stats = vault.stats(kind, &category)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Delete { kind, category } => {
            let kind: CategoryKind = kind.parse()?;
            if vault.delete_category(kind, &category)? {
                println!("Deleted {kind} category '{}'", category.trim());
            } else {
                return Err(format!("No {kind} category named '{}'", category.trim()).into());
            }
        }
        Commands::Rename { kind, from, to } => {
            let kind: CategoryKind = kind.parse()?;
            vault.rename_category(kind, &from, &to)?;
            println!("Renamed {kind} category '{}' to '{}'", from.trim(), to.trim());
        }
        Commands::Pop {
            kind,
            category,
            lane,
            index,
        } => {
            let kind: CategoryKind = kind.parse()?;
            let lane: Lane = lane.parse()?;
            match vault.delete_sample(kind, &category, lane, index)? {
                Some(sample) => println!("{}", serde_json::to_string_pretty(&sample)?),
                None => return Err(format!("No sample at position {index} in {lane}").into()),
            }
        }
    }

    if mutating {
        vault.save()?;
    }
    Ok(())
}
