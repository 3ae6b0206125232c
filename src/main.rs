// birdwatch - keeps the bird catalog and resets it to the demo set on demand
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::Context;
use birdwatch_lib::{
    cli::{parse_bird_flags, take_db_flag},
    core::Seeder,
    Bird, Config, Database,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `list --json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (db_override, args) = take_db_flag(args)?;

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "seed" => handle_seed(db_override).await,
        "list" => handle_list(db_override, &args[1..]).await,
        "add" => handle_add(db_override, &args[1..]).await,
        "status" => handle_status(db_override).await,
        "version" | "-v" | "--version" => {
            println!("birdwatch v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            anyhow::bail!("unknown command '{}'", command)
        }
    }
}

async fn handle_seed(db_override: Option<PathBuf>) -> anyhow::Result<()> {
    let db = Arc::new(open_database(db_override).await?);
    let seeder = Seeder::new(db.clone());

    let report = seeder
        .run()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context("seeding the bird table")?;

    println!("Removed {} bird(s), seeded {}:", report.deleted, report.birds.len());
    for bird in &report.birds {
        println!("  {:>4}  {}", bird.id.unwrap_or_default(), bird);
    }

    db.close().await;
    Ok(())
}

async fn handle_list(db_override: Option<PathBuf>, args: &[String]) -> anyhow::Result<()> {
    let as_json = args.iter().any(|a| a == "--json");
    let term = args
        .iter()
        .filter(|a| a.as_str() != "--json")
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");

    let db = open_database(db_override).await?;
    let birds = db.search_birds(&term).await?;

    if as_json {
        let records: Vec<serde_json::Value> = birds.iter().map(Bird::to_json).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if birds.is_empty() {
        println!("No birds found.");
    } else {
        for bird in &birds {
            println!("{:>4}  {}", bird.id.unwrap_or_default(), bird);
        }
    }

    db.close().await;
    Ok(())
}

async fn handle_add(db_override: Option<PathBuf>, args: &[String]) -> anyhow::Result<()> {
    let bird = parse_bird_flags(args)?;

    let db = open_database(db_override).await?;
    let saved = db.insert_bird(&bird).await.context("adding bird")?;
    println!("{}", serde_json::to_string_pretty(&saved.to_json())?);

    db.close().await;
    Ok(())
}

async fn handle_status(db_override: Option<PathBuf>) -> anyhow::Result<()> {
    let db = open_database(db_override).await?;
    let stats = db.stats().await?;

    println!("\nbirdwatch Status");
    println!("{}", "=".repeat(60));
    println!("  Database: {}", db.path().display());
    println!("  Birds:    {}", stats.total_birds);
    println!("{}", "=".repeat(60));

    db.close().await;
    Ok(())
}

async fn open_database(db_override: Option<PathBuf>) -> anyhow::Result<Database> {
    let config = Config::load(db_override)?;
    let path = config.database_path;

    tracing::info!("Connecting to database at {}", path.display());

    Database::new(&path)
        .await
        .with_context(|| format!("opening database at {}", path.display()))
}

fn print_usage() {
    println!(
        r#"birdwatch v{} - bird catalog storage

USAGE:
    birdwatch [--db <path>] <COMMAND> [OPTIONS]

COMMANDS:
    seed                   Replace every bird with the demo catalog
    list [term] [--json]   List birds, optionally filtered by name
    add [--name N] [--species S] [--image I]
                           Add one bird
    status                 Show database path and bird count
    version                Show version
    help                   Show this help

ENVIRONMENT:
    BIRDWATCH_DB           Database file (default: ~/.birdwatch/birds.db)
    RUST_LOG               Log filter (default: info)

EXAMPLES:
    birdwatch seed
    birdwatch list dove
    birdwatch list --json
    birdwatch add --name "Blue Jay" --species "Cyanocitta Cristata"
"#,
        env!("CARGO_PKG_VERSION")
    );
}
