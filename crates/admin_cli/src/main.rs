use std::{error::Error, path::PathBuf};

use api_types::data::DataFile;
use clap::{Args, Parser, Subcommand};
use engine::{Decimal, Engine, Report};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use server::convert;

#[derive(Parser, Debug)]
#[command(name = "divvy_admin")]
#[command(about = "Admin utilities for divvy (participants, report, backups)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./divvy.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print balances and the payments that settle them.
    Report,
    Participants(Participants),
    /// Write the whole group as JSON.
    Export(ExportArgs),
    /// Replace the whole group with a JSON file.
    Import(ImportArgs),
}

#[derive(Args, Debug)]
struct Participants {
    #[command(subcommand)]
    command: ParticipantsCommand,
}

#[derive(Subcommand, Debug)]
enum ParticipantsCommand {
    /// Replace the participant list.
    Set(ParticipantsSetArgs),
}

#[derive(Args, Debug)]
struct ParticipantsSetArgs {
    #[arg(required = true)]
    names: Vec<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output file; stdout when omitted.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ImportArgs {
    file: PathBuf,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn print_report(report: &Report, currency: &str) {
    println!("total: {} {currency}", report.total);
    println!(
        "per head: {} {currency}",
        (report.per_head / Decimal::ONE_HUNDRED).round_dp(2)
    );
    println!();
    for member in &report.summary {
        println!(
            "{:<20} paid {:>10}  share {:>10}  balance {:>10}",
            member.name, member.paid, member.share, member.balance
        );
    }
    println!();
    if report.payments.is_empty() {
        println!("nothing to settle");
    }
    for payment in &report.payments {
        println!("{} -> {}: {} {currency}", payment.from, payment.to, payment.amount);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build();

    match cli.command {
        Command::Report => {
            let settings = engine.settings().await?;
            let report = match engine.report().await {
                Ok(report) => report,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(1);
                }
            };
            if !settings.event.is_empty() {
                println!("{}", settings.event);
            }
            print_report(&report, &settings.currency);
        }
        Command::Participants(Participants {
            command: ParticipantsCommand::Set(args),
        }) => {
            let participants = engine.set_participants(args.names).await?;
            println!("participants: {}", participants.join(", "));
        }
        Command::Export(args) => {
            let snapshot = engine.snapshot().await?;
            let json = serde_json::to_string_pretty(&convert::data_file(&snapshot))?;
            match args.output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Import(args) => {
            let raw = std::fs::read_to_string(&args.file)?;
            let data: DataFile = serde_json::from_str(&raw)?;
            let snapshot = match convert::snapshot_from_data(data) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    eprintln!("invalid data file: {err}");
                    std::process::exit(2);
                }
            };
            let (participants, expenses) =
                (snapshot.participants.len(), snapshot.expenses.len());
            engine.replace_snapshot(snapshot).await?;
            println!("imported {participants} participants and {expenses} expenses");
        }
    }

    Ok(())
}
