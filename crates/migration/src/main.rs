use std::str::FromStr;

use sea_orm::Database;
use sea_orm_migration::prelude::*;

const DEFAULT_DATABASE_URL: &str = "sqlite:./divvy.db?mode=rwc";
const USAGE: &str = "usage: migration [up|down|fresh|status]  (database from DATABASE_URL)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Up,
    Down,
    Fresh,
    Status,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "status" => Ok(Self::Status),
            other => Err(format!("unknown command '{other}'\n{USAGE}")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let command = match std::env::args().nth(1).as_deref().map(Command::from_str) {
        None => Command::Up,
        Some(Ok(command)) => command,
        Some(Err(err)) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let db_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    let db = Database::connect(&db_url).await?;

    match command {
        Command::Up => migration::Migrator::up(&db, None).await?,
        // Dropping the only migration removes every divvy table.
        Command::Down => migration::Migrator::down(&db, None).await?,
        Command::Fresh => migration::Migrator::fresh(&db).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }
    if command != Command::Status {
        println!("{command:?} applied to {db_url}");
    }

    Ok(())
}
