use std::{error::Error, io::Write, path::Path, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    style::Print,
    terminal,
    terminal::ClearType,
};
use engine::{Engine, NewUser};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use serde::{Serialize, de::DeserializeOwned};

#[derive(Parser, Debug)]
#[command(name = "holocron_admin")]
#[command(about = "Admin utilities for Holocron (seed the catalog, bootstrap users)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./holocron.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(User),
    /// Load catalog rows from a CSV file whose header names the columns.
    Import(ImportArgs),
    /// Print catalog rows as CSV.
    List(ListArgs),
}

#[derive(Args, Debug)]
struct User {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    /// Create the account disabled.
    #[arg(long)]
    inactive: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Catalog {
    People,
    Planets,
    Vehicles,
}

#[derive(Args, Debug)]
struct ImportArgs {
    catalog: Catalog,
    #[arg(long)]
    file: PathBuf,
}

#[derive(Args, Debug)]
struct ListArgs {
    catalog: Catalog,
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self, Box<dyn Error + Send + Sync>> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn prompt_password(prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
    let _raw = RawModeGuard::enter()?;

    let mut out = std::io::stderr();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;

    let mut buf = String::new();
    loop {
        let Event::Key(KeyEvent {
            code, modifiers, ..
        }) = event::read()?
        else {
            continue;
        };

        match code {
            KeyCode::Enter => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                break;
            }
            KeyCode::Backspace => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                    out.flush()?;
                }
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                out.flush()?;
                return Err("interrupted".into());
            }
            KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
                out.flush()?;
            }
            _ => {}
        }
    }

    Ok(buf)
}

fn prompt_password_twice() -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut out = std::io::stderr();
    for _ in 0..3 {
        let p1 = prompt_password("Password: ")?;
        if p1.is_empty() {
            execute!(
                out,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print("Password must not be empty.\r\n")
            )?;
            continue;
        }

        let p2 = prompt_password("Confirm password: ")?;
        if p1 == p2 {
            return Ok(p1);
        }

        execute!(
            out,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("Passwords do not match. Try again.\r\n")
        )?;
    }

    Err("too many attempts".into())
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Box<dyn Error + Send + Sync>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

fn write_rows<T: Serialize>(rows: Vec<T>) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(User {
            command: UserCommand::Create(args),
        }) => {
            let password = prompt_password_twice()?;
            let user = engine
                .signup(NewUser {
                    username: args.username,
                    email: args.email,
                    password,
                    is_active: !args.inactive,
                })
                .await?;
            println!("created user: {} ({})", user.username, user.id);
        }
        Command::User(User {
            command: UserCommand::List,
        }) => {
            for user in engine.list_users().await? {
                println!(
                    "{}\t{}\t{}\t{}",
                    user.id,
                    user.username,
                    user.email,
                    if user.is_active { "active" } else { "inactive" }
                );
            }
        }
        Command::Import(args) => {
            let count = match args.catalog {
                Catalog::People => engine.import_people(read_rows(&args.file)?).await?,
                Catalog::Planets => engine.import_planets(read_rows(&args.file)?).await?,
                Catalog::Vehicles => engine.import_vehicles(read_rows(&args.file)?).await?,
            };
            println!("imported {count} rows into {:?}", args.catalog);
        }
        Command::List(args) => match args.catalog {
            Catalog::People => write_rows(engine.list_people().await?)?,
            Catalog::Planets => write_rows(engine.list_planets().await?)?,
            Catalog::Vehicles => write_rows(engine.list_vehicles().await?)?,
        },
    }

    Ok(())
}
