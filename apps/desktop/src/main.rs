use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, resolve_base_url},
    CollectionController, CollectionState, ControllerError, HttpGateway,
};
use shared::domain::VideogameId;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Manage a remote videogame collection")]
struct Args {
    /// Overrides VIDEOGAME_API_BASE_URL and client.toml.
    #[arg(long)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the collection (default).
    List,
    /// Add a new game.
    Add {
        title: String,
        genre: String,
        /// Release year; defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Flip the completed flag of a game.
    Toggle { id: i64 },
    /// Delete a game.
    Delete {
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(base_url) = args.base_url {
        settings.api_base_url = Some(base_url);
    }
    let base_url = resolve_base_url(&settings).context("invalid startup configuration")?;
    info!(%base_url, "using videogame API");

    let controller = CollectionController::new(Arc::new(HttpGateway::new(&base_url)));
    // Outcome is reflected in the status line.
    let _ = controller.load().await;

    let code = run(&controller, args.command.unwrap_or(Command::List)).await?;
    render(&controller.snapshot().await);
    Ok(code)
}

async fn run(controller: &CollectionController, command: Command) -> Result<ExitCode> {
    let outcome = match command {
        Command::List => Ok(()),
        Command::Add { title, genre, year } => {
            controller.set_form_title(title).await;
            controller.set_form_genre(genre).await;
            if let Some(year) = year {
                controller.set_form_year(year).await;
            }
            controller.create().await.map(|created| {
                let id = created.id.map(|id| id.to_string()).unwrap_or_default();
                println!("Added \"{}\" with id {id}", created.title);
            })
        }
        Command::Toggle { id } => {
            let record = controller.snapshot().await.find(VideogameId(id)).cloned();
            let Some(record) = record else {
                eprintln!("Game {id} is not in the list");
                return Ok(ExitCode::FAILURE);
            };
            controller.toggle_complete(&record).await
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm("Are you sure you want to delete this game?")? {
                println!("Deletion cancelled");
                return Ok(ExitCode::SUCCESS);
            }
            controller.delete(VideogameId(id)).await
        }
    };
    Ok(report(outcome))
}

fn report(outcome: Result<(), ControllerError>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.notification());
            ExitCode::FAILURE
        }
    }
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn render(state: &CollectionState) {
    let message = state.status_message();
    if state.status.is_error() {
        eprintln!("{message}");
    } else if !message.is_empty() {
        println!("{message}");
    }
    for game in &state.games {
        let id = game.id.map(|id| id.to_string()).unwrap_or_default();
        let mark = if game.completed { "x" } else { " " };
        println!(
            "[{mark}] #{id} {} ({}) - {}",
            game.title, game.year, game.genre
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_listing() {
        let args = Args::try_parse_from(["videogames"]).expect("parse");
        assert!(args.command.is_none());
        assert!(args.base_url.is_none());
    }

    #[test]
    fn parses_add_with_year_and_base_url() {
        let args = Args::try_parse_from([
            "videogames",
            "--base-url",
            "http://localhost:8080/api/videogames",
            "add",
            "Celeste",
            "Platformer",
            "--year",
            "2018",
        ])
        .expect("parse");
        assert_eq!(
            args.base_url.as_deref(),
            Some("http://localhost:8080/api/videogames")
        );
        assert!(matches!(
            args.command,
            Some(Command::Add { ref title, ref genre, year: Some(2018) })
                if title == "Celeste" && genre == "Platformer"
        ));
    }

    #[test]
    fn delete_requires_an_integer_id() {
        assert!(Args::try_parse_from(["videogames", "delete", "abc"]).is_err());
        let args = Args::try_parse_from(["videogames", "delete", "3", "--yes"]).expect("parse");
        assert!(matches!(args.command, Some(Command::Delete { id: 3, yes: true })));
    }
}
