use clap::Parser;
use services::{AppServices, Clock};

mod commands;
mod config;
mod console;
mod logging;

use commands::Dispatcher;
use config::{Cli, CliCommand};
use console::TerminalConsole;

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let db_url = config::normalize_sqlite_url(&cli.db);
    // Open + migrate SQLite here so services never deal with file paths.
    config::prepare_sqlite_file(&db_url)?;
    tracing::debug!(%db_url, "using database");

    match cli.command.unwrap_or(CliCommand::Run) {
        CliCommand::Run => {
            let services = AppServices::new_sqlite(&db_url, Clock::system(), cli.seed).await?;
            let mut console = TerminalConsole::new(!cli.no_color);
            Dispatcher::new(&services).run(&mut console).await;
        }
        CliCommand::Seed => {
            let services = AppServices::new_sqlite(&db_url, Clock::system(), false).await?;
            let inserted = services.quiz_service().seed_samples().await?;
            if inserted == 0 {
                println!("The store already has quizzes; nothing inserted.");
            } else {
                println!("Inserted {inserted} sample quizzes into {db_url}.");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    if let Err(err) = run(cli).await {
        tracing::error!(%err, "quiz exited with an error");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
