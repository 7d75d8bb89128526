// homescout - ask your listings spreadsheet questions instead of scrolling it
//
// This is the shell: load the dataset, then feed every input line to the
// chat dispatcher and print whatever comes back. All the logic lives in
// the library.

use anyhow::Context;
use homescout_lib::{store, ChatBot, Store};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homescout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("properties.csv"));

    // A broken dataset is not fatal: the session starts with an empty
    // store and every command answers accordingly.
    let store = match store::load_csv(&data_file).await {
        Ok(store) => {
            tracing::info!("loaded {} listings from {}", store.len(), data_file.display());
            store
        }
        Err(e) => {
            tracing::error!("{}", e);
            Store::default()
        }
    };

    let data_dir = match std::env::var("HOMESCOUT_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => dirs::home_dir()
            .context("could not find home directory")?
            .join(".homescout"),
    };
    tokio::fs::create_dir_all(&data_dir)
        .await
        .with_context(|| format!("could not create data directory {}", data_dir.display()))?;

    let mut bot = ChatBot::new(store, &data_dir);

    println!("Welcome to homescout!");
    println!("Type 'help' for available commands. Type 'exit' to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            return Ok(());
        }
        if !input.is_empty() {
            println!("{}", bot.process(input).await);
        }
        prompt()?;
    }

    // stdin closed (piped input ran out)
    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}
