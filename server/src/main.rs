mod api;
mod seed;
mod store;
#[cfg(test)]
mod testing;

use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use sea_orm::TransactionTrait;
use sea_orm_migration::MigratorTrait;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    prelude::*,
};

use base::setting::{generate_default, get_settings, load, Settings, SETTINGS};
use base::{
    database::{get_database, open_database, DATABASE},
    CLI_NAME,
};

#[derive(Parser)]
#[command(name = CLI_NAME, author, version, about, long_about = None)]
#[command(next_line_help = true)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the listen address from the config file
    #[arg(short, long, name = "ADDRESS")]
    listen_address: Option<String>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Prints the default configuration
    DefaultConfig,
    /// Fills the database with a sample data set
    Seed,
    Serve,
}

async fn prepare(config: Option<PathBuf>) -> Result<()> {
    SETTINGS.get_or_try_init(async { load(config) }).await?;
    DATABASE
        .get_or_try_init(async { open_database().await })
        .await?;
    migration::Migrator::up(get_database()?, None).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    color_eyre::install()?;
    let tracing_builder = tracing_subscriber::registry().with(fmt::layer());
    if std::env::var(base::SETLIST_LOGLEVEL).is_ok() {
        tracing_builder.with(EnvFilter::from_env(base::SETLIST_LOGLEVEL))
    } else {
        tracing_builder.with(EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }
    .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve) {
        Command::DefaultConfig => {
            let default = generate_default(Settings::default())?;
            let str = toml::to_string(&default)?;
            println!("{}", str);
            Ok(())
        }
        Command::Seed => {
            prepare(cli.config).await?;
            let tx = get_database()?.begin().await?;
            seed::run(&tx).await?;
            tx.commit().await?;
            Ok(())
        }
        Command::Serve => {
            prepare(cli.config).await?;
            let listen = match cli.listen_address {
                Some(listen) => listen,
                None => get_settings()?.listen.to_owned(),
            };
            let addr: SocketAddr = listen
                .parse()
                .wrap_err(eyre!("Invalid listen address: {}", listen))?;
            tracing::info! {%addr, "Listening"};
            let router = api::router(get_database()?.clone());
            axum::Server::bind(&addr)
                .serve(router.into_make_service())
                .await?;
            Ok(())
        }
    }
}
