pub mod cli;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod snapshot;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
pub use config::Config;
use config::StoreBackend;
use db::Store;
use services::movie_store::MovieStore;
use services::reconcile::MovieSource;
use services::{DefaultMovieService, SeaOrmMovieStore, SnapshotMovieStore};
use snapshot::SnapshotCatalog;
use tracing_subscriber::EnvFilter;

pub async fn run(config: Config) -> anyhow::Result<()> {
    config.validate()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = cli::Cli::parse();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        cli::Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        cli::Commands::List => cli::cmd_list(&config).await,

        cli::Commands::Info { imdb_id } => cli::cmd_info(&config, &imdb_id).await,

        cli::Commands::Add(args) => cli::cmd_add(&config, args).await,

        cli::Commands::Edit(args) => cli::cmd_edit(&config, args).await,

        cli::Commands::Remove { imdb_id, yes } => cli::cmd_remove(&config, &imdb_id, yes).await,

        cli::Commands::Import => cli::cmd_import(&config).await,

        cli::Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("Config file already exists.");
            }
            Ok(())
        }
    }
}

/// Wires the command surface over the configured backend.
///
/// Both modes share the same service implementation; only the store behind
/// it changes. In database mode the snapshot is an import-only feed; in
/// legacy snapshot mode the feed document is also the store.
pub async fn build_service(config: &Config) -> anyhow::Result<DefaultMovieService> {
    let source: Arc<dyn MovieSource> =
        Arc::new(SnapshotCatalog::new(&config.catalog.snapshot_path));

    let store: Arc<dyn MovieStore> = match config.catalog.backend {
        StoreBackend::Database => {
            let store = Store::with_pool_options(
                &config.general.database_path,
                config.general.max_db_connections,
                config.general.min_db_connections,
            )
            .await
            .context("Failed to open movie database")?;
            Arc::new(SeaOrmMovieStore::new(store))
        }
        StoreBackend::Snapshot => Arc::new(SnapshotMovieStore::new(SnapshotCatalog::new(
            &config.catalog.snapshot_path,
        ))),
    };

    Ok(DefaultMovieService::new(source, store))
}
