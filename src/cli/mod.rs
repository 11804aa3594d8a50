//! CLI module - Command-line interface for Movarr
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Args, Parser, Subcommand};

pub use commands::{cmd_add, cmd_edit, cmd_import, cmd_info, cmd_list, cmd_remove};

/// Movarr - Movie Catalog Manager
/// Reconciles a JSON snapshot feed with a persisted movie library
#[derive(Parser)]
#[command(name = "movarr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the reconciled catalog, importing new snapshot records
    #[command(alias = "ls", alias = "l")]
    List,

    /// Show details for one movie
    #[command(alias = "i")]
    Info {
        /// IMDb id of the movie
        imdb_id: String,
    },

    /// Add a movie to the library
    #[command(alias = "a")]
    Add(DraftArgs),

    /// Edit a movie in the library
    #[command(alias = "e")]
    Edit(EditArgs),

    /// Remove a movie from the library
    #[command(alias = "rm", alias = "r")]
    Remove {
        /// IMDb id of the movie
        imdb_id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Import new snapshot records without printing the catalog
    Import,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Args)]
pub struct DraftArgs {
    /// IMDb id (the catalog's natural key)
    pub imdb_id: String,

    /// Title
    pub title: String,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub score: Option<f32>,

    #[arg(long)]
    pub score_average: Option<f32>,

    /// Catalog category, e.g. movie or series
    #[arg(long, default_value = "movie")]
    pub category: String,

    #[arg(long)]
    pub tmdb_id: Option<i32>,

    #[arg(long)]
    pub trakt_id: Option<i32>,

    #[arg(long)]
    pub mal_id: Option<i32>,
}

#[derive(Args)]
pub struct EditArgs {
    /// IMDb id of the movie to edit
    pub imdb_id: String,

    /// Replacement key carried in the payload; must match the path key
    /// (the key is immutable)
    #[arg(long = "imdb-id")]
    pub new_imdb_id: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub score: Option<f32>,

    #[arg(long)]
    pub score_average: Option<f32>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub tmdb_id: Option<i32>,

    #[arg(long)]
    pub trakt_id: Option<i32>,

    #[arg(long)]
    pub mal_id: Option<i32>,
}
