//! Add command handler

use crate::cli::DraftArgs;
use crate::config::Config;
use crate::domain::ImdbId;
use crate::models::movie::MovieDraft;
use crate::services::{MovieError, MovieService};

pub async fn cmd_add(config: &Config, args: DraftArgs) -> anyhow::Result<()> {
    let service = crate::build_service(config).await?;

    let draft = MovieDraft {
        imdb_id: ImdbId::new(args.imdb_id),
        title: args.title,
        year: args.year,
        score: args.score,
        score_average: args.score_average,
        category: args.category,
        tmdb_id: args.tmdb_id,
        trakt_id: args.trakt_id,
        mal_id: args.mal_id,
    };

    match service.create(draft).await {
        Ok(movie) => {
            println!("✓ Added: {} ({})", movie.title, movie.imdb_id);
            Ok(())
        }
        Err(MovieError::Conflict(id)) => {
            println!("Movie {} already exists.", id);
            println!("Use 'movarr edit {}' to change it.", id);
            Ok(())
        }
        Err(MovieError::Validation(msg)) => {
            println!("Invalid movie data: {}", msg);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
