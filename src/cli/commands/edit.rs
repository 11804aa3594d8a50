//! Edit command handler

use crate::cli::EditArgs;
use crate::config::Config;
use crate::domain::ImdbId;
use crate::models::movie::MovieDraft;
use crate::services::{MovieError, MovieService};

pub async fn cmd_edit(config: &Config, args: EditArgs) -> anyhow::Result<()> {
    let service = crate::build_service(config).await?;
    let id = ImdbId::new(args.imdb_id);

    let existing = match service.get(&id).await {
        Ok(movie) => movie,
        Err(MovieError::NotFound(id)) => {
            println!("Movie {} not found in the library.", id);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let draft = MovieDraft {
        imdb_id: args.new_imdb_id.map_or_else(|| id.clone(), ImdbId::new),
        title: args.title.unwrap_or(existing.title),
        year: args.year.or(existing.year),
        score: args.score.or(existing.score),
        score_average: args.score_average.or(existing.score_average),
        category: args.category.unwrap_or(existing.category),
        tmdb_id: args.tmdb_id.or(existing.tmdb_id),
        trakt_id: args.trakt_id.or(existing.trakt_id),
        mal_id: args.mal_id.or(existing.mal_id),
    };

    match service.update(&id, draft).await {
        Ok(movie) => {
            println!("✓ Updated: {} ({})", movie.title, movie.imdb_id);
            Ok(())
        }
        Err(MovieError::Validation(msg)) => {
            println!("Invalid movie data: {}", msg);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
