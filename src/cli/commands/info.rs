//! Info command handler

use crate::config::Config;
use crate::domain::ImdbId;
use crate::services::{MovieError, MovieService};

pub async fn cmd_info(config: &Config, imdb_id: &str) -> anyhow::Result<()> {
    let service = crate::build_service(config).await?;
    let id = ImdbId::new(imdb_id);

    let movie = match service.get(&id).await {
        Ok(movie) => movie,
        Err(MovieError::NotFound(id)) => {
            println!("Movie {} not found in the library.", id);
            println!("Run 'movarr list' to import the snapshot feed first.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    println!("Movie Info");
    println!("{:-<60}", "");
    println!("Title:    {}", movie.title);
    println!("IMDb:     {}", movie.imdb_id);
    println!("Type:     {}", movie.category);
    if let Some(year) = movie.year {
        println!("Year:     {}", year);
    }
    if let Some(score) = movie.score {
        println!("Score:    {:.1}", score);
    }
    if let Some(avg) = movie.score_average {
        println!("Average:  {:.1}", avg);
    }

    let mut refs = Vec::new();
    if let Some(tmdb) = movie.tmdb_id {
        refs.push(format!("TMDb: {tmdb}"));
    }
    if let Some(trakt) = movie.trakt_id {
        refs.push(format!("Trakt: {trakt}"));
    }
    if let Some(mal) = movie.mal_id {
        refs.push(format!("MAL: {mal}"));
    }
    if !refs.is_empty() {
        println!("Refs:     {}", refs.join(" | "));
    }

    Ok(())
}
