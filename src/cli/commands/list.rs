//! List command handler

use crate::config::Config;
use crate::models::movie::MovieRecord;
use crate::services::MovieService;

pub async fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let service = crate::build_service(config).await?;
    let movies = service.list().await?;

    if movies.is_empty() {
        println!("The catalog is empty.");
        println!();
        println!("Add a movie with: movarr add <imdb_id> \"<title>\"");
        return Ok(());
    }

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");

    for movie in &movies {
        print_movie_line(movie);
    }

    println!();
    println!("Legend: ✓ In library | ○ Snapshot only");

    Ok(())
}

fn print_movie_line(movie: &MovieRecord) {
    let saved_indicator = if movie.is_saved { "✓" } else { "○" };
    let year = movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "?".to_string());

    println!("{} {} ({})", saved_indicator, movie.title, year);
    println!(
        "  IMDb: {} | Type: {} | Score: {}",
        movie.imdb_id,
        movie.category,
        movie
            .score
            .map(|s| format!("{s:.1}"))
            .unwrap_or_else(|| "-".to_string())
    );
}
