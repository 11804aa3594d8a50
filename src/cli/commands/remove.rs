//! Remove command handler

use crate::config::Config;
use crate::domain::ImdbId;
use crate::services::{MovieError, MovieService};

pub async fn cmd_remove(config: &Config, imdb_id: &str, yes: bool) -> anyhow::Result<()> {
    let service = crate::build_service(config).await?;
    let id = ImdbId::new(imdb_id);

    let movie = match service.get(&id).await {
        Ok(movie) => movie,
        Err(MovieError::NotFound(id)) => {
            println!("Movie {} not found in the library.", id);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if !yes {
        println!("Remove '{}' ({}) from the library?", movie.title, movie.imdb_id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    service.delete(&id).await?;
    println!("✓ Removed: {}", movie.title);

    Ok(())
}
