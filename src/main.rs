use log::error;
use std::env;
use std::process;

use pantry_ingest::{IngestConfig, RecipeIngestor, SourceDocument};

fn usage() -> ! {
    eprintln!("Usage: pantry-ingest <url>");
    eprintln!("       pantry-ingest --pdf <path>");
    process::exit(2);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = IngestConfig::load().unwrap_or_default();
    let ingestor = RecipeIngestor::new(config, None)?;

    let recipe = match args.get(1).map(String::as_str) {
        Some("--pdf") => {
            let path = args.get(2).unwrap_or_else(|| usage());
            let data = tokio::fs::read(path).await?;
            ingestor.ingest_from_document(&SourceDocument::pdf(data)).await
        }
        Some(url) => ingestor.ingest_from_url(url).await,
        None => usage(),
    };

    match recipe {
        Ok(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Err(err) => {
            error!("Ingestion failed: {}", err);
            Err(err.into())
        }
    }
}
