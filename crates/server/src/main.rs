//! Coursebook server
//!
//! Serves the authors/courses demo dataset over the cache-validated API.

use clap::Parser;
use coursebook_api::{ServerConfig, create_app_with_config, demo_catalog, init_logging};
use coursebook_store::MemoryStore;
use serde_json::json;
use tracing::info;

/// Creates the in-memory store and loads the demo dataset.
fn seed_store() -> anyhow::Result<MemoryStore> {
    let store = MemoryStore::new();

    let authors = [
        json!({
            "id": "a1",
            "firstName": "Berry",
            "lastName": "Griffin Beach Rutherford",
            "dateOfBirth": "1650-07-23",
            "mainCategory": "Ships"
        }),
        json!({
            "id": "a2",
            "firstName": "Nancy",
            "lastName": "Stone Chest Rock",
            "dateOfBirth": "1668-05-21",
            "mainCategory": "Rum"
        }),
        json!({
            "id": "a3",
            "firstName": "Eli",
            "lastName": "Ivory Bones Sweet",
            "dateOfBirth": "1701-12-16",
            "mainCategory": "Singing"
        }),
        json!({
            "id": "a4",
            "firstName": "Arnold",
            "lastName": "The Unseen Stafford",
            "dateOfBirth": "1702-03-06",
            "mainCategory": "Singing"
        }),
        json!({
            "id": "a5",
            "firstName": "Seabury",
            "lastName": "Toxic Reyson",
            "dateOfBirth": "1690-11-23",
            "mainCategory": "Maps"
        }),
        json!({
            "id": "a6",
            "firstName": "Rutherford",
            "lastName": "Huntington",
            "dateOfBirth": "1723-04-05",
            "mainCategory": "Maps"
        }),
    ];
    for author in authors {
        let id = author["id"].as_str().unwrap_or_default().to_string();
        store.insert("authors", id, author)?;
    }

    let courses = [
        json!({
            "id": "c1",
            "authorId": "a1",
            "title": "Commandeering a Ship Without Getting Caught",
            "description": "Commandeering a ship in rough waters isn't easy. Commandeering it without getting caught is even harder. In this course you'll learn how to sail away and avoid those pesky musketeers."
        }),
        json!({
            "id": "c2",
            "authorId": "a1",
            "title": "Overthrowing Mutiny",
            "description": "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny."
        }),
        json!({
            "id": "c3",
            "authorId": "a2",
            "title": "Avoiding Brawls While Drinking as Much Rum as You Desire",
            "description": "Every good pirate loves rum, but it also has a tendency to get you into trouble. In this course you'll learn how to avoid that."
        }),
        json!({
            "id": "c4",
            "authorId": "a3",
            "title": "Singalong Pirate Hits",
            "description": "In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note."
        }),
    ];
    for course in courses {
        let id = course["id"].as_str().unwrap_or_default().to_string();
        store.insert("courses", id, course)?;
    }

    info!(
        authors = store.len("authors"),
        courses = store.len("courses"),
        "Demo dataset loaded"
    );
    Ok(store)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        "Starting Coursebook server"
    );

    let catalog = demo_catalog(config.default_cache_directives())?;
    let store = seed_store()?;
    let app = create_app_with_config(store, catalog, config.clone());
    serve(app, &config).await
}
