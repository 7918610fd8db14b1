use crate::config::Config;
use crate::db::properties::count_properties;
use crate::db::{init_db, Database};
use crate::router::{serve, AppState};
use astra::Server;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod routes;
mod seed;


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 1️⃣ Create the database handle and apply the schema
    let db = Database::new(&config.database_path);
    if let Err(e) = init_db(&db) {
        error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 2️⃣ Load seed data, if any
    if let Some(seed_file) = &config.seed_file {
        if let Err(e) = seed::seed_database(&db, seed_file) {
            error!(path = %seed_file.display(), "Seeding failed: {e}");
            std::process::exit(1);
        }
    }
    match db.with_conn(|conn| count_properties(conn)) {
        Ok(count) => info!(count, "properties available"),
        Err(e) => {
            error!("Database check failed: {e}");
            std::process::exit(1);
        }
    }

    // 3️⃣ Start the server
    let addr = config.addr();
    info!("Server running on http://{addr}");

    let state = AppState {
        db,
        api: config.api,
    };
    let server = Server::bind(addr).max_workers(config.max_workers);

    // 4️⃣ Serve requests; each worker opens its own connection on first use
    let result = server.serve(move |req, _info| serve(req, &state));

    if let Err(e) = result {
        error!("Server ended with error: {e}");
        std::process::exit(1);
    }

    info!("Server shut down cleanly.");
}
