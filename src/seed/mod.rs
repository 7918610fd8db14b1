mod loader;
mod models;

pub use loader::{parse_seed, seed_database};
