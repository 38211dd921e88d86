pub mod configuration;
pub mod flood_geojson;
pub mod llm_handlers;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod server;
pub mod warmup;
