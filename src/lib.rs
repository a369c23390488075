pub mod adapters;
pub mod commands;
pub mod interaction;
pub mod params;
pub mod server;
