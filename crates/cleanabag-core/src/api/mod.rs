mod client;
mod models;

pub use client::WallabagClient;
pub use models::{EntriesPage, Entry};
