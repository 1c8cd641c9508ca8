mod client;
mod config;
mod error;
pub mod graphql;
mod projector;
mod query;
mod screen;
pub mod trips;

pub use client::{request_body, Client};
pub use config::Config;
pub use error::Error;
pub use projector::{project, surface_errors};
pub use query::{CachedQuery, Outcome};
pub use screen::{TripsScreen, Update};
