mod client;
mod types;

pub use client::{FoursquareClient, PlacesSearch};
pub use types::*;
