mod cache;
mod client;
mod config;
mod constants;
mod detail;
mod error;
mod models;
mod roster;
mod scroll;
mod sort;
mod util;
mod window;


pub use client::RosterClient;
pub use config::Config;
pub use detail::{fetch_detail, CharacterDetail};
pub use error::FetchError;
pub use models::{Character, CharacterPage, Episode, LocationRef, Mode};
pub use roster::{Roster, RosterEvent, Snapshot};
pub use scroll::ScrollPosition;
pub use sort::{project, SortDirection, SortDirective, SortField};
