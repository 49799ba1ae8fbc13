//! Core library for the `weather-fetch` CLI.
//!
//! This crate defines:
//! - Request parameters and the typed fetch outcome
//! - The fetcher: URL construction, background dispatch, response decoding
//! - A single-threaded queue for handing results to presentation code
//! - Configuration handling
//!
//! It is used by `weather-fetch-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod fetcher;
pub mod model;
pub mod ui;

pub use config::Config;
pub use fetcher::{WeatherFetcher, decode_summary};
pub use model::{ErrorKind, FetchError, FetchResult, RequestParameters, WeatherSummary};
pub use ui::{UiHandle, UiQueue};
