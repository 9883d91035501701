//! Browser front end for a personal gift-money ledger.
//!
//! The pure pieces (segmented date entry, amount formatting, HTML escaping,
//! form validation, statistics shaping) live in plain modules and are tested
//! natively. `components`, `pages` and `app` wire them into Yew.

pub mod amount;
pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod date_input;
pub mod error;
pub mod escape;
pub mod form;
pub mod format;
pub mod logging;
pub mod markup;
pub mod models;
pub mod pages;
pub mod session;
pub mod stats;
pub mod upload;

pub use app::App;
