//! A small Rust client for the LASP SDO/EVE quicklook irradiance archive.
//!
//! The crate turns a query (a time range plus instrument and level filters)
//! into the list of daily Level 0CS diode files LASP publishes, and can
//! download them.
//!
//! ## Quick start
//! - Build a query from [`QueryAttr`] values.
//! - Ask a [`Dispatcher`] (or an [`EveClient`] directly) to search it.
//! - Hand the result to a [`Fetcher`]; its target directory comes from the
//!   arguments, `EVE_DATA_DIR`, or a `.everc` file.
//!
//! ```no_run
//! use anyhow::Result;
//! use lasp_eve::{Dispatcher, Fetcher, QueryAttr};
//!
//! fn main() -> Result<()> {
//!     let query = vec![
//!         QueryAttr::time("2016/1/1", "2016/1/2")?,
//!         QueryAttr::instrument("EVE"),
//!         QueryAttr::level(0),
//!     ];
//!     let results = Dispatcher::new().search(&query)?;
//!     println!("{}", results);
//!
//!     let files = Fetcher::from_env()?.fetch(&results)?;
//!     println!("{} file(s) downloaded", files.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod attrs;
mod client;
mod config;
mod error;
mod eve;
mod fetch;
mod response;
mod time;
mod util;

pub use attrs::{Level, QueryAttr};
pub use client::{DataClient, Dispatcher, Metadata};
pub use config::FetchConfig;
pub use eve::{BASE_URL, EveClient};
pub use fetch::{FetchedFile, Fetcher};
pub use response::{QueryResponse, QueryRow};
pub use time::TimeRange;
