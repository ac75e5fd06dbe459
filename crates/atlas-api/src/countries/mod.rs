// Country directory API (REST Countries v3.1)
//
// One read-only endpoint returning the full directory. No auth.

mod client;
pub mod types;

pub use client::{CountriesClient, DEFAULT_BASE_URL};
