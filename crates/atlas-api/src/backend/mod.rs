// Backend-as-a-service API (PostgREST row API + token auth service)
//
// `client` owns transport mechanics and error parsing; the endpoint
// groups (auth, favourites, protected data) are inherent methods on
// `BackendClient` split across files.

mod auth;
mod client;
mod favourites;
mod protected;
pub mod types;

pub use client::{BackendClient, Session};
