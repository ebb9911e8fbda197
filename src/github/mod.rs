//! GitHub REST API integration.
//!
//! The pipeline talks to GitHub through the `SeatsProvider` trait so
//! aggregation can run against the live client or a test double.

pub mod client;
pub mod link;

pub use client::{GithubClient, SeatsPage, SeatsProvider, SEATS_PAGE_SIZE};
