//! brapi.dev price source.
//!
//! Quotes come from `GET {base_url}/quote/{T1,T2,...}`. Blocking (sync) via
//! reqwest::blocking; one request per call, no retries.

pub mod client;
pub mod types;

pub use client::BrapiClient;
