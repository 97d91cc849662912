//! roster-core — canonical member records, the filter/sort engine, remote
//! fetch, and shared configuration for the roster tools.

pub mod bake;
pub mod config;
pub mod fetch;
pub mod member;
pub mod platform;
pub mod query;
