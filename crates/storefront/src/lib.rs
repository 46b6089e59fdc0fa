//! Coastal Surf Co. Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod cosmic;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
