//! Subway line manager.
//!
//! Models each subway line as a single ordered path of stations built from
//! unordered, directed track segments, and serves the stations and lines
//! over HTTP.

pub mod config;
pub mod domain;
pub mod network;
pub mod web;
