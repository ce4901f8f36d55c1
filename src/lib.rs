//! StreamVibe back office
//!
//! Administration of the StreamVibe IPTV catalogue: sections, channels,
//! playlists and site settings stored in a row-level backend, reached
//! through an authenticated admin API.

pub mod admin;
pub mod auth;
pub mod backend;
pub mod config;
pub mod errors;
pub mod models;
pub mod notifications;
pub mod routes;
pub mod utils;
pub mod web;
