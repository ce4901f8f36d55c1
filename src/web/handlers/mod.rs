//! HTTP handlers organised by area

pub mod admin;
pub mod auth;
pub mod health;
pub mod pages;
