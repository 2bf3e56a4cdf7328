//! Portfolio API - backend for a personal portfolio site
//!
//! Stores and serves contact-form submissions, project listings, and
//! published blog posts.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
