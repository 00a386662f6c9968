//! Libris Library Management Domain Core
//!
//! A library of domain operations for a book-lending service: catalog and
//! copy accounting, loan issue/return with overdue fines, reading history
//! with ratings, acquisition requests, wishlists and notifications. Meant
//! to be called synchronously from a presentation layer; it exposes plain
//! data and results, never rendering concerns.

pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
