//! Request handlers grouped by domain.

pub mod admin;
pub mod browse;
pub mod collections;
pub mod health;
pub mod search;
