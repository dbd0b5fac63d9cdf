//! End-to-end tests against the in-memory stores.

mod browse_test;
mod catalog_test;
mod helpers;
mod index_test;
mod session_test;
