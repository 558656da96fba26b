//! API Routes
//!
//! Route handlers organized by functionality.

pub mod dashboard;
pub mod entries;
pub mod factors;
pub mod forecast;
pub mod health;
pub mod import;
