//! Central module for organizing the application's API endpoints.
//!
//! This module acts as the top-level container for the HTTP surface: shared
//! response plumbing plus the billing routes built on the request pipeline.

pub mod common;
pub mod invoice;
