//! Shared fixtures and assertions for the integration tests.

#![allow(dead_code)]

pub mod catalog_fixtures;
pub mod tree_assertions;
