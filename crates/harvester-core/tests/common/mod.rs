//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod fixtures;
pub mod http_server;
pub mod memory_store;
