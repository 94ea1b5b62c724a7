// Shared test support. Each integration test binary uses a different subset.
#![allow(dead_code)]

pub mod db;
pub mod factories;
pub mod helpers;
pub mod memory;
