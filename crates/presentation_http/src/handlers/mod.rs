//! HTTP request handlers

pub mod chaos;
pub mod common;
pub mod gateway;
pub mod health;
pub mod inventory;
pub mod metrics;
pub mod orders;
