//! HTTP request handlers

pub mod health;
pub mod lesson;
pub mod speech;
