//! Command handlers

pub mod config;
pub mod dialects;
pub mod synth;
