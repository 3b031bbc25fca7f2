// src/lib.rs
pub mod clock;
pub mod config;
pub mod domain;
pub mod money;
pub mod persistence;
pub mod services;
pub mod similarity;
pub mod validation;
pub mod web;

pub use domain::*;
pub use money::*;
