//! HTTP request handlers

pub mod carriers;
pub mod health;
pub mod loads;
