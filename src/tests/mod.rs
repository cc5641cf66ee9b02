// Test modules

pub mod common;
mod models_test;
mod views_test;
