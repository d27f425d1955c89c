pub mod abstract_trait;
pub mod config;
pub mod domain;
pub mod model;
pub mod repository;
pub mod schema;
pub mod service;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
