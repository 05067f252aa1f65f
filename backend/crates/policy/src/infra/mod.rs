//! Infrastructure Layer

pub mod json_store;

pub use json_store::JsonFileStore;
