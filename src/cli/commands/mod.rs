pub mod classify;
pub mod config;
pub mod convert;
pub mod hub;
pub mod validate;
