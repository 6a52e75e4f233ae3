pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod probe;
pub mod stub;


pub use db::{describe_schema, initialize_schema};
pub use probe::probe_login;
