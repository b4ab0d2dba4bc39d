//! Table-agnostic repository layer
//!
//! One generic CRUD engine driven by schema descriptors, plus raw-row escape
//! hatches for the DAO queries the engine cannot express.

pub mod sql_repo;

pub use sql_repo::{execute_query, execute_update, SqlRepo};
