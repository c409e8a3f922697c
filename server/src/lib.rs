//! HRIS backend: authentication, role-based permissioning and REST CRUD
//! over the HR entities.

pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod routes;
