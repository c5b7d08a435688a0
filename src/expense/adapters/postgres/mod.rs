//! `PostgreSQL` adapters for expense persistence.

mod mapping;
mod models;
mod repository;
mod schema;

pub use repository::PostgresExpenseRepository;
