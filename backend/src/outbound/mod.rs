//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: a process-local store used when no database is configured
//!   and by the HTTP tests
//!
//! Adapters convert between domain types and storage representations. They
//! contain no business logic.

pub mod memory;
pub mod persistence;
