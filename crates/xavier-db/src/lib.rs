//! Database layer for the Xavier Institute roster service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! foreign-key enforcement, and the embedded schema bootstrap. Every table
//! the service touches is created through the ordered steps in
//! [`run_migrations`], which are safe to run on every startup.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: no external database process is required.
//!   WAL mode allows concurrent readers with a single writer, which matches
//!   a service whose writes are single-row inserts.
//! - **`r2d2` connection pool**: each request borrows one connection and
//!   returns it when the guard drops, on success and failure alike.
//! - **Foreign keys on every connection**: SQLite leaves them off by default,
//!   so the pool initializer turns them on before a connection is handed out.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
