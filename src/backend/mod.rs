//! Row-level backend access
//!
//! The admin panel talks to a managed backend that exposes table-like CRUD
//! over HTTP. This module hides that collaborator behind the [`RowBackend`]
//! trait so the panel can run against the real service or an in-process
//! table store.
//!
//! # Architecture
//!
//! - **Query types**: select/filter/order descriptions independent of transport
//! - **RowBackend**: the four query verbs, each returning data or an error
//! - **PostgrestBackend**: Supabase-style REST client built on reqwest
//! - **InMemoryBackend**: process-local tables with call recording
//! - **AdminRepository**: typed access for the tables the admin panel uses

pub mod memory;
pub mod postgrest;
pub mod query;
pub mod repository;
pub mod traits;

pub use memory::{BackendCall, InMemoryBackend};
pub use postgrest::PostgrestBackend;
pub use query::{Embed, Filter, Operation, Order, Row, SelectQuery};
pub use repository::AdminRepository;
pub use traits::RowBackend;
