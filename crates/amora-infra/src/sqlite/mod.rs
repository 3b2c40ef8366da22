//! SQLite persistence layer.
//!
//! All repositories share a [`pool::DatabasePool`] with split reader/writer
//! connections and map rows to domain types through private Row structs.

pub mod chat;
pub mod pool;
pub mod recommendation;
pub mod user_context;
