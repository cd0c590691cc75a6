//! Outbound adapters implementing domain ports.
//!
//! Only PostgreSQL persistence lives here; adapters hold no business logic.

pub mod persistence;
