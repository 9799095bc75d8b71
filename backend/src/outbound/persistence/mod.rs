//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here; the
//!   signup workflow's ordering guarantees live in the domain.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: Database errors map to domain persistence
//!   error types, with unique-constraint details preserved because signup
//!   reports them to clients.

mod diesel_campaign_repository;
mod diesel_contact_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_campaign_repository::DieselCampaignRepository;
pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PgPooledConnection, PoolConfig, PoolError};
