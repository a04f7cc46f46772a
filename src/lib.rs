//! # firsttask-gateway
//!
//! Backend for the FirstTask lead-generation form. Accepts a form
//! submission over HTTP, persists it, and notifies both the submitter and
//! the business owner by email.
//!
//! Persistence is dual-backend: PostgreSQL behind a small connection pool
//! when `DATABASE_URL` is reachable at startup, otherwise a local SQLite
//! file. A pool failure mid-process triggers a one-way downgrade to the
//! SQLite fallback for the remainder of the process lifetime.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SubmissionService (service/)
//!     │       ├── payload validation (domain/)
//!     │       ├── StorageManager (storage/)
//!     │       │       ├── PostgresStore (pooled, networked)
//!     │       │       └── SqliteStore (embedded fallback)
//!     │       └── Mailer (notify/, SMTP via lettre)
//!     │
//!     └── AppConfig (config, environment-driven)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod service;
pub mod storage;
