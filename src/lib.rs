//! WhatsApp Contact Check API Library
//!
//! This library provides the core functionality for the WhatsApp Contact
//! Check API: phone-number normalization and validation, the timeout-bounded
//! lookup orchestration against the session collaborator, and the uniform
//! response envelope returned on every path.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `handlers`: HTTP request handlers and the shared verification pipeline.
//! - `lookup`: Lookup orchestration and outcome taxonomy.
//! - `models`: Request and collaborator data models.
//! - `phone`: Number normalization and input validation.
//! - `response`: Response envelope construction.
//! - `session`: Session collaborator boundary and bridge client.

pub mod config;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod phone;
pub mod response;
pub mod session;
