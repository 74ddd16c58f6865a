#![forbid(unsafe_code)]

//! Core types for the Solna keystore reader.
//!
//! Holds the shared error taxonomy, object identifier constants and the
//! immutable [`KeystoreConfig`] that every other crate is parameterised by.

pub mod config;
pub mod ct;
pub mod error;
pub mod oid;

pub use config::{DigestKind, KeystoreConfig};
pub use ct::ct_eq;
pub use error::{Error, ErrorKind, Result};
