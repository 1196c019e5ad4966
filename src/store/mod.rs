//! Local persistence - SQLite-backed credential storage

mod credentials;

pub use credentials::CredentialStore;
