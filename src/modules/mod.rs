//! Feature modules on top of the data-source clients

pub mod export;
