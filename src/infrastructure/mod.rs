//! Infrastructure layer - HTTP clients for the three upstream data providers

pub mod analytics;
pub mod explorer;
pub mod subgraph;
