//! Domain value types and pure decoding logic

pub mod abi;
pub mod pool;
