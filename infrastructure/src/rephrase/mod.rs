//! Rephrase deployment adapter

pub mod gateway;
pub mod protocol;

pub use gateway::HttpRephraseGateway;
