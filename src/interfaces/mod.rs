//! Inbound adapters: REST API and WebSocket event streams

pub mod http;
pub mod ws;
