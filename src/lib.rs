//! Chat Relay - Real-time conversation backend
//!
//! This crate implements a conversation registry with ordered message
//! history, fan-out of accepted messages to live subscribers, and an
//! object-store backed file service, exposed over REST and WebSocket.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
