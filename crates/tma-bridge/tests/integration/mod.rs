//! Integration Tests Module
//!
//! - `relay_flow`: host callbacks → typed events → subscribers
//! - `actions_flow`: game → BridgeActions → host, and the request/callback split

mod actions_flow;
mod relay_flow;
