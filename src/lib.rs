//! finops - AWS organization account and cost queries for Bedrock agents
//!
//! Lists organization accounts with their tags, reports monthly unblended
//! cost (credits excluded), filters accounts by tag, and exposes all of it
//! as a Bedrock Agents action group. A seedable mock provider stands in for
//! AWS when mock mode is on.

pub mod action;
pub mod agent;
pub mod api;
pub mod aws;
pub mod cli;
pub mod config;
pub mod cost;
pub mod directory;
pub mod filter;
pub mod logging;
pub mod mock;
pub mod sources;
