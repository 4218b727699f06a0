// Lead Generation Agent - API Core
//
// HTTP surface for the lead pipeline. Every request runs one stateless
// pipeline with the operator's own Firecrawl key; nothing is stored.

pub mod config;
pub mod server;

pub use config::*;
