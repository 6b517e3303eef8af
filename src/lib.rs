//! MCP server exposing Doubao (Volcengine ARK) image generation, video task
//! submission and video task polling as tools.

pub mod ark;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mcp;
pub mod tasks;

pub use error::{Error, Result};
