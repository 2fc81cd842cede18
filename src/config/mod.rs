// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration module for valkit.
//!
//! This module handles loading, parsing, and merging validator configuration
//! from TOML files.

pub mod default;
mod loader;
mod schema;

pub use default::{default_config, example_config};
pub use loader::{find_config_file, find_config_file_from, load_config, load_config_from, merge_configs, parse_config};
pub use schema::*;
