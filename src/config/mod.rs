//! 配置管理
//!
//! 配置来源按优先级从低到高：默认值 → `config.toml` → `config.{APP_ENV}.toml` → 环境变量。

mod r#impl;
mod structs;

pub use structs::*;
