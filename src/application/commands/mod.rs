//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：解析种子并写入角色缓存

mod seed_commands;

pub mod handlers;

pub use seed_commands::*;
