//! Seedvox - 语音合成的音色种子选择服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Seed: 种子目录解析、记录与速查表
//! - Preference: 偏好查询、过滤链与排序
//! - Style: 风格目录、标签归一化、精确匹配与组合视图
//!
//! 应用层 (application/):
//! - Ports: 端口定义（CharacterVoiceCache, SeedPicker）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 角色音色缓存内存实现
//! - Adapters: 目录文件加载、随机源

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
