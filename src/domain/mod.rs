//! Domain Layer - 领域层
//!
//! 包含三个限界上下文:
//! - Seed Context: 种子目录
//! - Preference Context: 偏好过滤与排序
//! - Style Context: 风格目录与组合视图

pub mod preference;
pub mod seed;
pub mod style;
