//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：选种、推荐与各类目录视图

mod character_queries;
mod preference_queries;
mod seed_queries;

pub mod handlers;

pub use character_queries::*;
pub use preference_queries::*;
pub use seed_queries::*;
