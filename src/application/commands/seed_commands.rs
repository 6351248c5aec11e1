//! Seed Commands

/// 为角色解析种子
///
/// 年龄缺省为默认年龄，风格缺省为默认风格；未提供性别时走排序路径
#[derive(Debug, Clone, Default)]
pub struct ResolveSeed {
    pub character: Option<String>,
    pub gender: Option<String>,
    pub age: Option<String>,
    pub style: Option<String>,
}
