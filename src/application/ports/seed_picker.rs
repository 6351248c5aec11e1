//! Seed Picker Port - 注入的随机源

/// 在多个精确匹配候选中等概率挑选
pub trait SeedPickerPort: Send + Sync {
    /// 返回 `[0, len)` 内的下标，`len` 必须大于 0
    fn pick_index(&self, len: usize) -> usize;
}
