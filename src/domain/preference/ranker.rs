//! 候选排序
//!
//! 以 rank_multi 为唯一排序键，同分时保留候选原有顺序

use crate::domain::seed::{SeedError, SeedRecord};

/// 选出 rank_multi 最高的候选，同分取先出现者
pub fn select<'r, I>(candidates: I) -> Result<&'r SeedRecord, SeedError>
where
    I: IntoIterator<Item = &'r SeedRecord>,
{
    let mut best: Option<&SeedRecord> = None;
    for record in candidates {
        match best {
            Some(current) if record.rank_multi() <= current.rank_multi() => {}
            _ => best = Some(record),
        }
    }
    best.ok_or(SeedError::NoSeedAvailable)
}

/// 按 rank_multi 降序取前 top_n 个（稳定排序）
pub fn recommend<'r, I>(candidates: I, top_n: usize) -> Vec<&'r SeedRecord>
where
    I: IntoIterator<Item = &'r SeedRecord>,
{
    let mut ranked: Vec<&SeedRecord> = candidates.into_iter().collect();
    ranked.sort_by(|a, b| b.rank_multi().total_cmp(&a.rank_multi()));
    ranked.truncate(top_n);
    ranked
}
