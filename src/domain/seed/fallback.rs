//! 内置默认种子目录
//!
//! 目录文件缺失或不可读时使用，保证系统仍可选出种子

use super::{Distribution, Feature, RankScores, SeedId, SeedRecord};

fn record(
    id: u64,
    ranks: [f64; 4],
    gender: &[(&str, f64)],
    age: &[(&str, f64)],
    features: &[(&str, f64)],
) -> SeedRecord {
    SeedRecord {
        id: SeedId::from(id),
        ranks: RankScores::new(ranks[0], ranks[1], ranks[2], ranks[3]),
        gender: gender.iter().map(|(l, v)| (l.to_string(), *v)).collect::<Distribution>(),
        age: age.iter().map(|(l, v)| (l.to_string(), *v)).collect::<Distribution>(),
        features: features.iter().map(|(l, v)| Feature::new(*l, *v)).collect(),
    }
}

/// 六个经过评测的高分种子
pub fn fallback_catalog() -> Vec<SeedRecord> {
    vec![
        record(1283, [78.6, 87.16, 84.78, 0.32], &[("女", 1.0)], &[("青年", 1.0)], &[("亲切", 1.0)]),
        record(
            2241,
            [60.78, 87.15, 86.47, 0.41],
            &[("女", 1.0)],
            &[("青年", 0.73), ("中年", 0.27)],
            &[("成熟", 0.27), ("知性", 0.27), ("温柔", 0.25), ("亲切", 0.21)],
        ),
        record(
            614,
            [88.62, 87.13, 86.44, 0.4],
            &[("女", 1.0)],
            &[("青年", 0.35), ("中年", 0.65)],
            &[("温柔", 0.35), ("东北", 0.33), ("成熟", 0.32)],
        ),
        record(731, [88.61, 87.13, 88.2, 0.35], &[("女", 1.0)], &[("青年", 1.0)], &[("成熟", 1.0)]),
        record(579, [87.07, 87.12, 87.06, 0.41], &[("男", 1.0)], &[("中年", 1.0)], &[("浑厚", 1.0)]),
        record(2550, [89.51, 87.06, 89.72, 0.31], &[("男", 1.0)], &[("青年", 1.0)], &[("时尚", 1.0)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_catalog_satisfies_record_invariants() {
        let catalog = fallback_catalog();
        assert_eq!(catalog.len(), 6);
        for seed in &catalog {
            assert!(!seed.gender().is_empty());
            assert!(!seed.age().is_empty());
            let weights: Vec<f64> = seed.features().iter().map(|f| f.weight).collect();
            assert!(weights.windows(2).all(|w| w[0] >= w[1]), "{} not sorted", seed.id());
        }
    }
}
