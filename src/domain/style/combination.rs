//! 组合视图
//!
//! 对照表以种子为索引（一个种子只对应一个性别），前端需要以组合为索引
//! （一个 (年龄, 风格) 对应多个性别），因此先按风格展开再跨性别合并。

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::domain::seed::SeedId;

use super::{SeedIndexEntry, VoicePreferences};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSeed {
    #[serde(rename = "种子")]
    pub seed: SeedId,
    #[serde(rename = "描述")]
    pub description: String,
}

/// 风格下一个可用的 (性别, 年龄) 组合
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleCombo {
    #[serde(rename = "性别")]
    pub gender: String,
    #[serde(rename = "性别显示")]
    pub gender_display: String,
    #[serde(rename = "年龄")]
    pub age: String,
    #[serde(rename = "年龄显示")]
    pub age_display: String,
    #[serde(rename = "候选种子")]
    pub candidates: Vec<CandidateSeed>,
    #[serde(rename = "候选数量")]
    pub candidate_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleView {
    pub description: String,
    #[serde(rename = "适用组合")]
    pub combos: Vec<StyleCombo>,
}

/// (年龄, 风格) → 支持的性别与候选种子
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationView {
    #[serde(rename = "年龄")]
    pub age: String,
    #[serde(rename = "年龄显示")]
    pub age_display: String,
    #[serde(rename = "风格")]
    pub style: String,
    #[serde(rename = "风格描述")]
    pub style_description: String,
    #[serde(rename = "支持性别")]
    pub supported_genders: BTreeSet<String>,
    #[serde(rename = "候选种子")]
    pub candidates: Vec<CandidateSeed>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewStats {
    #[serde(rename = "总风格数")]
    pub total_styles: usize,
    #[serde(rename = "总种子数")]
    pub total_seeds: usize,
    #[serde(rename = "总组合数")]
    pub total_combos: usize,
    #[serde(rename = "所有组合数")]
    pub total_combinations: usize,
}

/// 按风格目录原有顺序排列的风格视图，序列化为 JSON 对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleViews(Vec<(String, StyleView)>);

impl StyleViews {
    pub fn get(&self, name: &str) -> Option<&StyleView> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut StyleView> {
        self.0.iter_mut().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleView)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for StyleViews {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, v)| (n, v)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontendView {
    #[serde(rename = "声音偏好")]
    pub styles: StyleViews,
    #[serde(rename = "性别选项")]
    pub gender_options: BTreeMap<String, String>,
    #[serde(rename = "年龄选项")]
    pub age_options: BTreeMap<String, String>,
    #[serde(rename = "性别映射")]
    pub gender_mapping: BTreeMap<String, String>,
    #[serde(rename = "年龄映射")]
    pub age_mapping: BTreeMap<String, String>,
    #[serde(rename = "种子对照表")]
    pub seed_index: Vec<SeedIndexEntry>,
    #[serde(rename = "所有组合")]
    pub combinations: Vec<CombinationView>,
    #[serde(rename = "统计信息")]
    pub stats: ViewStats,
}

/// 某性别下一个 (年龄, 风格) 组合
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgeStyleCombination {
    #[serde(rename = "年龄")]
    pub age: String,
    #[serde(rename = "风格")]
    pub style: String,
    #[serde(rename = "候选种子")]
    pub seeds: Vec<SeedId>,
    #[serde(rename = "描述")]
    pub descriptions: Vec<String>,
}

fn sort_candidates(candidates: &mut [CandidateSeed]) {
    candidates.sort_by(|a, b| a.seed.display_cmp(&b.seed));
}

/// 构建前端视图
pub fn build_frontend_view(preferences: &VoicePreferences) -> FrontendView {
    // 1. 每个风格一个空组合列表
    let mut styles = StyleViews(
        preferences
            .styles()
            .iter()
            .map(|s| {
                (
                    s.name().to_string(),
                    StyleView {
                        description: s.description().to_string(),
                        combos: Vec::new(),
                    },
                )
            })
            .collect(),
    );

    // 2. 遍历对照表，按 (性别, 年龄) 查找或新建组合
    for entry in preferences.seed_index() {
        let Some(view) = styles.get_mut(&entry.style) else {
            tracing::debug!(seed_id = %entry.seed, style = %entry.style, "Seed refers to an unknown style");
            continue;
        };

        let candidate = CandidateSeed {
            seed: entry.seed.clone(),
            description: entry.description.clone(),
        };

        match view
            .combos
            .iter()
            .position(|c| c.gender == entry.gender && c.age == entry.age)
        {
            Some(i) => view.combos[i].candidates.push(candidate),
            None => view.combos.push(StyleCombo {
                gender: entry.gender.clone(),
                gender_display: preferences.gender_display(&entry.gender).to_string(),
                age: entry.age.clone(),
                age_display: preferences.age_display(&entry.age).to_string(),
                candidates: vec![candidate],
                candidate_count: 0,
            }),
        }
    }

    for combo in styles.0.iter_mut().flat_map(|(_, v)| v.combos.iter_mut()) {
        sort_candidates(&mut combo.candidates);
        combo.candidate_count = combo.candidates.len();
    }

    // 3 + 4. 展开为 (风格, 组合) 行，再按 (年龄, 风格) 跨性别合并
    let mut merged: BTreeMap<(String, String), CombinationView> = BTreeMap::new();
    for (style_name, view) in styles.iter() {
        for combo in &view.combos {
            let row = merged
                .entry((combo.age.clone(), style_name.to_string()))
                .or_insert_with(|| CombinationView {
                    age: combo.age.clone(),
                    age_display: combo.age_display.clone(),
                    style: style_name.to_string(),
                    style_description: view.description.clone(),
                    supported_genders: BTreeSet::new(),
                    candidates: Vec::new(),
                });
            row.supported_genders.insert(combo.gender.clone());
            row.candidates.extend(combo.candidates.iter().cloned());
        }
    }

    // 按种子去重后排序；5. BTreeMap 已按 (年龄, 风格) 排序
    let combinations: Vec<CombinationView> = merged
        .into_values()
        .map(|mut row| {
            let mut seen = HashSet::new();
            row.candidates.retain(|c| seen.insert(c.seed.clone()));
            sort_candidates(&mut row.candidates);
            row
        })
        .collect();

    let stats = ViewStats {
        total_styles: preferences.styles().len(),
        total_seeds: preferences.distinct_seed_count(),
        total_combos: styles.iter().map(|(_, v)| v.combos.len()).sum(),
        total_combinations: combinations.len(),
    };

    FrontendView {
        styles,
        gender_options: preferences.gender_options().clone(),
        age_options: preferences.age_options().clone(),
        gender_mapping: preferences.gender_options().clone(),
        age_mapping: preferences.age_options().clone(),
        seed_index: preferences.seed_index().to_vec(),
        combinations,
        stats,
    }
}

/// 某性别的所有 (年龄, 风格) 组合，按 (年龄, 风格) 排序
pub fn age_style_combinations(index: &[SeedIndexEntry], gender: &str) -> Vec<AgeStyleCombination> {
    let mut combos: BTreeMap<(String, String), AgeStyleCombination> = BTreeMap::new();
    for entry in index.iter().filter(|e| e.gender == gender) {
        let combo = combos
            .entry((entry.age.clone(), entry.style.clone()))
            .or_insert_with(|| AgeStyleCombination {
                age: entry.age.clone(),
                style: entry.style.clone(),
                seeds: Vec::new(),
                descriptions: Vec::new(),
            });
        combo.seeds.push(entry.seed.clone());
        combo.descriptions.push(entry.description.clone());
    }
    combos.into_values().collect()
}

/// 按性别（必填）与可选的年龄、风格筛选对照表，保持对照表顺序
pub fn voice_candidates<'p>(
    index: &'p [SeedIndexEntry],
    gender: &str,
    age: Option<&str>,
    style: Option<&str>,
) -> Vec<&'p SeedIndexEntry> {
    index
        .iter()
        .filter(|e| e.gender == gender)
        .filter(|e| age.map_or(true, |a| e.age == a))
        .filter(|e| style.map_or(true, |s| e.style == s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::style::StyleDefinition;

    fn entry(seed: u64, gender: &str, age: &str, style: &str) -> SeedIndexEntry {
        SeedIndexEntry {
            seed: SeedId::from(seed),
            gender: gender.to_string(),
            age: age.to_string(),
            style: style.to_string(),
            description: format!("seed {}", seed),
        }
    }

    fn preferences(styles: &[&str], index: Vec<SeedIndexEntry>) -> VoicePreferences {
        let mut genders = BTreeMap::new();
        genders.insert("女".to_string(), "女性".to_string());
        VoicePreferences::new(
            styles
                .iter()
                .map(|name| StyleDefinition::new(*name, format!("{}描述", name)))
                .collect(),
            genders,
            BTreeMap::new(),
            index,
        )
    }

    #[test]
    fn test_genders_merge_into_one_combination() {
        let prefs = preferences(
            &["A"],
            vec![entry(20, "女", "中年", "A"), entry(10, "男", "中年", "A")],
        );
        let view = build_frontend_view(&prefs);

        assert_eq!(view.combinations.len(), 1);
        let combo = &view.combinations[0];
        assert_eq!(combo.age, "中年");
        assert_eq!(combo.style, "A");
        assert_eq!(
            combo.supported_genders.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["女", "男"]
        );
        let seeds: Vec<&str> = combo.candidates.iter().map(|c| c.seed.as_str()).collect();
        assert_eq!(seeds, vec!["10", "20"]);

        assert_eq!(view.styles.get("A").unwrap().combos.len(), 2);
        assert_eq!(view.styles.get("A").unwrap().combos[0].gender_display, "女性");
        assert_eq!(view.stats.total_combos, 2);
        assert_eq!(view.stats.total_combinations, 1);
    }

    #[test]
    fn test_style_combo_candidates_sorted_numerically() {
        let prefs = preferences(
            &["A"],
            vec![
                entry(1111, "女", "青年", "A"),
                entry(2, "女", "青年", "A"),
                entry(333, "女", "青年", "A"),
            ],
        );
        let view = build_frontend_view(&prefs);
        let combo = &view.styles.get("A").unwrap().combos[0];
        let seeds: Vec<&str> = combo.candidates.iter().map(|c| c.seed.as_str()).collect();
        assert_eq!(seeds, vec!["2", "333", "1111"]);
        assert_eq!(combo.candidate_count, 3);
    }

    #[test]
    fn test_combinations_sorted_and_unknown_styles_ignored() {
        let prefs = preferences(
            &["B", "A"],
            vec![
                entry(1, "女", "青年", "B"),
                entry(2, "女", "中年", "B"),
                entry(3, "男", "青年", "A"),
                entry(4, "男", "青年", "Z"),
            ],
        );
        let view = build_frontend_view(&prefs);
        let keys: Vec<(&str, &str)> = view
            .combinations
            .iter()
            .map(|c| (c.age.as_str(), c.style.as_str()))
            .collect();
        assert_eq!(keys, vec![("中年", "B"), ("青年", "A"), ("青年", "B")]);
        assert_eq!(view.stats.total_styles, 2);
        assert_eq!(view.stats.total_seeds, 4);
    }

    #[test]
    fn test_styles_keep_catalog_order() {
        let prefs = preferences(&["温柔风格", "专业风格", "文学风格"], Vec::new());
        let view = build_frontend_view(&prefs);
        assert_eq!(
            view.styles.names().collect::<Vec<_>>(),
            vec!["温柔风格", "专业风格", "文学风格"]
        );

        let json = serde_json::to_value(&view).unwrap();
        let keys: Vec<&String> = json["声音偏好"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["温柔风格", "专业风格", "文学风格"]);
    }

    #[test]
    fn test_fallback_view_dedups_shared_seed() {
        let view = build_frontend_view(&VoicePreferences::fallback());
        let young_gentle = view
            .combinations
            .iter()
            .find(|c| c.age == "年轻" && c.style == "温柔风格")
            .unwrap();
        assert_eq!(young_gentle.supported_genders.len(), 2);
        let seeds: Vec<&str> = young_gentle.candidates.iter().map(|c| c.seed.as_str()).collect();
        assert_eq!(seeds, vec!["2", "333"]);
    }

    #[test]
    fn test_age_style_combinations_for_gender() {
        let index = vec![
            entry(3, "female", "年轻", "温柔风格"),
            entry(1, "female", "中年", "专业风格"),
            entry(7, "female", "年轻", "温柔风格"),
            entry(9, "male", "年轻", "温柔风格"),
        ];
        let combos = age_style_combinations(&index, "female");
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].age, "中年");
        assert_eq!(
            combos[1].seeds.iter().map(SeedId::as_str).collect::<Vec<_>>(),
            vec!["3", "7"]
        );
        assert!(age_style_combinations(&index, "robot").is_empty());
    }

    #[test]
    fn test_voice_candidates_filters() {
        let index = vec![
            entry(3, "female", "年轻", "温柔风格"),
            entry(1, "female", "中年", "专业风格"),
            entry(9, "male", "年轻", "温柔风格"),
        ];
        assert_eq!(voice_candidates(&index, "female", None, None).len(), 2);
        let only = voice_candidates(&index, "female", Some("年轻"), Some("温柔风格"));
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].seed.as_str(), "3");
        assert!(voice_candidates(&index, "female", Some("其他"), None).is_empty());
    }
}
