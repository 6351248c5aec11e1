//! 种子目录解析器
//!
//! 文本目录由若干条目组成，每个条目以 `seed_<id>` 行开头：
//!
//! ```text
//! seed_2241
//! 60.78          <- rank_long
//! 87.15          <- rank_multi
//! 86.47          <- rank_single
//! 0.41           <- score
//! 女 100.00%     <- 性别段
//! 青年 72.97%    <- 年龄段
//! 中年 27.03%
//! 成熟 27.08% 知性 26.71% 温柔 24.88% 亲切 21.33%   <- 特征段
//! ```
//!
//! 解析按行驱动一个小状态机（ExpectId → ExpectNumbers → ExpectTextSection）。
//! 单个条目出错只丢弃该条目并记录警告，不影响整个目录。

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

use super::{Distribution, Feature, RankScores, SeedError, SeedId, SeedRecord};

/// 条目起始标记
pub const SEED_MARKER: &str = "seed_";

/// 质量分字段数（rank_long, rank_multi, rank_single, score）
pub const QUALITY_FIELD_COUNT: usize = 4;

pub const GENDER_LABELS: &[&str] = &["男", "女"];
pub const AGE_LABELS: &[&str] = &["青年", "中年", "老年", "少儿"];
pub const FEATURE_LABELS: &[&str] = &[
    "亲切", "温柔", "成熟", "知性", "浑厚", "时尚", "东北", "译制腔", "普通", "专业",
];

/// 解析结果
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    pub records: Vec<SeedRecord>,
    /// 被丢弃的条目数
    pub rejected: usize,
}

impl ParsedCatalog {
    fn accept(&mut self, result: Result<SeedRecord, SeedError>) {
        match result {
            Ok(record) => {
                tracing::debug!(
                    seed_id = %record.id(),
                    rank_multi = record.rank_multi(),
                    "Parsed seed entry"
                );
                self.records.push(record);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed seed entry");
                self.rejected += 1;
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ExpectId,
    ExpectNumbers,
    ExpectTextSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelCategory {
    Gender,
    Age,
    Other,
}

/// 纯数字行（允许小数点），如 `87.16`
fn is_numeric_line(line: &str) -> bool {
    line.chars().any(|c| c.is_ascii_digit()) && line.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// 文本段识别规则：含百分号或任一已知标签
fn is_text_line(line: &str) -> bool {
    line.contains('%')
        || GENDER_LABELS
            .iter()
            .chain(AGE_LABELS)
            .chain(FEATURE_LABELS)
            .any(|label| line.contains(label))
}

/// 行首标签及其类别；行首是数值（如 `27.08%`）时返回 None
fn leading_label(line: &str) -> Option<(&str, LabelCategory)> {
    let first = line.split_whitespace().next()?;
    if first.trim_end_matches('%').parse::<f64>().is_ok() {
        return None;
    }
    let category = if GENDER_LABELS.contains(&first) {
        LabelCategory::Gender
    } else if AGE_LABELS.contains(&first) {
        LabelCategory::Age
    } else {
        LabelCategory::Other
    };
    Some((first, category))
}

/// 一个文本段（性别 / 年龄 / 特征）
#[derive(Debug, Default)]
struct TextSection {
    category: Option<LabelCategory>,
    labels: HashSet<String>,
    lines: Vec<String>,
}

impl TextSection {
    /// 行首标签类别与当前段不同，或标签在本段已出现过，则另起一段
    fn starts_new_section(&self, line: &str) -> bool {
        match leading_label(line) {
            Some((label, category)) => {
                self.category.is_some_and(|current| current != category)
                    || self.labels.contains(label)
            }
            None => false,
        }
    }

    fn push(&mut self, line: &str) {
        if let Some((label, category)) = leading_label(line) {
            self.category.get_or_insert(category);
            self.labels.insert(label.to_string());
        }
        self.lines.push(line.to_string());
    }

    fn text(&self) -> String {
        self.lines.join(" ")
    }
}

/// 正在构建的条目
#[derive(Debug)]
struct EntryBuilder {
    raw_id: String,
    line_no: usize,
    numbers: Vec<f64>,
    sections: Vec<String>,
    current: Option<TextSection>,
}

impl EntryBuilder {
    fn new(raw_id: &str, line_no: usize) -> Self {
        Self {
            raw_id: raw_id.trim().to_string(),
            line_no,
            numbers: Vec::new(),
            sections: Vec::new(),
            current: None,
        }
    }

    fn push_number(&mut self, line: &str) {
        match line.parse::<f64>() {
            Ok(value) => self.numbers.push(value),
            Err(_) => tracing::warn!(
                seed = %self.raw_id,
                line = %line,
                "Skipping unparsable numeric line"
            ),
        }
    }

    fn feed_text(&mut self, line: &str) {
        let recognized = is_text_line(line);
        let split = match &self.current {
            Some(section) => recognized && section.starts_new_section(line),
            None => false,
        };
        if split {
            self.close_section();
        }

        // 已在段内时，未识别的行视为续行
        if let Some(section) = self.current.as_mut() {
            section.push(line);
        } else if recognized {
            self.open_section(line);
        } else {
            tracing::debug!(
                seed = %self.raw_id,
                line = %line,
                "Ignoring unrecognized line outside text section"
            );
        }
    }

    fn open_section(&mut self, line: &str) {
        let mut section = TextSection::default();
        section.push(line);
        self.current = Some(section);
    }

    fn close_section(&mut self) {
        if let Some(section) = self.current.take() {
            self.sections.push(section.text());
        }
    }

    fn finish(mut self) -> Result<SeedRecord, SeedError> {
        self.close_section();

        let id = SeedId::new(self.raw_id.as_str())?;
        if self.numbers.len() < QUALITY_FIELD_COUNT {
            return Err(SeedError::IncompleteRecord {
                seed_id: id.to_string(),
                reason: format!(
                    "第 {} 行起只有 {} 个数值字段，需要 {}",
                    self.line_no,
                    self.numbers.len(),
                    QUALITY_FIELD_COUNT
                ),
            });
        }

        let ranks = RankScores::new(
            self.numbers[0],
            self.numbers[1],
            self.numbers[2],
            self.numbers[3],
        );
        let section = |i: usize| self.sections.get(i).map(String::as_str).unwrap_or("");

        let gender = parse_pairs(section(0)).into_iter().collect();
        let age = parse_pairs(section(1)).into_iter().collect();
        let features = parse_pairs(section(2))
            .into_iter()
            .map(|(label, weight)| Feature::new(label, weight))
            .collect();

        SeedRecord::new(id, ranks, gender, age, features)
    }
}

/// 解析 `标签 数值%` 交替序列，数值除以 100
///
/// 格式错误的单个配对会被跳过
pub fn parse_pairs(section: &str) -> Vec<(String, f64)> {
    let tokens: Vec<&str> = section.split_whitespace().collect();
    tokens
        .chunks(2)
        .filter_map(|pair| match pair {
            [label, value] => value
                .trim_end_matches('%')
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| (label.to_string(), v / 100.0)),
            _ => None,
        })
        .collect()
}

/// 解析文本目录
pub fn parse_catalog_text(content: &str) -> ParsedCatalog {
    let mut catalog = ParsedCatalog::default();
    let mut state = ParseState::ExpectId;
    let mut entry: Option<EntryBuilder> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();

        if let Some(id) = line.strip_prefix(SEED_MARKER) {
            if let Some(done) = entry.take() {
                catalog.accept(done.finish());
            }
            entry = Some(EntryBuilder::new(id, idx + 1));
            state = ParseState::ExpectNumbers;
            continue;
        }

        let Some(current) = entry.as_mut() else {
            if !line.is_empty() {
                tracing::debug!(line = idx + 1, "Ignoring content before first seed marker");
            }
            continue;
        };

        match state {
            ParseState::ExpectId => {}
            ParseState::ExpectNumbers => {
                if line.is_empty() {
                    continue;
                }
                if is_numeric_line(line) {
                    current.push_number(line);
                } else if current.numbers.len() >= QUALITY_FIELD_COUNT {
                    state = ParseState::ExpectTextSection;
                    current.feed_text(line);
                }
            }
            ParseState::ExpectTextSection => {
                if line.is_empty() || is_numeric_line(line) {
                    current.close_section();
                } else {
                    current.feed_text(line);
                }
            }
        }
    }

    if let Some(done) = entry.take() {
        catalog.accept(done.finish());
    }

    catalog
}

/// JSON 目录条目，分布取值为 [0, 1] 的小数
#[derive(Debug, Deserialize)]
struct SeedRecordDto {
    #[serde(alias = "seed_id")]
    id: SeedId,
    rank_long: f64,
    rank_multi: f64,
    rank_single: f64,
    score: f64,
    #[serde(alias = "gender_distribution")]
    gender: BTreeMap<String, f64>,
    #[serde(alias = "age_distribution")]
    age: BTreeMap<String, f64>,
    #[serde(default)]
    features: Vec<(String, f64)>,
}

impl SeedRecordDto {
    fn into_record(self) -> Result<SeedRecord, SeedError> {
        SeedRecord::new(
            self.id,
            RankScores::new(self.rank_long, self.rank_multi, self.rank_single, self.score),
            self.gender.into_iter().collect(),
            self.age.into_iter().collect(),
            self.features
                .into_iter()
                .map(|(label, weight)| Feature::new(label, weight))
                .collect(),
        )
    }
}

/// 解析 JSON 目录：顶层为数组，或 `{"seeds": [...]}`
///
/// 顶层结构错误返回 Err；单个条目错误只丢弃该条目
pub fn parse_catalog_json(content: &str) -> Result<ParsedCatalog, SeedError> {
    let document: serde_json::Value =
        serde_json::from_str(content).map_err(|e| SeedError::CatalogParse(e.to_string()))?;

    let entries = match document {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::Object(mut map) => match map.remove("seeds") {
            Some(serde_json::Value::Array(entries)) => entries,
            _ => {
                return Err(SeedError::CatalogParse(
                    "expected an array or an object with a \"seeds\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(SeedError::CatalogParse(
                "expected an array of seed entries".to_string(),
            ))
        }
    };

    let mut catalog = ParsedCatalog::default();
    for entry in entries {
        let result = serde_json::from_value::<SeedRecordDto>(entry)
            .map_err(|e| SeedError::CatalogParse(e.to_string()))
            .and_then(SeedRecordDto::into_record);
        catalog.accept(result);
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
seed_1283
78.6
87.16
84.78
0.32
女 100.00%
青年 100.00%
亲切 100.00%

seed_1075
70.1
87.12
85.0
0.38
男 61.49%
女 38.51%
青年 100.00%
浑厚 52.10% 成熟 47.90%
";

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs("男 61.49% 女 38.51%");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0, "男");
        assert!((pairs[0].1 - 0.6149).abs() < 1e-9);
    }

    #[test]
    fn test_parse_pairs_skips_malformed_pairs() {
        let pairs = parse_pairs("成熟 27.08% 知性 abc% 温柔 24.88% 孤立");
        let labels: Vec<&str> = pairs.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["成熟", "温柔"]);
    }

    #[test]
    fn test_parse_text_catalog() {
        let parsed = parse_catalog_text(SAMPLE);
        assert_eq!(parsed.rejected, 0);
        assert_eq!(parsed.records.len(), 2);

        let first = &parsed.records[0];
        assert_eq!(first.id().as_str(), "1283");
        assert_eq!(first.ranks().rank_long, 78.6);
        assert_eq!(first.rank_multi(), 87.16);
        assert_eq!(first.ranks().score, 0.32);
        assert_eq!(first.gender().share("女"), 1.0);
        assert_eq!(first.age().share("青年"), 1.0);
        assert_eq!(first.top_features(3), vec!["亲切"]);
    }

    #[test]
    fn test_mixed_gender_lines_form_one_section() {
        let parsed = parse_catalog_text(SAMPLE);
        let mixed = &parsed.records[1];
        assert_eq!(mixed.gender().len(), 2);
        assert!((mixed.gender().share("男") - 0.6149).abs() < 1e-9);
        assert!((mixed.gender().share("女") - 0.3851).abs() < 1e-9);
        assert_eq!(mixed.age().len(), 1);
        assert_eq!(mixed.age().share("青年"), 1.0);
        assert_eq!(mixed.top_features(2), vec!["浑厚", "成熟"]);
    }

    #[test]
    fn test_entry_with_too_few_numbers_is_discarded() {
        let content = "\
seed_1
87.0
86.0
女 100%
青年 100%
seed_2
1
2
3
4
男 100%
中年 100%
";
        let parsed = parse_catalog_text(content);
        assert_eq!(parsed.rejected, 1);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].id().as_str(), "2");
    }

    #[test]
    fn test_entry_without_age_section_is_discarded() {
        let content = "seed_9\n1\n2\n3\n4\n女 100%\n";
        let parsed = parse_catalog_text(content);
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.rejected, 1);
    }

    #[test]
    fn test_preamble_and_blank_separated_sections() {
        let content = "\
ChatTTS 种子排行
seed_2241
60.78
87.15
86.47
0.41

女 100.00%

青年 72.97%
中年 27.03%

成熟 27.08% 知性 26.71%
温柔 24.88% 亲切 21.33%
";
        let parsed = parse_catalog_text(content);
        assert_eq!(parsed.records.len(), 1);
        let record = &parsed.records[0];
        assert_eq!(record.age().len(), 2);
        assert_eq!(record.features().len(), 4);
        assert_eq!(record.top_features(1), vec!["成熟"]);
    }

    #[test]
    fn test_parse_json_catalog() {
        let content = r#"[
            {"seed_id": "579", "rank_long": 87.07, "rank_multi": 87.12, "rank_single": 87.06,
             "score": 0.41, "gender": {"男": 1.0}, "age": {"中年": 1.0}, "features": [["浑厚", 1.0]]},
            {"id": 12, "rank_long": 1, "rank_multi": 2, "rank_single": 3, "score": 4,
             "gender": {}, "age": {"中年": 1.0}}
        ]"#;
        let parsed = parse_catalog_json(content).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.rejected, 1);
        assert_eq!(parsed.records[0].top_features(1), vec!["浑厚"]);
    }

    #[test]
    fn test_parse_json_catalog_rejects_bad_document() {
        assert!(parse_catalog_json("{\"nope\": 1}").is_err());
        assert!(parse_catalog_json("not json").is_err());
    }
}
