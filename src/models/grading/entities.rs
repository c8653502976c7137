use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分体系类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub enum GradingType {
    Letter,     // 字母等级（A/B/C…）
    Number,     // 数字等级（1-12…）
    Percentage, // 百分比
}

impl GradingType {
    pub const LETTER: &'static str = "letter";
    pub const NUMBER: &'static str = "number";
    pub const PERCENTAGE: &'static str = "percentage";
}

impl<'de> Deserialize<'de> for GradingType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的评分体系类型: '{s}'. 支持的类型: letter, number, percentage"
            ))
        })
    }
}

impl std::fmt::Display for GradingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradingType::Letter => write!(f, "{}", GradingType::LETTER),
            GradingType::Number => write!(f, "{}", GradingType::NUMBER),
            GradingType::Percentage => write!(f, "{}", GradingType::PERCENTAGE),
        }
    }
}

impl std::str::FromStr for GradingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            GradingType::LETTER => Ok(GradingType::Letter),
            GradingType::NUMBER => Ok(GradingType::Number),
            GradingType::PERCENTAGE => Ok(GradingType::Percentage),
            _ => Err(format!("Invalid grading type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradingSystem {
    pub id: i64,
    pub school_id: i64,
    pub name: String,
    pub grading_type: GradingType,
    // 每所学校至多一个默认体系，学期汇总的总评等级使用它
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 等级区间：`[min_score, max_score]` 两端闭合
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradeBand {
    pub id: i64,
    pub grading_system_id: i64,
    pub min_score: f64,
    pub max_score: f64,
    pub grade: String,
    pub points: f64,
    pub remarks: Option<String>,
    pub sort_order: i32,
}

impl GradeBand {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min_score && score <= self.max_score
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradingSystemDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub system: GradingSystem,
    pub bands: Vec<GradeBand>,
}

/// 分数解析出的等级与绩点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct ResolvedGrade {
    pub grade: String,
    pub points: f64,
    pub remarks: Option<String>,
}

impl ResolvedGrade {
    /// 缺考
    pub const ABSENT: &'static str = "ABS";
    /// 无匹配区间或无可用评分体系
    pub const UNGRADED: &'static str = "N/A";

    pub fn absent() -> Self {
        Self {
            grade: Self::ABSENT.to_string(),
            points: 0.0,
            remarks: None,
        }
    }

    pub fn ungraded() -> Self {
        Self {
            grade: Self::UNGRADED.to_string(),
            points: 0.0,
            remarks: None,
        }
    }

    pub fn is_graded(&self) -> bool {
        self.grade != Self::ABSENT && self.grade != Self::UNGRADED
    }
}

impl From<&GradeBand> for ResolvedGrade {
    fn from(band: &GradeBand) -> Self {
        Self {
            grade: band.grade.clone(),
            points: band.points,
            remarks: band.remarks.clone(),
        }
    }
}
