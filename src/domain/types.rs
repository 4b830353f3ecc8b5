// ==========================================
// 产品导入 - 领域类型定义
// ==========================================
// 职责: 记录字段的动态取值 / 行号口径 / 模板格式
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 字段取值 (Field Value)
// ==========================================
// 用途: 校验器读取"类记录"输入时的统一取值形态
// 缺失 / null 统一用 None 表示，不在此枚举中
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    /// 字符串形式 TRIM 后是否为空（数值/布尔永不为空）
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) | FieldValue::Bool(_) => false,
        }
    }

    /// 解析为数值
    ///
    /// # 返回
    /// - Some(f64): 有限数值或可解析的文本（TRIM 后解析，允许前导 +，NaN / inf 视为非法）
    /// - None: 无法解析（包括布尔值）
    pub fn to_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            FieldValue::Bool(_) => None,
        }
    }

    /// 字符数（Unicode 标量值计数）
    pub fn char_len(&self) -> usize {
        self.to_string().chars().count()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

// ==========================================
// 行号口径 (Row Numbering)
// ==========================================
// BatchIndex: 批次内序号 + 1（默认，校验器原始口径）
// SourceLine: 源文件行号（表头为第 1 行，记录自带 _row），缺失时回退到 BatchIndex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowNumbering {
    #[default]
    BatchIndex,
    SourceLine,
}

impl fmt::Display for RowNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowNumbering::BatchIndex => write!(f, "batch_index"),
            RowNumbering::SourceLine => write!(f, "source_line"),
        }
    }
}

impl FromStr for RowNumbering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batch" | "batch_index" => Ok(RowNumbering::BatchIndex),
            "source" | "source_line" => Ok(RowNumbering::SourceLine),
            other => Err(format!("未知的行号口径: {}", other)),
        }
    }
}

// ==========================================
// 模板格式 (Template Format)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    Csv,
    Json,
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateFormat::Csv => write!(f, "csv"),
            TemplateFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for TemplateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(TemplateFormat::Csv),
            "json" => Ok(TemplateFormat::Json),
            other => Err(format!("不支持的模板格式: {}", other)),
        }
    }
}
