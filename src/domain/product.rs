// ==========================================
// 产品导入 - 产品领域模型
// ==========================================
// 职责: 导入中间结构体 / 库存产品主数据 / "类记录"读取接口
// ==========================================

use crate::domain::types::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ==========================================
// 已知字段常量
// ==========================================
pub const FIELD_SKU: &str = "sku";
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_COST: &str = "cost";
pub const FIELD_STOCK: &str = "stock";
pub const FIELD_MIN_STOCK: &str = "minStock";
pub const FIELD_UNIT: &str = "unit";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_BARCODE: &str = "barcode";
pub const FIELD_IS_ACTIVE: &str = "isActive";

/// 必填字段
pub const REQUIRED_FIELDS: [&str; 3] = [FIELD_SKU, FIELD_NAME, FIELD_PRICE];

/// 数值字段
pub const NUMERIC_FIELDS: [&str; 4] = [FIELD_PRICE, FIELD_COST, FIELD_STOCK, FIELD_MIN_STOCK];

// ==========================================
// ProductFields - 类记录读取接口
// ==========================================
// 用途: 校验器的输入契约（CSV 记录 / JSON 对象均可校验）
// 字段名: camelCase（sku / name / price / minStock / isActive ...）
pub trait ProductFields {
    /// 读取字段值（缺失或 null 返回 None）
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// 源文件行号（如果记录携带）
    fn source_row(&self) -> Option<usize> {
        None
    }
}

// ==========================================
// RawProductRecord - 导入中间结构体
// ==========================================
// 用途: 导入管道中间产物（CSV 行 → 记录构建 → 此结构）
// 生命周期: 构建后不可变，仅供校验与入库转换
// None: 源数据中没有该列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    // 未识别列（规范化表头 → TRIM 后的值）
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,

    // 元信息: 源文件行号（表头为第 1 行）
    #[serde(rename = "_row")]
    pub row_number: usize,
}

impl RawProductRecord {
    /// 创建空记录（仅行号）
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            ..Default::default()
        }
    }
}

impl ProductFields for RawProductRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            FIELD_SKU => self.sku.clone().map(FieldValue::Text),
            FIELD_NAME => self.name.clone().map(FieldValue::Text),
            FIELD_DESCRIPTION => self.description.clone().map(FieldValue::Text),
            FIELD_PRICE => self.price.map(FieldValue::Number),
            FIELD_COST => self.cost.map(FieldValue::Number),
            FIELD_STOCK => self.stock.map(|v| FieldValue::Number(v as f64)),
            FIELD_MIN_STOCK => self.min_stock.map(|v| FieldValue::Number(v as f64)),
            FIELD_UNIT => self.unit.clone().map(FieldValue::Text),
            FIELD_CATEGORY => self.category.clone().map(FieldValue::Text),
            FIELD_BARCODE => self.barcode.clone().map(FieldValue::Text),
            FIELD_IS_ACTIVE => self.is_active.map(FieldValue::Bool),
            other => self.extra.get(other).cloned().map(FieldValue::Text),
        }
    }

    fn source_row(&self) -> Option<usize> {
        Some(self.row_number)
    }
}

// JSON 导入: 对象直接参与校验，不经过 CSV 分词
impl ProductFields for Map<String, Value> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match self.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            other => Some(FieldValue::Text(other.to_string())),
        }
    }

    fn source_row(&self) -> Option<usize> {
        self.get("_row")
            .and_then(Value::as_u64)
            .map(|row| row as usize)
    }
}

// ==========================================
// Product - 库存产品主数据
// ==========================================
// 用途: 校验通过后写入仓储
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    // ===== 主键 =====
    pub sku: String,

    // ===== 基础信息 =====
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub barcode: Option<String>,
    pub unit: String,
    pub is_active: bool,

    // ===== 价格与库存 =====
    pub price: f64,
    pub cost: f64,
    pub stock: i64,
    pub min_stock: i64,

    // ===== 扩展字段 =====
    pub extra: BTreeMap<String, String>,

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
