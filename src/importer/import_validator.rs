// ==========================================
// 产品导入 - 导入校验器实现
// ==========================================
// 职责: 必填 / SKU 批内唯一 / 数值 / 交叉一致性 / 长度 校验
// 原则: 校验失败只产生数据（errors / warnings），不中断批次
// ==========================================

use crate::config::ImportConfig;
use crate::domain::import::{ImportValidationResult, ValidationIssue};
use crate::domain::product::{
    ProductFields, FIELD_COST, FIELD_MIN_STOCK, FIELD_NAME, FIELD_PRICE, FIELD_SKU,
    FIELD_STOCK, NUMERIC_FIELDS, REQUIRED_FIELDS,
};
use crate::domain::types::{FieldValue, RowNumbering};
use std::collections::HashSet;
use tracing::debug;

pub const MSG_DUPLICATE_SKU: &str = "SKU duplicado en el archivo";
pub const MSG_PRICE_BELOW_COST: &str = "Precio menor al costo";
pub const MSG_STOCK_BELOW_MIN: &str = "Stock actual por debajo del mínimo";

pub struct ImportValidator {
    max_sku_length: usize,
    max_name_length: usize,
    row_numbering: RowNumbering,
}

impl Default for ImportValidator {
    fn default() -> Self {
        Self::from_config(&ImportConfig::default())
    }
}

impl ImportValidator {
    pub fn new(max_sku_length: usize, max_name_length: usize, row_numbering: RowNumbering) -> Self {
        Self {
            max_sku_length,
            max_name_length,
            row_numbering,
        }
    }

    pub fn from_config(config: &ImportConfig) -> Self {
        Self::new(
            config.max_sku_length,
            config.max_name_length,
            config.row_numbering,
        )
    }

    /// 校验整个批次
    ///
    /// # 参数
    /// - records: 任意"类记录"输入（CSV 记录或 JSON 对象）
    ///
    /// # 返回
    /// - ImportValidationResult: is_valid 仅由 errors 是否为空决定
    pub fn validate<R: ProductFields>(&self, records: &[R]) -> ImportValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut seen_skus: HashSet<String> = HashSet::new();

        for (idx, record) in records.iter().enumerate() {
            let row = self.row_of(record, idx);

            // 规则 1: 必填字段
            for field in REQUIRED_FIELDS {
                let missing = record.field(field).map_or(true, |v| v.is_blank());
                if missing {
                    errors.push(ValidationIssue::new(row, field, format!("{} es requerido", field)));
                }
            }

            // 规则 2: SKU 批内唯一（精确比较，不 TRIM，区分大小写；空 SKU 已由规则 1 报告）
            if let Some(sku) = record
                .field(FIELD_SKU)
                .filter(|v| !v.is_blank())
                .map(|v| v.to_string())
            {
                if !seen_skus.insert(sku) {
                    errors.push(ValidationIssue::new(row, FIELD_SKU, MSG_DUPLICATE_SKU));
                }
            }

            // 规则 3: 数值字段
            for field in NUMERIC_FIELDS {
                let Some(value) = record.field(field) else {
                    continue;
                };
                if value.is_blank() {
                    continue;
                }
                match value.to_number() {
                    None => errors.push(ValidationIssue::new(
                        row,
                        field,
                        format!("{} debe ser un número válido", field),
                    )),
                    Some(n) if n < 0.0 => warnings.push(ValidationIssue::new(
                        row,
                        field,
                        format!("{} es negativo", field),
                    )),
                    Some(_) => {}
                }
            }

            // 规则 4: 价格低于成本
            if let (Some(price), Some(cost)) =
                (numeric(record, FIELD_PRICE), numeric(record, FIELD_COST))
            {
                if price < cost {
                    warnings.push(ValidationIssue::new(row, FIELD_PRICE, MSG_PRICE_BELOW_COST));
                }
            }

            // 规则 5: 库存不高于最低库存
            if let (Some(stock), Some(min_stock)) =
                (numeric(record, FIELD_STOCK), numeric(record, FIELD_MIN_STOCK))
            {
                if stock <= min_stock {
                    warnings.push(ValidationIssue::new(row, FIELD_STOCK, MSG_STOCK_BELOW_MIN));
                }
            }

            // 规则 6: 长度上限
            if let Some(sku) = record.field(FIELD_SKU) {
                if sku.char_len() > self.max_sku_length {
                    errors.push(ValidationIssue::new(
                        row,
                        FIELD_SKU,
                        format!("SKU muy largo (máximo {} caracteres)", self.max_sku_length),
                    ));
                }
            }
            if let Some(name) = record.field(FIELD_NAME) {
                if name.char_len() > self.max_name_length {
                    errors.push(ValidationIssue::new(
                        row,
                        FIELD_NAME,
                        format!(
                            "Nombre muy largo (máximo {} caracteres)",
                            self.max_name_length
                        ),
                    ));
                }
            }
        }

        debug!(
            records = records.len(),
            errors = errors.len(),
            warnings = warnings.len(),
            "批次校验完成"
        );

        ImportValidationResult::from_issues(errors, warnings)
    }

    /// 仅检查 SKU 批内唯一（用于入库前对转换后记录的复核）
    ///
    /// # 返回
    /// - Vec<ValidationIssue>: 后出现的重复行，消息与规则 2 相同
    pub fn find_duplicate_skus<R: ProductFields>(&self, records: &[R]) -> Vec<ValidationIssue> {
        let mut seen_skus: HashSet<String> = HashSet::new();
        let mut issues = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let Some(sku) = record
                .field(FIELD_SKU)
                .filter(|v| !v.is_blank())
                .map(|v| v.to_string())
            else {
                continue;
            };
            if !seen_skus.insert(sku) {
                issues.push(ValidationIssue::new(
                    self.row_of(record, idx),
                    FIELD_SKU,
                    MSG_DUPLICATE_SKU,
                ));
            }
        }

        issues
    }

    fn row_of<R: ProductFields>(&self, record: &R, idx: usize) -> usize {
        match self.row_numbering {
            RowNumbering::BatchIndex => idx + 1,
            RowNumbering::SourceLine => record.source_row().unwrap_or(idx + 1),
        }
    }
}

// 非空且可解析的数值
fn numeric<R: ProductFields>(record: &R, field: &str) -> Option<f64> {
    record
        .field(field)
        .filter(|v| !v.is_blank())
        .as_ref()
        .and_then(FieldValue::to_number)
}
