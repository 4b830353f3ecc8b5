// ==========================================
// 产品导入 - 导入校验与批次模型
// ==========================================
// 职责: 校验问题 / 校验结果 / 导入批次 / 导入结果
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ValidationIssue - 校验问题
// ==========================================
// 同一结构用于 errors（阻断）与 warnings（不阻断）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row: usize,      // 行号（>= 1，口径见 RowNumbering）
    pub field: String,   // 字段名
    pub message: String, // 描述
}

impl ValidationIssue {
    pub fn new(row: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            message: message.into(),
        }
    }
}

// ==========================================
// ImportValidationResult - 批次校验结果
// ==========================================
// 不变量: is_valid == errors.is_empty()，warnings 不影响 is_valid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ImportValidationResult {
    pub fn from_issues(errors: Vec<ValidationIssue>, warnings: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// 存在错误的行号（去重、升序）
    pub fn blocked_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.errors.iter().map(|e| e.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}

impl Default for ImportValidationResult {
    fn default() -> Self {
        Self::from_issues(Vec::new(), Vec::new())
    }
}

// ==========================================
// ImportBatch - 导入批次
// ==========================================
// 用途: 记录一次导入调用的元信息（无论是否落库）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBatch {
    pub batch_id: String,                   // 批次 ID（UUID）
    pub source_name: Option<String>,        // 来源（文件名或调用方标识）
    pub total_rows: usize,                  // 总记录数
    pub created: usize,                     // 新建产品数
    pub updated: usize,                     // 覆盖已有产品数
    pub blocked: usize,                     // 存在错误的行数
    pub warning_count: usize,               // 警告条数
    pub committed: bool,                    // 是否已落库
    pub imported_at: DateTime<Utc>,         // 导入时间
    pub elapsed_ms: u64,                    // 导入耗时（毫秒）
}

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub batch: ImportBatch,
    pub validation: ImportValidationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_validity() {
        let ok = ImportValidationResult::from_issues(
            vec![],
            vec![ValidationIssue::new(1, "price", "price es negativo")],
        );
        assert!(ok.is_valid);

        let blocked = ImportValidationResult::from_issues(
            vec![
                ValidationIssue::new(3, "name", "name es requerido"),
                ValidationIssue::new(1, "sku", "sku es requerido"),
                ValidationIssue::new(3, "price", "price es requerido"),
            ],
            vec![],
        );
        assert!(!blocked.is_valid);
        assert_eq!(blocked.blocked_rows(), vec![1, 3]);
    }

    #[test]
    fn test_validation_result_serialize() {
        let result = ImportValidationResult::default();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"isValid": true, "errors": [], "warnings": []})
        );
    }

    #[test]
    fn test_import_batch_serialize_camel_case() {
        let batch = ImportBatch {
            batch_id: "b-1".to_string(),
            source_name: Some("products.csv".to_string()),
            total_rows: 2,
            created: 1,
            updated: 1,
            blocked: 0,
            warning_count: 3,
            committed: true,
            imported_at: chrono::Utc::now(),
            elapsed_ms: 5,
        };

        let value = serde_json::to_value(&batch).unwrap();

        assert_eq!(value["batchId"], "b-1");
        assert_eq!(value["sourceName"], "products.csv");
        assert_eq!(value["totalRows"], 2);
        assert_eq!(value["warningCount"], 3);
        assert_eq!(value["elapsedMs"], 5);
        assert!(value.get("batch_id").is_none());
    }
}
