// ==========================================
// 产品导入 - 导入配置
// ==========================================
// 职责: 校验阈值 / 默认单位 / 行号口径
// 来源: 默认值 → JSON 配置文件 → 环境变量（逐级覆写）
// ==========================================

use crate::domain::types::RowNumbering;
use crate::importer::error::{ImportError, ImportResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// 环境变量键
pub mod config_keys {
    pub const MAX_SKU_LENGTH: &str = "PRODUCT_IMPORT_MAX_SKU_LENGTH";
    pub const MAX_NAME_LENGTH: &str = "PRODUCT_IMPORT_MAX_NAME_LENGTH";
    pub const DEFAULT_UNIT: &str = "PRODUCT_IMPORT_DEFAULT_UNIT";
    pub const ROW_NUMBERING: &str = "PRODUCT_IMPORT_ROW_NUMBERING";
}

/// 默认 SKU 最大长度
pub const DEFAULT_MAX_SKU_LENGTH: usize = 50;

/// 默认名称最大长度
pub const DEFAULT_MAX_NAME_LENGTH: usize = 200;

/// 单位列为空时的默认单位
pub const DEFAULT_UNIT: &str = "pieza";

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub max_sku_length: usize,
    pub max_name_length: usize,
    pub default_unit: String,
    pub row_numbering: RowNumbering,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_sku_length: DEFAULT_MAX_SKU_LENGTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            default_unit: DEFAULT_UNIT.to_string(),
            row_numbering: RowNumbering::default(),
        }
    }
}

impl ImportConfig {
    /// 加载配置
    ///
    /// # 参数
    /// - path: JSON 配置文件路径（None 则使用默认值）
    ///
    /// # 返回
    /// - Ok(ImportConfig): 合并环境变量后的配置
    /// - Err: 文件读取失败、JSON 格式错误、环境变量值非法
    pub fn load(path: Option<&Path>) -> ImportResult<Self> {
        let base = match path {
            Some(p) => Self::from_json_file(p)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// 从 JSON 文件读取配置（缺失的键使用默认值）
    pub fn from_json_file(path: &Path) -> ImportResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ImportError::ConfigReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: ImportConfig =
            serde_json::from_str(&content).map_err(|e| ImportError::ConfigReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        debug!(path = %path.display(), ?config, "导入配置文件已加载");
        Ok(config)
    }

    /// 应用覆写项
    ///
    /// # 参数
    /// - lookup: 键 → 值 的查找函数（生产环境为环境变量）
    pub fn with_overrides<F>(mut self, lookup: F) -> ImportResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(config_keys::MAX_SKU_LENGTH) {
            self.max_sku_length = parse_positive(config_keys::MAX_SKU_LENGTH, &value)?;
        }

        if let Some(value) = lookup(config_keys::MAX_NAME_LENGTH) {
            self.max_name_length = parse_positive(config_keys::MAX_NAME_LENGTH, &value)?;
        }

        if let Some(value) = lookup(config_keys::DEFAULT_UNIT) {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ImportError::ConfigValueError {
                    key: config_keys::DEFAULT_UNIT.to_string(),
                    value,
                    message: "默认单位不能为空".to_string(),
                });
            }
            self.default_unit = trimmed.to_string();
        }

        if let Some(value) = lookup(config_keys::ROW_NUMBERING) {
            self.row_numbering =
                value
                    .parse::<RowNumbering>()
                    .map_err(|message| ImportError::ConfigValueError {
                        key: config_keys::ROW_NUMBERING.to_string(),
                        value: value.clone(),
                        message,
                    })?;
        }

        Ok(self)
    }
}

fn parse_positive(key: &str, value: &str) -> ImportResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ImportError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message: "需要正整数".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ImportConfig::default();
        assert_eq!(config.max_sku_length, 50);
        assert_eq!(config.max_name_length, 200);
        assert_eq!(config.default_unit, "pieza");
        assert_eq!(config.row_numbering, RowNumbering::BatchIndex);
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"max_sku_length": 20, "row_numbering": "source_line"}}"#).unwrap();

        let config = ImportConfig::from_json_file(temp_file.path()).unwrap();
        assert_eq!(config.max_sku_length, 20);
        assert_eq!(config.max_name_length, 200);
        assert_eq!(config.row_numbering, RowNumbering::SourceLine);
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "not json").unwrap();

        let result = ImportConfig::from_json_file(temp_file.path());
        assert!(matches!(result, Err(ImportError::ConfigReadError { .. })));
    }

    #[test]
    fn test_overrides() {
        let mut vars = HashMap::new();
        vars.insert(config_keys::MAX_NAME_LENGTH, "120".to_string());
        vars.insert(config_keys::DEFAULT_UNIT, " caja ".to_string());
        vars.insert(config_keys::ROW_NUMBERING, "source".to_string());

        let config = ImportConfig::default()
            .with_overrides(|key| vars.get(key).cloned())
            .unwrap();

        assert_eq!(config.max_sku_length, 50);
        assert_eq!(config.max_name_length, 120);
        assert_eq!(config.default_unit, "caja");
        assert_eq!(config.row_numbering, RowNumbering::SourceLine);
    }

    #[test]
    fn test_overrides_invalid_value() {
        let result = ImportConfig::default().with_overrides(|key| {
            (key == config_keys::MAX_SKU_LENGTH).then(|| "0".to_string())
        });
        assert!(matches!(result, Err(ImportError::ConfigValueError { .. })));
    }
}
