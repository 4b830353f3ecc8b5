// ==========================================
// 产品导入 - 核心库
// ==========================================
// 职责: 库存产品导入数据的解析与校验
// 管道: 原始文本 → 行分词 → 记录构建（表头规范化）→ 批次校验 → 校验结果
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 解析与校验
pub mod importer;

// 配置层 - 导入配置
pub mod config;

// 数据仓储层 - 数据访问接口
pub mod repository;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::ImportConfig;

pub use domain::{
    FieldValue, ImportBatch, ImportOutcome, ImportValidationResult, Product, ProductFields,
    RawProductRecord, RowNumbering, TemplateFormat, ValidationIssue,
};

pub use importer::{
    generate_template, normalize_header, tokenize_line, ImportError, ImportResult,
    ImportTemplate, ImportValidator, ProductImporter, ProductImporterImpl, RecordBuilder,
};

pub use repository::{InMemoryProductRepository, ProductRepository};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "product-import";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
