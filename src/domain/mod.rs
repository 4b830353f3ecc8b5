// ==========================================
// 产品导入 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、记录读取接口
// 红线: 不含数据访问逻辑，不含解析逻辑
// ==========================================

pub mod import;
pub mod product;
pub mod types;

// 重导出核心类型
pub use import::{ImportBatch, ImportOutcome, ImportValidationResult, ValidationIssue};
pub use product::{Product, ProductFields, RawProductRecord, NUMERIC_FIELDS, REQUIRED_FIELDS};
pub use types::{FieldValue, RowNumbering, TemplateFormat};
