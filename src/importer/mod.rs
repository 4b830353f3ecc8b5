// ==========================================
// 产品导入 - 导入层
// ==========================================
// 职责: 外部数据导入，生成内部产品数据
// 支持: CSV 文本 / JSON 载荷 / 文件
// 流程: 分词 → 表头规范化 → 记录构建 → 校验 → 落库
// ==========================================

// 模块声明
pub mod csv_tokenizer;
pub mod error;
pub mod file_parser;
pub mod header_normalizer;
pub mod import_validator;
pub mod json_parser;
pub mod product_importer_impl;
pub mod product_importer_trait;
pub mod record_builder;
pub mod template;

// 重导出核心类型
pub use csv_tokenizer::tokenize_line;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvFileParser, JsonFileParser, ParsedPayload, UniversalFileParser};
pub use header_normalizer::normalize_header;
pub use import_validator::ImportValidator;
pub use json_parser::parse_json_products;
pub use product_importer_impl::ProductImporterImpl;
pub use record_builder::{ProductColumn, RecordBuilder};
pub use template::{generate_template, ImportTemplate};

// 重导出 Trait 接口
pub use product_importer_trait::{FileParser, ProductImporter};
