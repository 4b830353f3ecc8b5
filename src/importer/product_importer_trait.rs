// ==========================================
// 产品导入 - 导入 Trait
// ==========================================
// 职责: 定义产品导入接口（不包含实现）
// ==========================================

use crate::domain::import::ImportOutcome;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::ParsedPayload;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 产品导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 从 CSV 文本导入
    ///
    /// # 参数
    /// - content: CSV 全文（首行为表头）
    /// - source_name: 来源标识（记录到批次）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 批次信息 + 校验结果（存在错误时不落库）
    /// - Err: 仓储错误
    ///
    /// # 导入流程
    /// 1. 记录构建（分词 + 表头规范化 + 类型转换）
    /// 2. 批次校验（errors / warnings）
    /// 3. 无错误时转换为 Product 并写入仓储
    /// 4. 记录导入批次
    async fn import_csv_text(
        &self,
        content: &str,
        source_name: Option<String>,
    ) -> ImportResult<ImportOutcome>;

    /// 从 JSON 文本导入（{ "products": [...] } 或数组）
    ///
    /// # 返回
    /// - Err: JSON 语法/结构错误、仓储错误
    async fn import_json_text(
        &self,
        content: &str,
        source_name: Option<String>,
    ) -> ImportResult<ImportOutcome>;

    /// 从文件导入（按扩展名选择 CSV / JSON）
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P)
        -> ImportResult<ImportOutcome>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件的导入相互独立，某个文件失败不影响其他文件
    /// - 返回顺序与入参顺序一致
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<Result<ImportOutcome, String>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvFileParser, JsonFileParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为待校验载荷
    ///
    /// # 返回
    /// - Ok(ParsedPayload): CSV 记录或 JSON 对象
    /// - Err: 文件不存在、格式不支持、读取失败、JSON 错误
    fn parse_file(&self, path: &Path) -> ImportResult<ParsedPayload>;
}
