// ==========================================
// 产品导入 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / JSON (.json)
// 输出: ParsedPayload（CSV 记录或 JSON 对象，尚未校验）
// ==========================================

use crate::domain::import::ImportValidationResult;
use crate::domain::product::RawProductRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::import_validator::ImportValidator;
use crate::importer::json_parser::{parse_json_products, to_raw_record};
use crate::importer::product_importer_trait::FileParser;
use crate::importer::record_builder::RecordBuilder;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

// ==========================================
// ParsedPayload - 解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPayload {
    Csv(Vec<RawProductRecord>),
    Json(Vec<Map<String, Value>>),
}

impl ParsedPayload {
    pub fn len(&self) -> usize {
        match self {
            ParsedPayload::Csv(records) => records.len(),
            ParsedPayload::Json(objects) => objects.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 校验载荷（JSON 对象直接校验，保留原始取值以便报告非法数值）
    pub fn validate(&self, validator: &ImportValidator) -> ImportValidationResult {
        match self {
            ParsedPayload::Csv(records) => validator.validate(records),
            ParsedPayload::Json(objects) => validator.validate(objects),
        }
    }

    /// 转换为 RawProductRecord（JSON 记录行号为序号 + 1）
    pub fn into_raw_records(self, builder: &RecordBuilder) -> Vec<RawProductRecord> {
        match self {
            ParsedPayload::Csv(records) => records,
            ParsedPayload::Json(objects) => objects
                .iter()
                .enumerate()
                .map(|(idx, obj)| to_raw_record(builder, obj, idx + 1))
                .collect(),
        }
    }
}

// 读取文本文件（检查存在性与扩展名，去除 UTF-8 BOM）
fn read_text(path: &Path, allowed: &[&str]) -> ImportResult<String> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = extension_of(path);
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    let content = fs::read_to_string(path)?;
    Ok(content
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(content))
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CsvFileParser {
    builder: RecordBuilder,
}

impl CsvFileParser {
    pub fn new(builder: RecordBuilder) -> Self {
        Self { builder }
    }
}

impl FileParser for CsvFileParser {
    fn parse_file(&self, path: &Path) -> ImportResult<ParsedPayload> {
        let content = read_text(path, &["csv"])?;
        Ok(ParsedPayload::Csv(self.builder.build(&content)))
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileParser;

impl FileParser for JsonFileParser {
    fn parse_file(&self, path: &Path) -> ImportResult<ParsedPayload> {
        let content = read_text(path, &["json"])?;
        Ok(ParsedPayload::Json(parse_json_products(&content)?))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct UniversalFileParser {
    csv: CsvFileParser,
    json: JsonFileParser,
}

impl UniversalFileParser {
    pub fn new(builder: RecordBuilder) -> Self {
        Self {
            csv: CsvFileParser::new(builder),
            json: JsonFileParser,
        }
    }
}

impl FileParser for UniversalFileParser {
    fn parse_file(&self, path: &Path) -> ImportResult<ParsedPayload> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        match extension_of(path).as_str() {
            "csv" => self.csv.parse_file(path),
            "json" => self.json.parse_file(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
