// ==========================================
// 产品导入 - 记录构建器
// ==========================================
// 职责: CSV 文本 → RawProductRecord 列表
// 流程: 过滤空行 → 表头规范化 → 逐行分词 → 按列分派 + 类型转换
// ==========================================

use crate::config::import_config::DEFAULT_UNIT;
use crate::domain::product::RawProductRecord;
use crate::importer::csv_tokenizer::tokenize_line;
use crate::importer::header_normalizer::normalize_header;
use tracing::debug;

/// 布尔列的真值集合（TRIM + 小写后比较）
pub const TRUTHY_TOKENS: [&str; 5] = ["true", "1", "si", "yes", "activo"];

// ==========================================
// ProductColumn - 已知列
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductColumn {
    Sku,
    Name,
    Description,
    Price,
    Cost,
    Stock,
    MinStock,
    Unit,
    Category,
    Barcode,
    IsActive,
}

impl ProductColumn {
    /// 按规范化表头分派（含西语/英语别名）
    pub fn from_header(normalized: &str) -> Option<Self> {
        match normalized {
            "sku" | "codigo" => Some(ProductColumn::Sku),
            "nombre" | "name" => Some(ProductColumn::Name),
            "descripcion" | "description" => Some(ProductColumn::Description),
            "precio" | "price" => Some(ProductColumn::Price),
            "costo" | "cost" => Some(ProductColumn::Cost),
            "stock" => Some(ProductColumn::Stock),
            "stockminimo" | "minstock" => Some(ProductColumn::MinStock),
            "unidad" | "unit" => Some(ProductColumn::Unit),
            "categoria" | "category" => Some(ProductColumn::Category),
            "codigodebarras" | "barcode" => Some(ProductColumn::Barcode),
            "activo" | "active" => Some(ProductColumn::IsActive),
            _ => None,
        }
    }

    /// 按 camelCase 字段名分派（JSON 载荷）
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "sku" => Some(ProductColumn::Sku),
            "name" => Some(ProductColumn::Name),
            "description" => Some(ProductColumn::Description),
            "price" => Some(ProductColumn::Price),
            "cost" => Some(ProductColumn::Cost),
            "stock" => Some(ProductColumn::Stock),
            "minStock" => Some(ProductColumn::MinStock),
            "unit" => Some(ProductColumn::Unit),
            "category" => Some(ProductColumn::Category),
            "barcode" => Some(ProductColumn::Barcode),
            "isActive" => Some(ProductColumn::IsActive),
            _ => None,
        }
    }
}

// ==========================================
// RecordBuilder - 记录构建器
// ==========================================
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    default_unit: String,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::with_default_unit(DEFAULT_UNIT)
    }
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定单位列为空时的默认单位
    pub fn with_default_unit(unit: impl Into<String>) -> Self {
        Self {
            default_unit: unit.into(),
        }
    }

    /// 解析完整 CSV 文本
    ///
    /// # 返回
    /// - 非空行少于 2 行（只有表头或为空）时返回空列表，不视为错误
    /// - 行号 = 非空数据行序号 + 2（表头为第 1 行）
    pub fn build(&self, content: &str) -> Vec<RawProductRecord> {
        let lines: Vec<&str> = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.len() < 2 {
            debug!(lines = lines.len(), "CSV 无数据行");
            return Vec::new();
        }

        let headers: Vec<String> = tokenize_line(lines[0])
            .iter()
            .map(String::as_str)
            .map(normalize_header)
            .collect();

        let records: Vec<RawProductRecord> = lines[1..]
            .iter()
            .enumerate()
            .map(|(idx, line)| self.build_record(&headers, &tokenize_line(line), idx + 2))
            .collect();

        debug!(
            columns = headers.len(),
            records = records.len(),
            "CSV 记录构建完成"
        );
        records
    }

    /// 按位置组合表头与取值（缺少的尾部取值视为空字符串）
    pub fn build_record(
        &self,
        headers: &[String],
        values: &[String],
        row_number: usize,
    ) -> RawProductRecord {
        let mut record = RawProductRecord::new(row_number);

        for (idx, header) in headers.iter().enumerate() {
            let value = values.get(idx).map(String::as_str).unwrap_or("");
            match ProductColumn::from_header(header) {
                Some(column) => self.assign(&mut record, column, value),
                None => {
                    record
                        .extra
                        .insert(header.clone(), value.trim().to_string());
                }
            }
        }

        record
    }

    /// 写入已知列（TRIM + 类型转换）
    pub fn assign(&self, record: &mut RawProductRecord, column: ProductColumn, raw: &str) {
        let value = raw.trim();
        match column {
            ProductColumn::Sku => record.sku = Some(value.to_string()),
            ProductColumn::Name => record.name = Some(value.to_string()),
            ProductColumn::Description => record.description = Some(value.to_string()),
            ProductColumn::Price => record.price = Some(parse_float_or_zero(value)),
            ProductColumn::Cost => record.cost = Some(parse_float_or_zero(value)),
            ProductColumn::Stock => record.stock = Some(parse_int_or_zero(value)),
            ProductColumn::MinStock => record.min_stock = Some(parse_int_or_zero(value)),
            ProductColumn::Unit => {
                record.unit = Some(if value.is_empty() {
                    self.default_unit.clone()
                } else {
                    value.to_string()
                })
            }
            ProductColumn::Category => record.category = Some(value.to_string()),
            ProductColumn::Barcode => record.barcode = Some(value.to_string()),
            ProductColumn::IsActive => record.is_active = Some(is_truthy(value)),
        }
    }
}

/// 浮点解析，失败或非有限值回退 0
pub fn parse_float_or_zero(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// 整数解析，小数截断，失败回退 0
pub fn parse_int_or_zero(value: &str) -> i64 {
    let trimmed = value.trim();
    trimmed.parse::<i64>().unwrap_or_else(|_| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64)
            .unwrap_or(0)
    })
}

/// 真值判定（大小写不敏感，TRIM）
pub fn is_truthy(value: &str) -> bool {
    let lowered = value.trim().to_lowercase();
    TRUTHY_TOKENS.contains(&lowered.as_str())
}
