// ==========================================
// 产品导入 - 导入模板生成
// ==========================================
// 职责: 生成 CSV / JSON 示例载荷供用户参考
// 内容: 固定表头 + 两条固定示例，无其他输入参数
// ==========================================

use crate::domain::types::TemplateFormat;
use crate::importer::error::{ImportError, ImportResult};
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::{json, Value};

/// CSV 模板表头（固定列顺序）
pub const TEMPLATE_HEADERS: [&str; 11] = [
    "SKU",
    "Nombre",
    "Descripción",
    "Precio",
    "Costo",
    "Stock",
    "Stock Mínimo",
    "Unidad",
    "Categoría",
    "Código de Barras",
    "Activo",
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleProduct {
    sku: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    cost: f64,
    stock: i64,
    min_stock: i64,
    unit: &'static str,
    category: &'static str,
    barcode: &'static str,
    is_active: bool,
}

impl SampleProduct {
    fn csv_row(&self) -> Vec<String> {
        vec![
            self.sku.to_string(),
            self.name.to_string(),
            self.description.to_string(),
            format!("{:.2}", self.price),
            format!("{:.2}", self.cost),
            self.stock.to_string(),
            self.min_stock.to_string(),
            self.unit.to_string(),
            self.category.to_string(),
            self.barcode.to_string(),
            if self.is_active { "si" } else { "no" }.to_string(),
        ]
    }
}

const SAMPLES: [SampleProduct; 2] = [
    SampleProduct {
        sku: "PROD001",
        name: "Tornillo hexagonal",
        description: "Tornillo de acero inoxidable 1/4 pulgada",
        price: 2.5,
        cost: 1.2,
        stock: 500,
        min_stock: 100,
        unit: "pieza",
        category: "Ferretería",
        barcode: "7501234567890",
        is_active: true,
    },
    SampleProduct {
        sku: "PROD002",
        name: "Pintura vinílica blanca",
        description: "Cubeta de 19 litros, acabado mate",
        price: 850.0,
        cost: 620.0,
        stock: 25,
        min_stock: 5,
        unit: "cubeta",
        category: "Pinturas",
        barcode: "7501234567891",
        is_active: true,
    },
];

// ==========================================
// ImportTemplate - 模板内容
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ImportTemplate {
    Csv(String),
    Json(Value),
}

impl ImportTemplate {
    /// 输出为文本（JSON 使用缩进格式）
    pub fn to_text(&self) -> ImportResult<String> {
        match self {
            ImportTemplate::Csv(text) => Ok(text.clone()),
            ImportTemplate::Json(value) => Ok(serde_json::to_string_pretty(value)?),
        }
    }
}

/// 生成导入模板
pub fn generate_template(format: TemplateFormat) -> ImportResult<ImportTemplate> {
    match format {
        TemplateFormat::Csv => csv_template().map(ImportTemplate::Csv),
        TemplateFormat::Json => {
            let products = serde_json::to_value(SAMPLES)?;
            Ok(ImportTemplate::Json(json!({ "products": products })))
        }
    }
}

fn csv_template() -> ImportResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(TEMPLATE_HEADERS)?;
    for sample in &SAMPLES {
        writer.write_record(sample.csv_row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ImportError::CsvWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ImportError::InternalError(e.to_string()))
}
