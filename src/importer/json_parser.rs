// ==========================================
// 产品导入 - JSON 载荷解析
// ==========================================
// 支持: { "products": [...] } 或顶层数组
// JSON 对象直接参与校验（不经过 CSV 分词），入库前再转换为 RawProductRecord
// ==========================================

use crate::domain::product::RawProductRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_normalizer::normalize_header;
use crate::importer::record_builder::{ProductColumn, RecordBuilder};
use serde_json::{Map, Value};

/// 解析 JSON 载荷为对象列表
///
/// # 返回
/// - Ok(Vec<Map>): 每个元素都是 JSON 对象
/// - Err(JsonParseError): JSON 语法错误
/// - Err(InvalidPayload): 结构不符合约定
pub fn parse_json_products(content: &str) -> ImportResult<Vec<Map<String, Value>>> {
    let root: Value = serde_json::from_str(content)?;

    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("products") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(ImportError::InvalidPayload(
                    "products 必须是数组".to_string(),
                ))
            }
            None => {
                return Err(ImportError::InvalidPayload(
                    "缺少 products 字段".to_string(),
                ))
            }
        },
        _ => {
            return Err(ImportError::InvalidPayload(
                "顶层必须是对象或数组".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(obj) => Ok(obj),
            other => Err(ImportError::InvalidPayload(format!(
                "第 {} 条记录不是对象: {}",
                idx + 1,
                other
            ))),
        })
        .collect()
}

/// JSON 对象 → RawProductRecord（与 CSV 相同的类型转换规则）
///
/// 只识别 camelCase 字段名（与校验器读取的键一致），其余键规范化后进入 extra
pub fn to_raw_record(
    builder: &RecordBuilder,
    object: &Map<String, Value>,
    row_number: usize,
) -> RawProductRecord {
    let mut record = RawProductRecord::new(row_number);

    for (key, value) in object {
        if key == "_row" {
            continue;
        }
        let Some(text) = value_text(value) else {
            continue;
        };

        match ProductColumn::from_field_name(key) {
            Some(column) => builder.assign(&mut record, column, &text),
            None => {
                record
                    .extra
                    .insert(normalize_header(key), text.trim().to_string());
            }
        }
    }

    record
}

// null 视为缺失
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::import_validator::ImportValidator;
    use serde_json::json;

    #[test]
    fn test_parse_products_wrapper() {
        let records =
            parse_json_products(r#"{"products": [{"sku": "A"}, {"sku": "B"}]}"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["sku"], json!("B"));
    }

    #[test]
    fn test_parse_bare_array() {
        let records = parse_json_products(r#"[{"sku": "A"}]"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_json_products("{products: ");
        assert!(matches!(result, Err(ImportError::JsonParseError(_))));
    }

    #[test]
    fn test_parse_invalid_shape() {
        assert!(matches!(
            parse_json_products(r#"{"items": []}"#),
            Err(ImportError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_json_products(r#"{"products": {}}"#),
            Err(ImportError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_json_products(r#"[{"sku": "A"}, 3]"#),
            Err(ImportError::InvalidPayload(_))
        ));
        assert!(matches!(
            parse_json_products("42"),
            Err(ImportError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_to_raw_record_coercion() {
        let builder = RecordBuilder::new();
        let object = json!({
            "sku": " A1 ",
            "name": "Widget",
            "price": "9.5",
            "cost": 4,
            "minStock": 2.9,
            "stock": null,
            "unit": "",
            "isActive": false,
            "category": "Ferretería",
            "lote": 7
        });

        let record = to_raw_record(&builder, object.as_object().unwrap(), 1);

        assert_eq!(record.sku.as_deref(), Some("A1"));
        assert_eq!(record.price, Some(9.5));
        assert_eq!(record.cost, Some(4.0));
        assert_eq!(record.min_stock, Some(2));
        assert_eq!(record.stock, None);
        assert_eq!(record.unit.as_deref(), Some("pieza"));
        assert_eq!(record.is_active, Some(false));
        assert_eq!(record.category.as_deref(), Some("Ferretería"));
        assert_eq!(record.extra.get("lote"), Some(&"7".to_string()));
        assert_eq!(record.row_number, 1);
    }

    #[test]
    fn test_to_raw_record_extra_keys_normalized() {
        let builder = RecordBuilder::new();
        let object = json!({"sku": "A1", "Número de Lote": " L-7 ", "Lote": "L1"});

        let record = to_raw_record(&builder, object.as_object().unwrap(), 1);

        // 与 CSV 表头相同的规范化口径
        assert_eq!(record.extra.get("numerodelote"), Some(&"L-7".to_string()));
        assert_eq!(record.extra.get("lote"), Some(&"L1".to_string()));
        assert!(record.extra.get("Lote").is_none());
    }

    #[test]
    fn test_to_raw_record_ignores_header_aliases() {
        let builder = RecordBuilder::new();
        let object = json!({"sku": "A1", "Nombre": "Widget", "Precio": "9.5"});

        let record = to_raw_record(&builder, object.as_object().unwrap(), 1);

        assert_eq!(record.name, None);
        assert_eq!(record.price, None);
        assert_eq!(record.extra.get("precio"), Some(&"9.5".to_string()));

        // 校验器同样只认 camelCase 键
        let result = ImportValidator::default().validate(&[object.as_object().unwrap().clone()]);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "price"]);
    }
}
