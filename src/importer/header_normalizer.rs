// ==========================================
// 产品导入 - 表头规范化
// ==========================================
// 规则（按顺序）: 小写 → 元音去重音 → ñ→n → 仅保留 [a-z0-9]
// 结果只作为查找键使用，不面向用户展示
// ==========================================

/// 规范化表头为查找键
///
/// 例: "Código de Barras" → "codigodebarras"，"Stock Mínimo" → "stockminimo"
pub fn normalize_header(raw: &str) -> String {
    raw.to_lowercase()
        .chars()
        .map(fold_accent)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

// 重音元音（重音符/尖音符/分音符/扬抑符）与 ñ 折叠为基本字母
fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'ä' | 'â' => 'a',
        'è' | 'é' | 'ë' | 'ê' => 'e',
        'ì' | 'í' | 'ï' | 'î' => 'i',
        'ò' | 'ó' | 'ö' | 'ô' => 'o',
        'ù' | 'ú' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_spanish_headers() {
        assert_eq!(normalize_header("Código de Barras"), "codigodebarras");
        assert_eq!(normalize_header("Stock Mínimo"), "stockminimo");
        assert_eq!(normalize_header("Categoría"), "categoria");
        assert_eq!(normalize_header("AÑO"), "ano");
    }

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize_header("min_stock"), "minstock");
        assert_eq!(normalize_header("  Precio (MXN) "), "preciomxn");
        assert_eq!(normalize_header("is-Active"), "isactive");
    }

    #[test]
    fn test_normalize_other_diacritics_dropped() {
        // 仅折叠元音与 ñ，其余非 ASCII 字符直接移除
        assert_eq!(normalize_header("Façade"), "faade");
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in ["Código de Barras", "Stock Mínimo", "SKU", "lote_2", ""] {
            let once = normalize_header(raw);
            assert_eq!(normalize_header(&once), once);
        }
    }
}
