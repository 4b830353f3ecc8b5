// ==========================================
// 产品导入 - CSV 行分词器
// ==========================================
// 职责: 单行文本 → 字段列表（双引号包裹 / "" 转义）
// 限制: 不支持跨行的引号字段，每行独立分词
// ==========================================

/// 按未被引号包裹的逗号切分一行
///
/// - `"` 切换引号状态；引号内的 `""` 输出一个字面量 `"`
/// - 引号未闭合不报错，状态保持到行尾
/// - N 个分隔逗号总是产生 N+1 个字段（末尾空字段也保留）
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}
