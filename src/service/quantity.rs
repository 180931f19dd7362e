/// 解析数量字符串，容忍货币符号、单位等杂质
///
/// 只保留数字、`.` 和 `-` 后按浮点数解析；解析失败 (空串、多个小数点、
/// 负号位置错误) 一律按 0 处理，不中断聚合。
pub fn parse_quantity(raw: &str) -> f64 {
    let numeric: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match numeric.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Failed to parse quantity: {:?}", raw);
            0.0
        }
    }
}

/// 求和后重新序列化数量
///
/// 整数值保留一位小数 ("8.0")，其余使用最短精确表示。
pub fn format_quantity(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
