// ==========================================
// 运费对账分析工具 - 展示格式化
// ==========================================
// 金额: $1,234.56 | 百分比: 12.3% | 重量: 0.123 | 缺失: -
// ==========================================

use chrono::NaiveDate;

/// 缺失值占位符
pub const PLACEHOLDER: &str = "-";

/// 千分位分组
pub fn group_thousands(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }

    result
}

pub fn format_money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

pub fn format_money_opt(value: Option<f64>) -> String {
    value.map(format_money).unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_weight(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.3}", v),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_date(value: Option<NaiveDate>) -> String {
    match value {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn format_text(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
