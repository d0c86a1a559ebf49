// ==========================================
// 运费对账分析工具 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 运单号标准化 / 金额与日期解析
// ==========================================

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

// 表格工具导出空值时常见的占位文本
const NULL_TOKENS: [&str; 5] = ["nan", "null", "none", "n/a", "#n/a"];

// 金额前缀/后缀中的货币标识
const CURRENCY_TOKENS: [&str; 8] = ["US$", "USD", "RMB", "CNY", "$", "¥", "￥", "元"];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// Excel 序列日期的合法区间（1900-01-01 .. 9999-12-31）
const EXCEL_SERIAL_MIN: f64 = 1.0;
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本字段（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 标准化 NULL 值（空字符串/空白/nan 等占位符 → None）
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || NULL_TOKENS.contains(&trimmed.to_lowercase().as_str()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 运单号标准化: 去空白、转大写、还原被表格工具写成浮点的纯数字单号
    pub fn normalize_tracking(&self, value: Option<&str>) -> Option<String> {
        let raw = self.normalize_null(value)?;
        let compact: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        let restored = match compact.strip_suffix(".0") {
            Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                digits.to_string()
            }
            _ => compact,
        };

        if restored.is_empty() {
            None
        } else {
            Some(restored)
        }
    }

    /// 解析金额/数值（支持千分位、货币符号、括号负数）
    pub fn parse_amount(&self, value: &str) -> Result<f64, String> {
        let mut text = value.trim().to_string();
        let mut negative = false;

        if text.starts_with('(') && text.ends_with(')') && text.len() >= 2 {
            negative = true;
            text = text[1..text.len() - 1].trim().to_string();
        }
        if let Some(rest) = text.strip_prefix('-') {
            negative = !negative;
            text = rest.trim().to_string();
        }

        for token in CURRENCY_TOKENS {
            if let Some(rest) = text.strip_prefix(token) {
                text = rest.trim().to_string();
            }
            if let Some(rest) = text.strip_suffix(token) {
                text = rest.trim().to_string();
            }
        }

        let digits: String = text.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
        let parsed = digits
            .parse::<f64>()
            .map_err(|_| format!("无法解析为数值: {}", value))?;

        if !parsed.is_finite() {
            return Err(format!("数值非法: {}", value));
        }

        Ok(if negative { -parsed } else { parsed })
    }

    /// 解析日期（多种文本格式 + Excel 序列日期）
    pub fn parse_date(&self, value: &str) -> Result<NaiveDate, String> {
        let text = value.trim();

        // YYYYMMDD 必须先于序列日期判断，两者都是纯数字
        if text.len() == 8 && text.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(d) = NaiveDate::parse_from_str(text, "%Y%m%d") {
                return Ok(d);
            }
        }

        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
                return Ok(d);
            }
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
                return Ok(dt.date());
            }
        }

        // 带时区: RFC 3339 或 Shopify 的 "2024-01-15 10:00:00 -0500"
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Ok(dt.date_naive());
        }
        if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S %z") {
            return Ok(dt.date_naive());
        }

        if let Ok(serial) = text.parse::<f64>() {
            if let Some(d) = excel_serial_to_date(serial) {
                return Ok(d);
            }
        }

        Err(format!("无法识别的日期: {}", value))
    }
}

/// Excel 序列日期 → NaiveDate（1900 日期系统，基准 1899-12-30）
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !(EXCEL_SERIAL_MIN..=EXCEL_SERIAL_MAX).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(Duration::days(serial.floor() as i64))
}
