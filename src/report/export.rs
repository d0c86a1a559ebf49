// ==========================================
// 运费对账分析工具 - 导出
// ==========================================
// CSV: 仅导出匹配行（11 列）
// JSON: 完整分析报告
// ==========================================

use crate::domain::MergedRow;
use crate::report::error::ReportResult;
use chrono::NaiveDate;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// CSV 导出列
pub const EXPORT_HEADERS: [&str; 11] = [
    "Order",
    "Tracking",
    "Order Date",
    "Country",
    "Net Payout (USD)",
    "Product Cost (USD)",
    "Shipping Cost (USD)",
    "Shipping Cost (RMB)",
    "Shipping %",
    "Profit (USD)",
    "Weight (kg)",
];

/// 默认导出文件名: shipping_analysis_YYYYMMDD.csv
pub fn default_export_file_name(date: NaiveDate) -> String {
    format!("shipping_analysis_{}.csv", date.format("%Y%m%d"))
}

fn number(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_default()
}

fn export_record(row: &MergedRow) -> [String; 11] {
    [
        row.order_number.clone().unwrap_or_default(),
        row.tracking_number.clone().unwrap_or_default(),
        row.order_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        row.country.clone().unwrap_or_default(),
        number(row.net_payout, 2),
        number(row.product_cost, 2),
        number(row.shipping_cost_usd, 2),
        number(row.shipping_cost_rmb, 2),
        number(row.shipping_pct, 2),
        number(row.profit, 2),
        number(row.weight_kg, 3),
    ]
}

/// 写出匹配行，返回写出的数据行数
pub fn write_matched_csv<W: Write>(writer: W, rows: &[MergedRow]) -> ReportResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADERS)?;

    let mut written = 0;
    for row in rows.iter().filter(|r| r.is_matched()) {
        csv_writer.write_record(export_record(row))?;
        written += 1;
    }

    csv_writer.flush()?;
    Ok(written)
}

pub fn export_matched_csv(path: &Path, rows: &[MergedRow]) -> ReportResult<usize> {
    let file = File::create(path)?;
    let written = write_matched_csv(BufWriter::new(file), rows)?;
    info!(path = %path.display(), rows = written, "CSV 导出完成");
    Ok(written)
}

pub fn write_json_report<W: Write, T: Serialize>(writer: W, report: &T) -> ReportResult<()> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

pub fn export_json_report<T: Serialize>(path: &Path, report: &T) -> ReportResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json_report(&mut writer, report)?;
    writer.flush()?;
    info!(path = %path.display(), "JSON 报告导出完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MergeStatus;

    fn row(status: MergeStatus, order: &str, tracking: &str) -> MergedRow {
        MergedRow {
            status,
            tracking_number: Some(tracking.to_string()),
            order_number: Some(order.to_string()),
            order_date: NaiveDate::from_ymd_opt(2025, 1, 20),
            country: Some("Canada".to_string()),
            net_payout: Some(50.0),
            product_cost: Some(10.0),
            shipping_cost_rmb: Some(100.0),
            shipping_cost_usd: Some(13.9),
            weight_kg: Some(0.25),
            ship_date: None,
            shipping_country: None,
            shipping_pct: Some(27.8),
            profit: Some(26.1),
            order_row: Some(1),
            shipment_row: Some(1),
        }
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(default_export_file_name(date), "shipping_analysis_20250307.csv");
    }

    #[test]
    fn test_csv_exports_matched_rows_only() {
        let rows = vec![
            row(MergeStatus::Both, "#1001", "4PX001"),
            row(MergeStatus::LeftOnly, "#1002", "4PX002"),
        ];
        let mut buf = Vec::new();

        let written = write_matched_csv(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(written, 1);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Order,Tracking,Order Date,Country,Net Payout (USD)"));
        assert_eq!(
            lines[1],
            "#1001,4PX001,2025-01-20,Canada,50.00,10.00,13.90,100.00,27.80,26.10,0.250"
        );
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_export_file_name(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        ));
        let rows = vec![row(MergeStatus::Both, "#1", "4PX1")];

        let written = export_matched_csv(&path, &rows).unwrap();

        assert_eq!(written, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("#1,4PX1"));
    }

    #[test]
    fn test_json_report() {
        let rows = vec![row(MergeStatus::Both, "#1", "4PX1")];
        let mut buf = Vec::new();

        write_json_report(&mut buf, &rows).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value[0]["status"], "BOTH");
        assert_eq!(value[0]["tracking_number"], "4PX1");
    }
}
