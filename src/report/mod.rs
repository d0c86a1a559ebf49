// ==========================================
// 运费对账分析工具 - 报表层
// ==========================================
// 职责: 终端视图（表格 + 条形图）、CSV / JSON 导出
// 红线: 只做展示，不重新计算指标
// ==========================================

pub mod chart;
pub mod error;
pub mod export;
pub mod format;
pub mod table;
pub mod views;

pub use chart::BarChart;
pub use error::{ReportError, ReportResult};
pub use export::{
    default_export_file_name, export_json_report, export_matched_csv, write_json_report,
    write_matched_csv, EXPORT_HEADERS,
};
pub use table::{Align, TableRenderer};
pub use views::{render_dashboard, render_data_table, render_issues, render_load_summary};
