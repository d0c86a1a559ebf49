// ==========================================
// 运费对账分析工具 - 引擎层
// ==========================================
// 职责: 国家名翻译、对账（外连接 + 问题归类）、指标计算
// 红线: 引擎不做文件 IO，不做渲染
// ==========================================

pub mod country;
pub mod metrics;
pub mod reconciler;

// 重导出核心引擎
pub use country::{translate_country, CountryTranslator, COUNTRY_TABLE};
pub use metrics::{
    profit, round2, shipping_pct, CountryBreakdown, CountryStats, DashboardSummary, MetricsEngine,
};
pub use reconciler::Reconciler;
