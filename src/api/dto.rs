// ==========================================
// 运费对账分析工具 - API 数据传输对象
// ==========================================

use crate::domain::{LoadSummary, Reconciliation};
use crate::engine::{CountryBreakdown, DashboardSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一次完整分析的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// 报告ID（uuid v4）
    pub report_id: String,
    /// 生成时间（UTC）
    pub generated_at: DateTime<Utc>,
    /// 本次使用的汇率（人民币 → 美元）
    pub exchange_rate_rmb_to_usd: f64,
    /// 物流费用表加载概况
    pub shipping_load: LoadSummary,
    /// 订单导出加载概况
    pub orders_load: LoadSummary,
    /// 对账结果（合并行 + 问题清单）
    pub reconciliation: Reconciliation,
    /// 驾驶舱汇总；无匹配行时为 None
    pub summary: Option<DashboardSummary>,
    /// 分国家统计
    pub country_stats: CountryBreakdown,
}

impl AnalysisReport {
    pub fn has_matches(&self) -> bool {
        self.summary.is_some()
    }
}
