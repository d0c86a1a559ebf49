// ==========================================
// 运费对账分析工具 - 对账结果模型
// ==========================================
// 职责: 合并行、问题清单、对账结果
// 红线: 只描述结果，不含对账逻辑（见 engine::reconciler）
// ==========================================

use crate::domain::types::{IssueKind, MergeStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MergedRow - 外连接后的一行
// ==========================================
// 订单侧字段在 RightOnly 行为 None，物流侧字段在 LeftOnly 行为 None
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRow {
    pub status: MergeStatus,
    pub tracking_number: Option<String>,

    // ===== 订单侧 =====
    pub order_number: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub country: Option<String>, // 订单国家（统计口径）
    pub net_payout: Option<f64>,
    pub product_cost: Option<f64>,

    // ===== 物流侧 =====
    pub shipping_cost_rmb: Option<f64>,
    pub shipping_cost_usd: Option<f64>,
    pub weight_kg: Option<f64>,
    pub ship_date: Option<NaiveDate>,
    pub shipping_country: Option<String>, // 物流表国家（已翻译）

    // ===== 派生指标 =====
    pub shipping_pct: Option<f64>, // 运费占净收入百分比（2 位小数）
    pub profit: Option<f64>,       // 净收入 - 商品成本 - 运费

    // ===== 溯源 =====
    pub order_row: Option<usize>,
    pub shipment_row: Option<usize>,
}

impl MergedRow {
    pub fn is_matched(&self) -> bool {
        self.status.is_matched()
    }
}

// ==========================================
// 问题明细
// ==========================================

/// 物流表中存在、订单中找不到的运单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedShipment {
    pub tracking: String,
    pub shipping_cost_usd: f64,
    pub ship_date: Option<NaiveDate>,
    pub country: Option<String>,
}

/// 带承运商标识运单号、但物流表中无费用的订单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedOrder {
    pub order: String,
    pub tracking: String,
    pub net_payout: Option<f64>,
    pub country: Option<String>,
}

/// 一单多运单
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiTrackingOrder {
    pub order: String,
    pub count: usize,
    pub trackings: Vec<String>,
    pub net_payout: Option<f64>,
}

/// 物流表中重复出现的运单号（费用可能被重复计算）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateTracking {
    pub tracking: String,
    pub occurrences: usize,
    pub total_cost_usd: f64,
}

/// 订单国家与物流表国家不一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMismatch {
    pub order: Option<String>,
    pub tracking: String,
    pub order_country: String,
    pub shipping_country: String,
}

// ==========================================
// Issues - 问题清单
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issues {
    pub unmatched_shipments: Vec<UnmatchedShipment>,
    pub unmatched_orders: Vec<UnmatchedOrder>,
    pub multi_tracking: Vec<MultiTrackingOrder>,
    pub duplicate_tracking: Vec<DuplicateTracking>,
    pub country_mismatch: Vec<CountryMismatch>,
}

impl Issues {
    pub fn count(&self, kind: IssueKind) -> usize {
        match kind {
            IssueKind::UnmatchedShipment => self.unmatched_shipments.len(),
            IssueKind::UnmatchedOrder => self.unmatched_orders.len(),
            IssueKind::MultiTracking => self.multi_tracking.len(),
            IssueKind::DuplicateTracking => self.duplicate_tracking.len(),
            IssueKind::CountryMismatch => self.country_mismatch.len(),
        }
    }

    pub fn total(&self) -> usize {
        IssueKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ==========================================
// Reconciliation - 对账结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    pub rows: Vec<MergedRow>,
    pub issues: Issues,
    pub order_count: usize,    // 订单导出行数（匹配率分母）
    pub shipment_count: usize, // 物流记录行数
}

impl Reconciliation {
    pub fn matched(&self) -> impl Iterator<Item = &MergedRow> {
        self.rows.iter().filter(|r| r.is_matched())
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &MergedRow> {
        self.rows.iter().filter(|r| !r.is_matched())
    }

    pub fn matched_count(&self) -> usize {
        self.matched().count()
    }
}
