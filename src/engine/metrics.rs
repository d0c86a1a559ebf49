// ==========================================
// 运费对账分析工具 - 指标计算引擎
// ==========================================
// 职责: 单行派生指标 + 驾驶舱汇总 + 分国家统计 + 离群值
// 口径: 汇总与统计只使用匹配行（MergeStatus::Both）
// ==========================================

use crate::domain::{MergedRow, Reconciliation};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 保留 2 位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 运费占净收入百分比（2 位小数）；净收入缺失或为 0 时无意义
pub fn shipping_pct(shipping_cost_usd: Option<f64>, net_payout: Option<f64>) -> Option<f64> {
    match (shipping_cost_usd, net_payout) {
        (Some(cost), Some(payout)) if payout != 0.0 => Some(round2(cost / payout * 100.0)),
        _ => None,
    }
}

/// 利润 = 净收入 - 商品成本 - 运费；任一项缺失则无结果
pub fn profit(
    net_payout: Option<f64>,
    product_cost: Option<f64>,
    shipping_cost_usd: Option<f64>,
) -> Option<f64> {
    Some(net_payout? - product_cost? - shipping_cost_usd?)
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

// ==========================================
// DashboardSummary - 驾驶舱关键指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub matched_orders: usize,            // 匹配行数
    pub order_rows: usize,                // 订单导出行数
    pub match_rate_pct: f64,              // 匹配行数 / 订单行数 × 100
    pub avg_shipping_usd: Option<f64>,    // 平均运费
    pub avg_shipping_pct: Option<f64>,    // 平均运费占比
    pub total_shipping_usd: f64,          // 运费合计
}

// ==========================================
// CountryStats - 分国家统计
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStats {
    pub country: String,
    pub avg_cost_usd: f64,
    pub order_count: usize,
    pub total_cost_usd: f64,
    pub avg_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryBreakdown {
    pub stats: Vec<CountryStats>,
}

impl CountryBreakdown {
    /// 按平均运费升序（图表口径）
    pub fn by_avg_cost(&self) -> Vec<&CountryStats> {
        let mut sorted: Vec<&CountryStats> = self.stats.iter().collect();
        sorted.sort_by(|a, b| {
            a.avg_cost_usd
                .partial_cmp(&b.avg_cost_usd)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.country.cmp(&b.country))
        });
        sorted
    }

    /// 按订单数降序，国家名为次序键（表格口径）
    pub fn by_order_count(&self) -> Vec<&CountryStats> {
        let mut sorted: Vec<&CountryStats> = self.stats.iter().collect();
        sorted.sort_by(|a, b| {
            b.order_count
                .cmp(&a.order_count)
                .then_with(|| a.country.cmp(&b.country))
        });
        sorted
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

// ==========================================
// MetricsEngine - 指标计算引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEngine;

impl MetricsEngine {
    pub fn new() -> Self {
        Self
    }

    /// 驾驶舱汇总；无匹配行时返回 None
    pub fn summarize(&self, reconciliation: &Reconciliation) -> Option<DashboardSummary> {
        let matched: Vec<&MergedRow> = reconciliation.matched().collect();
        if matched.is_empty() {
            return None;
        }

        let matched_orders = matched.len();
        let order_rows = reconciliation.order_count;
        let match_rate_pct = if order_rows == 0 {
            0.0
        } else {
            matched_orders as f64 / order_rows as f64 * 100.0
        };

        let costs: Vec<f64> = matched.iter().filter_map(|r| r.shipping_cost_usd).collect();

        Some(DashboardSummary {
            matched_orders,
            order_rows,
            match_rate_pct,
            avg_shipping_usd: mean(costs.iter().copied()),
            avg_shipping_pct: mean(matched.iter().filter_map(|r| r.shipping_pct)),
            total_shipping_usd: costs.iter().sum(),
        })
    }

    /// 按订单国家分组统计匹配行（无国家的行不计入）
    pub fn country_breakdown(&self, rows: &[MergedRow]) -> CountryBreakdown {
        let mut groups: BTreeMap<&str, Vec<&MergedRow>> = BTreeMap::new();
        for row in rows.iter().filter(|r| r.is_matched()) {
            if let Some(country) = row.country.as_deref() {
                groups.entry(country).or_default().push(row);
            }
        }

        let stats = groups
            .into_iter()
            .map(|(country, group)| {
                let costs: Vec<f64> = group.iter().filter_map(|r| r.shipping_cost_usd).collect();
                let total: f64 = costs.iter().sum();
                CountryStats {
                    country: country.to_string(),
                    avg_cost_usd: round2(mean(costs.iter().copied()).unwrap_or(0.0)),
                    order_count: group.len(),
                    total_cost_usd: round2(total),
                    avg_pct: mean(group.iter().filter_map(|r| r.shipping_pct)).map(round2),
                }
            })
            .collect();

        CountryBreakdown { stats }
    }

    /// 运费最高的前 N 条匹配行，可按国家过滤；同值保持输入顺序
    pub fn top_outliers<'a>(
        &self,
        rows: &'a [MergedRow],
        limit: usize,
        country: Option<&str>,
    ) -> Vec<&'a MergedRow> {
        let mut candidates: Vec<&MergedRow> = rows
            .iter()
            .filter(|r| r.is_matched())
            .filter(|r| match country {
                Some(c) => r.country.as_deref() == Some(c),
                None => true,
            })
            .filter(|r| r.shipping_cost_usd.is_some())
            .collect();

        candidates.sort_by(|a, b| {
            b.shipping_cost_usd
                .partial_cmp(&a.shipping_cost_usd)
                .unwrap_or(Ordering::Equal)
        });
        candidates.truncate(limit);
        candidates
    }

    /// 匹配行中出现的国家（排序去重，用作筛选项）
    pub fn matched_countries(&self, rows: &[MergedRow]) -> Vec<String> {
        let mut countries: Vec<String> = rows
            .iter()
            .filter(|r| r.is_matched())
            .filter_map(|r| r.country.clone())
            .collect();
        countries.sort();
        countries.dedup();
        countries
    }
}
