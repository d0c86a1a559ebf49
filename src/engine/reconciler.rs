// ==========================================
// 运费对账分析工具 - 对账引擎
// ==========================================
// 职责: 按运单号外连接订单与物流记录，派生指标，归类问题
// 输入: 订单记录（左表）、物流记录（右表）
// 输出: Reconciliation（合并行 + 问题清单）
// ==========================================
// 行顺序: 订单按输入顺序（每单紧跟其匹配的物流记录），
//         之后是未匹配的物流记录（按输入顺序）
// ==========================================

use crate::config::AnalyzerConfigReader;
use crate::domain::{
    CountryMismatch, DuplicateTracking, Issues, MergeStatus, MergedRow, MultiTrackingOrder,
    OrderRecord, Reconciliation, ShippingRecord, UnmatchedOrder, UnmatchedShipment,
};
use crate::engine::country::CountryTranslator;
use crate::engine::metrics::{profit, shipping_pct};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// Reconciler - 对账引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct Reconciler {
    exchange_rate: f64,
    carrier_marker: String, // 已转大写
    translator: CountryTranslator,
}

impl Reconciler {
    pub fn new(exchange_rate: f64, carrier_marker: &str, translator: CountryTranslator) -> Self {
        Self {
            exchange_rate,
            carrier_marker: carrier_marker.trim().to_uppercase(),
            translator,
        }
    }

    pub fn from_config<C: AnalyzerConfigReader + ?Sized>(config: &C) -> Self {
        Self::new(
            config.exchange_rate_rmb_to_usd(),
            config.carrier_marker(),
            CountryTranslator::with_overrides(config.country_overrides()),
        )
    }

    /// 执行对账
    #[instrument(skip_all, fields(orders = orders.len(), shipments = shipments.len()))]
    pub fn reconcile(
        &self,
        shipments: &[ShippingRecord],
        orders: &[OrderRecord],
    ) -> Reconciliation {
        // === 步骤 1: 建立运单号索引 ===
        let index = index_by_tracking(shipments);
        debug!(distinct_trackings = index.len(), "运单号索引完成");

        // === 步骤 2: 外连接 ===
        let mut rows = Vec::with_capacity(orders.len() + shipments.len());
        let mut shipment_used = vec![false; shipments.len()];

        for order in orders {
            let matches = order
                .tracking_number
                .as_deref()
                .and_then(|t| index.get(t));

            match matches {
                Some(positions) => {
                    for &pos in positions {
                        shipment_used[pos] = true;
                        rows.push(self.merge_both(order, &shipments[pos]));
                    }
                }
                None => rows.push(self.left_only(order)),
            }
        }

        for (pos, shipment) in shipments.iter().enumerate() {
            if !shipment_used[pos] {
                rows.push(self.right_only(shipment));
            }
        }

        // === 步骤 3: 问题归类 ===
        let issues = Issues {
            unmatched_shipments: collect_unmatched_shipments(&rows),
            unmatched_orders: self.collect_unmatched_orders(&rows),
            multi_tracking: collect_multi_tracking(orders, &index),
            duplicate_tracking: self.collect_duplicate_tracking(shipments, &index),
            country_mismatch: collect_country_mismatches(&rows),
        };

        let reconciliation = Reconciliation {
            rows,
            issues,
            order_count: orders.len(),
            shipment_count: shipments.len(),
        };

        info!(
            matched = reconciliation.matched_count(),
            unmatched = reconciliation.unmatched().count(),
            issues = reconciliation.issues.total(),
            "对账完成"
        );

        reconciliation
    }

    /// 承运商标识匹配（运单号已标准化为大写）
    pub fn is_recognized_carrier(&self, tracking: &str) -> bool {
        tracking.to_uppercase().contains(&self.carrier_marker)
    }

    fn merge_both(&self, order: &OrderRecord, shipment: &ShippingRecord) -> MergedRow {
        let cost_usd = Some(shipment.cost_usd(self.exchange_rate));
        MergedRow {
            status: MergeStatus::Both,
            tracking_number: Some(shipment.tracking_number.clone()),
            order_number: Some(order.order_number.clone()),
            order_date: order.order_date,
            country: order.country.clone(),
            net_payout: order.net_payout,
            product_cost: order.product_cost,
            shipping_cost_rmb: Some(shipment.cost_rmb),
            shipping_cost_usd: cost_usd,
            weight_kg: shipment.weight_kg,
            ship_date: shipment.ship_date,
            shipping_country: self.shipping_country(shipment),
            shipping_pct: shipping_pct(cost_usd, order.net_payout),
            profit: profit(order.net_payout, order.product_cost, cost_usd),
            order_row: Some(order.row_number),
            shipment_row: Some(shipment.row_number),
        }
    }

    fn left_only(&self, order: &OrderRecord) -> MergedRow {
        MergedRow {
            status: MergeStatus::LeftOnly,
            tracking_number: order.tracking_number.clone(),
            order_number: Some(order.order_number.clone()),
            order_date: order.order_date,
            country: order.country.clone(),
            net_payout: order.net_payout,
            product_cost: order.product_cost,
            shipping_cost_rmb: None,
            shipping_cost_usd: None,
            weight_kg: None,
            ship_date: None,
            shipping_country: None,
            shipping_pct: None,
            profit: None,
            order_row: Some(order.row_number),
            shipment_row: None,
        }
    }

    fn right_only(&self, shipment: &ShippingRecord) -> MergedRow {
        MergedRow {
            status: MergeStatus::RightOnly,
            tracking_number: Some(shipment.tracking_number.clone()),
            order_number: None,
            order_date: None,
            country: None,
            net_payout: None,
            product_cost: None,
            shipping_cost_rmb: Some(shipment.cost_rmb),
            shipping_cost_usd: Some(shipment.cost_usd(self.exchange_rate)),
            weight_kg: shipment.weight_kg,
            ship_date: shipment.ship_date,
            shipping_country: self.shipping_country(shipment),
            shipping_pct: None,
            profit: None,
            order_row: None,
            shipment_row: Some(shipment.row_number),
        }
    }

    fn shipping_country(&self, shipment: &ShippingRecord) -> Option<String> {
        shipment
            .country_raw
            .as_deref()
            .map(|c| self.translator.translate(c))
    }

    fn collect_unmatched_orders(&self, rows: &[MergedRow]) -> Vec<UnmatchedOrder> {
        rows.iter()
            .filter(|r| r.status == MergeStatus::LeftOnly)
            .filter_map(|r| {
                let tracking = r.tracking_number.as_deref()?;
                if !self.is_recognized_carrier(tracking) {
                    return None;
                }
                Some(UnmatchedOrder {
                    order: r.order_number.clone().unwrap_or_default(),
                    tracking: tracking.to_string(),
                    net_payout: r.net_payout,
                    country: r.country.clone(),
                })
            })
            .collect()
    }

    fn collect_duplicate_tracking(
        &self,
        shipments: &[ShippingRecord],
        index: &HashMap<&str, Vec<usize>>,
    ) -> Vec<DuplicateTracking> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for shipment in shipments {
            let tracking = shipment.tracking_number.as_str();
            if !seen.insert(tracking) {
                continue;
            }
            let positions = match index.get(tracking) {
                Some(p) if p.len() > 1 => p,
                _ => continue,
            };
            duplicates.push(DuplicateTracking {
                tracking: tracking.to_string(),
                occurrences: positions.len(),
                total_cost_usd: positions
                    .iter()
                    .map(|&pos| shipments[pos].cost_usd(self.exchange_rate))
                    .sum(),
            });
        }

        duplicates
    }
}

/// 运单号 → 物流记录下标（保持输入顺序）
fn index_by_tracking(shipments: &[ShippingRecord]) -> HashMap<&str, Vec<usize>> {
    let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
    for (pos, shipment) in shipments.iter().enumerate() {
        index
            .entry(shipment.tracking_number.as_str())
            .or_default()
            .push(pos);
    }
    index
}

fn collect_unmatched_shipments(rows: &[MergedRow]) -> Vec<UnmatchedShipment> {
    rows.iter()
        .filter(|r| r.status == MergeStatus::RightOnly)
        .map(|r| UnmatchedShipment {
            tracking: r.tracking_number.clone().unwrap_or_default(),
            shipping_cost_usd: r.shipping_cost_usd.unwrap_or_default(),
            ship_date: r.ship_date,
            country: r.shipping_country.clone(),
        })
        .collect()
}

// 一单多运单: 订单导出中重复出现，或匹配到多条物流记录
fn collect_multi_tracking(
    orders: &[OrderRecord],
    index: &HashMap<&str, Vec<usize>>,
) -> Vec<MultiTrackingOrder> {
    struct Group {
        order_rows: usize,
        trackings: Vec<String>,
        shipments: HashSet<usize>,
        net_payout: Option<f64>,
    }

    let mut order_keys: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Group> = HashMap::new();

    for order in orders {
        let key = order.order_number.as_str();
        let group = groups.entry(key).or_insert_with(|| {
            order_keys.push(key);
            Group {
                order_rows: 0,
                trackings: Vec::new(),
                shipments: HashSet::new(),
                net_payout: order.net_payout,
            }
        });

        group.order_rows += 1;
        if let Some(tracking) = order.tracking_number.as_deref() {
            if !group.trackings.iter().any(|t| t == tracking) {
                group.trackings.push(tracking.to_string());
            }
            if let Some(positions) = index.get(tracking) {
                group.shipments.extend(positions.iter().copied());
            }
        }
    }

    order_keys
        .into_iter()
        .filter_map(|key| {
            let group = groups.remove(key)?;
            let count = group.order_rows.max(group.shipments.len());
            (count > 1).then(|| MultiTrackingOrder {
                order: key.to_string(),
                count,
                trackings: group.trackings,
                net_payout: group.net_payout,
            })
        })
        .collect()
}

fn collect_country_mismatches(rows: &[MergedRow]) -> Vec<CountryMismatch> {
    rows.iter()
        .filter(|r| r.is_matched())
        .filter_map(|r| {
            let order_country = r.country.as_deref()?.trim();
            let shipping_country = r.shipping_country.as_deref()?.trim();
            if order_country.to_lowercase() == shipping_country.to_lowercase() {
                return None;
            }
            Some(CountryMismatch {
                order: r.order_number.clone(),
                tracking: r.tracking_number.clone().unwrap_or_default(),
                order_country: order_country.to_string(),
                shipping_country: shipping_country.to_string(),
            })
        })
        .collect()
}
