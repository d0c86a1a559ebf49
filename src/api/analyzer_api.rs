// ==========================================
// 运费对账分析工具 - 分析 API
// ==========================================
// 职责: 加载 → 对账 → 指标，并提供视图筛选
// 架构: API 层 → importer（加载） / engine（对账、指标）
// ==========================================

use crate::api::dto::AnalysisReport;
use crate::api::error::{ApiError, ApiResult};
use crate::config::AnalyzerConfigReader;
use crate::domain::{
    IssueFilter, IssueKind, Issues, LoadedTable, MergedRow, OrderRecord, RecordFilter,
    ShippingRecord,
};
use crate::engine::{MetricsEngine, Reconciler};
use crate::importer::DataLoader;
use chrono::Utc;
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

/// 国家筛选: 空串或 "all" 视为不筛选
fn normalize_country(country: Option<&str>) -> Option<&str> {
    country
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
}

fn same_country(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// ==========================================
// AnalyzerApi - 分析 API
// ==========================================
pub struct AnalyzerApi<C: AnalyzerConfigReader> {
    config: C,
    loader: DataLoader,
    reconciler: Reconciler,
    metrics: MetricsEngine,
}

impl<C: AnalyzerConfigReader> AnalyzerApi<C> {
    pub fn new(config: C) -> Self {
        Self::with_loader(config, DataLoader::default())
    }

    /// 使用自定义加载器（测试注入解析器）
    pub fn with_loader(config: C, loader: DataLoader) -> Self {
        let reconciler = Reconciler::from_config(&config);
        Self {
            config,
            loader,
            reconciler,
            metrics: MetricsEngine::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 完整分析
    ///
    /// # 返回
    /// - Ok(AnalysisReport): 分析结果（可能没有匹配行）
    /// - Err(ApiError): 文件级错误（文件不存在、格式不支持、缺少必需列）
    #[instrument(skip(self, shipping_path, orders_path), fields(
        shipping = %shipping_path.display(),
        orders = %orders_path.display()
    ))]
    pub fn analyze(&self, shipping_path: &Path, orders_path: &Path) -> ApiResult<AnalysisReport> {
        let shipping = self.loader.load_shipping(shipping_path)?;
        let orders = self.loader.load_orders(orders_path)?;
        Ok(self.analyze_records(shipping, orders))
    }

    /// 对已加载的数据执行对账与指标计算
    pub fn analyze_records(
        &self,
        shipping: LoadedTable<ShippingRecord>,
        orders: LoadedTable<OrderRecord>,
    ) -> AnalysisReport {
        let reconciliation = self.reconciler.reconcile(&shipping.records, &orders.records);
        let summary = self.metrics.summarize(&reconciliation);
        let country_stats = self.metrics.country_breakdown(&reconciliation.rows);

        let report = AnalysisReport {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            exchange_rate_rmb_to_usd: self.config.exchange_rate_rmb_to_usd(),
            shipping_load: shipping.summary(),
            orders_load: orders.summary(),
            reconciliation,
            summary,
            country_stats,
        };

        info!(
            report_id = %report.report_id,
            matched = report.reconciliation.matched_count(),
            countries = report.country_stats.stats.len(),
            "分析完成"
        );

        report
    }

    /// 明细筛选（状态 + 国家）
    ///
    /// 国家取订单国家，仅物流侧的行取物流表国家；比较忽略大小写
    pub fn filter_rows<'a>(
        &self,
        report: &'a AnalysisReport,
        filter: RecordFilter,
        country: Option<&str>,
    ) -> Vec<&'a MergedRow> {
        let country = normalize_country(country);
        report
            .reconciliation
            .rows
            .iter()
            .filter(|r| filter.accepts(r.status))
            .filter(|r| match country {
                Some(wanted) => r
                    .country
                    .as_deref()
                    .or(r.shipping_country.as_deref())
                    .map(|c| same_country(c, wanted))
                    .unwrap_or(false),
                None => true,
            })
            .collect()
    }

    /// 问题筛选；未选中的类别置空
    pub fn filter_issues(&self, report: &AnalysisReport, filter: IssueFilter) -> Issues {
        let issues = &report.reconciliation.issues;
        let keep = |kind: IssueKind| filter.includes(kind);

        Issues {
            unmatched_shipments: if keep(IssueKind::UnmatchedShipment) {
                issues.unmatched_shipments.clone()
            } else {
                Vec::new()
            },
            unmatched_orders: if keep(IssueKind::UnmatchedOrder) {
                issues.unmatched_orders.clone()
            } else {
                Vec::new()
            },
            multi_tracking: if keep(IssueKind::MultiTracking) {
                issues.multi_tracking.clone()
            } else {
                Vec::new()
            },
            duplicate_tracking: if keep(IssueKind::DuplicateTracking) {
                issues.duplicate_tracking.clone()
            } else {
                Vec::new()
            },
            country_mismatch: if keep(IssueKind::CountryMismatch) {
                issues.country_mismatch.clone()
            } else {
                Vec::new()
            },
        }
    }

    /// 运费最高的匹配行（条数取配置 outlier_limit）
    pub fn outliers<'a>(
        &self,
        report: &'a AnalysisReport,
        country: Option<&str>,
    ) -> Vec<&'a MergedRow> {
        let rows = &report.reconciliation.rows;
        let country = normalize_country(country).map(|wanted| {
            self.metrics
                .matched_countries(rows)
                .into_iter()
                .find(|c| same_country(c, wanted))
                .unwrap_or_else(|| wanted.to_string())
        });

        self.metrics
            .top_outliers(rows, self.config.outlier_limit(), country.as_deref())
    }

    /// 校验国家筛选值，返回报告中的原始写法
    ///
    /// # 返回
    /// - Ok(None): 未指定、空串或 "all"
    /// - Err(ApiError::InvalidInput): 报告中没有该国家的行
    pub fn resolve_country(
        &self,
        report: &AnalysisReport,
        country: Option<&str>,
    ) -> ApiResult<Option<String>> {
        let Some(wanted) = normalize_country(country) else {
            return Ok(None);
        };

        report
            .reconciliation
            .rows
            .iter()
            .flat_map(|r| [r.country.as_deref(), r.shipping_country.as_deref()])
            .flatten()
            .find(|c| same_country(c, wanted))
            .map(|c| Some(c.trim().to_string()))
            .ok_or_else(|| ApiError::InvalidInput(format!("未知国家: {}", wanted)))
    }

    /// 匹配行中的国家列表（筛选项）
    pub fn countries(&self, report: &AnalysisReport) -> Vec<String> {
        self.metrics.matched_countries(&report.reconciliation.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::domain::MergeStatus;

    fn shipment(tracking: &str, cost_rmb: f64, row: usize) -> ShippingRecord {
        ShippingRecord {
            tracking_number: tracking.to_string(),
            cost_rmb,
            ship_date: None,
            country_raw: None,
            weight_kg: None,
            internal_order_id: None,
            row_number: row,
        }
    }

    fn order(number: &str, tracking: &str, country: &str, row: usize) -> OrderRecord {
        OrderRecord {
            order_number: number.to_string(),
            order_date: None,
            tracking_number: Some(tracking.to_string()),
            net_payout: Some(100.0),
            country: Some(country.to_string()),
            product_cost: Some(10.0),
            row_number: row,
        }
    }

    fn table<T>(records: Vec<T>) -> LoadedTable<T> {
        LoadedTable {
            source: "memory".to_string(),
            total_rows: records.len(),
            records,
            rejected: Vec::new(),
        }
    }

    fn sample_report(api: &AnalyzerApi<AnalyzerConfig>) -> AnalysisReport {
        let shipments = vec![
            shipment("4PX001", 100.0, 1),
            shipment("4PX002", 300.0, 2),
            shipment("4PX003", 200.0, 3),
            shipment("4PX999", 50.0, 4),
        ];
        let orders = vec![
            order("#1", "4PX001", "Canada", 1),
            order("#2", "4PX002", "United States", 2),
            order("#3", "4PX003", "Canada", 3),
            order("#4", "4PX404", "Canada", 4),
        ];
        api.analyze_records(table(shipments), table(orders))
    }

    #[test]
    fn test_analyze_records_builds_report() {
        let api = AnalyzerApi::new(AnalyzerConfig::default());
        let report = sample_report(&api);

        assert!(Uuid::parse_str(&report.report_id).is_ok());
        assert!(report.has_matches());
        assert_eq!(report.reconciliation.matched_count(), 3);
        assert_eq!(report.country_stats.stats.len(), 2);
        assert_eq!(report.orders_load.accepted, 4);

        let summary = report.summary.as_ref().unwrap();
        assert_eq!(summary.matched_orders, 3);
        assert_eq!(summary.order_rows, 4);
        assert!((summary.match_rate_pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_filter_rows() {
        let api = AnalyzerApi::new(AnalyzerConfig::default());
        let report = sample_report(&api);

        assert_eq!(api.filter_rows(&report, RecordFilter::Matched, None).len(), 3);
        assert_eq!(api.filter_rows(&report, RecordFilter::All, None).len(), 5);

        let unmatched = api.filter_rows(&report, RecordFilter::Unmatched, None);
        assert_eq!(unmatched.len(), 2);
        assert_eq!(unmatched[0].status, MergeStatus::LeftOnly);
        assert_eq!(unmatched[1].status, MergeStatus::RightOnly);

        let canada = api.filter_rows(&report, RecordFilter::Matched, Some("canada"));
        assert_eq!(canada.len(), 2);
        assert_eq!(api.filter_rows(&report, RecordFilter::Matched, Some("All")).len(), 3);
    }

    #[test]
    fn test_filter_issues() {
        let api = AnalyzerApi::new(AnalyzerConfig::default());
        let report = sample_report(&api);

        let all = api.filter_issues(&report, IssueFilter::All);
        assert_eq!(all.unmatched_orders.len(), 1);
        assert_eq!(all.unmatched_shipments.len(), 1);

        let only = api.filter_issues(&report, IssueFilter::Only(IssueKind::UnmatchedOrder));
        assert_eq!(only.unmatched_orders.len(), 1);
        assert!(only.unmatched_shipments.is_empty());
        assert_eq!(only.total(), 1);
    }

    #[test]
    fn test_outliers_respect_limit_and_country() {
        let config = AnalyzerConfig {
            outlier_limit: 2,
            ..AnalyzerConfig::default()
        };
        let api = AnalyzerApi::new(config);
        let report = sample_report(&api);

        let top = api.outliers(&report, None);
        let orders: Vec<_> = top.iter().map(|r| r.order_number.as_deref()).collect();
        assert_eq!(orders, vec![Some("#2"), Some("#3")]);

        let canada = api.outliers(&report, Some("CANADA"));
        let orders: Vec<_> = canada.iter().map(|r| r.order_number.as_deref()).collect();
        assert_eq!(orders, vec![Some("#3"), Some("#1")]);

        assert_eq!(api.countries(&report), vec!["Canada", "United States"]);
    }

    #[test]
    fn test_resolve_country() {
        let api = AnalyzerApi::new(AnalyzerConfig::default());
        let report = sample_report(&api);

        assert_eq!(api.resolve_country(&report, None).unwrap(), None);
        assert_eq!(api.resolve_country(&report, Some(" all ")).unwrap(), None);
        assert_eq!(
            api.resolve_country(&report, Some("united states")).unwrap(),
            Some("United States".to_string())
        );

        let err = api.resolve_country(&report, Some("Atlantis")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.contains("Atlantis")));
    }
}
