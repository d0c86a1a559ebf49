// ==========================================
// 运费对账分析工具 - 终端视图
// ==========================================
// 视图: 导入概况 / 驾驶舱 / 问题清单 / 明细表
// 文案: 通过 i18n 取当前语言
// ==========================================

use crate::domain::{IssueFilter, IssueKind, Issues, LoadSummary, MergedRow};
use crate::engine::{CountryBreakdown, DashboardSummary};
use crate::i18n::{t, t_with_args};
use crate::report::chart::BarChart;
use crate::report::format::{
    format_date, format_money, format_money_opt, format_pct, format_text, format_weight,
};
use crate::report::table::TableRenderer;

fn heading(title: &str) -> String {
    format!("== {} ==\n", title)
}

fn count_arg(key: &str, count: usize) -> String {
    t_with_args(key, &[("count", count.to_string().as_str())])
}

fn format_rmb(value: Option<f64>) -> String {
    value
        .map(|v| format!("¥{:.2}", v))
        .unwrap_or_else(|| format_text(None))
}

// ==========================================
// 导入概况
// ==========================================
pub fn render_load_summary(summaries: &[&LoadSummary]) -> String {
    let mut out = heading(&t("load.title"));
    for summary in summaries {
        out.push_str(&t_with_args(
            "load.line",
            &[
                ("source", summary.source.as_str()),
                ("total", summary.total_rows.to_string().as_str()),
                ("accepted", summary.accepted.to_string().as_str()),
                ("rejected", summary.rejected.len().to_string().as_str()),
            ],
        ));
        out.push('\n');
        for rejected in &summary.rejected {
            out.push_str(&t_with_args(
                "load.rejected_row",
                &[
                    ("row", rejected.row_number.to_string().as_str()),
                    ("reason", rejected.reason.as_str()),
                ],
            ));
            out.push('\n');
        }
    }
    out
}

// ==========================================
// 驾驶舱
// ==========================================
pub fn render_dashboard(
    summary: Option<&DashboardSummary>,
    breakdown: &CountryBreakdown,
    outliers: &[&MergedRow],
) -> String {
    let mut out = heading(&t("dashboard.title"));

    let summary = match summary {
        Some(s) => s,
        None => {
            out.push_str(&t("dashboard.no_matched"));
            out.push('\n');
            return out;
        }
    };

    let metrics = [
        (
            t("dashboard.matched_orders"),
            format!("{} / {}", summary.matched_orders, summary.order_rows),
        ),
        (
            t("dashboard.match_rate"),
            format_pct(Some(summary.match_rate_pct)),
        ),
        (
            t("dashboard.avg_shipping"),
            format_money_opt(summary.avg_shipping_usd),
        ),
        (t("dashboard.avg_pct"), format_pct(summary.avg_shipping_pct)),
        (
            t("dashboard.total_shipping"),
            format_money(summary.total_shipping_usd),
        ),
    ];
    let label_width = metrics
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in &metrics {
        out.push_str(&format!("{:<w$}  {}\n", label, value, w = label_width));
    }

    if !breakdown.is_empty() {
        let by_cost = breakdown.by_avg_cost();

        let mut cost_chart = BarChart::new(t("dashboard.chart_avg_cost"), format_money);
        for stats in &by_cost {
            cost_chart.push(stats.country.clone(), stats.avg_cost_usd);
        }
        out.push('\n');
        out.push_str(&cost_chart.render());

        let mut pct_chart =
            BarChart::new(t("dashboard.chart_avg_pct"), |v| format_pct(Some(v)));
        for stats in &by_cost {
            if let Some(pct) = stats.avg_pct {
                pct_chart.push(stats.country.clone(), pct);
            }
        }
        if !pct_chart.is_empty() {
            out.push('\n');
            out.push_str(&pct_chart.render());
        }

        let mut table = TableRenderer::new([
            t("col.country"),
            t("col.orders"),
            t("col.avg_cost"),
            t("col.total_cost"),
            t("col.avg_pct"),
        ])
        .align_right(&[1, 2, 3, 4]);
        for stats in breakdown.by_order_count() {
            table.push_row(vec![
                stats.country.clone(),
                stats.order_count.to_string(),
                format_money(stats.avg_cost_usd),
                format_money(stats.total_cost_usd),
                format_pct(stats.avg_pct),
            ]);
        }
        out.push('\n');
        out.push_str(&heading(&t("dashboard.country_table")));
        out.push_str(&table.render());
    }

    if !outliers.is_empty() {
        let mut table = TableRenderer::new([
            t("col.order"),
            t("col.tracking"),
            t("col.country"),
            t("col.shipping_usd"),
            t("col.net_payout"),
            t("col.shipping_pct"),
            t("col.weight"),
        ])
        .align_right(&[3, 4, 5, 6]);
        for row in outliers {
            table.push_row(vec![
                format_text(row.order_number.as_deref()),
                format_text(row.tracking_number.as_deref()),
                format_text(row.country.as_deref()),
                format_money_opt(row.shipping_cost_usd),
                format_money_opt(row.net_payout),
                format_pct(row.shipping_pct),
                format_weight(row.weight_kg),
            ]);
        }
        out.push('\n');
        out.push_str(&heading(&t_with_args(
            "dashboard.outliers",
            &[("limit", outliers.len().to_string().as_str())],
        )));
        out.push_str(&table.render());
    }

    out
}

// ==========================================
// 问题清单
// ==========================================
fn issue_title_key(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::UnmatchedShipment => "issues.unmatched_shipments",
        IssueKind::UnmatchedOrder => "issues.unmatched_orders",
        IssueKind::MultiTracking => "issues.multi_tracking",
        IssueKind::DuplicateTracking => "issues.duplicate_tracking",
        IssueKind::CountryMismatch => "issues.country_mismatch",
    }
}

fn issue_table(issues: &Issues, kind: IssueKind) -> TableRenderer {
    match kind {
        IssueKind::UnmatchedShipment => {
            let mut table = TableRenderer::new([
                t("col.tracking"),
                t("col.shipping_usd"),
                t("col.ship_date"),
                t("col.country"),
            ])
            .align_right(&[1]);
            for issue in &issues.unmatched_shipments {
                table.push_row(vec![
                    issue.tracking.clone(),
                    format_money(issue.shipping_cost_usd),
                    format_date(issue.ship_date),
                    format_text(issue.country.as_deref()),
                ]);
            }
            table
        }
        IssueKind::UnmatchedOrder => {
            let mut table = TableRenderer::new([
                t("col.order"),
                t("col.tracking"),
                t("col.net_payout"),
                t("col.country"),
            ])
            .align_right(&[2]);
            for issue in &issues.unmatched_orders {
                table.push_row(vec![
                    issue.order.clone(),
                    issue.tracking.clone(),
                    format_money_opt(issue.net_payout),
                    format_text(issue.country.as_deref()),
                ]);
            }
            table
        }
        IssueKind::MultiTracking => {
            let mut table = TableRenderer::new([
                t("col.order"),
                t("col.count"),
                t("col.trackings"),
                t("col.net_payout"),
            ])
            .align_right(&[1, 3]);
            for issue in &issues.multi_tracking {
                table.push_row(vec![
                    issue.order.clone(),
                    issue.count.to_string(),
                    issue.trackings.join(", "),
                    format_money_opt(issue.net_payout),
                ]);
            }
            table
        }
        IssueKind::DuplicateTracking => {
            let mut table = TableRenderer::new([
                t("col.tracking"),
                t("col.occurrences"),
                t("col.total_cost"),
            ])
            .align_right(&[1, 2]);
            for issue in &issues.duplicate_tracking {
                table.push_row(vec![
                    issue.tracking.clone(),
                    issue.occurrences.to_string(),
                    format_money(issue.total_cost_usd),
                ]);
            }
            table
        }
        IssueKind::CountryMismatch => {
            let mut table = TableRenderer::new([
                t("col.order"),
                t("col.tracking"),
                t("col.order_country"),
                t("col.shipping_country"),
            ]);
            for issue in &issues.country_mismatch {
                table.push_row(vec![
                    format_text(issue.order.as_deref()),
                    issue.tracking.clone(),
                    issue.order_country.clone(),
                    issue.shipping_country.clone(),
                ]);
            }
            table
        }
    }
}

pub fn render_issues(issues: &Issues, filter: IssueFilter) -> String {
    let mut out = heading(&count_arg("issues.title", issues.total()));

    if filter == IssueFilter::All && issues.is_empty() {
        out.push_str(&t("issues.all_clear"));
        out.push('\n');
        return out;
    }

    for kind in IssueKind::ALL.iter().copied().filter(|k| filter.includes(*k)) {
        out.push('\n');
        out.push_str(&count_arg(issue_title_key(kind), issues.count(kind)));
        out.push('\n');

        let table = issue_table(issues, kind);
        if table.is_empty() {
            out.push_str(&t("issues.none"));
            out.push('\n');
        } else {
            out.push_str(&table.render());
        }
    }

    out
}

// ==========================================
// 明细表
// ==========================================
pub fn render_data_table(rows: &[&MergedRow]) -> String {
    let mut out = heading(&count_arg("data.title", rows.len()));
    if rows.is_empty() {
        out.push_str(&t("data.empty"));
        out.push('\n');
        return out;
    }

    let mut table = TableRenderer::new([
        t("col.status"),
        t("col.order"),
        t("col.tracking"),
        t("col.order_date"),
        t("col.country"),
        t("col.net_payout"),
        t("col.product_cost"),
        t("col.shipping_usd"),
        t("col.shipping_rmb"),
        t("col.shipping_pct"),
        t("col.profit"),
        t("col.weight"),
    ])
    .align_right(&[5, 6, 7, 8, 9, 10, 11]);

    for row in rows {
        table.push_row(vec![
            row.status.to_string(),
            format_text(row.order_number.as_deref()),
            format_text(row.tracking_number.as_deref()),
            format_date(row.order_date),
            format_text(row.country.as_deref().or(row.shipping_country.as_deref())),
            format_money_opt(row.net_payout),
            format_money_opt(row.product_cost),
            format_money_opt(row.shipping_cost_usd),
            format_rmb(row.shipping_cost_rmb),
            format_pct(row.shipping_pct),
            format_money_opt(row.profit),
            format_weight(row.weight_kg),
        ]);
    }
    out.push_str(&table.render());
    out
}
