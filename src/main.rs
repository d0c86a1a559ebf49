// ==========================================
// 运费对账分析工具 - 命令行入口
// ==========================================
// 流程: 加载配置 → 分析 → 输出视图 → 导出
// 报表输出到 stdout，日志输出到 stderr
// ==========================================

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use shipping_cost_analyzer::api::{AnalysisReport, AnalyzerApi};
use shipping_cost_analyzer::config::{AnalyzerConfigReader, ConfigManager};
use shipping_cost_analyzer::domain::{IssueFilter, RecordFilter};
use shipping_cost_analyzer::i18n::{self, t_with_args};
use shipping_cost_analyzer::report::{self, views};
use shipping_cost_analyzer::{logging, APP_NAME, VERSION};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    Dashboard,
    Issues,
    Data,
    All,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Reconcile shipping costs against store orders",
    long_about = None
)]
struct Cli {
    /// Shipping-cost spreadsheet (.xlsx/.xls/.csv)
    #[arg(long)]
    shipping: PathBuf,

    /// Order export (.csv/.xlsx)
    #[arg(long)]
    orders: PathBuf,

    /// Configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Which report view to print
    #[arg(long, value_enum, default_value_t = View::Dashboard)]
    view: View,

    /// Issue category for the issues view: all, unmatched-shipments,
    /// unmatched-orders, multi-tracking, duplicate-tracking or country-mismatch
    #[arg(long, default_value = "all")]
    issue_type: IssueFilter,

    /// Record filter for the data view (matched, all, unmatched)
    #[arg(long, default_value = "matched")]
    show: RecordFilter,

    /// Restrict the data view and outliers to one country
    #[arg(long)]
    country: Option<String>,

    /// Export matched rows to CSV (a directory gets the default file name)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the full analysis report as JSON
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Override the RMB to USD exchange rate
    #[arg(long)]
    rate: Option<f64>,

    /// Report language (en, zh-CN)
    #[arg(long)]
    locale: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.json_logs {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", APP_NAME, VERSION);

    if let Err(e) = run(&cli) {
        tracing::error!("运行失败: {:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<ConfigManager> {
    let mut manager =
        ConfigManager::load(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(rate) = cli.rate {
        manager
            .override_exchange_rate(rate)
            .context("invalid --rate")?;
    }
    if let Some(locale) = cli.locale.as_deref() {
        manager
            .override_locale(locale)
            .context("invalid --locale")?;
    }

    Ok(manager)
}

fn run(cli: &Cli) -> Result<()> {
    let manager = load_config(cli)?;
    i18n::set_locale(manager.locale());

    let api = AnalyzerApi::new(manager);
    let report = api
        .analyze(&cli.shipping, &cli.orders)
        .context("analysis failed")?;
    let country = api
        .resolve_country(&report, cli.country.as_deref())
        .context("invalid --country")?;

    println!(
        "{}",
        views::render_load_summary(&[&report.shipping_load, &report.orders_load])
    );
    print_views(cli, &api, &report, country.as_deref());

    if let Some(target) = cli.export.as_deref() {
        let path = export_path(target);
        let written = report::export_matched_csv(&path, &report.reconciliation.rows)
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!(
            "{}",
            t_with_args(
                "export.csv_done",
                &[
                    ("count", written.to_string().as_str()),
                    ("path", path.display().to_string().as_str()),
                ],
            )
        );
    }

    if let Some(path) = cli.report_json.as_deref() {
        report::export_json_report(path, &report)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!(
            "{}",
            t_with_args(
                "export.json_done",
                &[("path", path.display().to_string().as_str())],
            )
        );
    }

    Ok(())
}

fn print_views<C: AnalyzerConfigReader>(
    cli: &Cli,
    api: &AnalyzerApi<C>,
    report: &AnalysisReport,
    country: Option<&str>,
) {
    if matches!(cli.view, View::Dashboard | View::All) {
        let outliers = api.outliers(report, country);
        println!(
            "{}",
            views::render_dashboard(report.summary.as_ref(), &report.country_stats, &outliers)
        );
    }

    if matches!(cli.view, View::Issues | View::All) {
        let issues = api.filter_issues(report, cli.issue_type);
        println!("{}", views::render_issues(&issues, cli.issue_type));
    }

    if matches!(cli.view, View::Data | View::All) {
        let rows = api.filter_rows(report, cli.show, country);
        println!("{}", views::render_data_table(&rows));
    }
}

/// 目标为目录时使用默认文件名
fn export_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(report::default_export_file_name(Local::now().date_naive()))
    } else {
        target.to_path_buf()
    }
}
