// ==========================================
// 运费对账分析工具 - 核心库
// ==========================================
// 数据源: 物流费用表（人民币） + 店铺订单导出（美元）
// 对账键: 运单号
// 产出: 驾驶舱指标、问题清单、明细表、CSV / JSON 导出
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与结果类型
pub mod domain;

// 导入层 - 外部文件
pub mod importer;

// 引擎层 - 对账与指标
pub mod engine;

// 配置层 - 分析配置
pub mod config;

// 报表层 - 终端视图与导出
pub mod report;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    IssueFilter, IssueKind, Issues, MergeStatus, MergedRow, OrderRecord, Reconciliation,
    RecordFilter, ShippingRecord,
};

// 引擎
pub use engine::{CountryTranslator, MetricsEngine, Reconciler};

// 配置
pub use config::{AnalyzerConfig, AnalyzerConfigReader, ConfigManager};

// API
pub use api::{AnalysisReport, AnalyzerApi, ApiError, ApiResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "运费对账分析工具";
