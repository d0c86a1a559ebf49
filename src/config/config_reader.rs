// ==========================================
// 运费对账分析工具 - 配置读取 Trait
// ==========================================
// 职责: 定义引擎/API 所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::analyzer_config::AnalyzerConfig;
use std::collections::HashMap;

// ==========================================
// AnalyzerConfigReader Trait
// ==========================================
// 实现者: AnalyzerConfig, ConfigManager
pub trait AnalyzerConfigReader: Send + Sync {
    /// 人民币 → 美元汇率
    ///
    /// # 默认值
    /// - 0.139
    fn exchange_rate_rmb_to_usd(&self) -> f64;

    /// 承运商运单号标识（大小写不敏感的包含匹配）
    ///
    /// # 默认值
    /// - "4PX"
    fn carrier_marker(&self) -> &str;

    /// 离群值列表条数
    fn outlier_limit(&self) -> usize;

    /// 报表语言
    fn locale(&self) -> &str;

    /// 国家名覆写表
    fn country_overrides(&self) -> &HashMap<String, String>;
}

impl AnalyzerConfigReader for AnalyzerConfig {
    fn exchange_rate_rmb_to_usd(&self) -> f64 {
        self.exchange_rate_rmb_to_usd
    }

    fn carrier_marker(&self) -> &str {
        &self.carrier_marker
    }

    fn outlier_limit(&self) -> usize {
        self.outlier_limit
    }

    fn locale(&self) -> &str {
        &self.locale
    }

    fn country_overrides(&self) -> &HashMap<String, String> {
        &self.country_overrides
    }
}
