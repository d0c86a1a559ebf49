// ==========================================
// 运费对账分析工具 - 分析配置
// ==========================================
// 职责: 汇率、承运商标识、离群值条数、语言、国家名覆写
// 存储: JSON 配置文件（可选）
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 默认汇率: 1 RMB = 0.139 USD
pub const DEFAULT_RMB_TO_USD: f64 = 0.139;

/// 默认承运商标识（未匹配订单只统计此承运商）
pub const DEFAULT_CARRIER_MARKER: &str = "4PX";

/// 默认离群值条数
pub const DEFAULT_OUTLIER_LIMIT: usize = 20;

/// 默认报表语言
pub const DEFAULT_LOCALE: &str = "en";

/// 支持的报表语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["en", "zh-CN"];

// ==========================================
// AnalyzerConfig - 分析配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub exchange_rate_rmb_to_usd: f64,
    pub carrier_marker: String,
    pub outlier_limit: usize,
    pub locale: String,
    /// 中文国家名 → 英文国家名（覆盖内置映射）
    pub country_overrides: HashMap<String, String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            exchange_rate_rmb_to_usd: DEFAULT_RMB_TO_USD,
            carrier_marker: DEFAULT_CARRIER_MARKER.to_string(),
            outlier_limit: DEFAULT_OUTLIER_LIMIT,
            locale: DEFAULT_LOCALE.to_string(),
            country_overrides: HashMap::new(),
        }
    }
}

impl AnalyzerConfig {
    /// 从 JSON 文本解析（缺省字段取默认值）
    pub fn from_json(text: &str) -> ConfigResult<Self> {
        let config: AnalyzerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.exchange_rate_rmb_to_usd.is_finite() || self.exchange_rate_rmb_to_usd <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "exchange_rate_rmb_to_usd".to_string(),
                value: self.exchange_rate_rmb_to_usd.to_string(),
                message: "汇率必须为正数".to_string(),
            });
        }

        if self.carrier_marker.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "carrier_marker".to_string(),
                value: self.carrier_marker.clone(),
                message: "承运商标识不能为空".to_string(),
            });
        }

        if self.outlier_limit == 0 {
            return Err(ConfigError::InvalidValue {
                key: "outlier_limit".to_string(),
                value: "0".to_string(),
                message: "离群值条数必须大于 0".to_string(),
            });
        }

        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                value: self.locale.clone(),
                message: format!("仅支持 {}", SUPPORTED_LOCALES.join("/")),
            });
        }

        Ok(())
    }
}
