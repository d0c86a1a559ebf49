// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use shipping_cost_analyzer::config::AnalyzerConfigReader;
use std::collections::HashMap;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub exchange_rate: f64,
    pub carrier_marker: String,
    pub outlier_limit: usize,
    pub locale: String,
    pub country_overrides: HashMap<String, String>,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            exchange_rate: 0.139,
            carrier_marker: "4PX".to_string(),
            outlier_limit: 20,
            locale: "en".to_string(),
            country_overrides: HashMap::new(),
        }
    }

    /// 自定义汇率
    pub fn with_rate(rate: f64) -> Self {
        let mut config = Self::default();
        config.exchange_rate = rate;
        config
    }

    /// 追加国家名覆写
    pub fn with_override(mut self, chinese: &str, english: &str) -> Self {
        self.country_overrides
            .insert(chinese.to_string(), english.to_string());
        self
    }
}

impl AnalyzerConfigReader for MockConfig {
    fn exchange_rate_rmb_to_usd(&self) -> f64 {
        self.exchange_rate
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
