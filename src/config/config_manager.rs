// ==========================================
// 运费对账分析工具 - 配置管理器
// ==========================================
// 职责: 配置加载（文件 → 环境变量覆写 → 校验）
// 查找顺序: 显式路径 > $SHIPPING_ANALYZER_CONFIG > 用户配置目录 > 内置默认值
// ==========================================

use crate::config::analyzer_config::AnalyzerConfig;
use crate::config::config_reader::AnalyzerConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 环境变量键
pub mod env_keys {
    pub const CONFIG_PATH: &str = "SHIPPING_ANALYZER_CONFIG";
    pub const RMB_TO_USD: &str = "SHIPPING_ANALYZER_RMB_TO_USD";
    pub const CARRIER_MARKER: &str = "SHIPPING_ANALYZER_CARRIER_MARKER";
}

const APP_CONFIG_DIR: &str = "shipping-cost-analyzer";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigSource - 配置来源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AnalyzerConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 从已有配置创建（测试/库调用）
    pub fn from_config(config: AnalyzerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            source: ConfigSource::Defaults,
        })
    }

    /// 按查找顺序加载配置，并应用进程环境变量覆写
    ///
    /// # 参数
    /// - explicit_path: 命令行指定的配置文件（必须存在）
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_env(explicit_path, |key| std::env::var(key).ok())
    }

    /// 同 `load`，环境变量由调用方提供
    pub fn load_with_env<F>(explicit_path: Option<&Path>, env: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut config, source) = match explicit_path {
            Some(path) => (read_config_file(path)?, ConfigSource::File(path.to_path_buf())),
            None => match discover_config_path(&env) {
                Some(path) => (read_config_file(&path)?, ConfigSource::File(path)),
                None => (AnalyzerConfig::default(), ConfigSource::Defaults),
            },
        };

        apply_env_overrides(&mut config, &env)?;
        config.validate()?;

        info!(
            source = ?source,
            rate = config.exchange_rate_rmb_to_usd,
            carrier = %config.carrier_marker,
            "配置加载完成"
        );

        Ok(Self { config, source })
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 命令行覆写汇率
    pub fn override_exchange_rate(&mut self, rate: f64) -> ConfigResult<()> {
        let mut next = self.config.clone();
        next.exchange_rate_rmb_to_usd = rate;
        next.validate()?;
        self.config = next;
        Ok(())
    }

    /// 命令行覆写报表语言
    pub fn override_locale(&mut self, locale: &str) -> ConfigResult<()> {
        let mut next = self.config.clone();
        next.locale = locale.to_string();
        next.validate()?;
        self.config = next;
        Ok(())
    }
}

impl AnalyzerConfigReader for ConfigManager {
    fn exchange_rate_rmb_to_usd(&self) -> f64 {
        self.config.exchange_rate_rmb_to_usd
    }

    fn carrier_marker(&self) -> &str {
        &self.config.carrier_marker
    }

    fn outlier_limit(&self) -> usize {
        self.config.outlier_limit
    }

    fn locale(&self) -> &str {
        &self.config.locale
    }

    fn country_overrides(&self) -> &HashMap<String, String> {
        &self.config.country_overrides
    }
}

fn read_config_file(path: &Path) -> ConfigResult<AnalyzerConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), "读取配置文件");
    AnalyzerConfig::from_json(&text)
}

fn discover_config_path<F>(env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    // 环境变量显式指定时，即使文件不存在也使用（便于报错提示）
    if let Some(path) = env(env_keys::CONFIG_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    ConfigManager::default_config_path().filter(|p| p.exists())
}

fn apply_env_overrides<F>(config: &mut AnalyzerConfig, env: &F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = env(env_keys::RMB_TO_USD) {
        let rate = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidValue {
                key: env_keys::RMB_TO_USD.to_string(),
                value: raw.clone(),
                message: "无法解析为浮点数".to_string(),
            })?;
        config.exchange_rate_rmb_to_usd = rate;
    }

    if let Some(marker) = env(env_keys::CARRIER_MARKER) {
        config.carrier_marker = marker.trim().to_string();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"carrier_marker": "YT", "outlier_limit": 5}}"#).unwrap();

        let manager = ConfigManager::load_with_env(Some(file.path()), no_env).unwrap();

        assert_eq!(manager.carrier_marker(), "YT");
        assert_eq!(manager.outlier_limit(), 5);
        assert_eq!(manager.exchange_rate_rmb_to_usd(), 0.139);
        assert_eq!(manager.source(), &ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = ConfigManager::load_with_env(Some(Path::new("/no/such/config.json")), no_env);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_env_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let env = |key: &str| match key {
            env_keys::RMB_TO_USD => Some("0.14".to_string()),
            env_keys::CARRIER_MARKER => Some(" yt ".to_string()),
            _ => None,
        };
        let manager = ConfigManager::load_with_env(Some(file.path()), env).unwrap();

        assert_eq!(manager.exchange_rate_rmb_to_usd(), 0.14);
        assert_eq!(manager.carrier_marker(), "yt");
    }

    #[test]
    fn test_env_override_invalid_rate() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let env = |key: &str| (key == env_keys::RMB_TO_USD).then(|| "cheap".to_string());
        let result = ConfigManager::load_with_env(Some(file.path()), env);

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_env_config_path_missing_is_error() {
        let env = |key: &str| {
            (key == env_keys::CONFIG_PATH).then(|| "/no/such/file.json".to_string())
        };
        let result = ConfigManager::load_with_env(None, env);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_override_exchange_rate_validates() {
        let mut manager = ConfigManager::from_config(AnalyzerConfig::default()).unwrap();
        assert!(manager.override_exchange_rate(-1.0).is_err());
        assert_eq!(manager.exchange_rate_rmb_to_usd(), 0.139);

        manager.override_exchange_rate(0.15).unwrap();
        assert_eq!(manager.exchange_rate_rmb_to_usd(), 0.15);
    }
}
