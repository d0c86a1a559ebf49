// ==========================================
// 运费对账分析工具 - 配置层
// ==========================================
// 职责: 分析配置加载与读取
// 存储: JSON 配置文件 + 环境变量覆写
// ==========================================

pub mod analyzer_config;
pub mod config_manager;
pub mod config_reader;
pub mod error;

// 重导出核心配置类型
pub use analyzer_config::AnalyzerConfig;
pub use config_manager::{env_keys, ConfigManager, ConfigSource};
pub use config_reader::AnalyzerConfigReader;
pub use error::{ConfigError, ConfigResult};
