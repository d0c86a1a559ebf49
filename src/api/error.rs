// ==========================================
// 运费对账分析工具 - API层错误类型
// ==========================================
// 职责: 汇总导入 / 配置 / 导出各层错误，向调用方提供统一错误
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use crate::report::ReportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导出失败: {0}")]
    Report(#[from] ReportError),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Report(ReportError::Json(err))
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::Report(ReportError::Csv(err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_conversion() {
        let err: ApiError = ImportError::FileNotFound("/tmp/missing.csv".to_string()).into();
        assert!(matches!(err, ApiError::Import(_)));
        assert!(err.to_string().contains("/tmp/missing.csv"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ApiError = ConfigError::InvalidValue {
            key: "outlier_limit".to_string(),
            value: "0".to_string(),
            message: "必须大于 0".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = ApiError::InvalidInput("未知国家: Atlantis".to_string());
        assert_eq!(err.to_string(), "无效输入: 未知国家: Atlantis");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ApiError = json_err.into();
        assert!(matches!(err, ApiError::Report(ReportError::Json(_))));
    }
}
