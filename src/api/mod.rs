// ==========================================
// 运费对账分析工具 - API 层
// ==========================================
// 职责: 对外业务接口，供命令行与集成测试调用
// ==========================================

pub mod analyzer_api;
pub mod dto;
pub mod error;

// 重导出核心类型
pub use analyzer_api::AnalyzerApi;
pub use dto::AnalysisReport;
pub use error::{ApiError, ApiResult};
