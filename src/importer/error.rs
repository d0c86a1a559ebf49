// ==========================================
// 运费对账分析工具 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表头错误 =====
    #[error("缺少必需列 ({file}): {column}")]
    MissingColumn { file: String, column: String },

    // ===== 数据映射错误 =====
    #[error("必填字段为空 (行 {row}, 字段 {field})")]
    RequiredValueMissing { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 无法识别 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },
}

impl ImportError {
    /// 行级错误（跳过该行继续导入）；其余为文件级错误
    pub fn is_row_level(&self) -> bool {
        matches!(
            self,
            ImportError::RequiredValueMissing { .. }
                | ImportError::TypeConversionError { .. }
                | ImportError::DateFormatError { .. }
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_level_classification() {
        let row_err = ImportError::RequiredValueMissing {
            row: 3,
            field: "物流单号".to_string(),
        };
        assert!(row_err.is_row_level());
        assert!(!ImportError::FileNotFound("a.csv".to_string()).is_row_level());
    }

    #[test]
    fn test_error_message_contains_row() {
        let err = ImportError::TypeConversionError {
            row: 7,
            field: "总金额".to_string(),
            message: "无法解析为数值: abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("行 7"));
        assert!(msg.contains("总金额"));
    }
}
