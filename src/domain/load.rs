// ==========================================
// 运费对账分析工具 - 导入结果模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RejectedRow - 被跳过的数据行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub row_number: usize, // 源文件数据行号（表头下一行为 1，空白行也计数）
    pub reason: String,    // 跳过原因
}

// ==========================================
// LoadedTable - 单个文件的导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadedTable<T> {
    pub source: String,             // 源文件路径
    pub total_rows: usize,          // 非空数据行总数
    pub records: Vec<T>,            // 成功映射的记录
    pub rejected: Vec<RejectedRow>, // 被跳过的行
}

impl<T> LoadedTable<T> {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            source: self.source.clone(),
            total_rows: self.total_rows,
            accepted: self.records.len(),
            rejected: self.rejected.clone(),
        }
    }
}

// ==========================================
// LoadSummary - 导入统计（不含记录本身）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    pub source: String,
    pub total_rows: usize,
    pub accepted: usize,
    pub rejected: Vec<RejectedRow>,
}
