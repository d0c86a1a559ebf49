// ==========================================
// 运费对账分析工具 - 导入 Trait
// ==========================================
// 职责: 定义导入管道接口（不包含实现）
// 管道: 文件解析 → 表头校验 → 字段映射（含清洗）
// ==========================================

use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// RawTable - 解析后的原始表格
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>, // 表头（已 TRIM）
    pub rows: Vec<RawRow>,    // 行记录，已跳过空白行
}

// 单行原始记录
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub row_number: usize,              // 源文件中的数据行号（表头下一行为 1，空白行也计数）
    pub values: HashMap<String, String>, // HashMap<列名, 值>
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&String> {
        self.values.get(column)
    }
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// ColumnSpec - 列定义（规范列名 + 别名）
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl ColumnSpec {
    /// 候选列名（规范名在前）
    pub fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }

    /// 在表头中查找本列（先精确匹配，再忽略大小写）
    pub fn find_in<'a>(&self, headers: &'a [String]) -> Option<&'a str> {
        for candidate in self.candidates() {
            if let Some(h) = headers.iter().find(|h| h.as_str() == candidate) {
                return Some(h.as_str());
            }
        }
        for candidate in self.candidates() {
            if let Some(h) = headers.iter().find(|h| h.eq_ignore_ascii_case(candidate)) {
                return Some(h.as_str());
            }
        }
        None
    }

    /// 从行记录中读取本列原值
    pub fn lookup<'a>(&self, row: &'a HashMap<String, String>) -> Option<&'a str> {
        for candidate in self.candidates() {
            if let Some(v) = row.get(candidate) {
                return Some(v.as_str());
            }
        }
        self.candidates().find_map(|candidate| {
            row.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(candidate))
                .map(|(_, v)| v.as_str())
        })
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录
    /// - Err: 文件不存在、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: ShippingFieldMapper, OrderFieldMapper
pub trait FieldMapper: Send + Sync {
    type Record;

    /// 表格名称（用于日志与错误提示）
    fn table_name(&self) -> &'static str;

    /// 必需列；缺任一列时整个文件导入失败
    fn required_columns(&self) -> &'static [ColumnSpec];

    /// 将原始行记录映射为领域记录
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 源文件中的数据行号（从 1 开始，含被跳过的空白行）
    ///
    /// # 返回
    /// - Err: 行级错误（必填为空、类型转换失败），调用方跳过该行
    fn map_row(&self, row: &HashMap<String, String>, row_number: usize)
        -> ImportResult<Self::Record>;
}
