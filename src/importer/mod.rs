// ==========================================
// 运费对账分析工具 - 导入层
// ==========================================
// 职责: 外部文件 → 领域记录
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod loader;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{OrderFieldMapper, ShippingFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use loader::DataLoader;

// 重导出 Trait 接口
pub use importer_trait::{ColumnSpec, FieldMapper, FileParser, RawRow, RawTable};
