// ==========================================
// 运费对账分析工具 - 数据加载器
// ==========================================
// 职责: 整合导入流程，从文件到领域记录
// 流程: 解析 → 表头校验 → 映射（逐行，失败行跳过并记录）
// ==========================================

use crate::domain::{LoadedTable, OrderRecord, RejectedRow, ShippingRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{OrderFieldMapper, ShippingFieldMapper};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper, FileParser};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

// ==========================================
// DataLoader - 数据加载器
// ==========================================
pub struct DataLoader {
    file_parser: Box<dyn FileParser>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(Box::new(UniversalFileParser))
    }
}

impl DataLoader {
    pub fn new(file_parser: Box<dyn FileParser>) -> Self {
        Self { file_parser }
    }

    /// 加载物流费用表（.xlsx/.xls/.csv）
    pub fn load_shipping<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ImportResult<LoadedTable<ShippingRecord>> {
        self.load(path.as_ref(), &ShippingFieldMapper)
    }

    /// 加载订单导出（.csv/.xlsx）
    pub fn load_orders<P: AsRef<Path>>(&self, path: P) -> ImportResult<LoadedTable<OrderRecord>> {
        self.load(path.as_ref(), &OrderFieldMapper)
    }

    /// 通用加载流程
    ///
    /// # 返回
    /// - Ok(LoadedTable): 成功记录 + 被跳过的行
    /// - Err: 文件级错误（文件不存在、格式不支持、缺少必需列）
    #[instrument(skip(self, path, mapper), fields(table = mapper.table_name()))]
    pub fn load<M: FieldMapper>(
        &self,
        path: &Path,
        mapper: &M,
    ) -> ImportResult<LoadedTable<M::Record>> {
        let source = path.display().to_string();
        info!(file_path = %source, "开始加载数据");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let raw = self.file_parser.parse_to_raw_table(path)?;
        let total_rows = raw.len();
        info!(total_rows = total_rows, "文件解析完成");

        // === 步骤 2: 表头校验 ===
        debug!("步骤 2: 表头校验");
        for column in mapper.required_columns() {
            if column.find_in(&raw.headers).is_none() {
                return Err(ImportError::MissingColumn {
                    file: source,
                    column: column.name.to_string(),
                });
            }
        }

        // === 步骤 3: 字段映射 ===
        debug!("步骤 3: 字段映射");
        let mut records = Vec::with_capacity(total_rows);
        let mut rejected = Vec::new();
        for row in &raw.rows {
            let row_number = row.row_number;
            match mapper.map_row(&row.values, row_number) {
                Ok(record) => records.push(record),
                Err(e) if e.is_row_level() => {
                    warn!(row_number = row_number, error = %e, "跳过数据行");
                    rejected.push(RejectedRow {
                        row_number,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            accepted = records.len(),
            rejected = rejected.len(),
            "数据加载完成"
        );

        Ok(LoadedTable {
            source,
            total_rows,
            records,
            rejected,
        })
    }
}
