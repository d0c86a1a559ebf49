// ==========================================
// 运费对账分析工具 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 领域字段映射 + 类型转换
// 物流费用表: 中文表头；订单导出: Shopify 英文表头
// ==========================================

use crate::domain::{OrderRecord, ShippingRecord};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{ColumnSpec, FieldMapper};
use chrono::NaiveDate;
use std::collections::HashMap;

// ==========================================
// 物流费用表列定义
// ==========================================
pub mod shipping_columns {
    use super::ColumnSpec;

    pub const TRACKING_NUMBER: ColumnSpec = ColumnSpec {
        name: "物流单号",
        aliases: &["运单号", "跟踪号"],
    };
    pub const SHIP_DATE: ColumnSpec = ColumnSpec {
        name: "收货时间",
        aliases: &["发货时间"],
    };
    pub const COST_RMB: ColumnSpec = ColumnSpec {
        name: "总金额",
        aliases: &["总费用"],
    };
    pub const COUNTRY: ColumnSpec = ColumnSpec {
        name: "国家/计费分区",
        aliases: &["国家"],
    };
    pub const WEIGHT_KG: ColumnSpec = ColumnSpec {
        name: "计费重",
        aliases: &["计费重量"],
    };
    pub const INTERNAL_ORDER_ID: ColumnSpec = ColumnSpec {
        name: "客户单号",
        aliases: &[],
    };

    pub const REQUIRED: &[ColumnSpec] = &[TRACKING_NUMBER, COST_RMB];
}

// ==========================================
// 订单导出列定义
// ==========================================
pub mod order_columns {
    use super::ColumnSpec;

    pub const ORDER: ColumnSpec = ColumnSpec {
        name: "Order",
        aliases: &["Name", "Order number"],
    };
    pub const ORDER_DATE: ColumnSpec = ColumnSpec {
        name: "Order created at date",
        aliases: &["Created at"],
    };
    pub const TRACKING_NUMBER: ColumnSpec = ColumnSpec {
        name: "Tracking number",
        aliases: &["Tracking"],
    };
    pub const NET_PAYOUT: ColumnSpec = ColumnSpec {
        name: "Net payout",
        aliases: &[],
    };
    pub const COUNTRY: ColumnSpec = ColumnSpec {
        name: "Shipping country",
        aliases: &[],
    };
    pub const PRODUCT_COST: ColumnSpec = ColumnSpec {
        name: "Cost",
        aliases: &["Product cost"],
    };

    pub const REQUIRED: &[ColumnSpec] = &[ORDER];
}

// ==========================================
// 通用取值工具
// ==========================================
struct RowReader<'a> {
    row: &'a HashMap<String, String>,
    row_number: usize,
    cleaner: DataCleaner,
}

impl<'a> RowReader<'a> {
    fn new(row: &'a HashMap<String, String>, row_number: usize) -> Self {
        Self {
            row,
            row_number,
            cleaner: DataCleaner,
        }
    }

    /// 提取字符串字段（空值 → None）
    fn string(&self, column: &ColumnSpec) -> Option<String> {
        self.cleaner.normalize_null(column.lookup(self.row))
    }

    fn required_string(&self, column: &ColumnSpec) -> ImportResult<String> {
        self.string(column)
            .ok_or_else(|| ImportError::RequiredValueMissing {
                row: self.row_number,
                field: column.name.to_string(),
            })
    }

    fn tracking(&self, column: &ColumnSpec) -> Option<String> {
        self.cleaner.normalize_tracking(column.lookup(self.row))
    }

    /// 解析数值
    fn amount(&self, column: &ColumnSpec) -> ImportResult<Option<f64>> {
        match self.string(column) {
            None => Ok(None),
            Some(value) => self
                .cleaner
                .parse_amount(&value)
                .map(Some)
                .map_err(|message| ImportError::TypeConversionError {
                    row: self.row_number,
                    field: column.name.to_string(),
                    message,
                }),
        }
    }

    /// 解析日期
    fn date(&self, column: &ColumnSpec) -> ImportResult<Option<NaiveDate>> {
        match self.string(column) {
            None => Ok(None),
            Some(value) => self
                .cleaner
                .parse_date(&value)
                .map(Some)
                .map_err(|_| ImportError::DateFormatError {
                    row: self.row_number,
                    field: column.name.to_string(),
                    value,
                }),
        }
    }
}

// ==========================================
// ShippingFieldMapper - 物流费用表映射
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ShippingFieldMapper;

impl FieldMapper for ShippingFieldMapper {
    type Record = ShippingRecord;

    fn table_name(&self) -> &'static str {
        "物流费用表"
    }

    fn required_columns(&self) -> &'static [ColumnSpec] {
        shipping_columns::REQUIRED
    }

    fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<ShippingRecord> {
        use shipping_columns::*;

        let reader = RowReader::new(row, row_number);

        let tracking_number =
            reader
                .tracking(&TRACKING_NUMBER)
                .ok_or_else(|| ImportError::RequiredValueMissing {
                    row: row_number,
                    field: TRACKING_NUMBER.name.to_string(),
                })?;

        let cost_rmb = reader
            .amount(&COST_RMB)?
            .ok_or_else(|| ImportError::RequiredValueMissing {
                row: row_number,
                field: COST_RMB.name.to_string(),
            })?;

        Ok(ShippingRecord {
            tracking_number,
            cost_rmb,
            ship_date: reader.date(&SHIP_DATE)?,
            country_raw: reader.string(&COUNTRY),
            weight_kg: reader.amount(&WEIGHT_KG)?,
            internal_order_id: reader.string(&INTERNAL_ORDER_ID),
            row_number,
        })
    }
}

// ==========================================
// OrderFieldMapper - 订单导出映射
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFieldMapper;

impl FieldMapper for OrderFieldMapper {
    type Record = OrderRecord;

    fn table_name(&self) -> &'static str {
        "订单导出"
    }

    fn required_columns(&self) -> &'static [ColumnSpec] {
        order_columns::REQUIRED
    }

    fn map_row(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<OrderRecord> {
        use order_columns::*;

        let reader = RowReader::new(row, row_number);

        Ok(OrderRecord {
            order_number: reader.required_string(&ORDER)?,
            order_date: reader.date(&ORDER_DATE)?,
            tracking_number: reader.tracking(&TRACKING_NUMBER),
            net_payout: reader.amount(&NET_PAYOUT)?,
            country: reader.string(&COUNTRY),
            product_cost: reader.amount(&PRODUCT_COST)?,
            row_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_shipping_mapper_basic() {
        let raw = row(&[
            ("物流单号", "4px001"),
            ("收货时间", "2025-01-20 10:00:00"),
            ("总金额", "88.5"),
            ("国家/计费分区", "美国"),
            ("计费重", "0.450"),
            ("客户单号", "C-1"),
        ]);

        let record = ShippingFieldMapper.map_row(&raw, 1).unwrap();

        assert_eq!(record.tracking_number, "4PX001");
        assert_eq!(record.cost_rmb, 88.5);
        assert_eq!(record.ship_date, NaiveDate::from_ymd_opt(2025, 1, 20));
        assert_eq!(record.country_raw.as_deref(), Some("美国"));
        assert_eq!(record.weight_kg, Some(0.45));
        assert_eq!(record.internal_order_id.as_deref(), Some("C-1"));
        assert_eq!(record.row_number, 1);
    }

    #[test]
    fn test_shipping_mapper_missing_tracking() {
        let raw = row(&[("物流单号", "  "), ("总金额", "10")]);
        let result = ShippingFieldMapper.map_row(&raw, 4);
        assert!(matches!(
            result,
            Err(ImportError::RequiredValueMissing { row: 4, ref field }) if field == "物流单号"
        ));
    }

    #[test]
    fn test_shipping_mapper_invalid_cost() {
        let raw = row(&[("物流单号", "4PX1"), ("总金额", "abc")]);
        let result = ShippingFieldMapper.map_row(&raw, 2);
        assert!(matches!(result, Err(ImportError::TypeConversionError { row: 2, .. })));
    }

    #[test]
    fn test_order_mapper_basic() {
        let raw = row(&[
            ("Order", "#1001"),
            ("Order created at date", "2025-01-18"),
            ("Tracking number", "4PX001"),
            ("Net payout", "$45.20"),
            ("Shipping country", "United States"),
            ("Cost", "12"),
        ]);

        let record = OrderFieldMapper.map_row(&raw, 1).unwrap();

        assert_eq!(record.order_number, "#1001");
        assert_eq!(record.order_date, NaiveDate::from_ymd_opt(2025, 1, 18));
        assert_eq!(record.tracking_number.as_deref(), Some("4PX001"));
        assert_eq!(record.net_payout, Some(45.2));
        assert_eq!(record.country.as_deref(), Some("United States"));
        assert_eq!(record.product_cost, Some(12.0));
    }

    #[test]
    fn test_order_mapper_aliases_case_insensitive() {
        let raw = row(&[("Name", "#1002"), ("tracking number", "yt123")]);

        let record = OrderFieldMapper.map_row(&raw, 1).unwrap();

        assert_eq!(record.order_number, "#1002");
        assert_eq!(record.tracking_number.as_deref(), Some("YT123"));
        assert_eq!(record.net_payout, None);
    }

    #[test]
    fn test_order_mapper_empty_tracking_is_none() {
        let raw = row(&[("Order", "#1003"), ("Tracking number", "")]);
        let record = OrderFieldMapper.map_row(&raw, 1).unwrap();
        assert_eq!(record.tracking_number, None);
    }

    #[test]
    fn test_order_mapper_bad_date() {
        let raw = row(&[("Order", "#1004"), ("Order created at date", "yesterday")]);
        let result = OrderFieldMapper.map_row(&raw, 9);
        assert!(matches!(result, Err(ImportError::DateFormatError { row: 9, .. })));
    }
}
