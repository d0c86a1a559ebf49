// ==========================================
// DataLoader 集成测试
// ==========================================
// 测试目标: 验证物流费用表 / 订单导出的完整加载流程
// ==========================================


use chrono::NaiveDate;
use shipping_cost_analyzer::importer::{
    CsvParser, DataLoader, FieldMapper, ImportError, OrderFieldMapper, ShippingFieldMapper,
};
use shipping_cost_analyzer::logging;
use test_helpers::write_file;

#[test]
fn test_shipping_columns_with_aliases() {
    logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "shipping.csv",
        "\u{feff}运单号,总金额,收货时间,国家\n\
         4px 100,¥88.50,45677,美国\n\
         4PX101,\"RMB 1,024\",2025/01/21,英国\n",
    );

    let loader = DataLoader::default();
    let table = loader.load_shipping(&path).unwrap();

    assert_eq!(table.total_rows, 2);
    let first = &table.records[0];
    assert_eq!(first.tracking_number, "4PX100");
    assert_eq!(first.cost_rmb, 88.5);
    assert_eq!(first.ship_date, NaiveDate::from_ymd_opt(2025, 1, 20));
    assert_eq!(first.country_raw.as_deref(), Some("美国"));
    assert_eq!(first.weight_kg, None);

    let second = &table.records[1];
    assert_eq!(second.cost_rmb, 1024.0);
    assert_eq!(second.ship_date, NaiveDate::from_ymd_opt(2025, 1, 21));
}

#[test]
fn test_order_rows_with_bad_values_are_skipped() {
    logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "orders.csv",
        "Name,Created at,Tracking,Net payout,Shipping country,Product cost\n\
         #1,2025-01-05,4PX1,10,Canada,2\n\
         ,2025-01-05,4PX2,10,Canada,2\n\
         #3,not-a-date,4PX3,10,Canada,2\n\
         #4,2025-01-06,4PX4,ten,Canada,2\n\
         ,,,,,\n\
         #5,2025-01-07 10:30:00,,N/A,,\n",
    );

    let table = DataLoader::default().load_orders(&path).unwrap();

    assert_eq!(table.total_rows, 5);
    assert_eq!(table.accepted(), 2);
    let rejected: Vec<usize> = table.rejected.iter().map(|r| r.row_number).collect();
    assert_eq!(rejected, vec![2, 3, 4]);

    let last = &table.records[1];
    assert_eq!(last.order_number, "#5");
    assert_eq!(last.order_date, NaiveDate::from_ymd_opt(2025, 1, 7));
    assert_eq!(last.tracking_number, None);
    assert_eq!(last.net_payout, None);
}

#[test]
fn test_headers_only_file_still_checks_columns() {
    logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "shipping.csv", "物流单号,计费重\n");

    let err = DataLoader::new(Box::new(CsvParser))
        .load(&path, &ShippingFieldMapper)
        .unwrap_err();

    match err {
        ImportError::MissingColumn { column, .. } => assert_eq!(column, "总金额"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_order_file_loads_nothing() {
    logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "orders.csv", "Order,Tracking number\n");

    let table = DataLoader::default().load(&path, &OrderFieldMapper).unwrap();

    assert_eq!(table.total_rows, 0);
    assert!(table.records.is_empty());
    assert_eq!(OrderFieldMapper.table_name(), "订单导出");
}

fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_shipping_xlsx_cell_types() {
    logging::init_test();

    let table = DataLoader::default()
        .load_shipping(fixture("shipping_sample.xlsx"))
        .unwrap();

    // 第 3 行为空白行，解析时跳过
    assert_eq!(table.total_rows, 3);
    assert_eq!(table.accepted(), 2);

    // 数字单元格的运单号不带 ".0"，日期单元格按序列日期解析
    let first = &table.records[0];
    assert_eq!(first.tracking_number, "123456789012");
    assert_eq!(first.ship_date, NaiveDate::from_ymd_opt(2025, 1, 20));
    assert_eq!(first.cost_rmb, 88.5);
    assert_eq!(first.country_raw.as_deref(), Some("美国"));
    assert_eq!(first.weight_kg, Some(0.5));
    assert_eq!(first.row_number, 1);

    // 带时间的日期单元格取日期部分，#N/A 视为空值
    let second = &table.records[1];
    assert_eq!(second.tracking_number, "4PX200");
    assert_eq!(second.ship_date, NaiveDate::from_ymd_opt(2025, 1, 21));
    assert_eq!(second.weight_kg, None);
    assert_eq!(second.row_number, 3);

    assert_eq!(table.rejected.len(), 1);
    assert_eq!(table.rejected[0].row_number, 4);
    assert!(table.rejected[0].reason.contains("总金额"));
}

#[test]
fn test_empty_xlsx_sheet_is_parse_error() {
    logging::init_test();

    let result = DataLoader::default().load_shipping(fixture("empty_sheet.xlsx"));

    assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
}
