// ==========================================
// 运费对账分析工具 - 领域模型层
// ==========================================
// 职责: 定义导入记录、对账结果、枚举类型
// 红线: 不含文件读取逻辑,不含对账逻辑
// ==========================================

pub mod load;
pub mod order;
pub mod reconciliation;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use load::{LoadSummary, LoadedTable, RejectedRow};
pub use order::OrderRecord;
pub use reconciliation::{
    CountryMismatch, DuplicateTracking, Issues, MergedRow, MultiTrackingOrder, Reconciliation,
    UnmatchedOrder, UnmatchedShipment,
};
pub use shipment::ShippingRecord;
pub use types::{IssueFilter, IssueKind, MergeStatus, RecordFilter};
