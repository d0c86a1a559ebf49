// ==========================================
// 运费对账分析工具 - 领域类型定义
// ==========================================
// 职责: 合并状态、视图筛选、问题分类等枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 合并状态 (Merge Status)
// ==========================================
// 订单导出为左表，物流费用表为右表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeStatus {
    Both,      // 两侧均匹配
    LeftOnly,  // 仅订单存在
    RightOnly, // 仅物流记录存在
}

impl MergeStatus {
    pub fn is_matched(&self) -> bool {
        matches!(self, MergeStatus::Both)
    }
}

impl fmt::Display for MergeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStatus::Both => write!(f, "BOTH"),
            MergeStatus::LeftOnly => write!(f, "LEFT_ONLY"),
            MergeStatus::RightOnly => write!(f, "RIGHT_ONLY"),
        }
    }
}

// ==========================================
// 明细筛选 (Record Filter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFilter {
    #[default]
    Matched,   // 仅匹配
    All,       // 全部
    Unmatched, // 仅未匹配
}

impl RecordFilter {
    pub fn accepts(&self, status: MergeStatus) -> bool {
        match self {
            RecordFilter::Matched => status.is_matched(),
            RecordFilter::All => true,
            RecordFilter::Unmatched => !status.is_matched(),
        }
    }
}

impl fmt::Display for RecordFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFilter::Matched => write!(f, "matched"),
            RecordFilter::All => write!(f, "all"),
            RecordFilter::Unmatched => write!(f, "unmatched"),
        }
    }
}

impl FromStr for RecordFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "matched" => Ok(RecordFilter::Matched),
            "all" => Ok(RecordFilter::All),
            "unmatched" => Ok(RecordFilter::Unmatched),
            other => Err(format!("未知的明细筛选: {}（可选 matched/all/unmatched）", other)),
        }
    }
}

// ==========================================
// 问题分类 (Issue Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    UnmatchedShipment,  // 物流记录无对应订单
    UnmatchedOrder,     // 承运商订单无物流费用
    MultiTracking,      // 一单多运单
    DuplicateTracking,  // 运单号在物流表中重复
    CountryMismatch,    // 国家不一致
}

impl IssueKind {
    pub const ALL: [IssueKind; 5] = [
        IssueKind::UnmatchedShipment,
        IssueKind::UnmatchedOrder,
        IssueKind::MultiTracking,
        IssueKind::DuplicateTracking,
        IssueKind::CountryMismatch,
    ];
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::UnmatchedShipment => write!(f, "UNMATCHED_SHIPMENT"),
            IssueKind::UnmatchedOrder => write!(f, "UNMATCHED_ORDER"),
            IssueKind::MultiTracking => write!(f, "MULTI_TRACKING"),
            IssueKind::DuplicateTracking => write!(f, "DUPLICATE_TRACKING"),
            IssueKind::CountryMismatch => write!(f, "COUNTRY_MISMATCH"),
        }
    }
}

// ==========================================
// 问题筛选 (Issue Filter)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IssueFilter {
    #[default]
    All,
    Only(IssueKind),
}

impl IssueFilter {
    pub fn includes(&self, kind: IssueKind) -> bool {
        match self {
            IssueFilter::All => true,
            IssueFilter::Only(k) => *k == kind,
        }
    }
}

impl FromStr for IssueFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let kind = match normalized.as_str() {
            "all" => return Ok(IssueFilter::All),
            "unmatched-shipments" | "unmatched-shipment" => IssueKind::UnmatchedShipment,
            "unmatched-orders" | "unmatched-order" => IssueKind::UnmatchedOrder,
            "multi-tracking" => IssueKind::MultiTracking,
            "duplicate-tracking" => IssueKind::DuplicateTracking,
            "country-mismatch" | "country-mismatches" => IssueKind::CountryMismatch,
            other => return Err(format!("未知的问题类型: {}", other)),
        };
        Ok(IssueFilter::Only(kind))
    }
}
