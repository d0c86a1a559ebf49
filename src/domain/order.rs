// ==========================================
// 运费对账分析工具 - 店铺订单记录
// ==========================================
// 来源: Shopify 订单导出（英文表头）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// OrderRecord - 订单记录
// ==========================================
// 同一订单号可出现多行（一单多运单）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_number: String,            // Order
    pub order_date: Option<NaiveDate>,   // Order created at date
    pub tracking_number: Option<String>, // Tracking number（已标准化）
    pub net_payout: Option<f64>,         // Net payout（USD）
    pub country: Option<String>,         // Shipping country
    pub product_cost: Option<f64>,       // Cost（USD）

    // 元信息
    pub row_number: usize,
}
