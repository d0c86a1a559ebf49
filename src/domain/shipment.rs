// ==========================================
// 运费对账分析工具 - 物流费用记录
// ==========================================
// 来源: 货代导出的物流费用表（中文表头）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ShippingRecord - 物流费用记录
// ==========================================
// 用途: 导入层写入,对账引擎只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingRecord {
    pub tracking_number: String,           // 物流单号（已标准化，连接键）
    pub cost_rmb: f64,                     // 总金额（人民币）
    pub ship_date: Option<NaiveDate>,      // 收货时间
    pub country_raw: Option<String>,       // 国家/计费分区（中文原值）
    pub weight_kg: Option<f64>,            // 计费重（kg）
    pub internal_order_id: Option<String>, // 客户单号

    // 元信息
    pub row_number: usize, // 源文件数据行号（表头下一行为 1，空白行也计数）
}

impl ShippingRecord {
    /// 按汇率换算美元运费
    pub fn cost_usd(&self, rmb_to_usd: f64) -> f64 {
        self.cost_rmb * rmb_to_usd
    }
}
