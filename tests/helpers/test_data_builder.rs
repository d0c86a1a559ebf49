// ==========================================
// 测试数据构建器
// ==========================================
// 职责: 以链式调用生成物流费用表 / 订单导出 CSV 内容
// ==========================================

/// 物流费用表构建器
pub struct ShippingCsvBuilder {
    rows: Vec<[String; 6]>,
}

impl ShippingCsvBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// 追加一行: 物流单号, 收货时间, 总金额, 国家/计费分区, 计费重, 客户单号
    pub fn row(
        mut self,
        tracking: &str,
        date: &str,
        cost_rmb: &str,
        country: &str,
        weight: &str,
        internal_id: &str,
    ) -> Self {
        self.rows.push([
            tracking.to_string(),
            date.to_string(),
            cost_rmb.to_string(),
            country.to_string(),
            weight.to_string(),
            internal_id.to_string(),
        ]);
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from("物流单号,收货时间,总金额,国家/计费分区,计费重,客户单号\n");
        for row in &self.rows {
            out.push_str(&csv_line(row));
        }
        out
    }
}

/// 订单导出构建器
pub struct OrderCsvBuilder {
    rows: Vec<[String; 6]>,
}

impl OrderCsvBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// 追加一行: Order, Order created at date, Tracking number, Net payout, Shipping country, Cost
    pub fn row(
        mut self,
        order: &str,
        date: &str,
        tracking: &str,
        payout: &str,
        country: &str,
        cost: &str,
    ) -> Self {
        self.rows.push([
            order.to_string(),
            date.to_string(),
            tracking.to_string(),
            payout.to_string(),
            country.to_string(),
            cost.to_string(),
        ]);
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from(
            "Order,Order created at date,Tracking number,Net payout,Shipping country,Cost\n",
        );
        for row in &self.rows {
            out.push_str(&csv_line(row));
        }
        out
    }
}

// 含逗号的字段加引号
fn csv_line(fields: &[String]) -> String {
    let quoted: Vec<String> = fields
        .iter()
        .map(|f| {
            if f.contains(',') {
                format!("\"{}\"", f)
            } else {
                f.clone()
            }
        })
        .collect();
    format!("{}\n", quoted.join(","))
}
