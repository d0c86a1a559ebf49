// ==========================================
// 运费对账分析工具 - 国家名翻译
// ==========================================
// 职责: 物流费用表的中文国家名 → 订单导出使用的英文国家名
// 未收录的名称原样返回
// ==========================================

use std::collections::HashMap;

/// 内置中英文国家名对照表
pub const COUNTRY_TABLE: [(&str, &str); 59] = [
    ("美国", "United States"),
    ("英国", "United Kingdom"),
    ("澳大利亚", "Australia"),
    ("爱尔兰", "Ireland"),
    ("加拿大", "Canada"),
    ("荷兰", "Netherlands"),
    ("挪威", "Norway"),
    ("阿联酋", "United Arab Emirates"),
    ("德国", "Germany"),
    ("丹麦", "Denmark"),
    ("以色列", "Israel"),
    ("瑞典", "Sweden"),
    ("芬兰", "Finland"),
    ("瑞士", "Switzerland"),
    ("新西兰", "New Zealand"),
    ("法国", "France"),
    ("意大利", "Italy"),
    ("西班牙", "Spain"),
    ("比利时", "Belgium"),
    ("奥地利", "Austria"),
    ("波兰", "Poland"),
    ("葡萄牙", "Portugal"),
    ("日本", "Japan"),
    ("韩国", "South Korea"),
    ("新加坡", "Singapore"),
    ("香港", "Hong Kong"),
    ("台湾", "Taiwan"),
    ("马来西亚", "Malaysia"),
    ("泰国", "Thailand"),
    ("印度", "India"),
    ("墨西哥", "Mexico"),
    ("巴西", "Brazil"),
    ("南非", "South Africa"),
    ("希腊", "Greece"),
    ("捷克", "Czech Republic"),
    ("匈牙利", "Hungary"),
    ("罗马尼亚", "Romania"),
    ("斯洛伐克", "Slovakia"),
    ("斯洛文尼亚", "Slovenia"),
    ("克罗地亚", "Croatia"),
    ("保加利亚", "Bulgaria"),
    ("塞浦路斯", "Cyprus"),
    ("爱沙尼亚", "Estonia"),
    ("拉脱维亚", "Latvia"),
    ("立陶宛", "Lithuania"),
    ("卢森堡", "Luxembourg"),
    ("马耳他", "Malta"),
    ("冰岛", "Iceland"),
    ("土耳其", "Turkey"),
    ("俄罗斯", "Russia"),
    ("乌克兰", "Ukraine"),
    ("沙特阿拉伯", "Saudi Arabia"),
    ("卡塔尔", "Qatar"),
    ("科威特", "Kuwait"),
    ("巴林", "Bahrain"),
    ("阿曼", "Oman"),
    ("菲律宾", "Philippines"),
    ("印度尼西亚", "Indonesia"),
    ("越南", "Vietnam"),
];

/// 查内置表翻译国家名，未收录时原样返回
pub fn translate_country(name: &str) -> String {
    let key = name.trim();
    COUNTRY_TABLE
        .iter()
        .find(|(zh, _)| *zh == key)
        .map(|(_, en)| en.to_string())
        .unwrap_or_else(|| key.to_string())
}

// ==========================================
// CountryTranslator - 内置表 + 配置覆写
// ==========================================
#[derive(Debug, Clone)]
pub struct CountryTranslator {
    table: HashMap<String, String>,
}

impl Default for CountryTranslator {
    fn default() -> Self {
        Self::with_overrides(&HashMap::new())
    }
}

impl CountryTranslator {
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table: HashMap<String, String> = COUNTRY_TABLE
            .iter()
            .map(|(zh, en)| (zh.to_string(), en.to_string()))
            .collect();

        for (zh, en) in overrides {
            table.insert(zh.trim().to_string(), en.trim().to_string());
        }

        Self { table }
    }

    pub fn translate(&self, name: &str) -> String {
        let key = name.trim();
        self.table
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
