// ==========================================
// 运费对账分析工具 - 文本条形图
// ==========================================
// 横向条形图，条长按最大值等比缩放
// ==========================================

const BAR_CHAR: char = '#';
const DEFAULT_WIDTH: usize = 40;

pub struct BarChart {
    title: String,
    width: usize,
    bars: Vec<(String, f64)>,
    value_format: fn(f64) -> String,
}

impl BarChart {
    pub fn new(title: impl Into<String>, value_format: fn(f64) -> String) -> Self {
        Self {
            title: title.into(),
            width: DEFAULT_WIDTH,
            bars: Vec::new(),
            value_format,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.bars.push((label.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 条长；非正值或非有限值为 0
    fn bar_len(&self, value: f64, max: f64) -> usize {
        if !value.is_finite() || value <= 0.0 || max <= 0.0 {
            return 0;
        }
        ((value / max) * self.width as f64).round() as usize
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.title);

        let label_width = self
            .bars
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        let max = self
            .bars
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);

        for (label, value) in &self.bars {
            let bar: String = std::iter::repeat(BAR_CHAR)
                .take(self.bar_len(*value, max))
                .collect();
            let line = format!(
                "{:<lw$} | {} {}",
                label,
                bar,
                (self.value_format)(*value),
                lw = label_width
            );
            out.push_str(&line);
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::format::format_money;

    #[test]
    fn test_bars_scale_to_max() {
        let mut chart = BarChart::new("Avg cost", format_money).with_width(10);
        chart.push("UK", 5.0);
        chart.push("United States", 10.0);

        let rendered = chart.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "Avg cost");
        assert_eq!(lines[1], "UK            | ##### $5.00");
        assert_eq!(lines[2], "United States | ########## $10.00");
    }

    #[test]
    fn test_non_positive_values_have_no_bar() {
        let mut chart = BarChart::new("t", |v| format!("{v}")).with_width(4);
        chart.push("a", 0.0);
        chart.push("b", -3.0);

        let rendered = chart.render();
        assert!(rendered.contains("a |  0"));
        assert!(rendered.contains("b |  -3"));
    }

    #[test]
    fn test_empty_chart_renders_title_only() {
        let chart = BarChart::new("Empty", format_money);
        assert!(chart.is_empty());
        assert_eq!(chart.render(), "Empty\n");
    }
}
