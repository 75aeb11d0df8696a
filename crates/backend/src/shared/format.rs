/// Units of the metric cards, one step per factor of 1000
const METRIC_UNITS: [&str; 5] = ["", "mil", "milhões", "bilhões", "trilhões"];

/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Scale a metric for display: divide by 1000 while the value is at least
/// 1000 and a larger unit exists, then print two decimals and the unit.
///
/// Zero, negative and non-finite values are printed in the base unit.
///
/// ```
/// use backend::shared::format::format_metric;
/// assert_eq!(format_metric(500.0, ""), "500.00 ");
/// assert_eq!(format_metric(1500.0, ""), "1.50 mil");
/// assert_eq!(format_metric(2_500_000.0, "R$"), "R$ 2.50 milhões");
/// ```
pub fn format_metric(value: f64, prefix: &str) -> String {
    let mut scaled = value;
    let mut unit = METRIC_UNITS[0];

    if value.is_finite() && value > 0.0 {
        for next in &METRIC_UNITS[1..] {
            if scaled < 1000.0 {
                break;
            }
            scaled /= 1000.0;
            unit = next;
        }
    }

    if prefix.is_empty() {
        format!("{:.2} {}", scaled, unit)
    } else {
        format!("{} {:.2} {}", prefix, scaled, unit)
    }
}
