/// Groups the digits of a whole number with commas: `1234567` -> `1,234,567`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Yen amount rounded to whole yen, e.g. `¥1,234,567` or `-¥5`.
pub fn format_yen(value: f64) -> String {
    if !value.is_finite() {
        return "¥—".to_string();
    }
    let rounded = value.round();
    let grouped = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

/// `0.02` -> `2%`, `0.0225` -> `2.25%`. Up to four decimals are kept.
pub fn format_rate(rate: f64) -> String {
    let pct = format!("{:.4}", rate * 100.0);
    let pct = pct.trim_end_matches('0').trim_end_matches('.');
    let pct = if pct == "-0" { "0" } else { pct };
    format!("{pct}%")
}

pub fn format_mileage_km(km: u32) -> String {
    format!("{} km", group_thousands(km as u64))
}
