/// `Rs. 1,234.50`
pub fn rupees(amount: f64) -> String {
    format!("Rs. {}", thousands(amount))
}

/// Two decimals with comma grouping: `1234567.891` -> `1,234,567.89`.
pub fn thousands(x: f64) -> String {
    let s = format!("{:.2}", x.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if x < 0.0 && s != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// Signed two-decimal value: `+5.00`, `-0.25`.
pub fn signed2(x: f64) -> String {
    format!("{:+.2}", x)
}

/// (absolute, percent) distance from `current` to `target`.
pub fn distance(target: f64, current: f64) -> (f64, f64) {
    let diff = target - current;
    (diff, diff / current * 100.0)
}

/// DM text. Prices appear as stored (`1200.0`), without grouping.
pub fn alert_message(symbol: &str, target: f64, current: f64) -> String {
    format!(
        "🔔 **ALERT!** {symbol} has reached your target price of Rs. {target:?}. Current price: Rs. {current:?}."
    )
}
