//! Price text for bubbles.

/// Format `price` in `currency`, optionally with K/M/B suffixes.
pub fn format_price(price: f32, currency: &str, compact: bool) -> String {
    if !price.is_finite() {
        return "-".to_string();
    }

    let sign = if price < 0.0 { "-" } else { "" };
    let abs = price.abs() as f64;
    let body = if compact && abs >= 10_000.0 {
        compact_number(abs)
    } else {
        plain_number(abs)
    };

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{body}"),
        None => format!("{sign}{body} {currency}"),
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn compact_number(abs: f64) -> String {
    let (scaled, suffix) = if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else {
        (abs / 1e3, "K")
    };
    let text = format!("{scaled:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}{suffix}")
}

fn plain_number(abs: f64) -> String {
    // Small prices keep four significant digits.
    let decimals = if abs >= 1.0 || abs == 0.0 {
        2
    } else {
        (3 - abs.log10().floor() as i32).clamp(2, 10) as usize
    };
    let text = format!("{abs:.decimals$}");
    let (int, frac) = match text.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (text.as_str(), None),
    };
    let grouped = group_thousands(int);
    match frac {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
