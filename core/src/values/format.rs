/// Significant digits used when a caller does not pick a precision.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 4;

/// Format `value` rounded to `digits` significant digits, without trailing
/// zeros (`2/3` → `0.6667`, `5` → `5`, `12345.6` → `12350`).
///
/// Magnitudes outside `1e-5..1e15` switch to scientific notation
/// (`1.5e-7`, `2e20`).
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    if (-5..15).contains(&exponent) {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        // Round once through the scientific form so the fixed rendering never
        // shows more significant digits than requested.
        let rounded: f64 = scientific.parse().unwrap_or(value);
        trim_fraction(format!("{:.*}", decimals, rounded))
    } else {
        format!("{}e{}", trim_fraction(mantissa.to_string()), exponent)
    }
}

fn trim_fraction(text: String) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
