/// Turn a raw spreadsheet value into a number by dropping everything that is
/// not an ASCII digit or a `.`, e.g.,
///     `"$1,234.50"`   -> `Some(1234.5)`
///     `"35 units"`    -> `Some(35.0)`
///     `""`            -> `None`
///     `"1.2.3"`       -> `None`
///
/// Signs are dropped along with every other symbol, so the result is never negative.
pub fn clean_numeric(raw: &str) -> Option<f64> {
    let kept = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect::<String>();
    if kept.is_empty() {
        return None;
    }
    kept.parse::<f64>().ok().filter(|value| value.is_finite())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
