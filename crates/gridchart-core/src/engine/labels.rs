use super::error::RenderError;
use crate::core::formula::{FormulaError, FormulaFormatter};
use crate::core::models::table::Number;

fn tokens(values: &str) -> impl Iterator<Item = &str> {
    values.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Formats a comma-separated list as one trimmed entry per line.
///
/// Blank entries are dropped; blank input gives an empty string.
pub fn format_texts(values: &str) -> String {
    tokens(values).collect::<Vec<_>>().join("\n")
}

/// Like [`format_texts`], but every entry is rendered as a chemical formula.
pub fn format_formulas(
    values: &str,
    formatter: &dyn FormulaFormatter,
) -> Result<String, FormulaError> {
    let rendered = tokens(values)
        .map(|t| formatter.to_unicode(t))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join("\n"))
}

/// Prefix for a merged cell's headline: the total when positive, else nothing.
pub fn main_prefix(total: Number) -> String {
    if total.is_positive() {
        total.to_string()
    } else {
        String::new()
    }
}

/// Prefix for a merged cell's second line: `total / subdivider`.
///
/// Exact quotients print as integers, others with two decimals. Empty when
/// the total is not positive.
pub fn sub_prefix(total: Number, subdivider: Number) -> Option<String> {
    if subdivider.is_zero() {
        return None;
    }
    if !total.is_positive() {
        return Some(String::new());
    }
    let quotient = match (total, subdivider) {
        (Number::Integer(t), Number::Integer(s)) if t % s == 0 => return Some((t / s).to_string()),
        _ => total.as_f64() / subdivider.as_f64(),
    };
    if quotient.fract() == 0.0 && quotient.abs() < i64::MAX as f64 {
        Some(format!("{}", quotient as i64))
    } else {
        Some(format!("{:.2}", quotient))
    }
}

/// Both merged-cell prefixes, failing on a zero subdivider.
pub fn merged_prefixes(
    total: Number,
    subdivider: Number,
    position: (u32, u32),
) -> Result<(String, String), RenderError> {
    let sub = sub_prefix(total, subdivider).ok_or(RenderError::ZeroSubdivider {
        row: position.0,
        col: position.1,
    })?;
    Ok((main_prefix(total), sub))
}
