use crate::models::TaxRecord;
use crate::parse::parse_amount;

pub const UNKNOWN_AUTHORITY: &str = "unknown";
pub const UNSPECIFIED_NAME: &str = "unspecified";

/// Normalized identifiers shorter than this never reach the dataset.
pub const MIN_TAX_ID_LEN: usize = 5;

/// Why a raw row was dropped instead of becoming a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSkip {
    TooFewColumns,
    ShortTaxId,
}

/// Strip quotes, whitespace and hyphens anywhere in the identifier.
///
/// The exact same rule runs at load time and at search time; if the two ever
/// diverge, lookups fail silently.
#[must_use]
pub fn normalize_tax_id(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\'' | '"' | '-') && !c.is_whitespace())
        .collect()
}

/// Build one record from the split columns of a row.
///
/// Expects `[authority, tax_id, name, invoice_count, tax_amount,
/// total_amount, ...]`; trailing extra columns are ignored and missing
/// numeric columns coerce like empty cells.
pub fn record_from_columns(columns: &[String]) -> std::result::Result<TaxRecord, RowSkip> {
    if columns.len() < 2 {
        return Err(RowSkip::TooFewColumns);
    }

    let tax_id = normalize_tax_id(&columns[1]);
    if tax_id.len() < MIN_TAX_ID_LEN {
        return Err(RowSkip::ShortTaxId);
    }

    Ok(TaxRecord {
        authority_code: authority_code(columns.first().map(String::as_str)),
        tax_id,
        name: non_empty_or(columns.get(2), UNSPECIFIED_NAME),
        invoice_count: invoice_count(column(columns, 3)),
        tax_amount: parse_amount(column(columns, 4)),
        total_amount: parse_amount(column(columns, 5)),
    })
}

fn column(columns: &[String], idx: usize) -> &str {
    columns.get(idx).map_or("", String::as_str)
}

fn authority_code(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => {
            // The export renders integer office codes as floats ("10.0").
            value.strip_suffix(".0").unwrap_or(value).to_string()
        }
        _ => UNKNOWN_AUTHORITY.to_string(),
    }
}

fn non_empty_or(raw: Option<&String>, fallback: &str) -> String {
    match raw.map(|value| value.trim()) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => fallback.to_string(),
    }
}

fn invoice_count(raw: &str) -> u64 {
    let value = parse_amount(raw);
    if value <= 0.0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is pre-checked positive and finite; counts truncate"
    )]
    {
        value as u64
    }
}
