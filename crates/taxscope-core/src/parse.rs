/// Split one CSV line into fields.
///
/// Comma delimited, double-quote quoted. A doubled quote inside a quoted
/// field unescapes to one literal quote; delimiters inside quotes are field
/// content. Quote characters that delimit a field are not part of its value.
/// An unterminated quote does not fail: the remainder of the line becomes the
/// final field's content. Empty input yields a single empty field, so the
/// loader's minimum-column check stays deterministic for blank lines.
///
/// Lines must not contain embedded newlines; the loader splits the document
/// into raw lines before calling this.
#[must_use]
pub fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }

    fields.push(field);
    fields
}

/// Coerce a locale-formatted amount string to a finite number.
///
/// Never fails; anything that does not survive coercion is `0.0`, so
/// aggregate sums tolerate malformed cells. The full policy:
///
/// - every character except digits, `-`, `.` and `,` is dropped (currency
///   symbols, spaces, unit suffixes);
/// - `-` is honored only as the leading character;
/// - when both `.` and `,` appear, the later one is the decimal separator
///   and the other is a grouping mark;
/// - a single lone separator is a grouping mark when exactly three digits
///   follow it and at least one precedes (`1.234` -> 1234), otherwise it is
///   the decimal separator (`10.0` -> 10.0, `1,5` -> 1.5);
/// - a separator kind that repeats is always grouping (`1.234.567`).
#[must_use]
pub fn parse_amount(raw: &str) -> f64 {
    let mut filtered = String::new();
    for (idx, c) in raw.trim().char_indices() {
        match c {
            '0'..='9' | '.' | ',' => filtered.push(c),
            '-' if idx == 0 => filtered.push(c),
            _ => {}
        }
    }
    if filtered.is_empty() || filtered == "-" {
        return 0.0;
    }

    let decimal = resolve_decimal_separator(&filtered);
    let mut normalized = String::with_capacity(filtered.len());
    for c in filtered.chars() {
        match c {
            '.' | ',' => {
                if Some(c) == decimal {
                    normalized.push('.');
                }
            }
            _ => normalized.push(c),
        }
    }

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn resolve_decimal_separator(filtered: &str) -> Option<char> {
    let last_dot = filtered.rfind('.');
    let last_comma = filtered.rfind(',');

    match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => Some(if dot > comma { '.' } else { ',' }),
        (Some(pos), None) => lone_separator_as_decimal(filtered, '.', pos),
        (None, Some(pos)) => lone_separator_as_decimal(filtered, ',', pos),
        (None, None) => None,
    }
}

fn lone_separator_as_decimal(filtered: &str, separator: char, last_pos: usize) -> Option<char> {
    if filtered.matches(separator).count() > 1 {
        return None;
    }
    let digits_after = filtered[last_pos + 1..].len();
    let has_digits_before = filtered[..last_pos].chars().any(|c| c.is_ascii_digit());
    if digits_after == 3 && has_digits_before {
        return None;
    }
    Some(separator)
}
