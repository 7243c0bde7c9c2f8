//! Row extraction and recipient deduplication
//!
//! Walks the mapped row range, normalizes phone numbers, and emits a
//! distinct recipient list paired with per-recipient variable values.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::mapping::MappingDescriptor;

/// A spreadsheet cell as handed over by the host.
///
/// Untagged on the wire, so a JSON row like `["Ann", 9198765, null]`
/// deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            // Integral numbers render without a fractional suffix so a
            // numeric phone cell like 9198765.0 round-trips as "9198765".
            CellValue::Number(n)
                if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 =>
            {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One distinct recipient within the selected row range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Normalized phone number: digits only, non-empty, no leading zeros
    pub phone: String,
    /// Variable values in `var_indices` order
    pub vars: Vec<String>,
}

/// Normalizes a raw phone cell: keeps digits only, then strips leading
/// zeros. An empty result marks the cell as unusable.
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.trim_start_matches('0').to_string()
}

/// Extracts distinct recipients from the mapped row range.
///
/// Rows are visited in ascending order, so the first occurrence of a
/// duplicate phone number wins. Rows whose phone cell normalizes to nothing
/// are skipped silently; absent variable cells coerce to the empty string.
/// An empty result is the caller's terminal no-valid-recipients condition.
pub fn extract(rows: &[Vec<CellValue>], mapping: &MappingDescriptor) -> Vec<Recipient> {
    let mut seen = HashSet::new();
    let mut recipients = Vec::new();

    for idx in mapping.data_start_idx..=mapping.data_end_idx {
        let Some(row) = rows.get(idx) else {
            break;
        };

        let raw_phone = row
            .get(mapping.phone_index)
            .map(ToString::to_string)
            .unwrap_or_default();
        let phone = normalize_phone(&raw_phone);
        if phone.is_empty() {
            continue;
        }
        if !seen.insert(phone.clone()) {
            continue;
        }

        let vars = mapping
            .var_indices
            .iter()
            .map(|&col| row.get(col).map(ToString::to_string).unwrap_or_default())
            .collect();

        recipients.push(Recipient { phone, vars });
    }

    recipients
}
