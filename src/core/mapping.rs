//! Column mapping validation
//!
//! Turns the operator's raw selection (phone column, variable columns, row
//! bounds, batch size) into a normalized [`MappingDescriptor`], or the first
//! applicable rejection in a fixed order. The first failing check governs
//! which message the caller shows.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::payload::MAX_ENTRIES_PER_PAYLOAD;

/// Position and extent of the selected range's header row.
///
/// Created once per "read selection" action; immutable until the next read.
/// `start_row_index` is the 1-based sheet row of the header, so data rows
/// occupy `start_row_index + 1 ..= start_row_index + row_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMeta {
    /// Number of data rows under the header
    pub row_count: usize,
    /// Number of columns in the selection
    pub column_count: usize,
    /// 1-based sheet row of the header
    pub start_row_index: usize,
    /// 0-based column of the selection's left edge
    pub column_index: usize,
}

/// The operator's raw column selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSelection {
    /// Phone column, if one is selected
    pub phone: Option<usize>,
    /// Variable columns in selection order
    pub vars: Vec<usize>,
}

/// Operator-entered row bounds, as absolute 1-based sheet row numbers.
///
/// `None` stands for an absent or non-numeric input and falls back to the
/// data block's own bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowBounds {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

/// Normalized column mapping, ready for extraction.
///
/// Row indices are 0-based, inclusive, and relative to the data block.
/// Never partially valid: either a complete descriptor exists or none does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDescriptor {
    pub phone_index: usize,
    /// Variable columns in template-placeholder order; unique, and never
    /// containing `phone_index`
    pub var_indices: Vec<usize>,
    pub data_start_idx: usize,
    pub data_end_idx: usize,
    pub batch_size: usize,
}

/// Reasons a selection fails to form a valid mapping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingRejection {
    /// No phone column selected
    #[error("select a phone column")]
    PhoneColumnMissing,

    /// The phone column is also among the variable columns
    #[error("the phone column cannot also be a variable column")]
    PhoneColumnReused,

    /// Selected variable columns do not match the template's placeholders
    #[error("the template requires {required} variable column(s), {selected} selected")]
    VariableCountMismatch { required: usize, selected: usize },

    /// The clamped start row exceeds the clamped end row
    #[error("the selected start/end rows leave no data rows")]
    EmptyRowRange,

    /// Batch size over the per-request ceiling
    #[error("batch size {size} exceeds the maximum of 10000 per request")]
    BatchSizeExceeded { size: usize },
}

/// Validates a selection against the header metadata and template
/// requirements, producing a normalized mapping descriptor.
///
/// Pure and re-entrant: identical inputs always yield the identical
/// descriptor or the identical rejection.
pub fn validate(
    header: &HeaderMeta,
    selection: &ColumnSelection,
    bounds: &RowBounds,
    batch_size: usize,
    required_vars: usize,
) -> Result<MappingDescriptor, MappingRejection> {
    let phone_index = selection.phone.ok_or(MappingRejection::PhoneColumnMissing)?;

    if selection.vars.contains(&phone_index) {
        return Err(MappingRejection::PhoneColumnReused);
    }

    if required_vars > 0 && selection.vars.len() != required_vars {
        return Err(MappingRejection::VariableCountMismatch {
            required: required_vars,
            selected: selection.vars.len(),
        });
    }

    // Absolute 1-based row of the first data row, directly under the header.
    let data_first_row = header.start_row_index + 1;
    let start_row = bounds.start.unwrap_or(data_first_row);
    let end_row = bounds.end.unwrap_or(header.start_row_index + header.row_count);

    let data_start_idx = start_row.saturating_sub(data_first_row) as i64;
    let data_end_idx =
        (end_row as i64 - data_first_row as i64).min(header.row_count as i64 - 1);
    if data_start_idx > data_end_idx {
        return Err(MappingRejection::EmptyRowRange);
    }

    if batch_size > MAX_ENTRIES_PER_PAYLOAD {
        return Err(MappingRejection::BatchSizeExceeded { size: batch_size });
    }

    Ok(MappingDescriptor {
        phone_index,
        var_indices: selection.vars.clone(),
        data_start_idx: data_start_idx as usize,
        data_end_idx: data_end_idx as usize,
        batch_size,
    })
}
