//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

use bulksms_rs::config::CampaignSettings;
use bulksms_rs::{CellValue, ColumnSelection, HeaderMeta};

/// Text cell shorthand
pub fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

/// Factory for the spreadsheet selection used across pipeline tests:
/// header `["Name", "Phone", "OTP"]` over three data rows.
pub struct SheetFactory;

impl SheetFactory {
    /// Header metadata for a selection whose header sits at sheet row 1.
    pub fn header_meta(data_rows: usize) -> HeaderMeta {
        HeaderMeta {
            row_count: data_rows,
            column_count: 3,
            start_row_index: 1,
            column_index: 0,
        }
    }

    /// Three data rows whose phone numbers are all distinct after
    /// normalization.
    pub fn rows() -> Vec<Vec<CellValue>> {
        vec![
            vec![text("Ann"), text("9198765"), text("1234")],
            vec![text("Bob"), text("0091987651"), text("5678")],
            vec![text("Ann dup"), text("+91-9876500"), text("1234")],
        ]
    }

    /// Phone column 1, one variable column (the OTP column).
    pub fn selection() -> ColumnSelection {
        ColumnSelection {
            phone: Some(1),
            vars: vec![2],
        }
    }
}

/// Factory for campaign settings snapshots
pub struct SettingsFactory;

impl SettingsFactory {
    /// Complete settings with a one-placeholder template
    pub fn create() -> CampaignSettings {
        CampaignSettings {
            api_key: "test-api-key".to_string(),
            sender_id: "TESTSND".to_string(),
            campaign_id: "camp-1".to_string(),
            template_id: "tpl-1".to_string(),
            country_code: "91".to_string(),
            template: "Your OTP is {#var#}".to_string(),
        }
    }

    /// Settings without a stored template
    pub fn without_template() -> CampaignSettings {
        CampaignSettings {
            template: String::new(),
            ..Self::create()
        }
    }
}
