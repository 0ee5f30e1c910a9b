// rulecraft-core/src/infrastructure/fixtures.rs
//
// Built-in demo data: the `meter_data` table and three seed rules. Rows are
// generated deterministically so validation results are reproducible.

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::domain::rule::{RuleCategory, RuleRecord, validation_sql_for};
use crate::domain::table::{ColumnProfile, TableData};

pub const METER_DATA: &str = "meter_data";
pub const METER_DATA_DESCRIPTION: &str = "Meter reading data with customer information";

const SAMPLE_ROWS: usize = 50;
const PINCODES: [&str; 5] = ["110001", "110002", "110003", "110004", "110005"];
const CUSTOMER_TYPES: [&str; 4] = ["Residential", "Commercial", "Industrial", "Government"];
const STATUSES: [&str; 3] = ["Active", "Inactive", "Suspended"];

pub fn meter_data() -> TableData {
    let columns = vec![
        ColumnProfile::new("id", "INTEGER").with_stats(1000, 1000, 0),
        ColumnProfile::new("meter_id", "VARCHAR").with_stats(1000, 850, 0),
        ColumnProfile::new("reading_date", "DATE").with_stats(1000, 365, 5),
        ColumnProfile::new("consumption", "DECIMAL").with_stats(1000, 950, 12),
        ColumnProfile::new("pincode", "VARCHAR").with_stats(1000, 45, 8),
        ColumnProfile::new("customer_type", "VARCHAR").with_stats(1000, 4, 2),
        ColumnProfile::new("status", "VARCHAR").with_stats(1000, 3, 0),
        ColumnProfile::new("temperature", "DECIMAL").with_stats(1000, 180, 15),
    ];

    let rows = (0..SAMPLE_ROWS)
        .map(|i| {
            let consumption = 100.0 + ((i * 37) % 500) as f64 + (i % 4) as f64 * 0.25;
            let temperature = 10.0 + ((i * 13) % 400) as f64 / 10.0;
            vec![
                json!(i + 1),
                json!(format!("MTR_{:04}", i + 1)),
                json!(format!("2024-{:02}-{:02}", i % 12 + 1, (i * 7) % 28 + 1)),
                json!(consumption),
                json!(PINCODES[i % PINCODES.len()]),
                json!(CUSTOMER_TYPES[(i * 3) % CUSTOMER_TYPES.len()]),
                json!(STATUSES[(i / 2) % STATUSES.len()]),
                json!(temperature),
            ]
        })
        .collect();

    TableData {
        name: METER_DATA.to_string(),
        columns,
        rows,
    }
}

pub fn seed_rules() -> Vec<RuleRecord> {
    let seed = |id, name: &str, column: &str, category, sql: &str, day| RuleRecord {
        id,
        name: name.to_string(),
        table_name: METER_DATA.to_string(),
        column_name: column.to_string(),
        category,
        sql_user: sql.to_string(),
        sql_validation: validation_sql_for(sql),
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).single(),
    };

    vec![
        seed(
            1,
            "Consumption should be between 0 and 1000",
            "consumption",
            RuleCategory::Error,
            "SELECT * FROM meter_data WHERE consumption BETWEEN 0 AND 1000",
            15,
        ),
        seed(
            2,
            "Pincode should not be null",
            "pincode",
            RuleCategory::Warning,
            "SELECT * FROM meter_data WHERE pincode IS NOT NULL",
            16,
        ),
        seed(
            3,
            "Customer type should be valid",
            "customer_type",
            RuleCategory::Error,
            "SELECT * FROM meter_data WHERE customer_type IN ('Residential', 'Commercial', 'Industrial', 'Government')",
            17,
        ),
    ]
}
