// rulecraft-core/src/domain/validation.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::error::DomainError;

/// Raw answer of the validation execution service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_rows: usize,
    pub pass_count: usize,
    /// Row index -> predicate satisfied.
    #[serde(default)]
    pub row_verdicts: BTreeMap<usize, bool>,
}

impl ValidationReport {
    /// Builds a report from the list of passing row indices (the `list_good_rows` shape).
    pub fn from_passing_rows(total_rows: usize, passing: &[usize]) -> Self {
        let mut row_verdicts: BTreeMap<usize, bool> = (0..total_rows).map(|i| (i, false)).collect();
        for idx in passing {
            if *idx < total_rows {
                row_verdicts.insert(*idx, true);
            }
        }
        let pass_count = row_verdicts.values().filter(|v| **v).count();
        Self {
            total_rows,
            pass_count,
            row_verdicts,
        }
    }
}

/// Result of running the current draft's SQL, tied to the context that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub table: String,
    pub column: String,
    pub sql: String,
    pub total_rows: usize,
    pub pass_count: usize,
    pub row_verdicts: BTreeMap<usize, bool>,
}

impl ValidationOutcome {
    pub fn from_report(
        report: ValidationReport,
        table: impl Into<String>,
        column: impl Into<String>,
        sql: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if report.pass_count > report.total_rows {
            return Err(DomainError::InconsistentOutcome {
                total_rows: report.total_rows,
                pass_count: report.pass_count,
            });
        }
        Ok(Self {
            table: table.into(),
            column: column.into(),
            sql: sql.into(),
            total_rows: report.total_rows,
            pass_count: report.pass_count,
            row_verdicts: report.row_verdicts,
        })
    }

    pub fn fail_count(&self) -> usize {
        self.total_rows - self.pass_count
    }

    pub fn percentage(&self) -> f64 {
        pass_percentage(self.pass_count, self.total_rows)
    }

    /// Pass rate truncated to one decimal, e.g. `"94.0"`.
    pub fn display_percentage(&self) -> String {
        format_tenths(pass_tenths(self.pass_count, self.total_rows))
    }

    /// Verdict for one sampled row, `None` when the service did not report it.
    pub fn row_passes(&self, row: usize) -> Option<bool> {
        self.row_verdicts.get(&row).copied()
    }

    pub fn is_fresh_for(&self, table: &str, column: &str, sql: &str) -> bool {
        self.table == table && self.column == column && self.sql == sql
    }
}

/// `100 * pass / total`, defined as 0 for an empty sample.
pub fn pass_percentage(pass_count: usize, total_rows: usize) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }
    pass_count as f64 * 100.0 / total_rows as f64
}

/// Pass rate in tenths of a percent, truncated. Integer arithmetic keeps
/// exact ratios such as 47/50 from drifting below 94.0.
pub fn pass_tenths(pass_count: usize, total_rows: usize) -> u64 {
    if total_rows == 0 {
        return 0;
    }
    (pass_count as u64 * 1000) / total_rows as u64
}

fn format_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}
