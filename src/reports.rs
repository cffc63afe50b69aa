//! Report tables, their filter criteria, and the export stub.
//!
//! Both reports currently return fixed sample rows. The filter structs are
//! complete so the forms can hand over typed criteria, but the generators do
//! not look at them yet.

use std::fmt;

use crate::models::{
    Area, CentreType, Day, Gender, Grade, Language, PreacherCategory, SatsangType, StateName,
    TimeSlot, Zone,
};

pub const AVERAGE_SANGAT_COLUMNS: [&str; 10] = [
    "Zone",
    "State",
    "Area",
    "Name of Centre",
    "Sundays",
    "Wednesday",
    "Thursday",
    "Other Weekdays",
    "English",
    "Baal Satsang",
];

pub const CENTRE_LISTING_COLUMNS: [&str; 5] = ["S.No", "Zone", "State", "Area", "Name of Centre"];

/// Shown in place of an Average Sangat table that has not been generated.
pub const EMPTY_REPORT_MESSAGE: &str =
    "No data available. Use the filters above and click 'Generate Report' to view data.";

/// Shown on the Reports page until a report is picked in the sidebar.
pub const SELECT_REPORT_MESSAGE: &str = "Please select a report type from the sidebar.";

const SAMPLE_CENTRES: [(&str, &str, &str, &str); 3] = [
    ("Zone-2", "Punjab", "Area A", "Centre X"),
    ("Zone-2", "Punjab", "Area B", "Centre Y"),
    ("Zone-3", "Haryana", "Area C", "Centre Z"),
];

/// Sundays, Wednesday, Thursday, Other Weekdays, English, Baal Satsang.
const SAMPLE_AVERAGES: [[u32; 6]; 3] = [
    [50, 30, 35, 20, 40, 25],
    [45, 25, 30, 15, 35, 20],
    [40, 20, 25, 10, 30, 15],
];

/// A rendered report: column headers plus stringly rows ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn empty(columns: &[&'static str]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Values of one column, by header name.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|column| *column == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or_default())
                .collect(),
        )
    }
}

/// Inclusive min/max bounds on a sangat count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl Default for CountRange {
    fn default() -> Self {
        Self { min: 0, max: 1000 }
    }
}

/// Advanced filters offered on the Average Sangat report. `None` means "All".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AverageSangatFilters {
    pub year: u32,
    pub satsang_type: SatsangType,
    pub language: Option<Language>,
    pub time_slot: Option<TimeSlot>,
    pub zone: Option<Zone>,
    pub state: Option<StateName>,
    pub area: Option<Area>,
    pub day: Option<Day>,
    pub preacher_type: Option<PreacherCategory>,
}

impl Default for AverageSangatFilters {
    fn default() -> Self {
        Self {
            year: crate::config::DEFAULT_FIRST_YEAR,
            satsang_type: SatsangType::Main,
            language: None,
            time_slot: None,
            zone: None,
            state: None,
            area: None,
            day: None,
            preacher_type: None,
        }
    }
}

/// Advanced filters offered on the Centre Listing report. `None` and empty
/// strings mean "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CentreListingFilters {
    pub zone: Option<Zone>,
    pub state: Option<StateName>,
    pub area: Option<Area>,
    pub centre_name: String,
    pub centre_type: Option<CentreType>,
    pub satsang_type: Option<SatsangType>,
    pub language: Option<Language>,
    pub day: Option<Day>,
    pub time_slot: Option<TimeSlot>,
    pub preacher_type: Option<PreacherCategory>,
    pub preacher_gender: Option<Gender>,
    pub preacher_grade: Option<Grade>,
    pub preacher_name: String,
    pub male: CountRange,
    pub female: CountRange,
    pub children: CountRange,
}

/// Average attendance per centre. Returns the sample rows; `filters` are not
/// applied.
pub fn average_sangat_report(filters: &AverageSangatFilters) -> ReportTable {
    log::debug!("average sangat report requested with {filters:?}");
    let rows = SAMPLE_CENTRES
        .iter()
        .zip(SAMPLE_AVERAGES.iter())
        .map(|((zone, state, area, centre), averages)| {
            let mut row = vec![
                zone.to_string(),
                state.to_string(),
                area.to_string(),
                centre.to_string(),
            ];
            row.extend(averages.iter().map(u32::to_string));
            row
        })
        .collect();
    ReportTable {
        columns: AVERAGE_SANGAT_COLUMNS.to_vec(),
        rows,
    }
}

/// Numbered list of centres. Returns the sample rows; `filters` are not
/// applied.
pub fn centre_listing_report(filters: &CentreListingFilters) -> ReportTable {
    log::debug!("centre listing report requested with {filters:?}");
    let rows = SAMPLE_CENTRES
        .iter()
        .enumerate()
        .map(|(idx, (zone, state, area, centre))| {
            vec![
                (idx + 1).to_string(),
                zone.to_string(),
                state.to_string(),
                area.to_string(),
                centre.to_string(),
            ]
        })
        .collect();
    ReportTable {
        columns: CENTRE_LISTING_COLUMNS.to_vec(),
        rows,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Excel,
    Pdf,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Excel => f.write_str("Excel"),
            ExportFormat::Pdf => f.write_str("PDF"),
        }
    }
}

/// Acknowledge an export request. No file is written.
pub fn export_report(table: &ReportTable, format: ExportFormat) -> String {
    log::info!("export to {format} requested for {} rows", table.len());
    format!("Report exported to {format}!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_sangat_has_three_rows_and_ten_columns() {
        let table = average_sangat_report(&AverageSangatFilters::default());
        assert_eq!(table.len(), 3);
        assert_eq!(table.columns, AVERAGE_SANGAT_COLUMNS.to_vec());
        assert!(table.rows.iter().all(|row| row.len() == 10));
        assert_eq!(table.column("Sundays"), Some(vec!["50", "45", "40"]));
        assert_eq!(table.column("Baal Satsang"), Some(vec!["25", "20", "15"]));
    }

    #[test]
    fn centre_listing_rows_are_numbered() {
        let table = centre_listing_report(&CentreListingFilters::default());
        assert_eq!(table.column("S.No"), Some(vec!["1", "2", "3"]));
        assert_eq!(
            table.column("Name of Centre"),
            Some(vec!["Centre X", "Centre Y", "Centre Z"])
        );
    }

    #[test]
    fn unknown_column_is_none() {
        let table = ReportTable::empty(&CENTRE_LISTING_COLUMNS);
        assert!(table.is_empty());
        assert_eq!(table.column("Year"), None);
        assert_eq!(table.column("Zone"), Some(Vec::new()));
    }

    #[test]
    fn export_only_acknowledges() {
        let table = ReportTable::empty(&AVERAGE_SANGAT_COLUMNS);
        assert_eq!(export_report(&table, ExportFormat::Excel), "Report exported to Excel!");
        assert_eq!(export_report(&table, ExportFormat::Pdf), "Report exported to PDF!");
    }
}
