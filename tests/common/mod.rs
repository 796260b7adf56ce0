//! Shared fixtures for integration tests.

#![allow(dead_code)]

use admission_dashboard::{Cell, RawTable};
use rust_xlsxwriter::Workbook;

/// Cell content written into generated workbooks.
pub enum XlsxCell<'a> {
    Text(&'a str),
    Number(f64),
    Blank,
}

/// Build an in-memory .xlsx whose first sheet holds `header` and `rows`.
pub fn xlsx_bytes(header: &[&str], rows: &[Vec<XlsxCell>]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in header.iter().enumerate() {
        if !name.is_empty() {
            worksheet.write_string(0, col as u16, *name).unwrap();
        }
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                XlsxCell::Text(s) => {
                    worksheet.write_string(r, col as u16, *s).unwrap();
                }
                XlsxCell::Number(n) => {
                    worksheet.write_number(r, col as u16, *n).unwrap();
                }
                XlsxCell::Blank => {}
            }
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// The three-row admission example used across tests.
pub const SCENARIO_CSV: &str = "Source,Confirmed\nonline,yes\nOnline,No\nReferral,YES\n";

/// Admission records with a spread of sources, statuses and duplicates.
pub fn admissions_csv() -> String {
    let mut csv = String::from(" Admission Source ,Confirmed ,Year\n");
    let rows = [
        ("web", "yes", 2023),
        ("Web ", "no", 2023),
        ("referral", "Yes", 2024),
        ("AGENT", "yes", 2024),
        ("agent", "", 2024),
        ("walk-in", "no", 2023),
        ("web", "yes", 2023),
        ("social media", "yes", 2024),
        ("newspaper", "no", 2022),
        ("web", "YES", 2024),
    ];
    for (source, confirmed, year) in rows {
        csv.push_str(&format!("{},{},{}\n", source, confirmed, year));
    }
    csv
}

/// Table of already-normalized (source, confirm) pairs.
pub fn pair_table(pairs: &[(&str, &str)]) -> RawTable {
    RawTable::new(
        vec!["Source".to_string(), "Confirmed".to_string()],
        pairs
            .iter()
            .map(|(s, c)| vec![Cell::text(*s), Cell::text(*c)])
            .collect(),
    )
}
