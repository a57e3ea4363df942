/// Local JSON file source using the spreadsheet payload shape.
pub mod json_file;

#[cfg(feature = "http")]
/// HTTP source for JSON-published spreadsheets.
pub mod sheet;
