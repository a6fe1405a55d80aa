//! PDF date string parsing.

use chrono::{NaiveDate, NaiveDateTime};

use super::patterns::PDF_DATE;
use super::FieldExtractor;

/// Extractor for `D:YYYYMMDDHHmmSS` date strings.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDateTime;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = PDF_DATE.captures(text)?;
        let field = |i: usize| caps[i].parse::<u32>().ok();

        let year = caps[1].parse::<i32>().ok()?;
        NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?.and_hms_opt(field(4)?, field(5)?, field(6)?)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Parse a PDF metadata date. Any timezone suffix is ignored.
pub fn parse_pdf_date(raw: &str) -> Option<NaiveDateTime> {
    DateExtractor::new().extract(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_pdf_date("D:20230615143000"),
            Some(datetime(2023, 6, 15, 14, 30, 0))
        );
    }

    #[test]
    fn test_timezone_suffix_is_ignored() {
        assert_eq!(
            parse_pdf_date("D:20230615143000-03'00'"),
            Some(datetime(2023, 6, 15, 14, 30, 0))
        );
        assert_eq!(
            parse_pdf_date("D:20231231235959Z"),
            Some(datetime(2023, 12, 31, 23, 59, 59))
        );
    }

    #[test]
    fn test_malformed_dates_are_absent() {
        assert_eq!(parse_pdf_date("D:2023061514300"), None);
        assert_eq!(parse_pdf_date("20230615143000"), None);
        assert_eq!(parse_pdf_date(" D:20230615143000"), None);
        assert_eq!(parse_pdf_date(""), None);
    }

    #[test]
    fn test_calendar_invalid_dates_are_absent() {
        assert_eq!(parse_pdf_date("D:20231315143000"), None);
        assert_eq!(parse_pdf_date("D:20230230143000"), None);
        assert_eq!(parse_pdf_date("D:20230615250000"), None);
    }
}
