//! Common regex patterns for GDE field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Archive identifiers found in reference text
    pub static ref SIGEA_NUMBER: Regex = Regex::new(
        r"^\d{5}-\d{1,2}-\d{4}$"
    ).unwrap();

    pub static ref SITA_NUMBER: Regex = Regex::new(
        r"^\d{5}SITA\d{6}[A-Z]?$"
    ).unwrap();

    pub static ref ARCHIVE_NUMBER: Regex = Regex::new(
        r"\b(?:\d{5}-\d{1,2}-\d{4}|\d{5}SITA\d{6}[A-Z]?)\b"
    ).unwrap();

    // Signature caption body: SURNAME, Name Secondname ...
    pub static ref SIGNER_NAME: Regex = Regex::new(
        r"(?s)^([A-ZÁÉÍÓÚÜÑ]+(?: [A-ZÁÉÍÓÚÜÑ]+)*),?\s+([A-ZÁÉÍÓÚÜÑ][a-záéíóúüñ]*)(?:\s+([A-ZÁÉÍÓÚÜÑ][a-záéíóúüñ]*))?(?:\s.*)?$"
    ).unwrap();

    // PDF date string: D:YYYYMMDDHHmmSS[timezone]
    pub static ref PDF_DATE: Regex = Regex::new(
        r"^D:(\d{4})(\d{2})(\d{2})(\d{2})(\d{2})(\d{2})"
    ).unwrap();
}
