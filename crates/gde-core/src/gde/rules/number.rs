//! GDE document number parsing.
//!
//! A number reads `type-year-number[-extra]-agency-division#direction`,
//! e.g. `IF-2023-12345678-GDEBA-DGTYCDPAGP#MJGP`. Divisions longer than
//! the plain division width carry a fixed-width section code in front.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrammarError;
use crate::models::config::NumberGrammar;

const PRIMARY_SEPARATOR: char = '-';
const AREA_SEPARATOR: char = '#';

/// The issuing area of a document: `[section]division#direction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Section code, present when the division is not of the plain width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Division code, without the section prefix.
    pub division: String,
    /// Direction code.
    pub direction: String,
}

impl Area {
    /// Parse `division#direction`, stripping a section prefix if present.
    pub fn parse(raw: &str, grammar: &NumberGrammar) -> Result<Self, GrammarError> {
        let parts: Vec<&str> = raw.split(AREA_SEPARATOR).collect();

        let (division, direction) = match parts[..] {
            [_] => {
                return Err(GrammarError::MissingAreaSeparator {
                    area: raw.to_string(),
                })
            }
            [division, direction] if !division.is_empty() && !direction.is_empty() => {
                (division, direction)
            }
            _ => {
                return Err(GrammarError::AreaArity {
                    area: raw.to_string(),
                })
            }
        };

        let length = division.chars().count();
        let (section, division) = if length != grammar.division_width && length > grammar.section_width {
            let split = division
                .char_indices()
                .nth(grammar.section_width)
                .map(|(i, _)| i)
                .unwrap_or(division.len());
            (Some(division[..split].to_string()), division[split..].to_string())
        } else {
            (None, division.to_string())
        };

        Ok(Self {
            section,
            division,
            direction: direction.to_string(),
        })
    }

    pub fn has_section(&self) -> bool {
        self.section.is_some()
    }

    /// Short department label: `"[SECTION ]XX YYYY"`, where `XX` is the
    /// first two characters of the division.
    pub fn abbreviated(&self) -> String {
        let split = self
            .division
            .char_indices()
            .nth(2)
            .map(|(i, _)| i)
            .unwrap_or(self.division.len());
        let (head, tail) = self.division.split_at(split);

        match &self.section {
            Some(section) => format!("{} {} {}", section, head, tail),
            None => format!("{} {}", head, tail),
        }
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.section.as_deref().unwrap_or(""),
            self.division,
            AREA_SEPARATOR,
            self.direction
        )
    }
}

/// Components shared by every document number variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFields {
    /// Document type acronym (IF, NO, RESOL, ...).
    pub doc_type: String,
    pub year: String,
    /// Sequential number within the year.
    pub number: String,
    /// Issuing agency code.
    pub agency: String,
    pub area: Area,
}

/// A parsed GDE document number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum DocumentNumber {
    /// `type-year-number-agency-area`.
    Standard(NumberFields),
    /// `type-year-number-extra-agency-area`.
    Special {
        #[serde(flatten)]
        fields: NumberFields,
        extra: String,
    },
}

impl DocumentNumber {
    /// Parse with the default grammar widths.
    pub fn parse(raw: &str) -> Result<Self, GrammarError> {
        Self::parse_with(raw, &NumberGrammar::default())
    }

    pub fn parse_with(raw: &str, grammar: &NumberGrammar) -> Result<Self, GrammarError> {
        let raw = raw.trim();
        let parts: Vec<&str> = raw.split(PRIMARY_SEPARATOR).collect();
        let found = parts.len();

        if found != 5 && found != 6 {
            return Err(GrammarError::Arity {
                raw: raw.to_string(),
                found,
            });
        }
        if let Some(position) = parts.iter().position(|p| p.is_empty()) {
            return Err(GrammarError::EmptyComponent {
                raw: raw.to_string(),
                position,
            });
        }

        let area = Area::parse(parts[found - 1], grammar)?;
        let fields = |doc_type: &str, year: &str, number: &str, agency: &str| NumberFields {
            doc_type: doc_type.to_string(),
            year: year.to_string(),
            number: number.to_string(),
            agency: agency.to_string(),
            area,
        };

        match parts[..] {
            [doc_type, year, number, agency, _] => {
                Ok(Self::Standard(fields(doc_type, year, number, agency)))
            }
            [doc_type, year, number, extra, agency, _] => Ok(Self::Special {
                fields: fields(doc_type, year, number, agency),
                extra: extra.to_string(),
            }),
            _ => Err(GrammarError::Arity {
                raw: raw.to_string(),
                found,
            }),
        }
    }

    pub fn fields(&self) -> &NumberFields {
        match self {
            Self::Standard(fields) => fields,
            Self::Special { fields, .. } => fields,
        }
    }

    pub fn doc_type(&self) -> &str {
        &self.fields().doc_type
    }

    pub fn year(&self) -> &str {
        &self.fields().year
    }

    pub fn number(&self) -> &str {
        &self.fields().number
    }

    /// The middle field of special numbers.
    pub fn extra(&self) -> Option<&str> {
        match self {
            Self::Standard(_) => None,
            Self::Special { extra, .. } => Some(extra),
        }
    }

    pub fn agency(&self) -> &str {
        &self.fields().agency
    }

    pub fn area(&self) -> &Area {
        &self.fields().area
    }

    pub fn section(&self) -> Option<&str> {
        self.area().section.as_deref()
    }

    pub fn division(&self) -> &str {
        &self.area().division
    }

    pub fn direction(&self) -> &str {
        &self.area().direction
    }

    pub fn has_section(&self) -> bool {
        self.area().has_section()
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Self::Special { .. })
    }

    /// Short department label, see [`Area::abbreviated`].
    pub fn abbreviated_department(&self) -> String {
        self.area().abbreviated()
    }
}

impl FromStr for DocumentNumber {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields();
        write!(f, "{}-{}-{}-", fields.doc_type, fields.year, fields.number)?;
        if let Some(extra) = self.extra() {
            write!(f, "{}-", extra)?;
        }
        write!(f, "{}-{}", fields.agency, fields.area)
    }
}
