//! Date ranges for filtered listings and reports

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

/// Date format expected by the report endpoints.
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Date format expected by the movement range endpoints.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangoFechas {
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
}

impl RangoFechas {
    /// Creates a range, swapping the bounds if they are reversed.
    pub fn new(inicio: NaiveDate, fin: NaiveDate) -> Self {
        if inicio <= fin {
            Self {
                fecha_inicio: inicio,
                fecha_fin: fin,
            }
        } else {
            Self {
                fecha_inicio: fin,
                fecha_fin: inicio,
            }
        }
    }

    /// Parses both bounds with [`parse_fecha`].
    pub fn parse(inicio: &str, fin: &str) -> Option<Self> {
        Some(Self::new(parse_fecha(inicio)?, parse_fecha(fin)?))
    }

    /// Query parameters in the report format (`dd/MM/yyyy`).
    pub fn report_params(&self) -> [(&'static str, String); 2] {
        self.params(REPORT_DATE_FORMAT)
    }

    /// Query parameters in ISO format (`yyyy-MM-dd`).
    pub fn iso_params(&self) -> [(&'static str, String); 2] {
        self.params(ISO_DATE_FORMAT)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.fecha_inicio <= date && date <= self.fecha_fin
    }

    fn params(&self, format: &str) -> [(&'static str, String); 2] {
        [
            ("fechaInicio", self.fecha_inicio.format(format).to_string()),
            ("fechaFin", self.fecha_fin.format(format).to_string()),
        ]
    }
}

/// Parses a day written as `dd/MM/yyyy` or `yyyy-MM-dd`.
pub fn parse_fecha(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, REPORT_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, ISO_DATE_FORMAT))
        .ok()
}
