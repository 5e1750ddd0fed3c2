//! Query-side types: the period/filter pair sent as `con:FiltroConsulta`.

use chrono::NaiveDate;

use crate::core::error::{ValidationError, VerifactuError};

/// PeriodoImputacion — the fiscal year and month a query is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPeriod {
    year: u16,
    month: u8,
}

impl QueryPeriod {
    pub fn new(year: u16, month: u8) -> Result<Self, VerifactuError> {
        if !(2000..=9999).contains(&year) {
            return Err(VerifactuError::invalid("year", "must be between 2000 and 9999"));
        }
        if !(1..=12).contains(&month) {
            return Err(VerifactuError::invalid("month", "must be between 1 and 12"));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn ejercicio(&self) -> String {
        self.year.to_string()
    }

    pub fn periodo(&self) -> String {
        format!("{:02}", self.month)
    }
}

/// FiltroConsulta — narrows a query to a period plus optional extra criteria.
#[derive(Debug, Clone)]
pub struct QueryFilter {
    pub period: QueryPeriod,
    pub invoice_number: Option<String>,
    pub counterparty_nif: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub external_reference: Option<String>,
    pub pagination_key: Option<String>,
    pub show_issuer_name: bool,
    pub show_computer_system: bool,
}

impl QueryFilter {
    pub fn new(period: QueryPeriod) -> Self {
        Self {
            period,
            invoice_number: None,
            counterparty_nif: None,
            date_from: None,
            date_to: None,
            external_reference: None,
            pagination_key: None,
            show_issuer_name: true,
            show_computer_system: false,
        }
    }

    pub fn invoice_number(mut self, value: impl Into<String>) -> Self {
        self.invoice_number = Some(value.into());
        self
    }

    pub fn counterparty_nif(mut self, value: impl Into<String>) -> Self {
        self.counterparty_nif = Some(value.into());
        self
    }

    pub fn date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn external_reference(mut self, value: impl Into<String>) -> Self {
        self.external_reference = Some(value.into());
        self
    }

    pub fn pagination_key(mut self, value: impl Into<String>) -> Self {
        self.pagination_key = Some(value.into());
        self
    }

    pub fn show_issuer_name(mut self, value: bool) -> Self {
        self.show_issuer_name = value;
        self
    }

    pub fn show_computer_system(mut self, value: bool) -> Self {
        self.show_computer_system = value;
        self
    }

    pub fn validate(&self) -> Result<(), VerifactuError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(VerifactuError::InvalidModel(vec![ValidationError::new(
                    "date_from",
                    "must not be after date_to",
                )]));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_formats_ejercicio_and_periodo() {
        let period = QueryPeriod::new(2025, 6).unwrap();
        assert_eq!(period.ejercicio(), "2025");
        assert_eq!(period.periodo(), "06");
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert!(QueryPeriod::new(2025, 13).is_err());
    }

    #[test]
    fn rejects_inverted_date_range() {
        let period = QueryPeriod::new(2025, 6).unwrap();
        let filter = QueryFilter::new(period).date_range(
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        );
        assert!(filter.validate().is_err());
    }
}
