use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::amount::{within_tolerance, Amount, Rate};
use crate::core::enums::{OperationClass, RegimeCode, TaxKind};
use crate::core::error::VerifactuError;

/// DetalleDesglose — a single tax breakdown line of a registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    tax_kind: TaxKind,
    regime_code: RegimeCode,
    operation_class: OperationClass,
    base_amount: Amount,
    rate: Option<Rate>,
    tax_amount: Option<Amount>,
}

impl BreakdownLine {
    pub fn builder(
        tax_kind: TaxKind,
        regime_code: RegimeCode,
        operation_class: OperationClass,
    ) -> BreakdownLineBuilder {
        BreakdownLineBuilder::new(tax_kind, regime_code, operation_class)
    }

    pub fn tax_kind(&self) -> TaxKind {
        self.tax_kind
    }

    pub fn regime_code(&self) -> RegimeCode {
        self.regime_code
    }

    pub fn operation_class(&self) -> OperationClass {
        self.operation_class
    }

    pub fn base_amount(&self) -> &Amount {
        &self.base_amount
    }

    pub fn rate(&self) -> Option<&Rate> {
        self.rate.as_ref()
    }

    pub fn tax_amount(&self) -> Option<&Amount> {
        self.tax_amount.as_ref()
    }
}

/// Fluent builder for [`BreakdownLine`], mirroring the construct-then-validate
/// pattern used across the record builders.
pub struct BreakdownLineBuilder {
    tax_kind: TaxKind,
    regime_code: RegimeCode,
    operation_class: OperationClass,
    base_amount: Option<String>,
    rate: Option<String>,
    tax_amount: Option<String>,
}

impl BreakdownLineBuilder {
    pub fn new(tax_kind: TaxKind, regime_code: RegimeCode, operation_class: OperationClass) -> Self {
        Self {
            tax_kind,
            regime_code,
            operation_class,
            base_amount: None,
            rate: None,
            tax_amount: None,
        }
    }

    pub fn base_amount(mut self, value: impl Into<String>) -> Self {
        self.base_amount = Some(value.into());
        self
    }

    pub fn rate(mut self, value: impl Into<String>) -> Self {
        self.rate = Some(value.into());
        self
    }

    pub fn tax_amount(mut self, value: impl Into<String>) -> Self {
        self.tax_amount = Some(value.into());
        self
    }

    pub fn build(self) -> Result<BreakdownLine, VerifactuError> {
        let mut errors = Vec::new();

        let base_amount = match self.base_amount {
            Some(raw) => match Amount::parse(raw) {
                Ok(amount) => Some(amount),
                Err(message) => {
                    errors.push(crate::core::error::ValidationError::new("base_amount", message));
                    None
                }
            },
            None => {
                errors.push(crate::core::error::ValidationError::new(
                    "base_amount",
                    "is required",
                ));
                None
            }
        };

        let rate = match self.rate {
            Some(raw) => match Rate::parse(raw) {
                Ok(rate) => Some(rate),
                Err(message) => {
                    errors.push(crate::core::error::ValidationError::new("rate", message));
                    None
                }
            },
            None => None,
        };

        let tax_amount = match self.tax_amount {
            Some(raw) => match Amount::parse(raw) {
                Ok(amount) => Some(amount),
                Err(message) => {
                    errors.push(crate::core::error::ValidationError::new("tax_amount", message));
                    None
                }
            },
            None => None,
        };

        if self.operation_class.is_subject() {
            if rate.is_none() {
                errors.push(crate::core::error::ValidationError::new(
                    "rate",
                    "is required for subject operation classes",
                ));
            }
            if tax_amount.is_none() {
                errors.push(crate::core::error::ValidationError::new(
                    "tax_amount",
                    "is required for subject operation classes",
                ));
            }
        } else {
            if rate.is_some() {
                errors.push(crate::core::error::ValidationError::new(
                    "rate",
                    "must be absent for non-subject or exempt operation classes",
                ));
            }
            if tax_amount.is_some() {
                errors.push(crate::core::error::ValidationError::new(
                    "tax_amount",
                    "must be absent for non-subject or exempt operation classes",
                ));
            }
        }

        if let (Some(base), Some(rate), Some(tax)) = (&base_amount, &rate, &tax_amount) {
            let expected = base.to_decimal() * rate.to_decimal() / dec!(100);
            let expected = expected.round_dp(2);
            if !within_tolerance(tax.to_decimal(), expected, dec!(0.02)) {
                errors.push(crate::core::error::ValidationError::new(
                    "tax_amount",
                    format!(
                        "expected approximately {expected} given base {base} and rate {rate}, got {tax}"
                    ),
                ));
            }
        }

        if !errors.is_empty() {
            return Err(VerifactuError::InvalidModel(errors));
        }

        Ok(BreakdownLine {
            tax_kind: self.tax_kind,
            regime_code: self.regime_code,
            operation_class: self.operation_class,
            base_amount: base_amount.expect("checked above"),
            rate,
            tax_amount,
        })
    }
}

/// Sum a breakdown's tax amounts exactly (no tolerance — totals must match to the cent).
pub fn sum_tax_amounts(breakdown: &[BreakdownLine]) -> Decimal {
    breakdown
        .iter()
        .filter_map(|line| line.tax_amount())
        .map(|amount| amount.to_decimal())
        .sum()
}

/// Sum a breakdown's base amounts.
pub fn sum_base_amounts(breakdown: &[BreakdownLine]) -> Decimal {
    breakdown.iter().map(|line| line.base_amount().to_decimal()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_line_requires_rate_and_tax() {
        let err = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
            .base_amount("100.00")
            .build()
            .unwrap_err();
        match err {
            VerifactuError::InvalidModel(errs) => assert_eq!(errs.len(), 2),
            _ => panic!("expected InvalidModel"),
        }
    }

    #[test]
    fn exempt_line_forbids_rate_and_tax() {
        let err = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Exempt1)
            .base_amount("100.00")
            .rate("21.00")
            .tax_amount("21.00")
            .build()
            .unwrap_err();
        match err {
            VerifactuError::InvalidModel(errs) => assert_eq!(errs.len(), 2),
            _ => panic!("expected InvalidModel"),
        }
    }

    #[test]
    fn tax_amount_within_tolerance_accepted() {
        let line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
            .base_amount("10.00")
            .rate("21.00")
            .tax_amount("2.10")
            .build()
            .unwrap();
        assert_eq!(line.tax_amount().unwrap().as_str(), "2.10");
    }

    #[test]
    fn tax_amount_outside_tolerance_rejected() {
        let err = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
            .base_amount("10.00")
            .rate("21.00")
            .tax_amount("3.00")
            .build()
            .unwrap_err();
        assert!(matches!(err, VerifactuError::InvalidModel(_)));
    }
}
