use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::core::amount::{within_tolerance, Amount};
use crate::core::breakdown::{sum_base_amounts, sum_tax_amounts, BreakdownLine};
use crate::core::enums::{CorrectionFlag, CorrectiveKind, InvoiceType, PreviousRejection};
use crate::core::error::{ValidationError, VerifactuError};
use crate::core::fingerprint::{canonical_date, sha256_hex_upper, GeneratedAt};
use crate::core::identifiers::{InvoiceIdentifier, Recipient};

/// Encadenamiento/RegistroAnterior — the record this one chains from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousRecord {
    pub identifier: InvoiceIdentifier,
    pub fingerprint: String,
}

fn validate_previous_fingerprint(fingerprint: &str) -> Result<(), ValidationError> {
    if fingerprint.len() == 64 && fingerprint.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_lowercase()) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "previous.fingerprint",
            "must be 64 uppercase hexadecimal characters",
        ))
    }
}

/// Shared chain/correction fields common to every record, factored out to
/// avoid repeating the correction/rejection cross-validation in both builders.
struct CommonFields {
    identifier: InvoiceIdentifier,
    previous: Option<PreviousRecord>,
    generated_at: GeneratedAt,
    previous_rejection: Option<PreviousRejection>,
    correction: Option<CorrectionFlag>,
    external_reference: Option<String>,
}

fn validate_common(fields: &CommonFields, errors: &mut Vec<ValidationError>) {
    if let Some(previous) = &fields.previous {
        if let Err(e) = validate_previous_fingerprint(&previous.fingerprint) {
            errors.push(e);
        }
    }

    if let Some(reference) = &fields.external_reference {
        if reference.chars().count() > 60 {
            errors.push(ValidationError::new(
                "external_reference",
                "must be at most 60 characters",
            ));
        }
    }

    if fields.previous_rejection == Some(PreviousRejection::RejectedAndCorrected)
        && fields.correction != Some(CorrectionFlag::Yes)
    {
        errors.push(ValidationError::new(
            "previous_rejection",
            "'X' requires correction to be 'S'",
        ));
    }
    if fields.correction == Some(CorrectionFlag::No)
        && matches!(
            fields.previous_rejection,
            Some(PreviousRejection::Yes) | Some(PreviousRejection::RejectedAndCorrected)
        )
    {
        errors.push(ValidationError::new(
            "correction",
            "'N' cannot coexist with previous_rejection 'S' or 'X'",
        ));
    }
    if fields.correction == Some(CorrectionFlag::Yes) && fields.previous_rejection == Some(PreviousRejection::No) {
        errors.push(ValidationError::new(
            "correction",
            "'S' cannot coexist with previous_rejection 'N'",
        ));
    }
}

/// RegistroAlta — registers a newly issued invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    identifier: InvoiceIdentifier,
    previous: Option<PreviousRecord>,
    fingerprint: String,
    generated_at: GeneratedAt,
    previous_rejection: Option<PreviousRejection>,
    correction: Option<CorrectionFlag>,
    external_reference: Option<String>,

    issuer_name: String,
    invoice_type: InvoiceType,
    description: String,
    recipients: Vec<Recipient>,
    corrective_kind: Option<CorrectiveKind>,
    corrected_invoices: Vec<InvoiceIdentifier>,
    corrected_base_amount: Option<Amount>,
    corrected_tax_amount: Option<Amount>,
    replaced_invoices: Vec<InvoiceIdentifier>,
    breakdown: Vec<BreakdownLine>,
    total_tax_amount: Amount,
    total_amount: Amount,
}

impl RegistrationRecord {
    pub fn identifier(&self) -> &InvoiceIdentifier {
        &self.identifier
    }

    pub fn previous(&self) -> Option<&PreviousRecord> {
        self.previous.as_ref()
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn generated_at(&self) -> GeneratedAt {
        self.generated_at
    }

    pub fn previous_rejection(&self) -> Option<PreviousRejection> {
        self.previous_rejection
    }

    pub fn correction(&self) -> Option<CorrectionFlag> {
        self.correction
    }

    pub fn external_reference(&self) -> Option<&str> {
        self.external_reference.as_deref()
    }

    pub fn issuer_name(&self) -> &str {
        &self.issuer_name
    }

    pub fn invoice_type(&self) -> InvoiceType {
        self.invoice_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn corrective_kind(&self) -> Option<CorrectiveKind> {
        self.corrective_kind
    }

    pub fn corrected_invoices(&self) -> &[InvoiceIdentifier] {
        &self.corrected_invoices
    }

    pub fn corrected_base_amount(&self) -> Option<&Amount> {
        self.corrected_base_amount.as_ref()
    }

    pub fn corrected_tax_amount(&self) -> Option<&Amount> {
        self.corrected_tax_amount.as_ref()
    }

    pub fn replaced_invoices(&self) -> &[InvoiceIdentifier] {
        &self.replaced_invoices
    }

    pub fn breakdown(&self) -> &[BreakdownLine] {
        &self.breakdown
    }

    pub fn total_tax_amount(&self) -> &Amount {
        &self.total_tax_amount
    }

    pub fn total_amount(&self) -> &Amount {
        &self.total_amount
    }

    /// Recompute the canonical registration payload and hash it. Used both
    /// to populate a freshly built record and, by callers, to re-verify one
    /// that arrived over the wire.
    fn compute_fingerprint(
        identifier: &InvoiceIdentifier,
        invoice_type: InvoiceType,
        total_tax_amount: &Amount,
        total_amount: &Amount,
        previous: &Option<PreviousRecord>,
        generated_at: &GeneratedAt,
    ) -> String {
        let payload = format!(
            "IDEmisorFactura={}&NumSerieFactura={}&FechaExpedicionFactura={}&TipoFactura={}&CuotaTotal={}&ImporteTotal={}&Huella={}&FechaHoraHusoGenRegistro={}",
            identifier.issuer_id(),
            identifier.invoice_number(),
            canonical_date(identifier.issue_date()),
            invoice_type.code(),
            total_tax_amount,
            total_amount,
            previous.as_ref().map(|p| p.fingerprint.as_str()).unwrap_or(""),
            generated_at.canonical(),
        );
        sha256_hex_upper(&payload)
    }
}

/// Fluent builder for [`RegistrationRecord`].
pub struct RegistrationBuilder {
    identifier: InvoiceIdentifier,
    issuer_name: String,
    invoice_type: InvoiceType,
    description: Option<String>,
    recipients: Vec<Recipient>,
    corrective_kind: Option<CorrectiveKind>,
    corrected_invoices: Vec<InvoiceIdentifier>,
    corrected_base_amount: Option<String>,
    corrected_tax_amount: Option<String>,
    replaced_invoices: Vec<InvoiceIdentifier>,
    breakdown: Vec<BreakdownLine>,
    total_tax_amount: Option<String>,
    total_amount: Option<String>,
    previous: Option<PreviousRecord>,
    generated_at: Option<GeneratedAt>,
    previous_rejection: Option<PreviousRejection>,
    correction: Option<CorrectionFlag>,
    external_reference: Option<String>,
}

impl RegistrationBuilder {
    pub fn new(identifier: InvoiceIdentifier, issuer_name: impl Into<String>, invoice_type: InvoiceType) -> Self {
        Self {
            identifier,
            issuer_name: issuer_name.into(),
            invoice_type,
            description: None,
            recipients: Vec::new(),
            corrective_kind: None,
            corrected_invoices: Vec::new(),
            corrected_base_amount: None,
            corrected_tax_amount: None,
            replaced_invoices: Vec::new(),
            breakdown: Vec::new(),
            total_tax_amount: None,
            total_amount: None,
            previous: None,
            generated_at: None,
            previous_rejection: None,
            correction: None,
            external_reference: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_recipient(mut self, recipient: impl Into<Recipient>) -> Self {
        self.recipients.push(recipient.into());
        self
    }

    pub fn add_breakdown(mut self, line: BreakdownLine) -> Self {
        self.breakdown.push(line);
        self
    }

    pub fn total_tax_amount(mut self, value: impl Into<String>) -> Self {
        self.total_tax_amount = Some(value.into());
        self
    }

    pub fn total_amount(mut self, value: impl Into<String>) -> Self {
        self.total_amount = Some(value.into());
        self
    }

    pub fn corrective(
        mut self,
        kind: CorrectiveKind,
        corrected_invoices: Vec<InvoiceIdentifier>,
    ) -> Self {
        self.corrective_kind = Some(kind);
        self.corrected_invoices = corrected_invoices;
        self
    }

    pub fn corrected_amounts(mut self, base_amount: impl Into<String>, tax_amount: impl Into<String>) -> Self {
        self.corrected_base_amount = Some(base_amount.into());
        self.corrected_tax_amount = Some(tax_amount.into());
        self
    }

    pub fn add_replaced_invoice(mut self, identifier: InvoiceIdentifier) -> Self {
        self.replaced_invoices.push(identifier);
        self
    }

    pub fn previous(mut self, identifier: InvoiceIdentifier, fingerprint: impl Into<String>) -> Self {
        self.previous = Some(PreviousRecord {
            identifier,
            fingerprint: fingerprint.into(),
        });
        self
    }

    pub fn generated_at(mut self, generated_at: GeneratedAt) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn generated_at_str(mut self, value: &str) -> Self {
        self.generated_at = GeneratedAt::parse(value).ok();
        self
    }

    pub fn previous_rejection(mut self, flag: PreviousRejection) -> Self {
        self.previous_rejection = Some(flag);
        self
    }

    pub fn correction(mut self, flag: CorrectionFlag) -> Self {
        self.correction = Some(flag);
        self
    }

    pub fn external_reference(mut self, reference: impl Into<String>) -> Self {
        self.external_reference = Some(reference.into());
        self
    }

    pub fn build(self) -> Result<RegistrationRecord, VerifactuError> {
        let mut errors = Vec::new();

        if self.issuer_name.trim().is_empty() || self.issuer_name.chars().count() > 120 {
            errors.push(ValidationError::new(
                "issuer_name",
                "must be non-blank and at most 120 characters",
            ));
        }

        let description = match &self.description {
            Some(d) if !d.trim().is_empty() && d.chars().count() <= 500 => d.clone(),
            Some(_) => {
                errors.push(ValidationError::new(
                    "description",
                    "must be non-blank and at most 500 characters",
                ));
                String::new()
            }
            None => {
                errors.push(ValidationError::new("description", "is required"));
                String::new()
            }
        };

        if self.recipients.len() > 1000 {
            errors.push(ValidationError::new("recipients", "must contain at most 1000 entries"));
        }
        let requires_empty_recipients = matches!(self.invoice_type, InvoiceType::F2 | InvoiceType::R5);
        if requires_empty_recipients && !self.recipients.is_empty() {
            errors.push(ValidationError::new(
                "recipients",
                "must be empty for invoice types F2 and R5",
            ));
        } else if !requires_empty_recipients && self.recipients.is_empty() {
            errors.push(ValidationError::new(
                "recipients",
                "must contain at least one recipient for this invoice type",
            ));
        }

        let is_corrective = self.invoice_type.is_corrective();
        if is_corrective && self.corrective_kind.is_none() {
            errors.push(ValidationError::new(
                "corrective_kind",
                "is required for corrective invoice types (R1-R5)",
            ));
        } else if !is_corrective && self.corrective_kind.is_some() {
            errors.push(ValidationError::new(
                "corrective_kind",
                "must be absent for non-corrective invoice types",
            ));
        }
        if !is_corrective && !self.corrected_invoices.is_empty() {
            errors.push(ValidationError::new(
                "corrected_invoices",
                "must be empty for non-corrective invoice types",
            ));
        }

        let corrected_base_amount = match (&self.corrective_kind, &self.corrected_base_amount) {
            (Some(CorrectiveKind::Substitution), Some(raw)) => match Amount::parse(raw.clone()) {
                Ok(amount) => Some(amount),
                Err(message) => {
                    errors.push(ValidationError::new("corrected_base_amount", message));
                    None
                }
            },
            (Some(CorrectiveKind::Substitution), None) => {
                errors.push(ValidationError::new(
                    "corrected_base_amount",
                    "is required for corrective invoices by substitution",
                ));
                None
            }
            (_, None) => None,
            (_, Some(_)) => {
                errors.push(ValidationError::new(
                    "corrected_base_amount",
                    "must be absent unless corrective_kind is Substitution",
                ));
                None
            }
        };
        let corrected_tax_amount = match (&self.corrective_kind, &self.corrected_tax_amount) {
            (Some(CorrectiveKind::Substitution), Some(raw)) => match Amount::parse(raw.clone()) {
                Ok(amount) => Some(amount),
                Err(message) => {
                    errors.push(ValidationError::new("corrected_tax_amount", message));
                    None
                }
            },
            (Some(CorrectiveKind::Substitution), None) => {
                errors.push(ValidationError::new(
                    "corrected_tax_amount",
                    "is required for corrective invoices by substitution",
                ));
                None
            }
            (_, None) => None,
            (_, Some(_)) => {
                errors.push(ValidationError::new(
                    "corrected_tax_amount",
                    "must be absent unless corrective_kind is Substitution",
                ));
                None
            }
        };

        if self.invoice_type != InvoiceType::F3 && !self.replaced_invoices.is_empty() {
            errors.push(ValidationError::new(
                "replaced_invoices",
                "must be empty unless invoice_type is F3",
            ));
        }

        if self.breakdown.is_empty() || self.breakdown.len() > 12 {
            errors.push(ValidationError::new(
                "breakdown",
                "must contain between 1 and 12 lines",
            ));
        }

        let total_tax_amount = match &self.total_tax_amount {
            Some(raw) => match Amount::parse(raw.clone()) {
                Ok(amount) => Some(amount),
                Err(message) => {
                    errors.push(ValidationError::new("total_tax_amount", message));
                    None
                }
            },
            None => {
                errors.push(ValidationError::new("total_tax_amount", "is required"));
                None
            }
        };
        let total_amount = match &self.total_amount {
            Some(raw) => match Amount::parse(raw.clone()) {
                Ok(amount) => Some(amount),
                Err(message) => {
                    errors.push(ValidationError::new("total_amount", message));
                    None
                }
            },
            None => {
                errors.push(ValidationError::new("total_amount", "is required"));
                None
            }
        };

        if let (Some(total_tax), Some(total)) = (&total_tax_amount, &total_amount) {
            if !self.breakdown.is_empty() {
                let expected_tax = sum_tax_amounts(&self.breakdown).round_dp(2);
                if total_tax.to_decimal() != expected_tax {
                    errors.push(ValidationError::new(
                        "total_tax_amount",
                        format!("expected exact sum {expected_tax} of breakdown tax amounts, got {total_tax}"),
                    ));
                }

                let expected_total = sum_base_amounts(&self.breakdown).round_dp(2) + expected_tax;
                if !within_tolerance(total.to_decimal(), expected_total, dec!(0.02)) {
                    errors.push(ValidationError::new(
                        "total_amount",
                        format!("expected approximately {expected_total}, got {total}"),
                    ));
                }
            }
        }

        let generated_at = match self.generated_at {
            Some(ts) => ts,
            None => {
                errors.push(ValidationError::new("generated_at", "is required"));
                GeneratedAt::parse("1970-01-01T00:00:00+00:00").expect("constant parses")
            }
        };

        let common = CommonFields {
            identifier: self.identifier.clone(),
            previous: self.previous.clone(),
            generated_at,
            previous_rejection: self.previous_rejection,
            correction: self.correction,
            external_reference: self.external_reference.clone(),
        };
        validate_common(&common, &mut errors);

        if !errors.is_empty() {
            return Err(VerifactuError::InvalidModel(errors));
        }

        let total_tax_amount = total_tax_amount.expect("checked above");
        let total_amount = total_amount.expect("checked above");

        let fingerprint = RegistrationRecord::compute_fingerprint(
            &self.identifier,
            self.invoice_type,
            &total_tax_amount,
            &total_amount,
            &self.previous,
            &generated_at,
        );

        Ok(RegistrationRecord {
            identifier: self.identifier,
            previous: self.previous,
            fingerprint,
            generated_at,
            previous_rejection: self.previous_rejection,
            correction: self.correction,
            external_reference: self.external_reference,
            issuer_name: self.issuer_name,
            invoice_type: self.invoice_type,
            description,
            recipients: self.recipients,
            corrective_kind: self.corrective_kind,
            corrected_invoices: self.corrected_invoices,
            corrected_base_amount,
            corrected_tax_amount,
            replaced_invoices: self.replaced_invoices,
            breakdown: self.breakdown,
            total_tax_amount,
            total_amount,
        })
    }
}

/// RegistroAnulacion — cancels a previously submitted invoice record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationRecord {
    identifier: InvoiceIdentifier,
    previous: PreviousRecord,
    fingerprint: String,
    generated_at: GeneratedAt,
    previous_rejection: Option<PreviousRejection>,
    correction: Option<CorrectionFlag>,
    external_reference: Option<String>,
    without_prior_record: bool,
}

impl CancellationRecord {
    pub fn identifier(&self) -> &InvoiceIdentifier {
        &self.identifier
    }

    pub fn previous(&self) -> &PreviousRecord {
        &self.previous
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn generated_at(&self) -> GeneratedAt {
        self.generated_at
    }

    pub fn previous_rejection(&self) -> Option<PreviousRejection> {
        self.previous_rejection
    }

    pub fn correction(&self) -> Option<CorrectionFlag> {
        self.correction
    }

    pub fn external_reference(&self) -> Option<&str> {
        self.external_reference.as_deref()
    }

    pub fn without_prior_record(&self) -> bool {
        self.without_prior_record
    }

    fn compute_fingerprint(identifier: &InvoiceIdentifier, previous: &PreviousRecord, generated_at: &GeneratedAt) -> String {
        let payload = format!(
            "IDEmisorFacturaAnulada={}&NumSerieFacturaAnulada={}&FechaExpedicionFacturaAnulada={}&Huella={}&FechaHoraHusoGenRegistro={}",
            identifier.issuer_id(),
            identifier.invoice_number(),
            canonical_date(identifier.issue_date()),
            previous.fingerprint,
            generated_at.canonical(),
        );
        sha256_hex_upper(&payload)
    }
}

/// Fluent builder for [`CancellationRecord`]. Unlike registrations, the
/// previous record is mandatory: AEAT has no concept of a chain-head
/// cancellation.
pub struct CancellationBuilder {
    identifier: InvoiceIdentifier,
    previous: Option<PreviousRecord>,
    generated_at: Option<GeneratedAt>,
    previous_rejection: Option<PreviousRejection>,
    correction: Option<CorrectionFlag>,
    external_reference: Option<String>,
    without_prior_record: bool,
}

impl CancellationBuilder {
    pub fn new(identifier: InvoiceIdentifier) -> Self {
        Self {
            identifier,
            previous: None,
            generated_at: None,
            previous_rejection: None,
            correction: None,
            external_reference: None,
            without_prior_record: false,
        }
    }

    pub fn previous(mut self, identifier: InvoiceIdentifier, fingerprint: impl Into<String>) -> Self {
        self.previous = Some(PreviousRecord {
            identifier,
            fingerprint: fingerprint.into(),
        });
        self
    }

    pub fn generated_at(mut self, generated_at: GeneratedAt) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    pub fn generated_at_str(mut self, value: &str) -> Self {
        self.generated_at = GeneratedAt::parse(value).ok();
        self
    }

    pub fn previous_rejection(mut self, flag: PreviousRejection) -> Self {
        self.previous_rejection = Some(flag);
        self
    }

    pub fn correction(mut self, flag: CorrectionFlag) -> Self {
        self.correction = Some(flag);
        self
    }

    pub fn external_reference(mut self, reference: impl Into<String>) -> Self {
        self.external_reference = Some(reference.into());
        self
    }

    pub fn without_prior_record(mut self, value: bool) -> Self {
        self.without_prior_record = value;
        self
    }

    pub fn build(self) -> Result<CancellationRecord, VerifactuError> {
        let mut errors = Vec::new();

        let previous = match self.previous {
            Some(p) => Some(p),
            None => {
                errors.push(ValidationError::new(
                    "previous",
                    "is required for every cancellation record",
                ));
                None
            }
        };

        let generated_at = match self.generated_at {
            Some(ts) => ts,
            None => {
                errors.push(ValidationError::new("generated_at", "is required"));
                GeneratedAt::parse("1970-01-01T00:00:00+00:00").expect("constant parses")
            }
        };

        if let Some(previous) = &previous {
            let common = CommonFields {
                identifier: self.identifier.clone(),
                previous: Some(previous.clone()),
                generated_at,
                previous_rejection: self.previous_rejection,
                correction: self.correction,
                external_reference: self.external_reference.clone(),
            };
            validate_common(&common, &mut errors);
        }

        if !errors.is_empty() {
            return Err(VerifactuError::InvalidModel(errors));
        }

        let previous = previous.expect("checked above");
        let fingerprint = CancellationRecord::compute_fingerprint(&self.identifier, &previous, &generated_at);

        Ok(CancellationRecord {
            identifier: self.identifier,
            previous,
            fingerprint,
            generated_at,
            previous_rejection: self.previous_rejection,
            correction: self.correction,
            external_reference: self.external_reference,
            without_prior_record: self.without_prior_record,
        })
    }
}

/// Either kind of record, for batch submission without forcing callers to
/// collect into two separate vectors.
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Registration(&'a RegistrationRecord),
    Cancellation(&'a CancellationRecord),
}

impl<'a> From<&'a RegistrationRecord> for RecordRef<'a> {
    fn from(value: &'a RegistrationRecord) -> Self {
        Self::Registration(value)
    }
}

impl<'a> From<&'a CancellationRecord> for RecordRef<'a> {
    fn from(value: &'a CancellationRecord) -> Self {
        Self::Cancellation(value)
    }
}

impl<'a> RecordRef<'a> {
    pub fn identifier(&self) -> &InvoiceIdentifier {
        match self {
            Self::Registration(r) => r.identifier(),
            Self::Cancellation(r) => r.identifier(),
        }
    }

    pub fn previous(&self) -> Option<&PreviousRecord> {
        match self {
            Self::Registration(r) => r.previous(),
            Self::Cancellation(r) => Some(r.previous()),
        }
    }

    pub fn fingerprint(&self) -> &str {
        match self {
            Self::Registration(r) => r.fingerprint(),
            Self::Cancellation(r) => r.fingerprint(),
        }
    }

    pub fn generated_at(&self) -> GeneratedAt {
        match self {
            Self::Registration(r) => r.generated_at(),
            Self::Cancellation(r) => r.generated_at(),
        }
    }

    pub fn previous_rejection(&self) -> Option<PreviousRejection> {
        match self {
            Self::Registration(r) => r.previous_rejection(),
            Self::Cancellation(r) => r.previous_rejection(),
        }
    }

    pub fn correction(&self) -> Option<CorrectionFlag> {
        match self {
            Self::Registration(r) => r.correction(),
            Self::Cancellation(r) => r.correction(),
        }
    }

    pub fn external_reference(&self) -> Option<&str> {
        match self {
            Self::Registration(r) => r.external_reference(),
            Self::Cancellation(r) => r.external_reference(),
        }
    }

    /// `SinRegistroPrevio` — only meaningful for `RegistroAnulacion`; always
    /// `false` for a registration record.
    pub fn without_prior_record(&self) -> bool {
        match self {
            Self::Registration(_) => false,
            Self::Cancellation(r) => r.without_prior_record(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn identifier(n: &str) -> InvoiceIdentifier {
        InvoiceIdentifier::new("A00000000", n, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap()
    }

    fn chain_head() -> RegistrationRecord {
        RegistrationBuilder::new(identifier("PRUEBA-0001"), "Test Issuer S.L.", InvoiceType::F2)
            .description("Test sale")
            .add_breakdown(
                crate::core::breakdown::BreakdownLine::builder(
                    crate::core::enums::TaxKind::Iva,
                    crate::core::enums::RegimeCode::R01,
                    crate::core::enums::OperationClass::Subject,
                )
                .base_amount("10.00")
                .rate("21.00")
                .tax_amount("2.10")
                .build()
                .unwrap(),
            )
            .total_tax_amount("2.10")
            .total_amount("12.10")
            .generated_at_str("2025-06-01T10:20:30+02:00")
            .build()
            .unwrap()
    }

    #[test]
    fn chain_head_fingerprint_is_64_upper_hex() {
        let record = chain_head();
        assert_eq!(record.fingerprint().len(), 64);
        assert!(record
            .fingerprint()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }

    #[test]
    fn f2_invoice_rejects_recipients() {
        let err = RegistrationBuilder::new(identifier("PRUEBA-0002"), "Test Issuer S.L.", InvoiceType::F2)
            .description("Test sale")
            .add_recipient(crate::core::identifiers::FiscalIdentifier::new("Buyer", "B00000000").unwrap())
            .add_breakdown(
                crate::core::breakdown::BreakdownLine::builder(
                    crate::core::enums::TaxKind::Iva,
                    crate::core::enums::RegimeCode::R01,
                    crate::core::enums::OperationClass::Subject,
                )
                .base_amount("10.00")
                .rate("21.00")
                .tax_amount("2.10")
                .build()
                .unwrap(),
            )
            .total_tax_amount("2.10")
            .total_amount("12.10")
            .generated_at_str("2025-06-01T10:20:30+02:00")
            .build()
            .unwrap_err();
        assert!(matches!(err, VerifactuError::InvalidModel(_)));
    }

    #[test]
    fn f1_invoice_requires_recipients() {
        let err = RegistrationBuilder::new(identifier("PRUEBA-0003"), "Test Issuer S.L.", InvoiceType::F1)
            .description("Test sale")
            .add_breakdown(
                crate::core::breakdown::BreakdownLine::builder(
                    crate::core::enums::TaxKind::Iva,
                    crate::core::enums::RegimeCode::R01,
                    crate::core::enums::OperationClass::Subject,
                )
                .base_amount("10.00")
                .rate("21.00")
                .tax_amount("2.10")
                .build()
                .unwrap(),
            )
            .total_tax_amount("2.10")
            .total_amount("12.10")
            .generated_at_str("2025-06-01T10:20:30+02:00")
            .build()
            .unwrap_err();
        assert!(matches!(err, VerifactuError::InvalidModel(_)));
    }

    #[test]
    fn cancellation_requires_previous() {
        let err = CancellationBuilder::new(identifier("PRUEBA-0001"))
            .generated_at_str("2025-06-02T09:00:00+02:00")
            .build()
            .unwrap_err();
        assert!(matches!(err, VerifactuError::InvalidModel(_)));
    }

    #[test]
    fn cancellation_chains_from_previous() {
        let head = chain_head();
        let cancellation = CancellationBuilder::new(identifier("PRUEBA-0001"))
            .previous(identifier("PRUEBA-0001"), head.fingerprint())
            .generated_at_str("2025-06-02T09:00:00+02:00")
            .build()
            .unwrap();
        assert_eq!(cancellation.fingerprint().len(), 64);
    }

    #[test]
    fn previous_rejection_x_requires_correction_yes() {
        let err = RegistrationBuilder::new(identifier("PRUEBA-0004"), "Test Issuer S.L.", InvoiceType::F2)
            .description("Test sale")
            .add_breakdown(
                crate::core::breakdown::BreakdownLine::builder(
                    crate::core::enums::TaxKind::Iva,
                    crate::core::enums::RegimeCode::R01,
                    crate::core::enums::OperationClass::Subject,
                )
                .base_amount("10.00")
                .rate("21.00")
                .tax_amount("2.10")
                .build()
                .unwrap(),
            )
            .total_tax_amount("2.10")
            .total_amount("12.10")
            .generated_at_str("2025-06-01T10:20:30+02:00")
            .previous_rejection(PreviousRejection::RejectedAndCorrected)
            .build()
            .unwrap_err();
        assert!(matches!(err, VerifactuError::InvalidModel(_)));
    }
}
