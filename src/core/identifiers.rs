use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::enums::ForeignIdKind;
use crate::core::error::VerifactuError;

/// IDFactura — identifies a single invoice within the issuer's numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceIdentifier {
    issuer_id: String,
    invoice_number: String,
    issue_date: NaiveDate,
}

impl InvoiceIdentifier {
    pub fn new(
        issuer_id: impl Into<String>,
        invoice_number: impl Into<String>,
        issue_date: NaiveDate,
    ) -> Result<Self, VerifactuError> {
        let issuer_id = issuer_id.into();
        let invoice_number = invoice_number.into();

        if issuer_id.chars().count() != 9 {
            return Err(VerifactuError::invalid(
                "issuer_id",
                "must be exactly 9 characters",
            ));
        }
        if invoice_number.is_empty() || invoice_number.chars().count() > 60 {
            return Err(VerifactuError::invalid(
                "invoice_number",
                "must be non-empty and at most 60 characters",
            ));
        }

        Ok(Self {
            issuer_id,
            invoice_number,
            issue_date,
        })
    }

    pub fn issuer_id(&self) -> &str {
        &self.issuer_id
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }
}

/// A Spanish taxpayer: name plus a 9-character NIF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalIdentifier {
    name: String,
    nif: String,
}

impl FiscalIdentifier {
    pub fn new(name: impl Into<String>, nif: impl Into<String>) -> Result<Self, VerifactuError> {
        let name = name.into();
        let nif = nif.into();

        if name.is_empty() || name.chars().count() > 120 {
            return Err(VerifactuError::invalid(
                "name",
                "must be non-empty and at most 120 characters",
            ));
        }
        if nif.chars().count() != 9 {
            return Err(VerifactuError::invalid("nif", "must be exactly 9 characters"));
        }

        Ok(Self { name, nif })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nif(&self) -> &str {
        &self.nif
    }
}

/// A non-resident taxpayer identified by a foreign scheme rather than a Spanish NIF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignFiscalIdentifier {
    name: String,
    country: String,
    id_kind: ForeignIdKind,
    value: String,
}

impl ForeignFiscalIdentifier {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        id_kind: ForeignIdKind,
        value: impl Into<String>,
    ) -> Result<Self, VerifactuError> {
        let name = name.into();
        let country = country.into();
        let value = value.into();

        if name.is_empty() || name.chars().count() > 120 {
            return Err(VerifactuError::invalid(
                "name",
                "must be non-empty and at most 120 characters",
            ));
        }
        if country.len() != 2 || !country.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(VerifactuError::invalid(
                "country",
                "must be a 2-letter uppercase ISO 3166-1 alpha-2 code",
            ));
        }
        if country == "ES" {
            return Err(VerifactuError::invalid(
                "country",
                "must not be 'ES'; use FiscalIdentifier for Spanish recipients",
            ));
        }
        if value.is_empty() || value.chars().count() > 20 {
            return Err(VerifactuError::invalid(
                "value",
                "must be non-empty and at most 20 characters",
            ));
        }

        Ok(Self {
            name,
            country,
            id_kind,
            value,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn id_kind(&self) -> ForeignIdKind {
        self.id_kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Destinatario — either a domestic or a foreign recipient of a registration record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    Domestic(FiscalIdentifier),
    Foreign(ForeignFiscalIdentifier),
}

impl From<FiscalIdentifier> for Recipient {
    fn from(value: FiscalIdentifier) -> Self {
        Self::Domestic(value)
    }
}

impl From<ForeignFiscalIdentifier> for Recipient {
    fn from(value: ForeignFiscalIdentifier) -> Self {
        Self::Foreign(value)
    }
}
