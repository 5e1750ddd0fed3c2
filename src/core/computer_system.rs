use serde::{Deserialize, Serialize};

use crate::core::error::{ValidationError, VerifactuError};

/// SistemaInformatico — identifies the invoicing software producing the records,
/// carried on every registration and cancellation exported to AEAT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerSystem {
    vendor_name: String,
    vendor_nif: String,
    name: String,
    id: String,
    version: String,
    installation_number: String,
    only_supports_verifactu: bool,
    supports_multiple_taxpayers: bool,
    has_multiple_taxpayers: bool,
}

impl ComputerSystem {
    pub fn builder(
        vendor_name: impl Into<String>,
        vendor_nif: impl Into<String>,
        name: impl Into<String>,
        id: impl Into<String>,
        version: impl Into<String>,
        installation_number: impl Into<String>,
    ) -> ComputerSystemBuilder {
        ComputerSystemBuilder::new(vendor_name, vendor_nif, name, id, version, installation_number)
    }

    pub fn vendor_name(&self) -> &str {
        &self.vendor_name
    }

    pub fn vendor_nif(&self) -> &str {
        &self.vendor_nif
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn installation_number(&self) -> &str {
        &self.installation_number
    }

    pub fn only_supports_verifactu(&self) -> bool {
        self.only_supports_verifactu
    }

    pub fn supports_multiple_taxpayers(&self) -> bool {
        self.supports_multiple_taxpayers
    }

    pub fn has_multiple_taxpayers(&self) -> bool {
        self.has_multiple_taxpayers
    }
}

pub struct ComputerSystemBuilder {
    vendor_name: String,
    vendor_nif: String,
    name: String,
    id: String,
    version: String,
    installation_number: String,
    only_supports_verifactu: bool,
    supports_multiple_taxpayers: bool,
    has_multiple_taxpayers: bool,
}

impl ComputerSystemBuilder {
    pub fn new(
        vendor_name: impl Into<String>,
        vendor_nif: impl Into<String>,
        name: impl Into<String>,
        id: impl Into<String>,
        version: impl Into<String>,
        installation_number: impl Into<String>,
    ) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            vendor_nif: vendor_nif.into(),
            name: name.into(),
            id: id.into(),
            version: version.into(),
            installation_number: installation_number.into(),
            only_supports_verifactu: false,
            supports_multiple_taxpayers: false,
            has_multiple_taxpayers: false,
        }
    }

    pub fn only_supports_verifactu(mut self, value: bool) -> Self {
        self.only_supports_verifactu = value;
        self
    }

    pub fn supports_multiple_taxpayers(mut self, value: bool) -> Self {
        self.supports_multiple_taxpayers = value;
        self
    }

    pub fn has_multiple_taxpayers(mut self, value: bool) -> Self {
        self.has_multiple_taxpayers = value;
        self
    }

    pub fn build(self) -> Result<ComputerSystem, VerifactuError> {
        let mut errors = Vec::new();

        if self.vendor_name.trim().is_empty() || self.vendor_name.chars().count() > 120 {
            errors.push(ValidationError::new(
                "vendor_name",
                "must be non-blank and at most 120 characters",
            ));
        }
        if self.vendor_nif.chars().count() != 9 {
            errors.push(ValidationError::new("vendor_nif", "must be exactly 9 characters"));
        }
        if self.name.trim().is_empty() || self.name.chars().count() > 30 {
            errors.push(ValidationError::new(
                "name",
                "must be non-blank and at most 30 characters",
            ));
        }
        if self.id.is_empty() || self.id.chars().count() > 2 {
            errors.push(ValidationError::new(
                "id",
                "must be non-blank and at most 2 characters",
            ));
        }
        if self.version.trim().is_empty() || self.version.chars().count() > 50 {
            errors.push(ValidationError::new(
                "version",
                "must be non-blank and at most 50 characters",
            ));
        }
        if self.installation_number.trim().is_empty() || self.installation_number.chars().count() > 100 {
            errors.push(ValidationError::new(
                "installation_number",
                "must be non-blank and at most 100 characters",
            ));
        }

        if !errors.is_empty() {
            return Err(VerifactuError::InvalidModel(errors));
        }

        Ok(ComputerSystem {
            vendor_name: self.vendor_name,
            vendor_nif: self.vendor_nif,
            name: self.name,
            id: self.id,
            version: self.version,
            installation_number: self.installation_number,
            only_supports_verifactu: self.only_supports_verifactu,
            supports_multiple_taxpayers: self.supports_multiple_taxpayers,
            has_multiple_taxpayers: self.has_multiple_taxpayers,
        })
    }
}
