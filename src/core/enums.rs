use serde::{Deserialize, Serialize};

/// TipoFactura — invoice type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceType {
    /// F1 — Factura (Art. 6, 7.2 y 7.3 del R.D. 1619/2012).
    F1,
    /// F2 — Factura simplificada, sin identificación del destinatario.
    F2,
    /// F3 — Factura emitida en sustitución de facturas simplificadas.
    F3,
    /// R1 — Factura rectificativa (Art. 80.1 y 80.2, o error fundado en derecho).
    R1,
    /// R2 — Factura rectificativa (Art. 80.3).
    R2,
    /// R3 — Factura rectificativa (Art. 80.4).
    R3,
    /// R4 — Factura rectificativa (resto de causas).
    R4,
    /// R5 — Factura rectificativa en facturas simplificadas.
    R5,
}

impl InvoiceType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::F1 => "F1",
            Self::F2 => "F2",
            Self::F3 => "F3",
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
            Self::R4 => "R4",
            Self::R5 => "R5",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "F1" => Some(Self::F1),
            "F2" => Some(Self::F2),
            "F3" => Some(Self::F3),
            "R1" => Some(Self::R1),
            "R2" => Some(Self::R2),
            "R3" => Some(Self::R3),
            "R4" => Some(Self::R4),
            "R5" => Some(Self::R5),
            _ => None,
        }
    }

    /// Whether a registration of this type is corrective (requires a corrective kind).
    pub fn is_corrective(&self) -> bool {
        matches!(self, Self::R1 | Self::R2 | Self::R3 | Self::R4 | Self::R5)
    }
}

/// Impuesto — tax kind applied to a breakdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxKind {
    /// 01 — Impuesto sobre el Valor Añadido (IVA).
    Iva,
    /// 02 — IPSI de Ceuta y Melilla.
    Ipsi,
    /// 03 — Impuesto General Indirecto Canario (IGIC).
    Igic,
    /// 05 — Otros.
    Other,
}

impl TaxKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Iva => "01",
            Self::Ipsi => "02",
            Self::Igic => "03",
            Self::Other => "05",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Iva),
            "02" => Some(Self::Ipsi),
            "03" => Some(Self::Igic),
            "05" => Some(Self::Other),
            _ => None,
        }
    }
}

/// ClaveRegimen — special regime or additional-significance code.
///
/// This enumerates the codes AEAT actually defines (01-11, 14-15, 17-20);
/// 12, 13 and 16 are reserved and carry no meaning in the current schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeCode {
    /// 01 — Operación de régimen general.
    R01,
    /// 02 — Exportación.
    R02,
    /// 03 — Bienes usados, objetos de arte, antigüedades y objetos de colección.
    R03,
    /// 04 — Régimen especial del oro de inversión.
    R04,
    /// 05 — Régimen especial de las agencias de viajes.
    R05,
    /// 06 — Régimen especial grupo de entidades en IVA (nivel avanzado).
    R06,
    /// 07 — Régimen especial del criterio de caja.
    R07,
    /// 08 — Operaciones sujetas al IPSI / IGIC.
    R08,
    /// 09 — Facturación por agencias de viaje mediadoras (D.A. 4ª RD1619/2012).
    R09,
    /// 10 — Cobros por cuenta de terceros de honorarios o derechos.
    R10,
    /// 11 — Operaciones de arrendamiento de local de negocio.
    R11,
    /// 14 — IVA pendiente de devengo en certificaciones de obra a Administración Pública.
    R14,
    /// 15 — IVA pendiente de devengo en operaciones de tracto sucesivo.
    R15,
    /// 17 — Regímenes del Capítulo XI del Título IX (OSS e IOSS).
    R17,
    /// 18 — Recargo de equivalencia.
    R18,
    /// 19 — Régimen Especial de Agricultura, Ganadería y Pesca (REAGYP).
    R19,
    /// 20 — Régimen simplificado.
    R20,
}

impl RegimeCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::R01 => "01",
            Self::R02 => "02",
            Self::R03 => "03",
            Self::R04 => "04",
            Self::R05 => "05",
            Self::R06 => "06",
            Self::R07 => "07",
            Self::R08 => "08",
            Self::R09 => "09",
            Self::R10 => "10",
            Self::R11 => "11",
            Self::R14 => "14",
            Self::R15 => "15",
            Self::R17 => "17",
            Self::R18 => "18",
            Self::R19 => "19",
            Self::R20 => "20",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::R01),
            "02" => Some(Self::R02),
            "03" => Some(Self::R03),
            "04" => Some(Self::R04),
            "05" => Some(Self::R05),
            "06" => Some(Self::R06),
            "07" => Some(Self::R07),
            "08" => Some(Self::R08),
            "09" => Some(Self::R09),
            "10" => Some(Self::R10),
            "11" => Some(Self::R11),
            "14" => Some(Self::R14),
            "15" => Some(Self::R15),
            "17" => Some(Self::R17),
            "18" => Some(Self::R18),
            "19" => Some(Self::R19),
            "20" => Some(Self::R20),
            _ => None,
        }
    }
}

/// CalificacionOperacion / OperacionExenta — operation class of a breakdown line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationClass {
    /// S1 — Sujeta y no exenta, sin inversión del sujeto pasivo.
    Subject,
    /// S2 — Sujeta y no exenta, con inversión del sujeto pasivo.
    PassiveSubject,
    /// N1 — No sujeta (Art. 7, 14 y otros).
    NonSubject,
    /// N2 — No sujeta por reglas de localización.
    NonSubjectByLocation,
    /// E1 — Exenta por el artículo 20.
    Exempt1,
    /// E2 — Exenta por el artículo 21.
    Exempt2,
    /// E3 — Exenta por el artículo 22.
    Exempt3,
    /// E4 — Exenta por los artículos 23 y 24.
    Exempt4,
    /// E5 — Exenta por el artículo 25.
    Exempt5,
    /// E6 — Exenta por otros.
    Exempt6,
}

impl OperationClass {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Subject => "S1",
            Self::PassiveSubject => "S2",
            Self::NonSubject => "N1",
            Self::NonSubjectByLocation => "N2",
            Self::Exempt1 => "E1",
            Self::Exempt2 => "E2",
            Self::Exempt3 => "E3",
            Self::Exempt4 => "E4",
            Self::Exempt5 => "E5",
            Self::Exempt6 => "E6",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S1" => Some(Self::Subject),
            "S2" => Some(Self::PassiveSubject),
            "N1" => Some(Self::NonSubject),
            "N2" => Some(Self::NonSubjectByLocation),
            "E1" => Some(Self::Exempt1),
            "E2" => Some(Self::Exempt2),
            "E3" => Some(Self::Exempt3),
            "E4" => Some(Self::Exempt4),
            "E5" => Some(Self::Exempt5),
            "E6" => Some(Self::Exempt6),
            _ => None,
        }
    }

    /// Whether the operation carries a rate and tax amount (S1/S2).
    pub fn is_subject(&self) -> bool {
        matches!(self, Self::Subject | Self::PassiveSubject)
    }
}

/// TipoRectificativa — how a corrective invoice relates to the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectiveKind {
    /// S — Por sustitución: replaces the original invoice entirely.
    Substitution,
    /// I — Por diferencias: corrects only the stated differences.
    Differences,
}

impl CorrectiveKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Substitution => "S",
            Self::Differences => "I",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Substitution),
            "I" => Some(Self::Differences),
            _ => None,
        }
    }
}

/// IDType — identification scheme for a non-resident recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignIdKind {
    /// 02 — NIF-IVA.
    Vat,
    /// 03 — Pasaporte.
    Passport,
    /// 04 — Documento oficial de identificación del país de residencia.
    NationalId,
    /// 05 — Certificado de residencia.
    Residence,
    /// 06 — Otro documento probatorio.
    Other,
    /// 07 — No censado.
    Unregistered,
}

impl ForeignIdKind {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Vat => "02",
            Self::Passport => "03",
            Self::NationalId => "04",
            Self::Residence => "05",
            Self::Other => "06",
            Self::Unregistered => "07",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "02" => Some(Self::Vat),
            "03" => Some(Self::Passport),
            "04" => Some(Self::NationalId),
            "05" => Some(Self::Residence),
            "06" => Some(Self::Other),
            "07" => Some(Self::Unregistered),
            _ => None,
        }
    }
}

/// EstadoEnvio — overall status of a submission response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseStatus {
    Correct,
    PartiallyCorrect,
    Incorrect,
}

impl ResponseStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Correcto" => Some(Self::Correct),
            "ParcialmenteCorrecto" => Some(Self::PartiallyCorrect),
            "Incorrecto" => Some(Self::Incorrect),
            _ => None,
        }
    }
}

/// EstadoRegistro (submission) — per-line outcome of a submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Correct,
    AcceptedWithErrors,
    Incorrect,
}

impl ItemStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Correcto" => Some(Self::Correct),
            "AceptadoConErrores" => Some(Self::AcceptedWithErrors),
            "Incorrecto" => Some(Self::Incorrect),
            _ => None,
        }
    }
}

/// TipoOperacion — whether a response line refers to a registration or a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Registration,
    Cancellation,
}

impl RecordKind {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Alta" => Some(Self::Registration),
            "Anulacion" => Some(Self::Cancellation),
            _ => None,
        }
    }
}

/// EstadoRegistro (query) — current state of a record as known to AEAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryRecordStatus {
    Correct,
    AcceptedWithErrors,
    Cancelled,
}

impl QueryRecordStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Correcto" => Some(Self::Correct),
            "AceptadoConErrores" => Some(Self::AcceptedWithErrors),
            "Anulado" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// RechazoPrevio — whether an earlier submission attempt of this same record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreviousRejection {
    /// S — Sí, el envío anterior fue rechazado.
    Yes,
    /// N — No, no hubo rechazo previo.
    No,
    /// X — El envío anterior fue rechazado y ya se ha corregido (solo junto a Subsanacion=S).
    RejectedAndCorrected,
}

impl PreviousRejection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Yes => "S",
            Self::No => "N",
            Self::RejectedAndCorrected => "X",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Yes),
            "N" => Some(Self::No),
            "X" => Some(Self::RejectedAndCorrected),
            _ => None,
        }
    }
}

/// Subsanacion — whether this record corrects a previously generated one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionFlag {
    Yes,
    No,
}

impl CorrectionFlag {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Yes => "S",
            Self::No => "N",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::Yes),
            "N" => Some(Self::No),
            _ => None,
        }
    }
}

/// ResultadoConsulta — whether a query matched any records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryResultType {
    WithData,
    WithoutData,
}

impl QueryResultType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ConDatos" => Some(Self::WithData),
            "SinDatos" => Some(Self::WithoutData),
            _ => None,
        }
    }
}
