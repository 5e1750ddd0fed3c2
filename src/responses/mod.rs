//! Parsed shapes of AEAT's two response payloads: the synchronous submission
//! acknowledgement and the query result.

use chrono::{NaiveDate, NaiveDateTime};

use crate::core::{
    CorrectiveKind, ForeignIdKind, InvoiceType, ItemStatus, OperationClass, QueryRecordStatus,
    QueryResultType, RecordKind, RegimeCode, ResponseStatus, TaxKind,
};

/// RespuestaLinea — the outcome of a single submitted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseLine {
    pub issuer_id: String,
    pub invoice_number: String,
    pub record_kind: RecordKind,
    pub is_correction: bool,
    pub status: ItemStatus,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
}

/// RespuestaRegFactuSistemaFacturacion — the synchronous acknowledgement AEAT
/// returns for a submitted batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub csv: Option<String>,
    pub submitted_at: Option<NaiveDateTime>,
    pub wait_seconds: u32,
    pub status: ResponseStatus,
    pub items: Vec<ResponseLine>,
}

/// IDDestinatario, as echoed back inside a query result item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRecipient {
    Domestic { name: String, nif: String },
    Foreign {
        name: String,
        country: String,
        id_kind: ForeignIdKind,
        value: String,
    },
}

/// DetalleDesglose, as echoed back inside a query result item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBreakdownItem {
    pub tax_kind: TaxKind,
    pub regime_code: RegimeCode,
    pub operation_class: OperationClass,
    pub rate: Option<String>,
    pub base_amount: String,
    pub tax_amount: Option<String>,
}

/// RegistroAnterior, as echoed back inside a query result item's chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPreviousRecord {
    pub issuer_id: String,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub fingerprint: String,
}

/// A single record as AEAT's ledger currently holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponseItem {
    pub issuer_id: String,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub issuer_name: Option<String>,
    pub invoice_type: InvoiceType,
    pub corrective_type: Option<CorrectiveKind>,
    pub operation_date: Option<NaiveDate>,
    pub description: String,
    pub recipients: Vec<QueryRecipient>,
    pub breakdown: Vec<QueryBreakdownItem>,
    pub total_tax_amount: String,
    pub total_amount: String,
    pub previous: Option<QueryPreviousRecord>,
    pub generated_at: String,
    pub fingerprint: String,
    pub status: QueryRecordStatus,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub computer_system_name: Option<String>,
    pub computer_system_vendor_nif: Option<String>,
    /// CSV — the secure verification code AEAT stamped on this record, if any.
    pub csv: Option<String>,
    /// TimestampPresentacion — when the record was originally presented.
    pub presentation_timestamp: Option<NaiveDateTime>,
    /// TimestampUltimaModificacion — when AEAT's ledger entry was last updated.
    pub last_modified: Option<NaiveDateTime>,
}

/// RespuestaConsultaFactuSistemaFacturacion — the result of an invoice query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub year: u16,
    pub month: u8,
    pub result_type: QueryResultType,
    pub has_more_pages: bool,
    pub pagination_key: Option<String>,
    pub items: Vec<QueryResponseItem>,
}

pub use crate::xml::decode::{parse_query_response, parse_submission_response};
