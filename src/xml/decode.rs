use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::{
    CorrectiveKind, ForeignIdKind, InvoiceType, ItemStatus, OperationClass, QueryRecordStatus,
    QueryResultType, RecordKind, RegimeCode, ResponseStatus, TaxKind, VerifactuError,
};
use crate::responses::{
    QueryBreakdownItem, QueryPreviousRecord, QueryRecipient, QueryResponse, QueryResponseItem,
    ResponseLine, SubmissionResponse,
};

fn parse_err(message: impl Into<String>) -> VerifactuError {
    VerifactuError::ParseError(message.into())
}

fn local_name(start: &BytesStart) -> String {
    let full = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    match full.split_once(':') {
        Some((_, local)) => local.to_string(),
        None => full,
    }
}

fn ends_with(path: &[String], suffix: &[&str]) -> bool {
    if path.len() < suffix.len() {
        return false;
    }
    path[path.len() - suffix.len()..]
        .iter()
        .zip(suffix)
        .all(|(a, b)| a == b)
}

/// Walk a SOAP body looking for a `Fault` element; if found, return its
/// faultstring as an `AeatServerError` instead of attempting the real parse.
fn check_for_fault(xml: &str) -> Result<(), VerifactuError> {
    if !xml.contains("Fault") {
        return Ok(());
    }
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut path: Vec<String> = Vec::new();
    let mut faultstring = None;
    loop {
        match reader.read_event().map_err(|e| parse_err(format!("XML read error: {e}")))? {
            Event::Eof => break,
            Event::Start(e) => path.push(local_name(&e)),
            Event::End(_) => {
                path.pop();
            }
            Event::Text(t) => {
                if ends_with(&path, &["Fault", "faultstring"]) {
                    faultstring = Some(t.unescape().map_err(|e| parse_err(e.to_string()))?.into_owned());
                }
            }
            _ => {}
        }
    }
    if let Some(message) = faultstring {
        return Err(VerifactuError::AeatServerError(message));
    }
    Ok(())
}

#[derive(Default)]
struct LineAcc {
    issuer_id: Option<String>,
    invoice_number: Option<String>,
    record_kind: Option<RecordKind>,
    is_correction: bool,
    status: Option<ItemStatus>,
    error_code: Option<String>,
    error_description: Option<String>,
}

impl LineAcc {
    fn finish(self) -> Result<ResponseLine, VerifactuError> {
        Ok(ResponseLine {
            issuer_id: self.issuer_id.ok_or_else(|| parse_err("RespuestaLinea missing IDEmisorFactura"))?,
            invoice_number: self
                .invoice_number
                .ok_or_else(|| parse_err("RespuestaLinea missing NumSerieFactura"))?,
            record_kind: self.record_kind.unwrap_or(RecordKind::Registration),
            is_correction: self.is_correction,
            status: self.status.ok_or_else(|| parse_err("RespuestaLinea missing EstadoRegistro"))?,
            error_code: self.error_code,
            error_description: self.error_description,
        })
    }
}

/// Parse AEAT's synchronous acknowledgement for a submitted batch.
pub fn parse_submission_response(xml: &str) -> Result<SubmissionResponse, VerifactuError> {
    check_for_fault(xml)?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut csv = None;
    let mut submitted_at = None;
    let mut wait_seconds = None;
    let mut status = None;
    let mut items = Vec::new();
    let mut current_line: Option<LineAcc> = None;
    let mut found_root = false;

    loop {
        match reader.read_event().map_err(|e| parse_err(format!("XML read error: {e}")))? {
            Event::Eof => break,
            Event::Start(e) => {
                let name = local_name(&e);
                if name == "RespuestaRegFactuSistemaFacturacion" {
                    found_root = true;
                }
                if name == "RespuestaLinea" {
                    current_line = Some(LineAcc::default());
                }
                path.push(name);
            }
            Event::Empty(e) => {
                // self-closing elements never carry text; nothing to capture.
                path.push(local_name(&e));
                path.pop();
            }
            Event::End(_) => {
                let closing = path.pop();
                if closing.as_deref() == Some("RespuestaLinea") {
                    if let Some(line) = current_line.take() {
                        items.push(line.finish()?);
                    }
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| parse_err(e.to_string()))?.into_owned();
                if text.trim().is_empty() {
                    continue;
                }
                if let Some(line) = current_line.as_mut() {
                    if ends_with(&path, &["RespuestaLinea", "IDFactura", "IDEmisorFactura"]) {
                        line.issuer_id = Some(text);
                    } else if ends_with(&path, &["RespuestaLinea", "IDFactura", "NumSerieFactura"]) {
                        line.invoice_number = Some(text);
                    } else if ends_with(&path, &["RespuestaLinea", "Operacion", "TipoOperacion"]) {
                        line.record_kind = RecordKind::from_code(&text);
                    } else if ends_with(&path, &["RespuestaLinea", "Operacion", "Subsanacion"]) {
                        line.is_correction = text == "S";
                    } else if ends_with(&path, &["RespuestaLinea", "EstadoRegistro"]) {
                        line.status = ItemStatus::from_code(&text);
                    } else if ends_with(&path, &["RespuestaLinea", "CodigoErrorRegistro"]) {
                        line.error_code = Some(text);
                    } else if ends_with(&path, &["RespuestaLinea", "DescripcionErrorRegistro"]) {
                        line.error_description = Some(text);
                    }
                    continue;
                }

                if ends_with(&path, &["DatosPresentacion", "CSV"]) || path.last().map(String::as_str) == Some("CSV") {
                    csv = Some(text);
                } else if ends_with(&path, &["DatosPresentacion", "TimestampPresentacion"]) {
                    submitted_at = chrono::NaiveDateTime::parse_from_str(&text, "%Y-%m-%dT%H:%M:%S%.f").ok();
                } else if path.last().map(String::as_str) == Some("TiempoEsperaEnvio") {
                    wait_seconds = text.parse().ok();
                } else if path.last().map(String::as_str) == Some("EstadoEnvio") {
                    status = ResponseStatus::from_code(&text);
                }
            }
            _ => {}
        }
    }

    if !found_root {
        return Err(parse_err(
            "response is missing the RespuestaRegFactuSistemaFacturacion root element",
        ));
    }

    Ok(SubmissionResponse {
        csv,
        submitted_at,
        wait_seconds: wait_seconds.unwrap_or(0),
        status: status.ok_or_else(|| parse_err("response missing EstadoEnvio"))?,
        items,
    })
}

#[derive(Default)]
struct RecipientAcc {
    name: Option<String>,
    nif: Option<String>,
    country: Option<String>,
    id_kind: Option<ForeignIdKind>,
    value: Option<String>,
}

#[derive(Default)]
struct BreakdownAcc {
    tax_kind: Option<TaxKind>,
    regime_code: Option<RegimeCode>,
    operation_class: Option<OperationClass>,
    rate: Option<String>,
    base_amount: Option<String>,
    tax_amount: Option<String>,
}

#[derive(Default)]
struct ItemAcc {
    issuer_id: Option<String>,
    invoice_number: Option<String>,
    issue_date: Option<chrono::NaiveDate>,
    issuer_name: Option<String>,
    invoice_type: Option<InvoiceType>,
    corrective_type: Option<CorrectiveKind>,
    operation_date: Option<chrono::NaiveDate>,
    description: Option<String>,
    recipients: Vec<QueryRecipient>,
    breakdown: Vec<QueryBreakdownItem>,
    total_tax_amount: Option<String>,
    total_amount: Option<String>,
    previous_issuer_id: Option<String>,
    previous_invoice_number: Option<String>,
    previous_issue_date: Option<chrono::NaiveDate>,
    previous_fingerprint: Option<String>,
    generated_at: Option<String>,
    fingerprint: Option<String>,
    status: Option<QueryRecordStatus>,
    error_code: Option<String>,
    error_description: Option<String>,
    computer_system_name: Option<String>,
    computer_system_vendor_nif: Option<String>,
    csv: Option<String>,
    presentation_timestamp: Option<chrono::NaiveDateTime>,
    last_modified: Option<chrono::NaiveDateTime>,
}

fn parse_date(text: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(text, "%d-%m-%Y").ok()
}

fn parse_datetime(text: &str) -> Option<chrono::NaiveDateTime> {
    chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

impl ItemAcc {
    fn finish(self) -> Result<QueryResponseItem, VerifactuError> {
        let previous = match (
            self.previous_issuer_id,
            self.previous_invoice_number,
            self.previous_issue_date,
            self.previous_fingerprint,
        ) {
            (Some(issuer_id), Some(invoice_number), Some(issue_date), Some(fingerprint)) => {
                Some(QueryPreviousRecord {
                    issuer_id,
                    invoice_number,
                    issue_date,
                    fingerprint,
                })
            }
            _ => None,
        };

        Ok(QueryResponseItem {
            issuer_id: self.issuer_id.ok_or_else(|| parse_err("query item missing IDEmisorFactura"))?,
            invoice_number: self
                .invoice_number
                .ok_or_else(|| parse_err("query item missing NumSerieFactura"))?,
            issue_date: self
                .issue_date
                .ok_or_else(|| parse_err("query item missing FechaExpedicionFactura"))?,
            issuer_name: self.issuer_name,
            invoice_type: self.invoice_type.ok_or_else(|| parse_err("query item missing TipoFactura"))?,
            corrective_type: self.corrective_type,
            operation_date: self.operation_date,
            description: self.description.unwrap_or_default(),
            recipients: self.recipients,
            breakdown: self.breakdown,
            total_tax_amount: self
                .total_tax_amount
                .ok_or_else(|| parse_err("query item missing CuotaTotal"))?,
            total_amount: self.total_amount.ok_or_else(|| parse_err("query item missing ImporteTotal"))?,
            previous,
            generated_at: self
                .generated_at
                .ok_or_else(|| parse_err("query item missing FechaHoraHusoGenRegistro"))?,
            fingerprint: self.fingerprint.ok_or_else(|| parse_err("query item missing Huella"))?,
            status: self.status.ok_or_else(|| parse_err("query item missing EstadoRegistro"))?,
            error_code: self.error_code,
            error_description: self.error_description,
            computer_system_name: self.computer_system_name,
            computer_system_vendor_nif: self.computer_system_vendor_nif,
            csv: self.csv,
            presentation_timestamp: self.presentation_timestamp,
            last_modified: self.last_modified,
        })
    }
}

/// Parse AEAT's response to an invoice query.
pub fn parse_query_response(xml: &str) -> Result<QueryResponse, VerifactuError> {
    check_for_fault(xml)?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    let mut year = None;
    let mut month = None;
    let mut result_type = None;
    let mut has_more_pages = false;
    let mut pagination_key = None;
    let mut items = Vec::new();
    let mut current_item: Option<ItemAcc> = None;
    let mut current_recipient: Option<RecipientAcc> = None;
    let mut current_breakdown: Option<BreakdownAcc> = None;
    let mut found_root = false;

    loop {
        match reader.read_event().map_err(|e| parse_err(format!("XML read error: {e}")))? {
            Event::Eof => break,
            Event::Start(e) => {
                let name = local_name(&e);
                if name == "RespuestaConsultaFactuSistemaFacturacion" {
                    found_root = true;
                }
                if name == "RegistroRespuestaConsultaFactuSistemaFacturacion" {
                    current_item = Some(ItemAcc::default());
                }
                if name == "IDDestinatario" {
                    current_recipient = Some(RecipientAcc::default());
                }
                if name == "DetalleDesglose" {
                    current_breakdown = Some(BreakdownAcc::default());
                }
                path.push(name);
            }
            Event::Empty(e) => {
                path.push(local_name(&e));
                path.pop();
            }
            Event::End(_) => {
                let closing = path.pop();
                match closing.as_deref() {
                    Some("IDDestinatario") => {
                        if let Some(acc) = current_recipient.take() {
                            if let Some(item) = current_item.as_mut() {
                                let recipient = match (acc.name, acc.nif, acc.country, acc.id_kind, acc.value) {
                                    (Some(name), Some(nif), None, None, None) => QueryRecipient::Domestic { name, nif },
                                    (Some(name), None, Some(country), Some(id_kind), Some(value)) => {
                                        QueryRecipient::Foreign {
                                            name,
                                            country,
                                            id_kind,
                                            value,
                                        }
                                    }
                                    _ => continue,
                                };
                                item.recipients.push(recipient);
                            }
                        }
                    }
                    Some("DetalleDesglose") => {
                        if let Some(acc) = current_breakdown.take() {
                            if let (Some(item), Some(tax_kind), Some(regime_code), Some(operation_class), Some(base_amount)) = (
                                current_item.as_mut(),
                                acc.tax_kind,
                                acc.regime_code,
                                acc.operation_class,
                                acc.base_amount,
                            ) {
                                item.breakdown.push(QueryBreakdownItem {
                                    tax_kind,
                                    regime_code,
                                    operation_class,
                                    rate: acc.rate,
                                    base_amount,
                                    tax_amount: acc.tax_amount,
                                });
                            }
                        }
                    }
                    Some("RegistroRespuestaConsultaFactuSistemaFacturacion") => {
                        if let Some(acc) = current_item.take() {
                            items.push(acc.finish()?);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| parse_err(e.to_string()))?.into_owned();
                if text.trim().is_empty() {
                    continue;
                }

                if let Some(acc) = current_recipient.as_mut() {
                    if ends_with(&path, &["IDDestinatario", "NombreRazon"]) {
                        acc.name = Some(text);
                    } else if ends_with(&path, &["IDDestinatario", "NIF"]) {
                        acc.nif = Some(text);
                    } else if ends_with(&path, &["IDDestinatario", "IDOtro", "CodigoPais"]) {
                        acc.country = Some(text);
                    } else if ends_with(&path, &["IDDestinatario", "IDOtro", "IDType"]) {
                        acc.id_kind = ForeignIdKind::from_code(&text);
                    } else if ends_with(&path, &["IDDestinatario", "IDOtro", "ID"]) {
                        acc.value = Some(text);
                    }
                    continue;
                }

                if let Some(acc) = current_breakdown.as_mut() {
                    if ends_with(&path, &["DetalleDesglose", "Impuesto"]) {
                        acc.tax_kind = TaxKind::from_code(&text);
                    } else if ends_with(&path, &["DetalleDesglose", "ClaveRegimen"]) {
                        acc.regime_code = RegimeCode::from_code(&text);
                    } else if ends_with(&path, &["DetalleDesglose", "CalificacionOperacion"]) {
                        acc.operation_class = OperationClass::from_code(&text);
                    } else if ends_with(&path, &["DetalleDesglose", "TipoImpositivo"]) {
                        acc.rate = Some(text);
                    } else if ends_with(&path, &["DetalleDesglose", "BaseImponibleOimporteNoSujeto"]) {
                        acc.base_amount = Some(text);
                    } else if ends_with(&path, &["DetalleDesglose", "CuotaRepercutida"]) {
                        acc.tax_amount = Some(text);
                    }
                    continue;
                }

                if let Some(item) = current_item.as_mut() {
                    if ends_with(&path, &["IDFactura", "IDEmisorFactura"]) && !ends_with(&path, &["RegistroAnterior", "IDEmisorFactura"]) {
                        item.issuer_id = Some(text);
                    } else if ends_with(&path, &["IDFactura", "NumSerieFactura"]) {
                        item.invoice_number = Some(text);
                    } else if ends_with(&path, &["IDFactura", "FechaExpedicionFactura"]) {
                        item.issue_date = parse_date(&text);
                    } else if path.last().map(String::as_str) == Some("NombreRazonEmisor") {
                        item.issuer_name = Some(text);
                    } else if path.last().map(String::as_str) == Some("TipoFactura") {
                        item.invoice_type = InvoiceType::from_code(&text);
                    } else if path.last().map(String::as_str) == Some("TipoRectificativa") {
                        item.corrective_type = CorrectiveKind::from_code(&text);
                    } else if path.last().map(String::as_str) == Some("FechaOperacion") {
                        item.operation_date = parse_date(&text);
                    } else if path.last().map(String::as_str) == Some("DescripcionOperacion") {
                        item.description = Some(text);
                    } else if path.last().map(String::as_str) == Some("CuotaTotal") {
                        item.total_tax_amount = Some(text);
                    } else if path.last().map(String::as_str) == Some("ImporteTotal") {
                        item.total_amount = Some(text);
                    } else if ends_with(&path, &["RegistroAnterior", "IDEmisorFactura"]) {
                        item.previous_issuer_id = Some(text);
                    } else if ends_with(&path, &["RegistroAnterior", "NumSerieFactura"]) {
                        item.previous_invoice_number = Some(text);
                    } else if ends_with(&path, &["RegistroAnterior", "FechaExpedicionFactura"]) {
                        item.previous_issue_date = parse_date(&text);
                    } else if ends_with(&path, &["RegistroAnterior", "Huella"]) {
                        item.previous_fingerprint = Some(text);
                    } else if path.last().map(String::as_str) == Some("FechaHoraHusoGenRegistro") {
                        item.generated_at = Some(text);
                    } else if path.last().map(String::as_str) == Some("Huella") && !ends_with(&path, &["RegistroAnterior", "Huella"]) {
                        item.fingerprint = Some(text);
                    } else if path.last().map(String::as_str) == Some("EstadoRegistro") {
                        item.status = QueryRecordStatus::from_code(&text);
                    } else if ends_with(&path, &["SistemaInformatico", "NombreSistemaInformatico"]) {
                        item.computer_system_name = Some(text);
                    } else if ends_with(&path, &["SistemaInformatico", "NIF"]) {
                        item.computer_system_vendor_nif = Some(text);
                    } else if path.last().map(String::as_str) == Some("CodigoErrorRegistro") {
                        item.error_code = Some(text);
                    } else if path.last().map(String::as_str) == Some("DescripcionErrorRegistro") {
                        item.error_description = Some(text);
                    } else if ends_with(&path, &["DatosPresentacion", "CSV"]) || path.last().map(String::as_str) == Some("CSV") {
                        item.csv = Some(text);
                    } else if ends_with(&path, &["DatosPresentacion", "TimestampPresentacion"])
                        || path.last().map(String::as_str) == Some("TimestampPresentacion")
                    {
                        item.presentation_timestamp = parse_datetime(&text);
                    } else if path.last().map(String::as_str) == Some("TimestampUltimaModificacion") {
                        item.last_modified = parse_datetime(&text);
                    }
                    continue;
                }

                if ends_with(&path, &["PeriodoImputacion", "Ejercicio"]) {
                    year = text.parse().ok();
                } else if ends_with(&path, &["PeriodoImputacion", "Periodo"]) {
                    month = text.parse().ok();
                } else if path.last().map(String::as_str) == Some("ResultadoConsulta") {
                    result_type = QueryResultType::from_code(&text);
                } else if path.last().map(String::as_str) == Some("IndicadorPaginacion") {
                    has_more_pages = text == "S";
                } else if path.last().map(String::as_str) == Some("ClavePaginacion") {
                    pagination_key = Some(text);
                }
            }
            _ => {}
        }
    }

    if !found_root {
        return Err(parse_err(
            "response is missing the RespuestaConsultaFactuSistemaFacturacion root element",
        ));
    }

    Ok(QueryResponse {
        year: year.ok_or_else(|| parse_err("response missing Ejercicio"))?,
        month: month.ok_or_else(|| parse_err("response missing Periodo"))?,
        result_type: result_type.ok_or_else(|| parse_err("response missing ResultadoConsulta"))?,
        has_more_pages,
        pagination_key,
        items,
    })
}
