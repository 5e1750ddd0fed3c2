use crate::core::{
    ComputerSystem, CorrectionFlag, FiscalIdentifier, PreviousRejection, Recipient, RecordRef,
    VerifactuError,
};
use crate::queries::QueryFilter;
use crate::xml::namespaces::{CON, SOAPENV, SUM, SUM1};
use crate::xml::writer::XmlWriter;

/// Header fields common to every submission (Cabecera).
pub struct SubmissionHeader<'a> {
    pub taxpayer: &'a FiscalIdentifier,
    pub representative: Option<&'a FiscalIdentifier>,
    /// Marks the batch as generated during a VERI*FACTU incident (Incidencia=S).
    pub incident: bool,
}

/// Encode a batch of records as a `sum:RegFactuSistemaFacturacion` SOAP envelope.
pub fn encode_submission(
    header: &SubmissionHeader,
    system: &ComputerSystem,
    records: &[RecordRef],
) -> Result<String, VerifactuError> {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "soapenv:Envelope",
        &[
            ("xmlns:soapenv", SOAPENV),
            ("xmlns:sum", SUM),
            ("xmlns:sum1", SUM1),
        ],
    )?;
    w.start_element("soapenv:Header")?.end_element("soapenv:Header")?;
    w.start_element("soapenv:Body")?;
    w.start_element("sum:RegFactuSistemaFacturacion")?;

    w.start_element("sum:Cabecera")?;
    w.start_element("sum1:ObligadoEmision")?;
    w.text_element("sum1:NombreRazon", header.taxpayer.name())?;
    w.text_element("sum1:NIF", header.taxpayer.nif())?;
    w.end_element("sum1:ObligadoEmision")?;
    if let Some(representative) = header.representative {
        w.start_element("sum1:Representante")?;
        w.text_element("sum1:NombreRazon", representative.name())?;
        w.text_element("sum1:NIF", representative.nif())?;
        w.end_element("sum1:Representante")?;
    }
    if header.incident {
        w.start_element("sum1:RemisionVoluntaria")?;
        w.text_element("sum1:Incidencia", "S")?;
        w.end_element("sum1:RemisionVoluntaria")?;
    }
    w.end_element("sum:Cabecera")?;

    for record in records {
        encode_record(&mut w, record, system)?;
    }

    w.end_element("sum:RegFactuSistemaFacturacion")?;
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;

    w.into_string()
}

fn encode_record(w: &mut XmlWriter, record: &RecordRef, system: &ComputerSystem) -> Result<(), VerifactuError> {
    w.start_element("sum:RegistroFactura")?;

    let (element_name, is_registration) = match record {
        RecordRef::Registration(_) => ("sum1:RegistroAlta", true),
        RecordRef::Cancellation(_) => ("sum1:RegistroAnulacion", false),
    };
    w.start_element(element_name)?;
    w.text_element("sum1:IDVersion", "1.0")?;

    encode_invoice_id(w, record.identifier())?;

    if is_registration {
        if let RecordRef::Registration(r) = record {
            w.text_element("sum1:NombreRazonEmisor", r.issuer_name())?;
            w.text_element("sum1:TipoFactura", r.invoice_type().code())?;
            if let Some(kind) = r.corrective_kind() {
                w.text_element("sum1:TipoRectificativa", kind.code())?;
            }
            w.text_element("sum1:DescripcionOperacion", r.description())?;

            if !r.recipients().is_empty() {
                w.start_element("sum1:Destinatarios")?;
                for recipient in r.recipients() {
                    w.start_element("sum1:IDDestinatario")?;
                    match recipient {
                        Recipient::Domestic(fiscal) => {
                            w.text_element("sum1:NombreRazon", fiscal.name())?;
                            w.text_element("sum1:NIF", fiscal.nif())?;
                        }
                        Recipient::Foreign(foreign) => {
                            w.text_element("sum1:NombreRazon", foreign.name())?;
                            w.start_element("sum1:IDOtro")?;
                            w.text_element("sum1:CodigoPais", foreign.country())?;
                            w.text_element("sum1:IDType", foreign.id_kind().code())?;
                            w.text_element("sum1:ID", foreign.value())?;
                            w.end_element("sum1:IDOtro")?;
                        }
                    }
                    w.end_element("sum1:IDDestinatario")?;
                }
                w.end_element("sum1:Destinatarios")?;
            }

            w.start_element("sum1:Desglose")?;
            for line in r.breakdown() {
                w.start_element("sum1:DetalleDesglose")?;
                w.text_element("sum1:Impuesto", line.tax_kind().code())?;
                w.text_element("sum1:ClaveRegimen", line.regime_code().code())?;
                w.text_element("sum1:CalificacionOperacion", line.operation_class().code())?;
                if let Some(rate) = line.rate() {
                    w.text_element("sum1:TipoImpositivo", rate.as_str())?;
                }
                w.text_element("sum1:BaseImponibleOimporteNoSujeto", line.base_amount().as_str())?;
                if let Some(tax) = line.tax_amount() {
                    w.text_element("sum1:CuotaRepercutida", tax.as_str())?;
                }
                w.end_element("sum1:DetalleDesglose")?;
            }
            w.end_element("sum1:Desglose")?;

            w.text_element("sum1:CuotaTotal", r.total_tax_amount().as_str())?;
            w.text_element("sum1:ImporteTotal", r.total_amount().as_str())?;
        }
    }

    w.start_element("sum1:Encadenamiento")?;
    match record.previous() {
        None => {
            w.text_element("sum1:PrimerRegistro", "S")?;
        }
        Some(previous) => {
            w.start_element("sum1:RegistroAnterior")?;
            w.text_element("sum1:IDEmisorFactura", previous.identifier.issuer_id())?;
            w.text_element("sum1:NumSerieFactura", previous.identifier.invoice_number())?;
            w.text_element(
                "sum1:FechaExpedicionFactura",
                &crate::core::fingerprint::canonical_date(previous.identifier.issue_date()),
            )?;
            w.text_element("sum1:Huella", &previous.fingerprint)?;
            w.end_element("sum1:RegistroAnterior")?;
        }
    }
    w.end_element("sum1:Encadenamiento")?;

    encode_computer_system(w, system)?;

    w.text_element("sum1:FechaHoraHusoGenRegistro", &record.generated_at().canonical())?;
    w.text_element("sum1:TipoHuella", "01")?;
    w.text_element("sum1:Huella", record.fingerprint())?;

    if let Some(rejection) = record.previous_rejection() {
        w.text_element("sum1:RechazoPrevio", rejection_code(rejection))?;
    }
    if let Some(correction) = record.correction() {
        w.text_element("sum1:Subsanacion", correction_code(correction))?;
    }
    if let Some(reference) = record.external_reference() {
        w.text_element("sum1:RefExterna", reference)?;
    }
    if !is_registration && record.without_prior_record() {
        w.text_element("sum1:SinRegistroPrevio", bool_flag(true))?;
    }

    w.end_element(element_name)?;
    w.end_element("sum:RegistroFactura")?;
    Ok(())
}

fn rejection_code(flag: PreviousRejection) -> &'static str {
    flag.code()
}

fn correction_code(flag: CorrectionFlag) -> &'static str {
    flag.code()
}

fn encode_invoice_id(w: &mut XmlWriter, id: &crate::core::InvoiceIdentifier) -> Result<(), VerifactuError> {
    w.start_element("sum1:IDFactura")?;
    w.text_element("sum1:IDEmisorFactura", id.issuer_id())?;
    w.text_element("sum1:NumSerieFactura", id.invoice_number())?;
    w.text_element(
        "sum1:FechaExpedicionFactura",
        &crate::core::fingerprint::canonical_date(id.issue_date()),
    )?;
    w.end_element("sum1:IDFactura")
}

fn encode_computer_system(w: &mut XmlWriter, system: &ComputerSystem) -> Result<(), VerifactuError> {
    w.start_element("sum1:SistemaInformatico")?;
    w.text_element("sum1:NombreRazon", system.vendor_name())?;
    w.text_element("sum1:NIF", system.vendor_nif())?;
    w.text_element("sum1:NombreSistemaInformatico", system.name())?;
    w.text_element("sum1:IdSistemaInformatico", system.id())?;
    w.text_element("sum1:Version", system.version())?;
    w.text_element("sum1:NumeroInstalacion", system.installation_number())?;
    w.text_element(
        "sum1:TipoUsoPosibleSoloVerifactu",
        bool_flag(system.only_supports_verifactu()),
    )?;
    w.text_element(
        "sum1:TipoUsoPosibleMultiOT",
        bool_flag(system.supports_multiple_taxpayers()),
    )?;
    w.text_element("sum1:IndicadorMultiplesOT", bool_flag(system.has_multiple_taxpayers()))?;
    w.end_element("sum1:SistemaInformatico")
}

fn bool_flag(value: bool) -> &'static str {
    if value {
        "S"
    } else {
        "N"
    }
}

/// Encode a `con:ConsultaFactuSistemaFacturacion` SOAP envelope for an invoice query.
pub fn encode_query(
    taxpayer: &FiscalIdentifier,
    representative: Option<&FiscalIdentifier>,
    filter: &QueryFilter,
) -> Result<String, VerifactuError> {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "soapenv:Envelope",
        &[
            ("xmlns:soapenv", SOAPENV),
            ("xmlns:con", CON),
            ("xmlns:sum1", SUM1),
        ],
    )?;
    w.start_element("soapenv:Header")?.end_element("soapenv:Header")?;
    w.start_element("soapenv:Body")?;
    w.start_element("con:ConsultaFactuSistemaFacturacion")?;

    w.start_element("con:Cabecera")?;
    w.text_element("sum1:IDVersion", "1.0")?;
    w.start_element("sum1:ObligadoEmision")?;
    w.text_element("sum1:NombreRazon", taxpayer.name())?;
    w.text_element("sum1:NIF", taxpayer.nif())?;
    w.end_element("sum1:ObligadoEmision")?;
    if representative.is_some() {
        w.text_element("sum1:IndicadorRepresentante", "S")?;
    }
    w.end_element("con:Cabecera")?;

    w.start_element("con:FiltroConsulta")?;
    w.start_element("con:PeriodoImputacion")?;
    w.text_element("sum1:Ejercicio", &filter.period.ejercicio())?;
    w.text_element("sum1:Periodo", &filter.period.periodo())?;
    w.end_element("con:PeriodoImputacion")?;

    if let Some(invoice_number) = &filter.invoice_number {
        w.text_element("con:NumSerieFactura", invoice_number)?;
    }
    if let Some(nif) = &filter.counterparty_nif {
        w.start_element("con:Contraparte")?;
        w.text_element("sum1:NIF", nif)?;
        w.end_element("con:Contraparte")?;
    }
    if filter.date_from.is_some() || filter.date_to.is_some() {
        w.start_element("con:FechaExpedicionFactura")?;
        if let Some(from) = filter.date_from {
            w.text_element("sum1:Desde", &crate::core::fingerprint::canonical_date(from))?;
        }
        if let Some(to) = filter.date_to {
            w.text_element("sum1:Hasta", &crate::core::fingerprint::canonical_date(to))?;
        }
        w.end_element("con:FechaExpedicionFactura")?;
    }
    if let Some(reference) = &filter.external_reference {
        w.text_element("con:RefExterna", reference)?;
    }
    if let Some(key) = &filter.pagination_key {
        w.text_element("con:ClavePaginacion", key)?;
    }
    w.end_element("con:FiltroConsulta")?;

    w.start_element("con:DatosAdicionalesRespuesta")?;
    w.text_element("con:MostrarNombreRazonEmisor", bool_flag(filter.show_issuer_name))?;
    w.text_element("con:MostrarSistemaInformatico", bool_flag(filter.show_computer_system))?;
    w.end_element("con:DatosAdicionalesRespuesta")?;

    w.end_element("con:ConsultaFactuSistemaFacturacion")?;
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;

    w.into_string()
}
