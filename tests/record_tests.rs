use chrono::NaiveDate;
use verifactu::core::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[test]
fn invoice_number_at_sixty_characters_is_accepted() {
    let number = "A".repeat(60);
    assert!(InvoiceIdentifier::new("A00000000", number, date()).is_ok());
}

#[test]
fn invoice_number_at_sixty_one_characters_is_rejected() {
    let number = "A".repeat(61);
    assert!(InvoiceIdentifier::new("A00000000", number, date()).is_err());
}

#[test]
fn foreign_identifier_rejects_spain_as_country() {
    let err = ForeignFiscalIdentifier::new("Acme Corp", "ES", ForeignIdKind::Vat, "X1234567").unwrap_err();
    assert!(matches!(err, VerifactuError::InvalidModel(_)));
}

#[test]
fn f2_with_any_recipient_is_rejected() {
    let identifier = InvoiceIdentifier::new("A00000000", "PRUEBA-0001", date()).unwrap();
    let line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
        .base_amount("10.00")
        .rate("21.00")
        .tax_amount("2.10")
        .build()
        .unwrap();

    let err = RegistrationBuilder::new(identifier, "Issuer", InvoiceType::F2)
        .description("Test")
        .add_recipient(FiscalIdentifier::new("Buyer", "B00000000").unwrap())
        .add_breakdown(line)
        .total_tax_amount("2.10")
        .total_amount("12.10")
        .generated_at_str("2025-06-01T10:00:00+02:00")
        .build()
        .unwrap_err();

    assert!(matches!(err, VerifactuError::InvalidModel(_)));
}

#[test]
fn f1_with_zero_recipients_is_rejected() {
    let identifier = InvoiceIdentifier::new("A00000000", "PRUEBA-0002", date()).unwrap();
    let line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
        .base_amount("10.00")
        .rate("21.00")
        .tax_amount("2.10")
        .build()
        .unwrap();

    let err = RegistrationBuilder::new(identifier, "Issuer", InvoiceType::F1)
        .description("Test")
        .add_breakdown(line)
        .total_tax_amount("2.10")
        .total_amount("12.10")
        .generated_at_str("2025-06-01T10:00:00+02:00")
        .build()
        .unwrap_err();

    assert!(matches!(err, VerifactuError::InvalidModel(_)));
}

#[test]
fn cancellation_with_no_previous_pair_is_rejected() {
    let identifier = InvoiceIdentifier::new("A00000000", "PRUEBA-0003", date()).unwrap();
    let err = CancellationBuilder::new(identifier)
        .generated_at_str("2025-06-01T10:00:00+02:00")
        .build()
        .unwrap_err();
    assert!(matches!(err, VerifactuError::InvalidModel(_)));
}

#[test]
fn corrective_invoice_type_requires_corrective_kind() {
    let identifier = InvoiceIdentifier::new("A00000000", "PRUEBA-0004", date()).unwrap();
    let line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
        .base_amount("10.00")
        .rate("21.00")
        .tax_amount("2.10")
        .build()
        .unwrap();

    let err = RegistrationBuilder::new(identifier.clone(), "Issuer", InvoiceType::R1)
        .description("Test")
        .add_recipient(FiscalIdentifier::new("Buyer", "B00000000").unwrap())
        .add_breakdown(line)
        .total_tax_amount("2.10")
        .total_amount("12.10")
        .generated_at_str("2025-06-01T10:00:00+02:00")
        .build()
        .unwrap_err();

    assert!(matches!(err, VerifactuError::InvalidModel(_)));
}

#[test]
fn corrective_by_substitution_requires_corrected_amounts() {
    let identifier = InvoiceIdentifier::new("A00000000", "PRUEBA-0005", date()).unwrap();
    let original = InvoiceIdentifier::new("A00000000", "PRUEBA-0000", date()).unwrap();
    let line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
        .base_amount("10.00")
        .rate("21.00")
        .tax_amount("2.10")
        .build()
        .unwrap();

    let err = RegistrationBuilder::new(identifier, "Issuer", InvoiceType::R1)
        .description("Test")
        .add_recipient(FiscalIdentifier::new("Buyer", "B00000000").unwrap())
        .add_breakdown(line)
        .total_tax_amount("2.10")
        .total_amount("12.10")
        .corrective(CorrectiveKind::Substitution, vec![original])
        .generated_at_str("2025-06-01T10:00:00+02:00")
        .build()
        .unwrap_err();

    assert!(matches!(err, VerifactuError::InvalidModel(_)));
}
