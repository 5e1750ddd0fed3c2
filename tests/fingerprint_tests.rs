use chrono::NaiveDate;
use verifactu::core::*;

fn identifier(number: &str, year: i32, month: u32, day: u32) -> InvoiceIdentifier {
    InvoiceIdentifier::new("A00000000", number, NaiveDate::from_ymd_opt(year, month, day).unwrap()).unwrap()
}

fn iva_line(base: &str, rate: &str, tax: &str) -> BreakdownLine {
    BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
        .base_amount(base)
        .rate(rate)
        .tax_amount(tax)
        .build()
        .unwrap()
}

#[test]
fn chain_head_registration_fingerprint_matches_worked_example() {
    let record = RegistrationBuilder::new(identifier("PRUEBA-0001", 2025, 6, 1), "Issuer", InvoiceType::F2)
        .description("Factura simplificada de prueba")
        .add_breakdown(iva_line("10.00", "21.00", "2.10"))
        .total_tax_amount("2.10")
        .total_amount("12.10")
        .generated_at_str("2025-06-01T10:20:30+02:00")
        .build()
        .unwrap();

    assert_eq!(
        record.fingerprint(),
        "F223F0A84F7D0C701C13C97CF10A1628FF9E46A003DDAEF3A804FBD799D82070"
    );
}

#[test]
fn continuation_registration_fingerprint_matches_worked_example() {
    let record = RegistrationBuilder::new(identifier("PRUEBA-0002", 2025, 6, 2), "Issuer", InvoiceType::F2)
        .description("Factura simplificada de prueba")
        .add_breakdown(iva_line("100.00", "21.00", "21.00"))
        .total_tax_amount("21.00")
        .total_amount("121.00")
        .previous(identifier("PRUEBA-0001", 2025, 6, 1), "A".repeat(64))
        .generated_at_str("2025-06-02T20:30:40+02:00")
        .build()
        .unwrap();

    assert_eq!(
        record.fingerprint(),
        "4566062C5A5D7DA4E0E876C0994071CD807962629F8D3C1F33B91EDAA65B2BA1"
    );
}

#[test]
fn cancellation_fingerprint_matches_worked_example() {
    let identifier = InvoiceIdentifier::new(
        "89890001K",
        "12345679/G34",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .unwrap();

    let record = CancellationBuilder::new(identifier.clone())
        .previous(
            identifier,
            "F7B94CFD8924EDFF273501B01EE5153E4CE8F259766F88CF6ACB8935802A2B97",
        )
        .generated_at_str("2024-01-01T19:20:40+01:00")
        .build()
        .unwrap();

    assert_eq!(
        record.fingerprint(),
        "177547C0D57AC74748561D054A9CEC14B4C4EA23D1BEFD6F2E69E3A388F90C68"
    );
}

#[test]
fn total_amount_tolerance_accepts_and_rejects_worked_example() {
    let lines = || {
        vec![
            iva_line("12.34", "21.00", "2.59"),
            iva_line("543.21", "10.00", "54.31"),
        ]
    };

    let accepted = RegistrationBuilder::new(identifier("PRUEBA-0003", 2025, 6, 3), "Issuer", InvoiceType::F2)
        .description("Factura simplificada de prueba")
        .add_breakdown(lines()[0].clone())
        .add_breakdown(lines()[1].clone())
        .total_tax_amount("56.90")
        .total_amount("612.45")
        .generated_at_str("2025-06-03T10:00:00+02:00")
        .build();
    assert!(accepted.is_ok());

    let wrong_tax = RegistrationBuilder::new(identifier("PRUEBA-0004", 2025, 6, 3), "Issuer", InvoiceType::F2)
        .description("Factura simplificada de prueba")
        .add_breakdown(lines()[0].clone())
        .add_breakdown(lines()[1].clone())
        .total_tax_amount("56.91")
        .total_amount("612.45")
        .generated_at_str("2025-06-03T10:00:00+02:00")
        .build();
    assert!(wrong_tax.is_err());

    let wrong_total = RegistrationBuilder::new(identifier("PRUEBA-0005", 2025, 6, 3), "Issuer", InvoiceType::F2)
        .description("Factura simplificada de prueba")
        .add_breakdown(lines()[0].clone())
        .add_breakdown(lines()[1].clone())
        .total_tax_amount("56.90")
        .total_amount("1.23")
        .generated_at_str("2025-06-03T10:00:00+02:00")
        .build();
    assert!(wrong_total.is_err());
}

#[test]
fn correction_rejection_matrix_worked_example() {
    let base = |n: &str| {
        RegistrationBuilder::new(identifier(n, 2025, 6, 4), "Issuer", InvoiceType::F2)
            .description("Factura simplificada de prueba")
            .add_breakdown(iva_line("10.00", "21.00", "2.10"))
            .total_tax_amount("2.10")
            .total_amount("12.10")
            .generated_at_str("2025-06-04T10:00:00+02:00")
    };

    assert!(base("PRUEBA-0010")
        .correction(CorrectionFlag::Yes)
        .previous_rejection(PreviousRejection::No)
        .build()
        .is_err());

    assert!(base("PRUEBA-0011")
        .correction(CorrectionFlag::No)
        .previous_rejection(PreviousRejection::RejectedAndCorrected)
        .build()
        .is_err());

    assert!(base("PRUEBA-0012")
        .correction(CorrectionFlag::Yes)
        .previous_rejection(PreviousRejection::RejectedAndCorrected)
        .build()
        .is_ok());

    assert!(base("PRUEBA-0013")
        .previous_rejection(PreviousRejection::RejectedAndCorrected)
        .build()
        .is_err());
}
