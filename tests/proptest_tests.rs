use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use verifactu::core::*;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_money(min_cents: i64, max_cents: i64) -> impl Strategy<Value = String> {
    (min_cents..max_cents).prop_map(|cents| format!("{}.{:02}", cents / 100, (cents % 100).abs()))
}

proptest! {
    /// Recomputing a registration record's fingerprint from its own fields
    /// always reproduces the one it was built with: the payload the record
    /// carries and the payload the hash is over are the same fields.
    #[test]
    fn registration_fingerprint_is_deterministic(
        issuer_id in "[A-Z][0-9]{8}",
        number in "[A-Z0-9]{1,20}",
        date in arb_date(),
        base_cents in 1i64..100_000,
        rate_hundredths in 0i64..2100,
    ) {
        let rate = format!("{}.{:02}", rate_hundredths / 100, rate_hundredths % 100);
        let base = format!("{}.{:02}", base_cents / 100, base_cents % 100);
        let base_decimal: Decimal = base.parse().unwrap();
        let rate_decimal: Decimal = rate.parse().unwrap();
        let tax_decimal = (base_decimal * rate_decimal / Decimal::from(100)).round_dp(2);
        let tax = tax_decimal.to_string();

        let identifier = InvoiceIdentifier::new(&issuer_id, &number, date).unwrap();
        let line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
            .base_amount(base)
            .rate(rate)
            .tax_amount(tax.clone())
            .build()
            .unwrap();

        let record = RegistrationBuilder::new(identifier, "Issuer S.L.", InvoiceType::F2)
            .description("Generated sale")
            .add_breakdown(line)
            .total_tax_amount(tax.clone())
            .total_amount((base_decimal + tax_decimal).round_dp(2).to_string())
            .generated_at_str("2025-06-01T10:20:30+02:00")
            .build();

        if let Ok(record) = record {
            let first = record.fingerprint().to_string();
            // recompute by re-running the exact same builder inputs
            let rebuilt_identifier = InvoiceIdentifier::new(&issuer_id, &number, date).unwrap();
            let rebuilt_line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
                .base_amount(record.breakdown()[0].base_amount().as_str())
                .rate(record.breakdown()[0].rate().unwrap().as_str())
                .tax_amount(record.breakdown()[0].tax_amount().unwrap().as_str())
                .build()
                .unwrap();
            let rebuilt = RegistrationBuilder::new(rebuilt_identifier, "Issuer S.L.", InvoiceType::F2)
                .description("Generated sale")
                .add_breakdown(rebuilt_line)
                .total_tax_amount(record.total_tax_amount().as_str())
                .total_amount(record.total_amount().as_str())
                .generated_at(record.generated_at())
                .build()
                .unwrap();

            prop_assert_eq!(first, rebuilt.fingerprint());
            prop_assert_eq!(record.fingerprint().len(), 64);
            prop_assert!(record.fingerprint().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        }
    }

    /// A subject breakdown line's tax amount is accepted iff it is within
    /// 0.02 of base * rate / 100, regardless of the magnitudes involved.
    #[test]
    fn breakdown_tax_tolerance_matches_arithmetic(
        base in arb_money(1, 1_000_000),
        rate in arb_money(0, 2100),
        tax_offset_cents in -5i64..=5,
    ) {
        let base_decimal: Decimal = base.parse().unwrap();
        let rate_decimal: Decimal = rate.parse().unwrap();
        let expected = (base_decimal * rate_decimal / Decimal::from(100)).round_dp(2);
        let tax_decimal = expected + Decimal::new(tax_offset_cents, 2);
        if tax_decimal.is_sign_negative() {
            return Ok(());
        }
        let tax = tax_decimal.to_string();

        let result = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
            .base_amount(base)
            .rate(rate)
            .tax_amount(tax)
            .build();

        let within_tolerance = (tax_decimal - expected).abs() <= Decimal::new(2, 2);
        prop_assert_eq!(result.is_ok(), within_tolerance);
    }

    /// Every built registration record satisfies the recipient-emptiness
    /// invariant tied to its invoice type (F2/R5 forbid recipients, the
    /// others require at least one).
    #[test]
    fn recipient_invariant_holds_on_every_built_record(
        has_recipient in any::<bool>(),
        use_f2 in any::<bool>(),
    ) {
        let identifier = InvoiceIdentifier::new("A00000000", "PRUEBA-0001", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap();
        let line = BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
            .base_amount("10.00")
            .rate("21.00")
            .tax_amount("2.10")
            .build()
            .unwrap();

        let invoice_type = if use_f2 { InvoiceType::F2 } else { InvoiceType::F1 };
        let mut builder = RegistrationBuilder::new(identifier, "Issuer", invoice_type)
            .description("Test")
            .add_breakdown(line)
            .total_tax_amount("2.10")
            .total_amount("12.10")
            .generated_at_str("2025-06-01T10:20:30+02:00");

        if has_recipient {
            builder = builder.add_recipient(FiscalIdentifier::new("Buyer", "B00000000").unwrap());
        }

        let result = builder.build();
        let should_succeed = has_recipient != use_f2;
        prop_assert_eq!(result.is_ok(), should_succeed);
    }
}
