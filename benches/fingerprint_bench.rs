use criterion::{Criterion, criterion_group, criterion_main};
use verifactu::core::*;

fn build_chain_head() -> RegistrationRecord {
    RegistrationBuilder::new(
        InvoiceIdentifier::new("A00000000", "PRUEBA-0001", naive_date(2025, 6, 1)).unwrap(),
        "Test Issuer S.L.",
        InvoiceType::F2,
    )
    .description("Venta de mercancia")
    .add_breakdown(
        BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
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

fn naive_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bench_fingerprint(c: &mut Criterion) {
    let record = build_chain_head();
    c.bench_function("registration_fingerprint", |b| {
        b.iter(|| record.fingerprint().to_owned())
    });
}

criterion_group!(benches, bench_fingerprint);
criterion_main!(benches);
