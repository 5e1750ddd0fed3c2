//! # verifactu
//!
//! Client library for Spain's AEAT VERI*FACTU invoice-reporting regime:
//! record construction, cryptographic hash-chain fingerprinting, the
//! SOAP/XML wire codec, and an mTLS-authenticated submission client.
//!
//! Monetary amounts are carried as already-formatted decimal strings, never
//! re-derived floating point — see [`core::Amount`]. The hash chain that AEAT
//! requires is produced by [`core::RegistrationRecord::fingerprint`] /
//! [`core::CancellationRecord::fingerprint`] over a canonical, intentionally
//! unescaped payload.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use verifactu::core::*;
//!
//! let record = RegistrationBuilder::new(
//!         InvoiceIdentifier::new("A00000000", "PRUEBA-0001", NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap(),
//!         "Test Issuer S.L.",
//!         InvoiceType::F2,
//!     )
//!     .description("Venta de mercancía")
//!     .add_breakdown(
//!         BreakdownLine::builder(TaxKind::Iva, RegimeCode::R01, OperationClass::Subject)
//!             .base_amount("10.00")
//!             .rate("21.00")
//!             .tax_amount("2.10")
//!             .build()
//!             .unwrap(),
//!     )
//!     .total_tax_amount("2.10")
//!     .total_amount("12.10")
//!     .generated_at_str("2025-06-01T10:20:30+02:00")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(record.fingerprint().len(), 64);
//! assert!(record.fingerprint().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Value types, record model, validator, fingerprint engine |
//! | `xml` (default) | SOAP/XML codec: encode records and queries, decode responses |
//! | `client` | mTLS-authenticated synchronous submission client |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "xml")]
pub mod queries;

#[cfg(feature = "xml")]
pub mod responses;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "core")]
pub use crate::core::error::{ValidationError, VerifactuError};
