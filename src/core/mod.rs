//! Value types, the record model, and the hash-chain fingerprint engine.
//!
//! Nothing in this module performs I/O: records are constructed, validated
//! and fingerprinted entirely in memory. The `xml` feature builds the wire
//! codec on top of these types; `client` adds the network layer on top of
//! that.

pub mod amount;
pub mod breakdown;
pub mod computer_system;
pub mod enums;
pub mod error;
pub mod fingerprint;
pub mod identifiers;
pub mod record;

pub use amount::{within_tolerance, Amount, Rate};
pub use breakdown::{BreakdownLine, BreakdownLineBuilder};
pub use computer_system::{ComputerSystem, ComputerSystemBuilder};
pub use enums::{
    CorrectionFlag, CorrectiveKind, ForeignIdKind, InvoiceType, ItemStatus, OperationClass,
    PreviousRejection, QueryRecordStatus, QueryResultType, RecordKind, RegimeCode, ResponseStatus,
    TaxKind,
};
pub use error::{ValidationError, VerifactuError};
pub use fingerprint::GeneratedAt;
pub use identifiers::{FiscalIdentifier, ForeignFiscalIdentifier, InvoiceIdentifier, Recipient};
pub use record::{
    CancellationBuilder, CancellationRecord, PreviousRecord, RecordRef, RegistrationBuilder,
    RegistrationRecord,
};
