//! Static payment reference data.

use serde::Serialize;

/// A payment channel printed on every invoice.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaymentRecord {
    pub account_holder: &'static str,
    pub method: &'static str,
    pub details: &'static str,
}

/// Fixed payment-information table. This is reference data baked into the
/// document, not derived from session input.
pub const PAYMENT_RECORDS: &[PaymentRecord] = &[
    PaymentRecord {
        account_holder: "A. Karim",
        method: "Easypaisa",
        details: "0300-1234567",
    },
    PaymentRecord {
        account_holder: "A. Karim",
        method: "SadaPay",
        details: "PK36SADA0000001234567890",
    },
    PaymentRecord {
        account_holder: "M. Raza",
        method: "Bank transfer",
        details: "Account: 0102-3040506070",
    },
    PaymentRecord {
        account_holder: "",
        method: "",
        details: "IBAN: PK47MEZN0001020304050607",
    },
];
