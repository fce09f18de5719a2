//! Domain models for the invoice builder.

mod invoice;
mod line_item;
mod party;
mod payment;

pub use invoice::{Discount, DiscountMode, InvoiceHeader, InvoiceTotals};
pub use line_item::{LineItem, NewLineItem};
pub use party::PartyInfo;
pub use payment::{PaymentRecord, PAYMENT_RECORDS};
