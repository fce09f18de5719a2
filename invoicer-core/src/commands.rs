//! Explicit command handlers over the session state.
//!
//! Each handler takes the current [`SessionState`], applies one user action,
//! and returns the result. Failed validation leaves the state untouched.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument};
use validator::Validate;

use crate::config::RenderConfig;
use crate::error::AppError;
use crate::models::{Discount, DiscountMode, LineItem, NewLineItem, PartyInfo};
use crate::services::pdf::{self, InvoiceSnapshot};
use crate::session::SessionState;

/// A generated, downloadable document.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub filename: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Partial update of the invoice details. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct InvoicePatch {
    pub company: Option<PartyInfo>,
    pub client: Option<PartyInfo>,
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub discount: Option<Discount>,
    pub discount_mode: Option<DiscountMode>,
    pub tax_percent: Option<Decimal>,
}

/// Append a line item. Rejects an empty description or a non-positive rate,
/// mirroring the form's inline guard.
#[instrument(skip(state, input))]
pub fn add_item(state: &mut SessionState, input: NewLineItem) -> Result<LineItem, AppError> {
    input.validate()?;
    if input.description.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "description must not be empty".to_string(),
        ));
    }
    if input.rate <= Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "rate must be greater than zero".to_string(),
        ));
    }

    let item = LineItem {
        description: input.description.trim().to_string(),
        quantity: input.quantity,
        rate: input.rate,
    };
    info!(
        description = %item.description,
        quantity = item.quantity,
        rate = %item.rate,
        "Line item added"
    );
    state.items.push(item.clone());
    Ok(item)
}

/// Bulk-clear the item list. Items are never removed individually.
#[instrument(skip(state))]
pub fn clear_items(state: &mut SessionState) {
    let removed = state.items.len();
    state.items.clear();
    info!(removed, "Line items cleared");
}

/// Apply a partial update to company/client/header/discount/tax fields.
/// Discount and tax inputs are clamped into range here rather than trusting
/// caller-side widgets.
#[instrument(skip(state, patch))]
pub fn update_invoice(state: &mut SessionState, patch: InvoicePatch) -> Result<(), AppError> {
    // Validate the whole patch before touching the state, so a rejected
    // patch never applies any of its fields.
    if let Some(number) = &patch.number {
        if number.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "invoice number must not be empty".to_string(),
            ));
        }
    }

    if let Some(company) = patch.company {
        state.company = company;
    }
    if let Some(client) = patch.client {
        state.client = client;
    }
    if let Some(number) = patch.number {
        state.header.number = number.trim().to_string();
    }
    if let Some(date) = patch.date {
        state.header.date = date;
    }
    if let Some(notes) = patch.notes {
        state.header.notes = notes;
    }
    if let Some(discount) = patch.discount {
        let subtotal = state.totals().subtotal;
        state.discount = match discount {
            Discount::Percent(p) => Discount::Percent(p.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)),
            Discount::Fixed(a) => Discount::Fixed(a.clamp(Decimal::ZERO, subtotal)),
        };
    }
    if let Some(mode) = patch.discount_mode {
        state.set_discount_mode(mode);
    }
    if let Some(tax) = patch.tax_percent {
        state.tax_percent = tax.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    }
    Ok(())
}

/// Generate the invoice PDF from the current state. Requires at least one
/// line item and a non-empty client name.
#[instrument(skip(state, render))]
pub fn generate_document(
    state: &SessionState,
    render: &RenderConfig,
) -> Result<GeneratedDocument, AppError> {
    if state.items.is_empty() {
        return Err(AppError::Precondition(
            "at least one line item is required".to_string(),
        ));
    }
    if state.client.name.trim().is_empty() {
        return Err(AppError::Precondition(
            "client name is required".to_string(),
        ));
    }

    let snapshot = InvoiceSnapshot {
        company: &state.company,
        client: &state.client,
        header: &state.header,
        items: &state.items,
        totals: state.totals(),
    };
    let bytes = pdf::render_invoice(&snapshot, render)?;

    let filename = format!(
        "Invoice_{}_{}.pdf",
        sanitize_filename(&state.header.number),
        Utc::now().format("%Y%m%d")
    );
    info!(filename = %filename, size = bytes.len(), "Invoice PDF generated");

    Ok(GeneratedDocument {
        filename,
        media_type: "application/pdf",
        bytes,
    })
}

fn sanitize_filename(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let ok = ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.');
        out.push(if ok { ch } else { '_' });
    }
    let trimmed = out.trim_matches('_').to_string();
    if trimmed.is_empty() {
        "invoice".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_state() -> SessionState {
        SessionState::new(PartyInfo {
            name: "Northline Studio".to_string(),
            ..PartyInfo::default()
        })
    }

    fn widget() -> NewLineItem {
        NewLineItem {
            description: "Widget".to_string(),
            quantity: 2,
            rate: dec!(500.00),
        }
    }

    #[test]
    fn add_item_appends_in_order() {
        let mut state = new_state();
        add_item(&mut state, widget()).unwrap();
        add_item(
            &mut state,
            NewLineItem {
                description: "Gadget".to_string(),
                quantity: 1,
                rate: dec!(100.00),
            },
        )
        .unwrap();

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].description, "Widget");
        assert_eq!(state.items[1].description, "Gadget");
        assert_eq!(state.totals().subtotal, dec!(1100.00));
    }

    #[test]
    fn add_item_rejects_blank_description() {
        let mut state = new_state();
        let err = add_item(
            &mut state,
            NewLineItem {
                description: "   ".to_string(),
                quantity: 1,
                rate: dec!(10.00),
            },
        )
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(state.items.is_empty());
    }

    #[test]
    fn add_item_rejects_non_positive_rate() {
        let mut state = new_state();
        let err = add_item(
            &mut state,
            NewLineItem {
                description: "Freebie".to_string(),
                quantity: 1,
                rate: Decimal::ZERO,
            },
        )
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(state.items.is_empty());
    }

    #[test]
    fn clear_items_empties_the_list() {
        let mut state = new_state();
        add_item(&mut state, widget()).unwrap();
        clear_items(&mut state);
        assert!(state.items.is_empty());
    }

    #[test]
    fn update_clamps_discount_and_tax() {
        let mut state = new_state();
        add_item(&mut state, widget()).unwrap(); // subtotal 1000

        update_invoice(
            &mut state,
            InvoicePatch {
                discount: Some(Discount::Fixed(dec!(5000.00))),
                tax_percent: Some(dec!(250)),
                ..InvoicePatch::default()
            },
        )
        .unwrap();

        assert_eq!(state.discount, Discount::Fixed(dec!(1000.00)));
        assert_eq!(state.tax_percent, dec!(100));
    }

    #[test]
    fn update_rejects_blank_invoice_number() {
        let mut state = new_state();
        let err = update_invoice(
            &mut state,
            InvoicePatch {
                number: Some("  ".to_string()),
                ..InvoicePatch::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn rejected_update_applies_none_of_its_fields() {
        let mut state = new_state();
        add_item(&mut state, widget()).unwrap();
        let before = state.clone();

        let err = update_invoice(
            &mut state,
            InvoicePatch {
                client: Some(PartyInfo {
                    name: "Riverton Traders".to_string(),
                    ..PartyInfo::default()
                }),
                number: Some("   ".to_string()),
                tax_percent: Some(dec!(5)),
                ..InvoicePatch::default()
            },
        )
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(state, before);
    }

    #[test]
    fn generate_requires_at_least_one_item() {
        let mut state = new_state();
        state.client.name = "Riverton Traders".to_string();

        let err = generate_document(&state, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[test]
    fn generate_requires_a_client_name() {
        let mut state = new_state();
        add_item(&mut state, widget()).unwrap();

        let err = generate_document(&state, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Precondition(_)));
    }

    #[test]
    fn generate_produces_a_named_pdf() {
        let mut state = new_state();
        state.client.name = "Riverton Traders".to_string();
        state.header.number = "INV-20260826-001".to_string();
        add_item(&mut state, widget()).unwrap();

        let doc = generate_document(&state, &RenderConfig::default()).unwrap();
        assert_eq!(doc.media_type, "application/pdf");
        assert!(doc.bytes.starts_with(b"%PDF"));
        assert!(doc.filename.starts_with("Invoice_INV-20260826-001_"));
        assert!(doc.filename.ends_with(".pdf"));
    }

    #[test]
    fn filenames_are_sanitized() {
        assert_eq!(sanitize_filename("INV/2026 #1"), "INV_2026__1");
        assert_eq!(sanitize_filename("///"), "invoice");
    }
}
