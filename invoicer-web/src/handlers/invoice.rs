//! JSON API over the invoice session: read state, add/clear items, patch
//! details, download the generated PDF.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Serialize;

use invoicer_core::commands::{self, InvoicePatch};
use invoicer_core::models::{Discount, InvoiceHeader, InvoiceTotals, LineItem, NewLineItem, PartyInfo};
use invoicer_core::session::SessionState;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct ItemView {
    pub description: String,
    pub quantity: u32,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl From<&LineItem> for ItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            description: item.description.clone(),
            quantity: item.quantity,
            rate: item.rate,
            amount: item.amount(),
        }
    }
}

/// Full session snapshot with freshly computed totals.
#[derive(Debug, Serialize)]
pub struct InvoiceView {
    pub company: PartyInfo,
    pub client: PartyInfo,
    pub header: InvoiceHeader,
    pub items: Vec<ItemView>,
    pub discount: Discount,
    pub tax_percent: Decimal,
    pub totals: InvoiceTotals,
}

fn view_of(session: &SessionState) -> InvoiceView {
    InvoiceView {
        company: session.company.clone(),
        client: session.client.clone(),
        header: session.header.clone(),
        items: session.items.iter().map(ItemView::from).collect(),
        discount: session.discount,
        tax_percent: session.tax_percent,
        totals: session.totals(),
    }
}

pub async fn get_invoice(State(state): State<AppState>) -> Json<InvoiceView> {
    let session = state.session.read().await;
    Json(view_of(&session))
}

pub async fn add_item(
    State(state): State<AppState>,
    Json(input): Json<NewLineItem>,
) -> Result<impl IntoResponse, ApiError> {
    let mut session = state.session.write().await;
    let item = commands::add_item(&mut session, input)?;
    Ok((StatusCode::CREATED, Json(ItemView::from(&item))))
}

pub async fn clear_items(State(state): State<AppState>) -> StatusCode {
    let mut session = state.session.write().await;
    commands::clear_items(&mut session);
    StatusCode::NO_CONTENT
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Json(patch): Json<InvoicePatch>,
) -> Result<Json<InvoiceView>, ApiError> {
    let mut session = state.session.write().await;
    commands::update_invoice(&mut session, patch)?;
    Ok(Json(view_of(&session)))
}

pub async fn reset_invoice(State(state): State<AppState>) -> Json<InvoiceView> {
    let mut session = state.session.write().await;
    session.reset();
    tracing::info!("Session reset");
    Json(view_of(&session))
}

/// Generate the PDF and return it as a file download.
pub async fn generate_pdf(State(state): State<AppState>) -> Result<Response, ApiError> {
    let session = state.session.read().await;
    let document = commands::generate_document(&session, &state.settings.render)?;

    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.media_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
