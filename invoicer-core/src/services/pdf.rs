//! PDF document assembler.
//!
//! Maps a finalized session snapshot onto a paginated A4 document: logo,
//! company block, invoice/bill-to info, itemized table, summary, notes,
//! static payment table, footer. Section order is fixed. The only
//! recoverable failure is a missing or unreadable logo; everything else
//! propagates as [`AppError::Document`].

use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Px,
    Rgb,
};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::AppError;
use crate::models::{InvoiceHeader, InvoiceTotals, LineItem, PartyInfo, PAYMENT_RECORDS};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const BOTTOM_MARGIN_MM: f32 = 22.0;
const RIGHT_EDGE_MM: f32 = PAGE_WIDTH_MM - MARGIN_MM;

const BODY_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 9.0;
const LINE_MM: f32 = 5.0;
const LOGO_MAX_MM: f32 = 28.0;

// Items table geometry.
const COL_QTY_CENTER: f32 = 118.0;
const COL_RATE_RIGHT: f32 = 160.0;
const DESC_WIDTH_MM: f32 = 88.0;

fn accent() -> Color {
    Color::Rgb(Rgb::new(0.18, 0.53, 0.67, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn gray() -> Color {
    Color::Rgb(Rgb::new(0.4, 0.4, 0.4, None))
}

/// Finalized snapshot consumed by the assembler. Same inputs produce the
/// same document structure; only library-embedded timestamp metadata varies.
#[derive(Debug)]
pub struct InvoiceSnapshot<'a> {
    pub company: &'a PartyInfo,
    pub client: &'a PartyInfo,
    pub header: &'a InvoiceHeader,
    pub items: &'a [LineItem],
    pub totals: InvoiceTotals,
}

pub fn render_invoice(
    invoice: &InvoiceSnapshot<'_>,
    render: &RenderConfig,
) -> Result<Vec<u8>, AppError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", invoice.header.number),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_err)?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_err)?;

    {
        let mut cursor = Cursor {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        };

        draw_logo(&mut cursor, &render.logo_path);
        draw_company_block(&mut cursor, &font, &font_bold, invoice.company);
        draw_title(&mut cursor, &font_bold);
        draw_info_block(&mut cursor, &font, &font_bold, invoice);
        draw_items_table(&mut cursor, &font, &font_bold, invoice.items, &render.currency);
        draw_summary(&mut cursor, &font, &font_bold, &invoice.totals, &render.currency);
        draw_notes(&mut cursor, &font, &font_bold, &invoice.header.notes);
        draw_payment_table(&mut cursor, &font, &font_bold);
        draw_footer(&cursor, &font);
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer).map_err(pdf_err)?;
    writer
        .into_inner()
        .map_err(|e| AppError::Document(anyhow::anyhow!("flushing PDF buffer: {e}")))
}

fn pdf_err<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Document(anyhow::anyhow!("{e}"))
}

/// Write position on the current page. Starts a fresh page whenever the next
/// block would cross the bottom margin, so long item lists flow across pages
/// instead of being truncated.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn ensure_space(&mut self, needed_mm: f32) {
        if self.y - needed_mm < BOTTOM_MARGIN_MM {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn text(&self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn text_right(&self, text: &str, size: f32, right_x: f32, font: &IndirectFontRef) {
        let x = right_x - text_width_mm(text, size);
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn text_centered_at(&self, text: &str, size: f32, center_x: f32, font: &IndirectFontRef) {
        let x = center_x - text_width_mm(text, size) / 2.0;
        self.layer.use_text(text, size, Mm(x), Mm(self.y), font);
    }

    fn text_centered(&self, text: &str, size: f32, font: &IndirectFontRef) {
        self.text_centered_at(text, size, PAGE_WIDTH_MM / 2.0, font);
    }

    fn rule(&self, x1: f32, x2: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(self.y)), false),
                (Point::new(Mm(x2), Mm(self.y)), false),
            ],
            is_closed: false,
        });
    }

    fn set_fill(&self, color: Color) {
        self.layer.set_fill_color(color);
    }
}

fn draw_logo(cursor: &mut Cursor<'_>, path: &Path) {
    let img = match image::open(path) {
        Ok(img) => img,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Logo not embedded");
            return;
        }
    };

    let rgb = img.to_rgb8();
    let (w_px, h_px) = rgb.dimensions();
    if w_px == 0 || h_px == 0 {
        return;
    }

    let aspect = w_px as f32 / h_px as f32;
    let (w_mm, h_mm) = if aspect >= 1.0 {
        (LOGO_MAX_MM, LOGO_MAX_MM / aspect)
    } else {
        (LOGO_MAX_MM * aspect, LOGO_MAX_MM)
    };
    // DPI chosen so the pixel buffer lands at the target physical size.
    let dpi = w_px as f32 / (w_mm / 25.4);

    let image = Image::from(ImageXObject {
        width: Px(w_px as usize),
        height: Px(h_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    cursor.advance(h_mm);
    image.add_to_layer(
        cursor.layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((PAGE_WIDTH_MM - w_mm) / 2.0)),
            translate_y: Some(Mm(cursor.y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    cursor.advance(LINE_MM);
}

fn draw_company_block(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    company: &PartyInfo,
) {
    cursor.ensure_space(30.0);

    cursor.set_fill(accent());
    cursor.advance(3.0);
    cursor.text_centered(&company.name, 18.0, font_bold);
    cursor.set_fill(black());
    cursor.advance(7.0);

    for line in company.address.lines().filter(|l| !l.trim().is_empty()) {
        cursor.text_centered(line.trim(), SMALL_SIZE, font);
        cursor.advance(4.5);
    }

    let contact = match (company.phone.is_empty(), company.email.is_empty()) {
        (false, false) => format!("Phone: {} | Email: {}", company.phone, company.email),
        (false, true) => format!("Phone: {}", company.phone),
        (true, false) => format!("Email: {}", company.email),
        (true, true) => String::new(),
    };
    if !contact.is_empty() {
        cursor.text_centered(&contact, SMALL_SIZE, font);
        cursor.advance(4.5);
    }
    if let Some(website) = company.website.as_deref().filter(|w| !w.is_empty()) {
        cursor.text_centered(&format!("Website: {}", website), SMALL_SIZE, font);
        cursor.advance(4.5);
    }
    cursor.advance(6.0);
}

fn draw_title(cursor: &mut Cursor<'_>, font_bold: &IndirectFontRef) {
    cursor.ensure_space(12.0);
    cursor.set_fill(accent());
    cursor.text("INVOICE", 16.0, MARGIN_MM, font_bold);
    cursor.set_fill(black());
    cursor.advance(10.0);
}

fn draw_info_block(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    invoice: &InvoiceSnapshot<'_>,
) {
    let client = invoice.client;

    let mut right_lines: Vec<String> = vec![client.name.clone()];
    for line in client.address.lines() {
        right_lines.extend(wrap_text(line.trim(), SMALL_SIZE, 70.0));
    }
    if !client.phone.is_empty() {
        right_lines.push(format!("Phone: {}", client.phone));
    }
    if !client.email.is_empty() {
        right_lines.push(format!("Email: {}", client.email));
    }

    let rows = right_lines.len().max(2) + 1;
    cursor.ensure_space(rows as f32 * 4.5 + 8.0);

    let top = cursor.y;
    let x_right = 118.0;

    cursor.set_fill(accent());
    cursor.layer.use_text(
        "Invoice Number:",
        SMALL_SIZE,
        Mm(MARGIN_MM),
        Mm(top),
        font_bold,
    );
    cursor.layer.use_text(
        "Invoice Date:",
        SMALL_SIZE,
        Mm(MARGIN_MM),
        Mm(top - 4.5),
        font_bold,
    );
    cursor
        .layer
        .use_text("Bill To:", SMALL_SIZE, Mm(x_right), Mm(top), font_bold);
    cursor.set_fill(black());

    cursor.layer.use_text(
        invoice.header.number.as_str(),
        SMALL_SIZE,
        Mm(MARGIN_MM + 30.0),
        Mm(top),
        font,
    );
    cursor.layer.use_text(
        invoice.header.date.format("%B %d, %Y").to_string(),
        SMALL_SIZE,
        Mm(MARGIN_MM + 30.0),
        Mm(top - 4.5),
        font,
    );

    for (i, line) in right_lines.iter().enumerate() {
        let weight = if i == 0 { font_bold } else { font };
        cursor.layer.use_text(
            line.as_str(),
            SMALL_SIZE,
            Mm(x_right),
            Mm(top - (i as f32 + 1.0) * 4.5),
            weight,
        );
    }

    cursor.y = top - rows as f32 * 4.5 - 6.0;
}

fn draw_items_table(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    items: &[LineItem],
    currency: &str,
) {
    cursor.ensure_space(16.0);

    cursor.set_fill(accent());
    cursor.text("Description", BODY_SIZE, MARGIN_MM, font_bold);
    cursor.text_centered_at("Quantity", BODY_SIZE, COL_QTY_CENTER, font_bold);
    cursor.text_right(
        &format!("Rate ({})", currency),
        BODY_SIZE,
        COL_RATE_RIGHT,
        font_bold,
    );
    cursor.text_right(
        &format!("Amount ({})", currency),
        BODY_SIZE,
        RIGHT_EDGE_MM,
        font_bold,
    );
    cursor.set_fill(black());
    cursor.advance(2.5);
    cursor.rule(MARGIN_MM, RIGHT_EDGE_MM);
    cursor.advance(LINE_MM + 1.0);

    for item in items {
        let desc_lines = wrap_text(&item.description, BODY_SIZE, DESC_WIDTH_MM);
        let row_height = desc_lines.len().max(1) as f32 * LINE_MM;
        cursor.ensure_space(row_height + 2.0);

        cursor.text(
            desc_lines.first().map(String::as_str).unwrap_or(""),
            BODY_SIZE,
            MARGIN_MM,
            font,
        );
        cursor.text_centered_at(&item.quantity.to_string(), BODY_SIZE, COL_QTY_CENTER, font);
        cursor.text_right(&format_number(item.rate), BODY_SIZE, COL_RATE_RIGHT, font);
        cursor.text_right(&format_number(item.amount()), BODY_SIZE, RIGHT_EDGE_MM, font);

        for line in desc_lines.iter().skip(1) {
            cursor.advance(LINE_MM);
            cursor.text(line, BODY_SIZE, MARGIN_MM, font);
        }
        // Continuation lines already advanced the cursor; step past the last.
        cursor.advance(LINE_MM + 1.0);
    }

    cursor.rule(MARGIN_MM, RIGHT_EDGE_MM);
    cursor.advance(8.0);
}

fn draw_summary(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    totals: &InvoiceTotals,
    currency: &str,
) {
    cursor.ensure_space(32.0);

    let label_right = 150.0;
    let rows = [
        ("Subtotal:".to_string(), totals.subtotal),
        (
            format!("Discount ({}%):", totals.discount_percent.round_dp(1)),
            totals.discount_amount,
        ),
        (
            format!("Tax ({}%):", totals.tax_percent.round_dp(1)),
            totals.tax_amount,
        ),
    ];

    for (label, value) in &rows {
        cursor.text_right(label, BODY_SIZE, label_right, font);
        cursor.text_right(&format_money(currency, *value), BODY_SIZE, RIGHT_EDGE_MM, font);
        cursor.advance(5.5);
    }

    cursor.advance(1.0);
    cursor.rule(110.0, RIGHT_EDGE_MM);
    cursor.advance(6.0);

    cursor.set_fill(accent());
    cursor.text_right("Total:", 12.0, label_right, font_bold);
    cursor.text_right(
        &format_money(currency, totals.total),
        12.0,
        RIGHT_EDGE_MM,
        font_bold,
    );
    cursor.set_fill(black());
    cursor.advance(12.0);
}

fn draw_notes(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
    notes: &str,
) {
    if notes.trim().is_empty() {
        return;
    }

    cursor.ensure_space(14.0);
    cursor.text("Notes:", BODY_SIZE, MARGIN_MM, font_bold);
    cursor.advance(LINE_MM);

    for raw_line in notes.lines() {
        for line in wrap_text(raw_line, SMALL_SIZE, RIGHT_EDGE_MM - MARGIN_MM) {
            cursor.ensure_space(LINE_MM);
            cursor.text(&line, SMALL_SIZE, MARGIN_MM, font);
            cursor.advance(4.5);
        }
    }
    cursor.advance(6.0);
}

fn draw_payment_table(
    cursor: &mut Cursor<'_>,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    let x_holder = MARGIN_MM;
    let x_method = 80.0;
    let x_details = 120.0;

    cursor.ensure_space(16.0 + PAYMENT_RECORDS.len() as f32 * LINE_MM);

    cursor.set_fill(accent());
    cursor.text("Payment Information", 12.0, MARGIN_MM, font_bold);
    cursor.set_fill(black());
    cursor.advance(7.0);

    cursor.text("Account Holder", SMALL_SIZE, x_holder, font_bold);
    cursor.text("Payment Method", SMALL_SIZE, x_method, font_bold);
    cursor.text("Account Details", SMALL_SIZE, x_details, font_bold);
    cursor.advance(2.0);
    cursor.rule(MARGIN_MM, RIGHT_EDGE_MM);
    cursor.advance(LINE_MM);

    for record in PAYMENT_RECORDS {
        cursor.text(record.account_holder, SMALL_SIZE, x_holder, font);
        cursor.text(record.method, SMALL_SIZE, x_method, font);
        cursor.text(record.details, SMALL_SIZE, x_details, font);
        cursor.advance(LINE_MM);
    }
    cursor.advance(4.0);
}

fn draw_footer(cursor: &Cursor<'_>, font: &IndirectFontRef) {
    cursor.set_fill(gray());
    let text = "Thank you for your business! For any queries, please contact us.";
    let x = (PAGE_WIDTH_MM - text_width_mm(text, 8.0)) / 2.0;
    cursor.layer.use_text(text, 8.0, Mm(x), Mm(12.0), font);
    cursor.set_fill(black());
}

/// Approximate Helvetica advance width of one character, in em units. Close
/// enough for right-alignment of numeric columns and for word wrapping.
fn char_em(c: char) -> f32 {
    match c {
        'i' | 'l' | 'j' | 'I' | '.' | ',' | ':' | ';' | '\'' | '|' | ' ' | '!' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '-' | '/' | '[' | ']' => 0.33,
        'm' | 'M' | 'W' | '@' | '%' => 0.92,
        'w' => 0.72,
        c if c.is_ascii_uppercase() => 0.68,
        c if c.is_ascii_digit() => 0.56,
        _ => 0.52,
    }
}

fn text_width_mm(text: &str, font_size: f32) -> f32 {
    let em: f32 = text.chars().map(char_em).sum();
    // 1 pt = 0.3528 mm
    em * font_size * 0.3528
}

/// Greedy word wrap against the estimated rendered width.
fn wrap_text(text: &str, font_size: f32, max_mm: f32) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width_mm(&candidate, font_size) <= max_mm || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// `1234567.5` -> `1,234,567.50`. Exactly two decimals, thousands separators.
pub fn format_number(value: Decimal) -> String {
    let s = value.round_dp(2).to_string();
    let (int_part, raw_dec) = match s.split_once('.') {
        Some((i, d)) => (i, d),
        None => (s.as_str(), ""),
    };
    let dec_part = format!("{:0<2}", raw_dec);
    let dec_part = &dec_part[..2];
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{dec_part}")
}

/// Money with the configured currency label: `PKR 1,234.50`.
pub fn format_money(currency: &str, value: Decimal) -> String {
    format!("{} {}", currency, format_number(value))
}
