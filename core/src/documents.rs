//! Generated documents (letters of intent and invoices), how they are laid
//! out on an A4 page, and the persisted invoice list.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RenderError, StorageError};
use crate::loi::LoiSubmission;
use crate::storage::{load_json, save_json, KeyValueStore, INVOICES_KEY};

pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;

/// DOM ids of the hidden templates the renderer rasterizes.
pub const LOI_TEMPLATE_ID: &str = "loi-pdf-template";
pub const INVOICE_TEMPLATE_ID: &str = "invoice-pdf-template";

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn underscore_whitespace(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterOfIntent {
    pub id: String,
    pub issued_at: DateTime<Utc>,
    pub submission: LoiSubmission,
}

impl LetterOfIntent {
    pub fn new(submission: LoiSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("GEM-{}", now.timestamp_millis()),
            issued_at: now,
            submission,
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "GEMBank_LOI_{}.pdf",
            underscore_whitespace(&self.submission.company_name)
        )
    }

    /// Issue date as printed on the letter, in India Standard Time.
    pub fn issued_on(&self) -> String {
        match FixedOffset::east_opt(IST_OFFSET_SECS) {
            Some(ist) => self.issued_at.with_timezone(&ist).format("%d/%m/%Y").to_string(),
            None => self.issued_at.format("%d/%m/%Y").to_string(),
        }
    }

    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            template_id: LOI_TEMPLATE_ID,
            file_name: self.file_name(),
            fit: PageFit::Contain,
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub payment_method_id: String,
    /// Whole rupees.
    pub amount: u64,
    pub currency: String,
    /// ISO-8601 timestamp.
    pub date: String,
    pub customer_name: String,
    pub customer_email: String,
}

impl Invoice {
    pub fn new(
        payment_method_id: impl Into<String>,
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("INV-{}", now.timestamp_millis()),
            payment_method_id: payment_method_id.into(),
            amount,
            currency: "INR".to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("GEMBank_Invoice_{}.pdf", self.id)
    }

    pub fn formatted_amount(&self) -> String {
        format!("₹{}.00", self.amount)
    }

    /// Date portion for display; falls back to the raw value if it does not parse.
    pub fn display_date(&self) -> String {
        DateTime::parse_from_rfc3339(&self.date)
            .map(|date| date.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }

    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            template_id: INVOICE_TEMPLATE_ID,
            file_name: self.file_name(),
            fit: PageFit::FullWidth,
            scale: 2.0,
        }
    }
}

/// How a raster image is placed on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFit {
    /// Scaled to fit inside the page, centered horizontally, top aligned.
    Contain,
    /// Scaled to the page width; height follows the aspect ratio.
    FullWidth,
}

/// Image position and size on the page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PageFit {
    pub fn place(self, image_width: f64, image_height: f64) -> Placement {
        if image_width <= 0.0 || image_height <= 0.0 {
            return Placement {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            };
        }
        match self {
            PageFit::Contain => {
                let ratio = (A4_WIDTH_MM / image_width).min(A4_HEIGHT_MM / image_height);
                let width = image_width * ratio;
                Placement {
                    x: (A4_WIDTH_MM - width) / 2.0,
                    y: 0.0,
                    width,
                    height: image_height * ratio,
                }
            }
            PageFit::FullWidth => Placement {
                x: 0.0,
                y: 0.0,
                width: A4_WIDTH_MM,
                height: image_height * A4_WIDTH_MM / image_width,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub template_id: &'static str,
    pub file_name: String,
    pub fit: PageFit,
    /// Raster scale relative to CSS pixels.
    pub scale: f64,
}

/// Turns a rendered template into a downloaded single-page PDF.
#[async_trait(?Send)]
pub trait DocumentRenderer {
    async fn render(&self, request: &RenderRequest) -> Result<(), RenderError>;
}

pub fn load_invoices(store: &dyn KeyValueStore) -> Result<Vec<Invoice>, StorageError> {
    Ok(load_json(store, INVOICES_KEY)?.unwrap_or_default())
}

/// Appends to the persisted list and returns its new length.
///
/// Plain read-modify-write. A malformed list is left alone and reported.
pub fn append_invoice(store: &dyn KeyValueStore, invoice: &Invoice) -> Result<usize, StorageError> {
    let mut invoices = load_invoices(store)?;
    invoices.push(invoice.clone());
    save_json(store, INVOICES_KEY, &invoices)?;
    Ok(invoices.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loi::{LoiField, LoiForm};
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    fn letter(company: &str) -> LetterOfIntent {
        let mut form = LoiForm::new();
        form.set_field(LoiField::CompanyName, company).unwrap();
        form.set_field(LoiField::ContactName, "A. Sharma").unwrap();
        form.set_field(LoiField::Email, "a@acme.test").unwrap();
        form.set_field(LoiField::Phone, "9990001111").unwrap();
        form.set_authorization(true);
        LetterOfIntent::new(form.submission().unwrap(), at(1_700_000_000_000))
    }

    #[test]
    fn file_names_follow_entity_and_key_field() {
        assert_eq!(letter("Acme Gems\tPvt Ltd").file_name(), "GEMBank_LOI_Acme_Gems_Pvt_Ltd.pdf");

        let invoice = Invoice::new("pm_123", "Asha", "asha@acme.test", 1000, at(1_700_000_000_456));
        assert_eq!(invoice.id, "INV-1700000000456");
        assert_eq!(invoice.file_name(), "GEMBank_Invoice_INV-1700000000456.pdf");
        assert_eq!(invoice.date, "2023-11-14T22:13:20.456Z");
        assert_eq!(invoice.currency, "INR");
        assert_eq!(invoice.formatted_amount(), "₹1000.00");
    }

    #[test]
    fn letter_date_is_printed_in_ist() {
        // 2023-11-14 22:13 UTC is already the 15th in India.
        assert_eq!(letter("Acme").issued_on(), "15/11/2023");
    }

    #[test]
    fn contain_fit_centers_a_narrow_image() {
        let placement = PageFit::Contain.place(1000.0, 2000.0);
        assert!((placement.height - A4_HEIGHT_MM).abs() < 1e-9);
        assert!((placement.width - 148.5).abs() < 1e-9);
        assert!((placement.x - 30.75).abs() < 1e-9);
        assert_eq!(placement.y, 0.0);
    }

    #[test]
    fn full_width_fit_keeps_aspect_ratio() {
        let placement = PageFit::FullWidth.place(800.0, 400.0);
        assert_eq!(placement.width, A4_WIDTH_MM);
        assert!((placement.height - 105.0).abs() < 1e-9);
        assert_eq!(PageFit::FullWidth.place(0.0, 10.0).width, 0.0);
    }

    #[test]
    fn invoices_are_appended_in_order() {
        let store = MemoryStore::new();
        let first = Invoice::new("pm_1", "A", "a@x", 1000, at(1));
        let second = Invoice::new("pm_2", "B", "b@x", 1000, at(2));
        assert_eq!(append_invoice(&store, &first), Ok(1));
        assert_eq!(append_invoice(&store, &second), Ok(2));
        assert_eq!(load_invoices(&store).unwrap(), vec![first, second]);

        let raw = store.get(INVOICES_KEY).unwrap().unwrap();
        assert!(raw.contains("\"paymentMethodId\":\"pm_1\""));
    }

    #[test]
    fn malformed_invoice_list_is_not_overwritten() {
        let store = MemoryStore::new();
        store.set(INVOICES_KEY, "{not json").unwrap();
        let invoice = Invoice::new("pm_1", "A", "a@x", 1000, at(1));
        assert!(matches!(
            append_invoice(&store, &invoice),
            Err(StorageError::Malformed { .. })
        ));
        assert_eq!(store.get(INVOICES_KEY).unwrap().as_deref(), Some("{not json"));
    }
}
