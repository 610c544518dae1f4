//! HTML ticket rendering.
//!
//! The rendered document is self-contained: styling is inline and the QR
//! image is embedded as a `data:` URL, so it displays correctly offline.

use serde::Serialize;

use super::ticket_data::TicketData;
use crate::domain::booking::format_inr;

/// Fixed logistics and safety instructions printed on every ticket.
pub const IMPORTANT_INSTRUCTIONS: [&str; 5] = [
    "Please carry this ticket and a valid ID proof",
    "Report at the mentioned location 30 minutes before departure",
    "Carry comfortable trekking shoes and warm clothes",
    "Follow all safety instructions given by the trek guide",
    "This ticket is non-transferable and non-refundable",
];

/// Brand contact details printed at the bottom of the ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// A rendered ticket ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketDocument {
    pub file_name: String,
    pub html: String,
}

impl TicketDocument {
    pub const CONTENT_TYPE: &'static str = "text/html; charset=utf-8";
}

/// Renders tickets for one brand.
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    brand_prefix: String,
    contact: ContactInfo,
}

impl TicketRenderer {
    pub fn new(brand_prefix: impl Into<String>, contact: ContactInfo) -> Self {
        Self {
            brand_prefix: brand_prefix.into(),
            contact,
        }
    }

    /// `{brand}_Trek_Ticket_{booking_id}.html`
    pub fn file_name(&self, booking_id: &str) -> String {
        format!("{}_Trek_Ticket_{}.html", self.brand_prefix, booking_id)
    }

    /// Renders `ticket` into a printable HTML document.
    ///
    /// Pure: the same input always produces the same document.
    pub fn render(&self, ticket: &TicketData) -> TicketDocument {
        let record = &ticket.record;
        let booking_id = record.booking_id().as_str();

        let participants = record.participants();
        let mut rows = vec![
            ("Trek Name", record.trek_title().to_string()),
            ("Traveler Name", record.full_name()),
            (
                "Participants",
                format!(
                    "{} Person{}",
                    participants,
                    if participants > 1 { "s" } else { "" }
                ),
            ),
            ("Trek Date", ticket.trek_date.clone()),
            ("Reporting Time", ticket.reporting_time.clone()),
            ("Reporting Location", ticket.reporting_location.clone()),
            ("Contact", record.phone().to_string()),
            ("Email", record.email().to_string()),
            ("Amount Paid", format_inr(record.amount())),
            ("Payment ID", record.payment_id().to_string()),
            ("Booking Date", record.booking_date().to_string()),
        ];
        if let Some(message) = record.message() {
            rows.push(("Message", message.to_string()));
        }

        let details: String = rows
            .iter()
            .map(|(label, value)| {
                format!(
                    r#"                <div class="detail-row">
                    <span class="detail-label">{}</span>
                    <span class="detail-value">{}</span>
                </div>
"#,
                    label,
                    html_escape(value)
                )
            })
            .collect();

        let instructions: String = IMPORTANT_INSTRUCTIONS
            .iter()
            .map(|item| format!("                <li>{}</li>\n", item))
            .collect();

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Trek Ticket - {booking_id}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="ticket">
        <div class="ticket-header">
            <h1>🏔️ {brand} TREK TICKET</h1>
            <p>Adventure Awaits You!</p>
        </div>

        <div class="ticket-body">
            <div class="booking-details">
{details}            </div>

            <div class="qr-section">
                <div class="booking-id">{booking_id}</div>
                <img src="{qr}" alt="QR Code" class="qr-code" />
                <p class="qr-instruction">
                    Scan this QR code for quick verification<br>
                    Show this ticket at the reporting location
                </p>
            </div>
        </div>

        <div class="important-info">
            <h3>⚠️ Important Instructions</h3>
            <ul>
{instructions}            </ul>
        </div>

        <div class="contact-info">
            <h3>📞 Contact Information</h3>
            <p><strong>Phone:</strong> {phone}</p>
            <p><strong>Email:</strong> {email}</p>
            <p><strong>Address:</strong> {address}</p>
            <p>For any queries or support, feel free to contact us!</p>
        </div>
    </div>
</body>
</html>"#,
            booking_id = html_escape(booking_id),
            css = TICKET_CSS,
            brand = html_escape(&self.brand_prefix.to_uppercase()),
            details = details,
            qr = html_escape(ticket.qr_image.data_url()),
            instructions = instructions,
            phone = html_escape(&self.contact.phone),
            email = html_escape(&self.contact.email),
            address = html_escape(&self.contact.address),
        );

        TicketDocument {
            file_name: self.file_name(booking_id),
            html,
        }
    }
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const TICKET_CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    min-height: 100vh;
    padding: 20px;
}

.ticket {
    max-width: 800px;
    margin: 0 auto;
    background: white;
    border-radius: 20px;
    box-shadow: 0 20px 40px rgba(0,0,0,0.1);
    overflow: hidden;
    position: relative;
}

.ticket::before,
.ticket::after {
    content: '';
    position: absolute;
    top: 50%;
    width: 20px;
    height: 20px;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    border-radius: 50%;
    transform: translateY(-50%);
}

.ticket::before { left: -10px; }
.ticket::after { right: -10px; }

.ticket-header {
    background: linear-gradient(135deg, #7C3AED 0%, #3B82F6 100%);
    color: white;
    padding: 30px;
    text-align: center;
}

.ticket-header h1 {
    font-size: 28px;
    margin-bottom: 10px;
}

.ticket-header p {
    font-size: 16px;
    opacity: 0.9;
}

.ticket-body {
    padding: 40px;
    display: grid;
    grid-template-columns: 2fr 1fr;
    gap: 40px;
}

.booking-details {
    display: flex;
    flex-direction: column;
    gap: 20px;
}

.detail-row {
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 15px 0;
    border-bottom: 1px solid #e5e7eb;
}

.detail-row:last-child {
    border-bottom: none;
}

.detail-label {
    font-weight: 600;
    color: #374151;
    font-size: 14px;
    text-transform: uppercase;
    letter-spacing: 0.5px;
}

.detail-value {
    font-size: 16px;
    color: #111827;
    font-weight: 500;
}

.qr-section {
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    background: #f9fafb;
    border-radius: 15px;
    padding: 30px;
    text-align: center;
}

.qr-code {
    margin-bottom: 20px;
    border-radius: 10px;
    overflow: hidden;
    box-shadow: 0 4px 6px rgba(0,0,0,0.1);
}

.booking-id {
    font-size: 18px;
    font-weight: bold;
    color: #7C3AED;
    margin-bottom: 10px;
    letter-spacing: 1px;
}

.qr-instruction {
    font-size: 12px;
    color: #6b7280;
    line-height: 1.4;
}

.important-info {
    background: #fef3c7;
    border: 1px solid #fbbf24;
    border-radius: 10px;
    padding: 20px;
    margin-top: 30px;
}

.important-info h3 {
    color: #92400e;
    margin-bottom: 10px;
    font-size: 16px;
}

.important-info ul {
    color: #92400e;
    font-size: 14px;
    line-height: 1.6;
    padding-left: 20px;
}

.contact-info {
    background: #e0f2fe;
    border-radius: 10px;
    padding: 20px;
    margin-top: 20px;
    text-align: center;
}

.contact-info h3 {
    color: #0369a1;
    margin-bottom: 10px;
}

.contact-info p {
    color: #0369a1;
    font-size: 14px;
    margin: 5px 0;
}

@media print {
    body {
        background: white;
        padding: 0;
    }

    .ticket::before,
    .ticket::after {
        display: none;
    }
}

@media (max-width: 768px) {
    .ticket-body {
        grid-template-columns: 1fr;
        gap: 30px;
        padding: 30px 20px;
    }

    .ticket-header {
        padding: 20px;
    }

    .ticket-header h1 {
        font-size: 24px;
    }
}
"#;
