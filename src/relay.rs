use serde::Deserialize;

use crate::config::TwilioConfig;
use crate::domain::order::DeliveryType;
use crate::domain::sanitize::clean_for_message;
use crate::errors::AppError;

/// Item lines rendered in a kitchen message before truncation kicks in.
const MAX_MESSAGE_ITEMS: usize = 20;
/// Character cap applied to free text embedded in the message.
const MAX_NOTE_CHARS: usize = 120;

/// One line of a kitchen notification.
#[derive(Debug, Clone)]
pub struct NotifyItem {
    pub name: String,
    pub quantity: i32,
    pub special_instructions: Option<String>,
}

/// Everything the kitchen message needs; validated by the handler before it
/// gets here.
#[derive(Debug, Clone)]
pub struct KitchenNotification {
    pub order_number: String,
    pub items: Vec<NotifyItem>,
    pub table_number: Option<i32>,
    pub delivery_type: DeliveryType,
    pub total: f64,
    pub phone_number: String,
}

/// Render the WhatsApp message sent to the kitchen.
///
/// Output length is bounded: at most [`MAX_MESSAGE_ITEMS`] item lines (with a
/// summary suffix for the rest) and all free text stripped of control
/// characters and angle brackets, truncated to [`MAX_NOTE_CHARS`].
pub fn format_kitchen_message(n: &KitchenNotification) -> String {
    let mut item_lines: Vec<String> = n
        .items
        .iter()
        .take(MAX_MESSAGE_ITEMS)
        .map(|item| {
            let name = clean_for_message(&item.name, MAX_NOTE_CHARS);
            let mut line = format!("• {}x {}", item.quantity, name);
            if let Some(note) = &item.special_instructions {
                let note = clean_for_message(note, MAX_NOTE_CHARS);
                if !note.is_empty() {
                    line.push_str(&format!(" (Note: {note})"));
                }
            }
            line
        })
        .collect();
    if n.items.len() > MAX_MESSAGE_ITEMS {
        item_lines.push(format!(
            "… and {} more items",
            n.items.len() - MAX_MESSAGE_ITEMS
        ));
    }

    let table_line = match n.table_number {
        Some(number) => format!("\n🪑 *Table:* {number}"),
        None => String::new(),
    };

    format!(
        "🔔 *NEW ORDER #{order_number}*\n\n\
         📋 *Items:*\n{items}\n\n\
         📍 *Type:* {delivery_type}{table_line}\n\
         💰 *Total:* ₹{total:.2}\n\
         📞 *Customer:* {phone}\n\n\
         Please prepare this order!",
        order_number = clean_for_message(&n.order_number, 50),
        items = item_lines.join("\n"),
        delivery_type = n.delivery_type.label(),
        total = n.total,
        phone = clean_for_message(&n.phone_number, 20),
    )
}

#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: Option<String>,
    message: Option<String>,
}

/// Send `body` to the configured kitchen number through Twilio's WhatsApp
/// channel. Returns the message SID on success.
pub async fn send_whatsapp(
    http: &reqwest::Client,
    cfg: &TwilioConfig,
    body: &str,
) -> Result<String, AppError> {
    let url = format!(
        "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
        cfg.account_sid
    );
    let form = [
        ("To", format!("whatsapp:{}", cfg.chef_number)),
        ("From", format!("whatsapp:{}", cfg.whatsapp_from)),
        ("Body", body.to_string()),
    ];

    let response = http
        .post(&url)
        .basic_auth(&cfg.account_sid, Some(&cfg.auth_token))
        .form(&form)
        .send()
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let status = response.status();
    let parsed: TwilioMessageResponse = response
        .json()
        .await
        .unwrap_or(TwilioMessageResponse {
            sid: None,
            message: None,
        });

    if !status.is_success() {
        let reason = parsed.message.unwrap_or_else(|| "Unknown error".to_string());
        log::error!("Twilio rejected the message ({status}): {reason}");
        return Err(AppError::Upstream(reason));
    }

    Ok(parsed.sid.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification() -> KitchenNotification {
        KitchenNotification {
            order_number: "ORD-1700000000000-AB12".to_string(),
            items: vec![
                NotifyItem {
                    name: "Butter Naan".to_string(),
                    quantity: 2,
                    special_instructions: None,
                },
                NotifyItem {
                    name: "Paneer Tikka".to_string(),
                    quantity: 1,
                    special_instructions: Some("extra spicy".to_string()),
                },
            ],
            table_number: Some(7),
            delivery_type: DeliveryType::DineIn,
            total: 306.0,
            phone_number: "+919876543210".to_string(),
        }
    }

    #[test]
    fn message_carries_order_items_table_and_total() {
        let msg = format_kitchen_message(&notification());

        assert!(msg.contains("NEW ORDER #ORD-1700000000000-AB12"));
        assert!(msg.contains("• 2x Butter Naan"));
        assert!(msg.contains("• 1x Paneer Tikka (Note: extra spicy)"));
        assert!(msg.contains("*Type:* Dine In"));
        assert!(msg.contains("*Table:* 7"));
        assert!(msg.contains("*Total:* ₹306.00"));
        assert!(msg.contains("*Customer:* +919876543210"));
    }

    #[test]
    fn takeaway_message_has_no_table_line() {
        let mut n = notification();
        n.table_number = None;
        n.delivery_type = DeliveryType::Takeaway;

        let msg = format_kitchen_message(&n);
        assert!(!msg.contains("Table:"));
        assert!(msg.contains("*Type:* Takeaway"));
    }

    #[test]
    fn item_lines_are_capped_at_twenty() {
        let mut n = notification();
        n.items = (0..30)
            .map(|i| NotifyItem {
                name: format!("Dish {i}"),
                quantity: 1,
                special_instructions: None,
            })
            .collect();

        let msg = format_kitchen_message(&n);
        assert_eq!(msg.matches("• ").count(), 20);
        assert!(msg.contains("and 10 more items"));
    }

    #[test]
    fn free_text_is_sanitized_in_the_message() {
        let mut n = notification();
        n.items[1].special_instructions =
            Some("<script>alert(1)</script>\r\nno onions".to_string());

        let msg = format_kitchen_message(&n);
        assert!(!msg.contains('<'));
        assert!(!msg.contains('\r'));
        assert!(msg.contains("no onions"));
    }
}
