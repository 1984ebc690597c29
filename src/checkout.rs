use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use crate::cart::CartItem;

static CONTACT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,19}$").unwrap());

/// Validated checkout form. Every field is required; the contact must look
/// like a phone number.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct CustomerInfo {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(regex(path = *CONTACT_REGEX, message = "Contact must be a phone number"))]
    pub contact: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Whatsapp,
}

/// Where the order hand-off goes. Read from the environment so the shop
/// owner's address/number is not baked into the handlers.
#[derive(Clone, Debug)]
pub struct HandoffConfig {
    pub email: String,
    pub whatsapp: String,
}

impl HandoffConfig {
    pub fn from_env() -> Self {
        HandoffConfig {
            email: std::env::var("ORDER_EMAIL")
                .unwrap_or_else(|_| "jaweriyasofficial@gmail.com".to_string()),
            whatsapp: std::env::var("ORDER_WHATSAPP")
                .unwrap_or_else(|_| "923400434334".to_string()),
        }
    }
}

impl Default for HandoffConfig {
    fn default() -> Self {
        HandoffConfig::from_env()
    }
}

/// Renders the plain-text order summary handed to the external channel.
/// Pure function over the cart snapshot and the submitted form.
pub fn compose_order_summary(items: &[CartItem], customer: &CustomerInfo) -> String {
    let mut summary = format!(
        "New Order Received:\n\nCustomer: {}\nContact: {}\nAddress: {}\n\nOrder Details:\n",
        customer.name, customer.contact, customer.address
    );

    for (i, item) in items.iter().enumerate() {
        let line_total = item.product.price * item.quantity as f32;
        summary.push_str(&format!(
            "{}. {} - PKR {} x {} = PKR {}\n",
            i + 1,
            item.product.title,
            item.product.price,
            item.quantity,
            line_total
        ));
    }

    let total: f32 = items
        .iter()
        .map(|item| item.product.price * item.quantity as f32)
        .sum();
    summary.push_str(&format!("\nOrder Total: PKR {}", total));
    summary
}

/// Builds the destination uri for the chosen channel. This is a one-way
/// hand-off: nothing here waits on, or can observe, actual delivery.
pub fn handoff_uri(summary: &str, method: DeliveryMethod, config: &HandoffConfig) -> String {
    match method {
        DeliveryMethod::Email => format!(
            "mailto:{}?subject=New Order Received&body={}",
            config.email,
            percent_encode(summary)
        ),
        DeliveryMethod::Whatsapp => {
            format!("https://wa.me/{}?text={}", config.whatsapp, percent_encode(summary))
        }
    }
}

//encodeURIComponent-style: unreserved characters pass through, everything
//else is %XX per utf-8 byte.
fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}
