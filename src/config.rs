use std::env;
use std::time::Duration;

/// Business parameters for order pricing and verification.
///
/// Defaults mirror the production configuration; every value can be
/// overridden through the environment so the figures are never scattered
/// through the pricing code as literals.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Tax rate applied to the subtotal (e.g. 0.05 for 5%).
    pub tax_rate: f64,
    /// Flat fee charged if and only if the delivery mode is `delivery`.
    pub delivery_fee: f64,
    /// Maximum allowed difference between a claimed unit price and the
    /// catalog price before the order is rejected.
    pub price_tolerance: f64,
    /// Maximum allowed difference for the claimed subtotal/tax/total,
    /// absorbing client-side rounding.
    pub totals_tolerance: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.05,
            delivery_fee: 50.0,
            price_tolerance: 0.01,
            totals_tolerance: 1.0,
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tax_rate: parse_env("TAX_RATE", defaults.tax_rate),
            delivery_fee: parse_env("DELIVERY_FEE", defaults.delivery_fee),
            price_tolerance: defaults.price_tolerance,
            totals_tolerance: defaults.totals_tolerance,
        }
    }
}

/// Per-phone-number order cap. In-process and best-effort: the window map
/// lives in memory and resets on restart, which is an accepted property of
/// this anti-abuse control, not a bug.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_orders: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_orders: 10,
            window: Duration::from_secs(60 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_orders: parse_env("RATE_LIMIT_MAX_ORDERS", defaults.max_orders),
            window: Duration::from_secs(parse_env(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.window.as_secs(),
            )),
        }
    }
}

/// Twilio WhatsApp credentials for the notification relay.
///
/// All four values are required to send; when any is missing the relay
/// endpoint answers with a configuration error instead of refusing to boot.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub whatsapp_from: String,
    pub chef_number: String,
}

impl TwilioConfig {
    pub fn from_env() -> Option<Self> {
        Some(Self {
            account_sid: env::var("TWILIO_ACCOUNT_SID").ok()?,
            auth_token: env::var("TWILIO_AUTH_TOKEN").ok()?,
            whatsapp_from: env::var("TWILIO_WHATSAPP_FROM").ok()?,
            chef_number: env::var("CHEF_WHATSAPP_NUMBER").ok()?,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
