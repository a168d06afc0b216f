//! Customer and stored payment method views.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::subscription::Subscription;

/// A customer record held by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Gateway-issued customer ID.
    pub id: String,

    /// Customer email.
    pub email: String,

    /// Opaque key/value slots attached by the gateway (carries the plan name).
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,

    /// Stored payment methods, in gateway order.
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

impl Customer {
    /// The payment method most recently updated at the gateway.
    pub fn newest_payment_method(&self) -> Option<&PaymentMethod> {
        newest_payment_method(&self.payment_methods)
    }
}

/// A tokenized card stored by the gateway on behalf of a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Gateway token referencing the stored card.
    pub token: String,

    /// When the gateway last updated this record.
    pub updated_at: DateTime<Utc>,

    /// Card brand as reported by the gateway.
    pub card_type: String,

    /// Last four digits of the card number.
    pub last_4: String,

    /// Name on the card.
    pub cardholder_name: String,

    /// Card expiration month/year.
    pub expiration: CardExpiration,

    /// Subscriptions billed against this payment method, in gateway order.
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

/// Select the payment method with the maximum `updated_at`.
///
/// On equal timestamps the later element wins, preserving the original
/// stable-sort-then-take-last behavior.
pub fn newest_payment_method(methods: &[PaymentMethod]) -> Option<&PaymentMethod> {
    let mut newest: Option<&PaymentMethod> = None;
    for method in methods {
        match newest {
            Some(current) if method.updated_at < current.updated_at => {}
            _ => newest = Some(method),
        }
    }
    newest
}

/// Card expiration month, as carried on the gateway's `MM/YYYY` wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExpiration {
    pub month: u32,
    pub year: i32,
}

impl CardExpiration {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// First instant after the expiration month ends, in UTC.
    ///
    /// `None` if the stored month/year do not form a real date.
    fn first_instant_after(&self) -> Option<DateTime<Utc>> {
        let (year, month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        let start = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
        Some(Utc.from_utc_datetime(&start))
    }

    /// True iff the end of the expiration month is strictly before `now`.
    ///
    /// An unparseable expiration is treated as not expired; the gateway is
    /// the authority on chargeability.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.first_instant_after() {
            Some(boundary) => boundary <= now,
            None => false,
        }
    }

    /// True iff the card is expired as of the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl fmt::Display for CardExpiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Error parsing a gateway expiration date string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid expiration date: {0:?}")]
pub struct ParseExpirationError(String);

impl FromStr for CardExpiration {
    type Err = ParseExpirationError;

    /// Parse the gateway's `MM/YYYY` form; two-digit years mean 20YY.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseExpirationError(s.to_string());
        let (month, year) = s.split_once('/').ok_or_else(err)?;
        let month: u32 = month.trim().parse().map_err(|_| err())?;
        let mut year: i32 = year.trim().parse().map_err(|_| err())?;
        if !(1..=12).contains(&month) {
            return Err(err());
        }
        if year < 100 {
            year += 2000;
        }
        Ok(Self { month, year })
    }
}
