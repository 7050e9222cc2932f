use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{Booking, BookingStatus},
    error::{AppError, Result},
    repository::BookingRepository,
};

const MOLLIE_API_BASE: &str = "https://api.mollie.com/v2";

/// One stay being paid for. Checkout creates a single payment at Mollie
/// covering all stays, then one booking row per stay.
#[derive(Debug, Clone)]
pub struct CheckoutStay {
    pub room_id: u32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub subtotal_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSession {
    pub checkout_url: String,
    pub payment_id: String,
}

// Wire types for the two Mollie endpoints we use.

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MollieAmount {
    currency: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMolliePayment {
    amount: MollieAmount,
    description: String,
    redirect_url: String,
    webhook_url: String,
    metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct MolliePayment {
    id: String,
    status: String,
    #[serde(rename = "_links", default)]
    links: MollieLinks,
}

#[derive(Debug, Default, Deserialize)]
struct MollieLinks {
    checkout: Option<MollieLink>,
}

#[derive(Debug, Deserialize)]
struct MollieLink {
    href: String,
}

#[derive(Debug, Deserialize)]
struct MollieApiError {
    title: String,
    detail: String,
}

pub struct MollieClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    webhook_url: String,
    booking_repo: Arc<dyn BookingRepository>,
}

impl MollieClient {
    pub fn new(
        api_key: String,
        webhook_url: String,
        booking_repo: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            api_base: MOLLIE_API_BASE.to_string(),
            webhook_url,
            booking_repo,
        }
    }

    /// Creates one payment at Mollie for the whole order and one booking row
    /// per stay, each carrying the provider's initial payment status.
    /// Returns the hosted checkout URL the client should redirect to.
    pub async fn create_booking_checkout(
        &self,
        guest_id: Uuid,
        order_id: &str,
        description: &str,
        redirect_url: &str,
        stays: &[CheckoutStay],
        total_cents: i64,
    ) -> Result<CheckoutSession> {
        let mut metadata = HashMap::new();
        metadata.insert("order_id".to_string(), order_id.to_string());
        metadata.insert("guest_id".to_string(), guest_id.to_string());

        let body = CreateMolliePayment {
            amount: MollieAmount {
                currency: "EUR".to_string(),
                value: format_amount(total_cents),
            },
            description: description.to_string(),
            redirect_url: redirect_url.to_string(),
            webhook_url: self.webhook_url.clone(),
            metadata,
        };

        let payment = self.post_payment(&body).await?;
        let initial_status = BookingStatus::from_provider(&payment.status);

        let now = Utc::now();
        for stay in stays {
            let booking = Booking {
                id: Uuid::new_v4(),
                guest_id,
                room_id: stay.room_id,
                check_in: stay.check_in,
                check_out: stay.check_out,
                guests: stay.guests,
                total_cents: stay.subtotal_cents,
                status: initial_status.clone(),
                payment_id: Some(payment.id.clone()),
                created_at: now,
                updated_at: now,
            };

            self.booking_repo.create(booking).await?;
        }

        tracing::info!(
            "Created payment {} covering {} stay(s) for guest {}",
            payment.id,
            stays.len(),
            guest_id
        );

        let checkout_url = payment
            .links
            .checkout
            .map(|l| l.href)
            .ok_or_else(|| AppError::External("No checkout URL returned".to_string()))?;

        Ok(CheckoutSession {
            checkout_url,
            payment_id: payment.id,
        })
    }

    /// Applies a webhook notification. Mollie sends only the payment id and
    /// no signature; fetching the payment back over the authenticated API is
    /// the authenticity check. Every booking row under the payment gets the
    /// reported status, verbatim.
    pub async fn handle_webhook(&self, payment_id: &str) -> Result<()> {
        let payment = self.get_payment(payment_id).await?;
        let status = BookingStatus::from_provider(&payment.status);

        let updated = self
            .booking_repo
            .update_status_by_payment(payment_id, status.clone())
            .await?;

        if updated == 0 {
            tracing::warn!("No bookings found for payment: {}", payment_id);
        } else {
            tracing::info!(
                "Payment {} is now '{}'; updated {} booking(s)",
                payment_id,
                status,
                updated
            );
        }

        Ok(())
    }

    async fn post_payment(&self, body: &CreateMolliePayment) -> Result<MolliePayment> {
        let response = self
            .http
            .post(format!("{}/payments", self.api_base))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::External(format!("Mollie request failed: {}", e)))?;

        Self::parse_response(response).await
    }

    async fn get_payment(&self, payment_id: &str) -> Result<MolliePayment> {
        let response = self
            .http
            .get(format!("{}/payments/{}", self.api_base, payment_id))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::External(format!("Mollie request failed: {}", e)))?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<MolliePayment> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<MolliePayment>()
                .await
                .map_err(|e| AppError::External(format!("Invalid Mollie response: {}", e)))
        } else {
            let detail = match response.json::<MollieApiError>().await {
                Ok(err) => format!("{}: {}", err.title, err.detail),
                Err(_) => status.to_string(),
            };
            tracing::error!("Mollie API error: {}", detail);
            Err(AppError::Payment(format!("Payment provider error: {}", detail)))
        }
    }
}

/// Mollie wants amounts as exact decimal strings ("129.00"), not floats.
fn format_amount(cents: i64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(100), "1.00");
        assert_eq!(format_amount(15_900), "159.00");
        assert_eq!(format_amount(34_901), "349.01");
    }

    #[test]
    fn test_create_payment_wire_format() {
        let mut metadata = HashMap::new();
        metadata.insert("order_id".to_string(), "order-42".to_string());

        let body = CreateMolliePayment {
            amount: MollieAmount {
                currency: "EUR".to_string(),
                value: format_amount(23_800),
            },
            description: "2 nights, Deluxe Double".to_string(),
            redirect_url: "https://shop.example/checkout/done".to_string(),
            webhook_url: "https://shop.example/api/payments/webhook/mollie".to_string(),
            metadata,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"]["value"], "238.00");
        assert_eq!(json["amount"]["currency"], "EUR");
        // Mollie's field names are camelCase
        assert!(json.get("redirectUrl").is_some());
        assert!(json.get("webhookUrl").is_some());
        assert_eq!(json["metadata"]["order_id"], "order-42");
    }

    #[test]
    fn test_payment_response_parses_checkout_link() {
        let raw = r#"{
            "id": "tr_WDqYK6vllg",
            "status": "open",
            "amount": {"currency": "EUR", "value": "238.00"},
            "_links": {
                "checkout": {"href": "https://www.mollie.com/checkout/select-method/WDqYK6vllg"}
            }
        }"#;

        let payment: MolliePayment = serde_json::from_str(raw).unwrap();
        assert_eq!(payment.id, "tr_WDqYK6vllg");
        assert_eq!(payment.status, "open");
        assert!(payment.links.checkout.unwrap().href.contains("mollie.com"));
    }

    #[test]
    fn test_payment_response_without_links() {
        // Fetched (non-open) payments often carry no checkout link
        let raw = r#"{"id": "tr_WDqYK6vllg", "status": "paid"}"#;
        let payment: MolliePayment = serde_json::from_str(raw).unwrap();
        assert!(payment.links.checkout.is_none());
    }
}
