// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Payment endpoints.
//!
//! `POST /api/payment` is the booking-finalization workflow: verify the
//! on-chain transfer, persist the booking, then send the confirmation
//! email best-effort. `POST /api/payment/checkout` creates a Midtrans
//! Snap session for the card/bank alternative.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    audit_log,
    error::ApiError,
    mail::{templates, MailMessage},
    providers::CheckoutCustomer,
    state::AppState,
    storage::{
        AuditEvent, AuditEventType, AuditRepository, BookingRepository, CarRepository, NewBooking,
    },
};
use crate::blockchain::SEPOLIA;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Car summary the frontend may attach to the payment request, used for
/// the confirmation email without an extra inventory lookup.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CarSummary {
    pub brand: String,
    pub model: String,
}

/// Payment confirmation request.
///
/// Only `txHash`, `amount`, and `recipientAddress` are validated;
/// booking fields are stored as provided.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Transaction hash of the on-chain payment
    #[serde(default)]
    pub tx_hash: Option<String>,
    /// Expected payment amount in ETH (e.g. "0.05")
    #[serde(default)]
    pub amount: Option<String>,
    /// Expected recipient address
    #[serde(default)]
    pub recipient_address: Option<String>,
    /// Booked car id
    #[serde(default)]
    pub car_id: Option<u64>,
    /// First rental day
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last rental day
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Customer full name
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Customer email address
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Customer phone number
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Payment method label (e.g. "crypto")
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Optional car summary for the confirmation email
    #[serde(default)]
    pub car: Option<CarSummary>,
}

/// Payment confirmation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub success: bool,
    pub message: String,
    pub data: PaymentData,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    /// Id of the persisted booking
    pub booking_id: u64,
    /// Always true on the success path
    pub transaction_verified: bool,
    /// Whether the confirmation email was delivered
    pub email_sent: bool,
    pub tx_hash: String,
    pub amount: String,
    pub recipient_address: String,
}

/// Checkout session request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Order id; generated when absent
    #[serde(default)]
    pub order_id: Option<String>,
    /// Gross amount in whole rupiah
    #[serde(default)]
    pub gross_amount: Option<u64>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Checkout session response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: String,
    pub data: CheckoutData,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutData {
    pub token: String,
    pub redirect_url: String,
}

fn trimmed(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

// =============================================================================
// Handlers
// =============================================================================

/// Confirm an on-chain payment and finalize the booking.
#[utoipa::path(
    post,
    path = "/api/payment",
    tag = "Payments",
    request_body = PaymentRequest,
    responses(
        (status = 200, description = "Payment processed", body = PaymentResponse),
        (status = 400, description = "Missing fields or verification failure"),
        (status = 500, description = "Booking persistence failure")
    )
)]
pub async fn process_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    // Field validation happens before any store or mail side effect
    let (Some(tx_hash), Some(amount), Some(recipient)) = (
        trimmed(request.tx_hash.as_ref()),
        trimmed(request.amount.as_ref()),
        trimmed(request.recipient_address.as_ref()),
    ) else {
        return Err(ApiError::bad_request(
            "Missing required fields: txHash, amount, recipientAddress",
        ));
    };
    let tx_hash = tx_hash.to_string();
    let amount = amount.to_string();
    let recipient = recipient.to_string();

    let storage = state.storage();

    let verification = state.verifier().verify(&tx_hash, &amount, &recipient).await;
    if !verification.verified {
        let reason = verification
            .error
            .unwrap_or_else(|| "Verification failed".to_string());
        tracing::warn!(%tx_hash, %reason, "Payment verification failed");

        let event = AuditEvent::new(AuditEventType::PaymentRejected)
            .with_resource("payment", &tx_hash)
            .failed(&reason);
        let _ = AuditRepository::new(&storage).log(&event);

        return Err(
            ApiError::bad_request("Transaction verification failed").with_details(reason),
        );
    }

    let booking = BookingRepository::new(&storage)
        .create(NewBooking {
            car_id: request.car_id.unwrap_or_default(),
            start_date: request.start_date.unwrap_or_default(),
            end_date: request.end_date.unwrap_or_default(),
            full_name: request.customer_name.clone().unwrap_or_default(),
            email: request.customer_email.clone().unwrap_or_default(),
            phone_number: request.customer_phone.clone().unwrap_or_default(),
            payment_method: request.payment_method.clone().unwrap_or_default(),
            tx_ref: SEPOLIA.tx_url(&tx_hash),
        })
        .map_err(|e| {
            tracing::error!(%tx_hash, "Failed to persist booking: {e}");
            ApiError::internal("Payment processing error")
        })?;

    // Car label for the email: request summary, else inventory lookup
    let car_label = match &request.car {
        Some(car) => format!("{} {}", car.brand, car.model),
        None => match request.car_id.map(|id| CarRepository::new(&storage).get(id)) {
            Some(Ok(car)) => format!("{} {}", car.brand, car.model),
            _ => format!("Car #{}", booking.car_id),
        },
    };

    let paid_amount = verification.amount.as_deref().unwrap_or(&amount);
    let email_sent = if booking.email.is_empty() {
        false
    } else {
        let message = MailMessage {
            from: state.mail_settings.from_address.clone(),
            to: booking.email.clone(),
            subject: templates::BOOKING_CONFIRMATION_SUBJECT.to_string(),
            html: templates::booking_confirmation(&booking, &car_label, &tx_hash, paid_amount),
            reply_to: None,
        };
        match state.mailer().send(&message).await {
            Ok(message_id) => {
                tracing::info!(booking_id = booking.id, %message_id, "Confirmation email sent");
                true
            }
            Err(e) => {
                tracing::warn!(booking_id = booking.id, "Confirmation email failed: {e}");
                false
            }
        }
    };

    audit_log!(
        &storage,
        AuditEventType::BookingCreated,
        booking.email.clone(),
        "booking",
        booking.id.to_string()
    );

    Ok(Json(PaymentResponse {
        success: true,
        message: "Payment processed successfully".to_string(),
        data: PaymentData {
            booking_id: booking.id,
            transaction_verified: true,
            email_sent,
            tx_hash,
            amount,
            recipient_address: recipient,
        },
    }))
}

/// Create a Midtrans Snap checkout session.
#[utoipa::path(
    post,
    path = "/api/payment/checkout",
    tag = "Payments",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutResponse),
        (status = 400, description = "Missing fields"),
        (status = 502, description = "Gateway request failed"),
        (status = 503, description = "Gateway not configured")
    )
)]
pub async fn create_checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let Some(gateway) = state.gateway() else {
        return Err(ApiError::service_unavailable(
            "Payment gateway is not configured",
        ));
    };

    let (Some(gross_amount), Some(name), Some(email)) = (
        request.gross_amount.filter(|amount| *amount > 0),
        trimmed(request.customer_name.as_ref()),
        trimmed(request.customer_email.as_ref()),
    ) else {
        return Err(ApiError::bad_request(
            "Missing required fields: grossAmount, customerName, customerEmail",
        ));
    };

    let order_id = request
        .order_id
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let session = gateway
        .create_checkout(&order_id, gross_amount, CheckoutCustomer { name, email })
        .await
        .map_err(|e| {
            tracing::error!(%order_id, "Checkout session failed: {e}");
            ApiError::bad_gateway("Failed to create checkout session")
        })?;

    Ok(Json(CheckoutResponse {
        success: true,
        message: "Checkout session created".to_string(),
        data: CheckoutData {
            token: session.token,
            redirect_url: session.redirect_url,
        },
    }))
}
