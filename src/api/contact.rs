// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Contact form endpoint.
//!
//! Each submission produces two emails sent concurrently: a
//! notification to the business inbox (reply-to set to the customer)
//! and an auto-reply to the customer. Both must succeed.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    audit_log,
    api::auth::is_valid_email,
    error::ApiError,
    mail::{templates, MailMessage},
    state::AppState,
    storage::AuditEventType,
};

/// Contact form submission.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Frontend tag: "rental", "support", "feedback", or other
    #[serde(default)]
    pub service_type: Option<String>,
}

/// Contact form response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub data: ContactData,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactData {
    /// Provider id of the business notification
    pub message_id: String,
    pub timestamp: String,
}

/// Handle a contact form submission.
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message sent", body = ContactResponse),
        (status = 400, description = "Validation failure"),
        (status = 502, description = "Mail delivery failed")
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    let name = request.name.as_deref().map(str::trim).unwrap_or_default();
    let email = request.email.as_deref().map(str::trim).unwrap_or_default();
    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ApiError::bad_request(
            "Name, email, and message are required",
        ));
    }
    if !is_valid_email(email) {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    if message.chars().count() < 10 {
        return Err(ApiError::bad_request(
            "Message must be at least 10 characters",
        ));
    }

    let service_label = templates::service_type_label(request.service_type.as_deref());
    let notification = MailMessage {
        from: state.mail_settings.from_address.clone(),
        to: state.mail_settings.contact_inbox.clone(),
        subject: format!(
            "New Contact Form: {}",
            request.subject.as_deref().unwrap_or(service_label)
        ),
        html: templates::contact_notification(&templates::ContactFormData {
            name,
            email,
            phone: request.phone.as_deref().unwrap_or("-"),
            subject: request.subject.as_deref().unwrap_or("-"),
            message,
            service_label,
        }),
        reply_to: Some(email.to_string()),
    };
    let auto_reply = MailMessage {
        from: state.mail_settings.from_address.clone(),
        to: email.to_string(),
        subject: templates::CONTACT_AUTO_REPLY_SUBJECT.to_string(),
        html: templates::contact_auto_reply(name),
        reply_to: None,
    };

    let mailer = state.mailer();
    let (notification_result, auto_reply_result) =
        tokio::join!(mailer.send(&notification), mailer.send(&auto_reply));

    let message_id = match (notification_result, auto_reply_result) {
        (Ok(message_id), Ok(_)) => message_id,
        (notification_result, auto_reply_result) => {
            if let Err(e) = &notification_result {
                tracing::error!("Contact notification failed: {e}");
            }
            if let Err(e) = &auto_reply_result {
                tracing::error!("Contact auto-reply failed: {e}");
            }
            return Err(ApiError::bad_gateway(
                "Failed to send message. Please try again later.",
            ));
        }
    };

    let storage = state.storage();
    audit_log!(&storage, AuditEventType::ContactSubmitted, email.to_string());

    Ok(Json(ContactResponse {
        success: true,
        message: "Message sent successfully! We'll get back to you soon.".to_string(),
        data: ContactData {
            message_id,
            timestamp: Utc::now().to_rfc3339(),
        },
    }))
}
