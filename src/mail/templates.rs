// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! HTML email templates.
//!
//! Plain `format!` rendering; no template engine. The booking
//! confirmation always links the payment transaction on the Sepolia
//! block explorer.

use chrono::Utc;

use crate::blockchain::SEPOLIA;
use crate::storage::StoredBooking;

pub const BOOKING_CONFIRMATION_SUBJECT: &str = "Payment Confirmation - Turbo Rent";
pub const PASSWORD_RESET_SUBJECT: &str = "Password Reset Request - Turbo Rent";
pub const CONTACT_AUTO_REPLY_SUBJECT: &str = "Thank you for contacting Turbo Rent";

/// Contact form fields as rendered into the business notification.
#[derive(Debug, Clone)]
pub struct ContactFormData<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub service_label: &'a str,
}

/// Human label for a contact-form service type tag.
pub fn service_type_label(service_type: Option<&str>) -> &'static str {
    match service_type {
        Some("rental") => "Car Rental Inquiry",
        Some("support") => "Customer Support",
        Some("feedback") => "Feedback",
        _ => "Other",
    }
}

/// Booking confirmation sent after a verified on-chain payment.
pub fn booking_confirmation(
    booking: &StoredBooking,
    car_label: &str,
    tx_hash: &str,
    amount: &str,
) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">Payment Confirmed</h2>

  <div style="background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="color: #2c5aa0;">Booking Details</h3>
    <p><strong>Booking ID:</strong> {booking_id}</p>
    <p><strong>Car:</strong> {car_label}</p>
    <p><strong>Name:</strong> {full_name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Phone:</strong> {phone}</p>
    <p><strong>Start Date:</strong> {start_date}</p>
    <p><strong>End Date:</strong> {end_date}</p>
  </div>

  <div style="background: #e8f4f8; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <h3 style="color: #2c5aa0;">Blockchain Transaction Details</h3>
    <p><strong>Transaction Hash:</strong> <a href="{tx_url}">{tx_hash}</a></p>
    <p><strong>Amount Paid:</strong> {amount} ETH</p>
    <p><strong>Status:</strong> <span style="color: #4caf50; font-weight: bold;">Verified &#10003;</span></p>
  </div>

  <div style="background: #fff3cd; padding: 15px; border-radius: 8px; margin: 20px 0;">
    <p style="margin: 0;"><strong>Note:</strong> Your payment has been verified on the Ethereum Sepolia blockchain. Your booking is confirmed.</p>
  </div>

  <div style="text-align: center; margin-top: 30px;">
    <p style="color: #666;">Thank you for choosing Turbo Rent!</p>
    <p style="color: #666; font-size: 12px;">This email was sent automatically, please do not reply.</p>
  </div>
</div>"#,
        booking_id = booking.id,
        car_label = car_label,
        full_name = booking.full_name,
        email = booking.email,
        phone = booking.phone_number,
        start_date = booking.start_date,
        end_date = booking.end_date,
        tx_url = SEPOLIA.tx_url(tx_hash),
        tx_hash = tx_hash,
        amount = amount,
    )
}

/// Password reset email with the one-hour reset link.
pub fn password_reset(reset_url: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">Password Reset Request</h2>
  <p>Hello,</p>
  <p>You have requested to reset your password. Click the button below to reset your password:</p>
  <div style="text-align: center; margin: 30px 0;">
    <a href="{reset_url}" style="background-color: #ef4444; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">
      Reset Password
    </a>
  </div>
  <p>If the button doesn't work, copy and paste the following link into your browser:</p>
  <p style="word-break: break-all; color: #666;">{reset_url}</p>
  <p style="margin-top: 30px; color: #666; font-size: 14px;">
    This link will expire in 1 hour. If you didn't request this password reset, please ignore this email.
  </p>
</div>"#,
        reset_url = reset_url,
    )
}

/// Contact-form notification delivered to the business inbox.
pub fn contact_notification(data: &ContactFormData<'_>) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background-color: #ef4444; color: white; padding: 20px; text-align: center; border-radius: 5px 5px 0 0;">
    <h1>New Contact Form Submission</h1>
    <p>Turbo Rent Website</p>
  </div>

  <div style="background-color: #f9f9f9; padding: 30px; border-radius: 0 0 5px 5px;">
    <div style="margin-bottom: 15px; padding: 10px; background-color: white; border-left: 4px solid #ef4444;">
      <strong style="color: #ef4444;">Name:</strong> {name}
    </div>
    <div style="margin-bottom: 15px; padding: 10px; background-color: white; border-left: 4px solid #ef4444;">
      <strong style="color: #ef4444;">Email:</strong> {email}
    </div>
    <div style="margin-bottom: 15px; padding: 10px; background-color: white; border-left: 4px solid #ef4444;">
      <strong style="color: #ef4444;">Phone:</strong> {phone}
    </div>
    <div style="margin-bottom: 15px; padding: 10px; background-color: white; border-left: 4px solid #ef4444;">
      <strong style="color: #ef4444;">Service Type:</strong> {service_label}
    </div>
    <div style="margin-bottom: 15px; padding: 10px; background-color: white; border-left: 4px solid #ef4444;">
      <strong style="color: #ef4444;">Subject:</strong> {subject}
    </div>
    <div style="margin-bottom: 15px; padding: 10px; background-color: white; border-left: 4px solid #ef4444;">
      <strong style="color: #ef4444;">Message:</strong> {message}
    </div>
    <div style="margin-bottom: 15px; padding: 10px; background-color: white; border-left: 4px solid #ef4444;">
      <strong style="color: #ef4444;">Submitted:</strong> {submitted}
    </div>
  </div>

  <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; text-align: center;">
    <p>This email was sent from the Turbo Rent website contact form.</p>
    <p>Please reply directly to the customer's email: {email}</p>
  </div>
</div>"#,
        name = data.name,
        email = data.email,
        phone = data.phone,
        service_label = data.service_label,
        subject = data.subject,
        message = data.message,
        submitted = Utc::now().to_rfc3339(),
    )
}

/// Auto-reply sent back to the contact-form customer.
pub fn contact_auto_reply(name: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333;">Thank you for reaching out, {name}!</h2>
  <p>We have received your message and will get back to you as soon as possible, usually within one business day.</p>
  <p>In the meantime, feel free to browse our available cars on the website.</p>
  <div style="text-align: center; margin-top: 30px;">
    <p style="color: #666;">The Turbo Rent Team</p>
    <p style="color: #666; font-size: 12px;">This email was sent automatically, please do not reply.</p>
  </div>
</div>"#,
        name = name,
    )
}
