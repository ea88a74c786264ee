// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Booking read endpoints.
//!
//! Bookings are only ever created by the payment workflow; these
//! endpoints expose them for the admin dashboard and customer lookups.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::ApiError,
    state::AppState,
    storage::{BookingRepository, StorageError, StoredBooking},
};

/// Query parameters for the booking list.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookingListQuery {
    /// Restrict to bookings made with this customer email
    pub email: Option<String>,
}

/// Booking list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingListResponse {
    pub success: bool,
    pub message: String,
    pub bookings: Vec<StoredBooking>,
    pub count: usize,
}

/// Single-booking response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: StoredBooking,
}

/// List bookings, newest first, optionally filtered by customer email.
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Bookings retrieved", body = BookingListResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<BookingListResponse>, ApiError> {
    let storage = state.storage();
    let repo = BookingRepository::new(&storage);

    let bookings = match &query.email {
        Some(email) => repo.list_by_email(email),
        None => repo.list(),
    }
    .map_err(|e| {
        tracing::error!("Failed to list bookings: {e}");
        ApiError::internal("Failed to retrieve bookings")
    })?;

    Ok(Json(BookingListResponse {
        success: true,
        message: "Bookings retrieved successfully".to_string(),
        count: bookings.len(),
        bookings,
    }))
}

/// Get a single booking by id.
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(("id" = u64, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking retrieved", body = BookingResponse),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<BookingResponse>, ApiError> {
    let storage = state.storage();
    let booking = BookingRepository::new(&storage).get(id).map_err(|e| match e {
        StorageError::NotFound(_) => ApiError::not_found("Booking not found"),
        other => {
            tracing::error!("Booking storage error: {other}");
            ApiError::internal("Failed to retrieve booking")
        }
    })?;

    Ok(Json(BookingResponse {
        success: true,
        message: "Booking retrieved successfully".to_string(),
        booking,
    }))
}
