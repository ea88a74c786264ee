// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;
use crate::storage::{StoredBooking, StoredCar};

pub mod auth;
pub mod bookings;
pub mod cars;
pub mod contact;
pub mod health;
pub mod payments;

#[cfg(test)]
pub(crate) mod test_support;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/cars", get(cars::list_cars).post(cars::create_car))
        .route("/cars/available", get(cars::list_available_cars))
        .route(
            "/cars/{id}",
            get(cars::get_car)
                .put(cars::update_car)
                .delete(cars::delete_car),
        )
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings/{id}", get(bookings::get_booking))
        .route("/payment", post(payments::process_payment))
        .route("/payment/checkout", post(payments::create_checkout))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::profile))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/contact", post(contact::submit_contact));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        cars::list_cars,
        cars::list_available_cars,
        cars::get_car,
        cars::create_car,
        cars::update_car,
        cars::delete_car,
        bookings::list_bookings,
        bookings::get_booking,
        payments::process_payment,
        payments::create_checkout,
        auth::register,
        auth::login,
        auth::profile,
        auth::logout,
        auth::refresh,
        auth::forgot_password,
        auth::reset_password,
        contact::submit_contact
    ),
    components(
        schemas(
            StoredCar,
            StoredBooking,
            cars::CarRequest,
            cars::CarListResponse,
            cars::CarResponse,
            bookings::BookingListResponse,
            bookings::BookingResponse,
            payments::CarSummary,
            payments::PaymentRequest,
            payments::PaymentResponse,
            payments::PaymentData,
            payments::CheckoutRequest,
            payments::CheckoutResponse,
            payments::CheckoutData,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::ForgotPasswordRequest,
            auth::ResetPasswordRequest,
            auth::SessionResponse,
            auth::SessionData,
            auth::UserView,
            auth::ProfileResponse,
            auth::RefreshResponse,
            auth::RefreshData,
            auth::AckResponse,
            contact::ContactRequest,
            contact::ContactResponse,
            contact::ContactData,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Service health probes"),
        (name = "Cars", description = "Car inventory management"),
        (name = "Bookings", description = "Booking lookups"),
        (name = "Payments", description = "Payment confirmation and checkout"),
        (name = "Auth", description = "User accounts and sessions"),
        (name = "Contact", description = "Contact form")
    )
)]
struct ApiDoc;
