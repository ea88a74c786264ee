// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Turbo Rent

//! Car inventory endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    audit_log,
    error::ApiError,
    state::AppState,
    storage::{AuditEventType, CarRepository, NewCar, StorageError, StoredCar},
};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters for the car list.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CarListQuery {
    /// Case-insensitive substring match on the brand
    pub brand: Option<String>,
    /// Exact model-year match
    pub year: Option<i32>,
    /// Availability filter
    pub available: Option<bool>,
}

/// Request to add or replace a car.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CarRequest {
    /// Manufacturer brand
    pub brand: Option<String>,
    /// Model name
    pub model: Option<String>,
    /// Model year
    pub year: Option<i32>,
    /// Whether the car can be booked (defaults to true)
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// Car list response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarListResponse {
    pub success: bool,
    pub message: String,
    pub cars: Vec<StoredCar>,
    pub count: usize,
}

/// Single-car response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CarResponse {
    pub success: bool,
    pub message: String,
    pub car: StoredCar,
}

fn validated(request: CarRequest) -> Result<NewCar, ApiError> {
    let brand = request.brand.as_deref().map(str::trim).unwrap_or_default();
    let model = request.model.as_deref().map(str::trim).unwrap_or_default();
    let Some(year) = request.year else {
        return Err(ApiError::bad_request("Brand, model, and year are required"));
    };
    if brand.is_empty() || model.is_empty() {
        return Err(ApiError::bad_request("Brand, model, and year are required"));
    }

    Ok(NewCar {
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        is_available: request.is_available,
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// List cars, optionally filtered by brand, year, and availability.
#[utoipa::path(
    get,
    path = "/api/cars",
    tag = "Cars",
    params(CarListQuery),
    responses(
        (status = 200, description = "Cars retrieved", body = CarListResponse)
    )
)]
pub async fn list_cars(
    State(state): State<AppState>,
    Query(query): Query<CarListQuery>,
) -> Result<Json<CarListResponse>, ApiError> {
    let storage = state.storage();
    let repo = CarRepository::new(&storage);

    let mut cars = repo.list().map_err(|e| {
        tracing::error!("Failed to list cars: {e}");
        ApiError::internal("Failed to retrieve cars")
    })?;

    if let Some(brand) = &query.brand {
        let needle = brand.to_lowercase();
        cars.retain(|car| car.brand.to_lowercase().contains(&needle));
    }
    if let Some(year) = query.year {
        cars.retain(|car| car.year == year);
    }
    if let Some(available) = query.available {
        cars.retain(|car| car.is_available == available);
    }

    Ok(Json(CarListResponse {
        success: true,
        message: "Cars retrieved successfully".to_string(),
        count: cars.len(),
        cars,
    }))
}

/// List cars currently available for booking.
#[utoipa::path(
    get,
    path = "/api/cars/available",
    tag = "Cars",
    responses(
        (status = 200, description = "Available cars retrieved", body = CarListResponse)
    )
)]
pub async fn list_available_cars(
    State(state): State<AppState>,
) -> Result<Json<CarListResponse>, ApiError> {
    let storage = state.storage();
    let repo = CarRepository::new(&storage);

    let cars = repo.list_available().map_err(|e| {
        tracing::error!("Failed to list available cars: {e}");
        ApiError::internal("Failed to retrieve cars")
    })?;

    Ok(Json(CarListResponse {
        success: true,
        message: "Cars retrieved successfully".to_string(),
        count: cars.len(),
        cars,
    }))
}

/// Get a single car by id.
#[utoipa::path(
    get,
    path = "/api/cars/{id}",
    tag = "Cars",
    params(("id" = u64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car retrieved", body = CarResponse),
        (status = 404, description = "Car not found")
    )
)]
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CarResponse>, ApiError> {
    let storage = state.storage();
    let car = CarRepository::new(&storage).get(id).map_err(map_car_error)?;

    Ok(Json(CarResponse {
        success: true,
        message: "Car retrieved successfully".to_string(),
        car,
    }))
}

/// Add a new car to the inventory.
#[utoipa::path(
    post,
    path = "/api/cars",
    tag = "Cars",
    request_body = CarRequest,
    responses(
        (status = 201, description = "Car added", body = CarResponse),
        (status = 400, description = "Missing fields")
    )
)]
pub async fn create_car(
    State(state): State<AppState>,
    Json(request): Json<CarRequest>,
) -> Result<(StatusCode, Json<CarResponse>), ApiError> {
    let new_car = validated(request)?;

    let storage = state.storage();
    let car = CarRepository::new(&storage).create(new_car).map_err(|e| {
        tracing::error!("Failed to create car: {e}");
        ApiError::internal("Failed to add car")
    })?;

    audit_log!(
        &storage,
        AuditEventType::CarCreated,
        "admin",
        "car",
        car.id.to_string()
    );

    Ok((
        StatusCode::CREATED,
        Json(CarResponse {
            success: true,
            message: "Car added successfully".to_string(),
            car,
        }),
    ))
}

/// Replace an existing car's details.
#[utoipa::path(
    put,
    path = "/api/cars/{id}",
    tag = "Cars",
    params(("id" = u64, Path, description = "Car id")),
    request_body = CarRequest,
    responses(
        (status = 200, description = "Car updated", body = CarResponse),
        (status = 400, description = "Missing fields"),
        (status = 404, description = "Car not found")
    )
)]
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<CarRequest>,
) -> Result<Json<CarResponse>, ApiError> {
    let changes = validated(request)?;

    let storage = state.storage();
    let car = CarRepository::new(&storage)
        .update(id, changes)
        .map_err(map_car_error)?;

    audit_log!(
        &storage,
        AuditEventType::CarUpdated,
        "admin",
        "car",
        car.id.to_string()
    );

    Ok(Json(CarResponse {
        success: true,
        message: "Car updated successfully".to_string(),
        car,
    }))
}

/// Remove a car from the inventory.
#[utoipa::path(
    delete,
    path = "/api/cars/{id}",
    tag = "Cars",
    params(("id" = u64, Path, description = "Car id")),
    responses(
        (status = 200, description = "Car deleted", body = CarResponse),
        (status = 404, description = "Car not found")
    )
)]
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CarResponse>, ApiError> {
    let storage = state.storage();
    let car = CarRepository::new(&storage)
        .delete(id)
        .map_err(map_car_error)?;

    audit_log!(
        &storage,
        AuditEventType::CarDeleted,
        "admin",
        "car",
        car.id.to_string()
    );

    Ok(Json(CarResponse {
        success: true,
        message: "Car deleted successfully".to_string(),
        car,
    }))
}

fn map_car_error(e: StorageError) -> ApiError {
    match e {
        StorageError::NotFound(_) => ApiError::not_found("Car not found"),
        other => {
            tracing::error!("Car storage error: {other}");
            ApiError::internal("Failed to access car inventory")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::create_test_state;

    fn car_request(brand: &str, model: &str, year: i32) -> CarRequest {
        CarRequest {
            brand: Some(brand.to_string()),
            model: Some(model.to_string()),
            year: Some(year),
            is_available: true,
        }
    }

    #[tokio::test]
    async fn create_then_get_car() {
        let (state, _temp_dir) = create_test_state();

        let (status, Json(created)) = create_car(
            State(state.clone()),
            Json(car_request("Toyota", "Avanza", 2022)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.message, "Car added successfully");
        assert_eq!(created.car.id, 1);

        let Json(fetched) = get_car(State(state), Path(1)).await.unwrap();
        assert_eq!(fetched.car.brand, "Toyota");
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let (state, _temp_dir) = create_test_state();

        let result = create_car(
            State(state),
            Json(CarRequest {
                brand: Some("Toyota".to_string()),
                model: None,
                year: Some(2022),
                is_available: true,
            }),
        )
        .await;

        let err = result.err().unwrap();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Brand, model, and year are required");
    }

    #[tokio::test]
    async fn get_missing_car_is_404() {
        let (state, _temp_dir) = create_test_state();

        let err = get_car(State(state), Path(99)).await.err().unwrap();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Car not found");
    }

    #[tokio::test]
    async fn list_filters_by_brand_case_insensitively() {
        let (state, _temp_dir) = create_test_state();
        create_car(
            State(state.clone()),
            Json(car_request("Toyota", "Avanza", 2022)),
        )
        .await
        .unwrap();
        create_car(
            State(state.clone()),
            Json(car_request("Daihatsu", "Xenia", 2020)),
        )
        .await
        .unwrap();

        let Json(body) = list_cars(
            State(state),
            Query(CarListQuery {
                brand: Some("toy".to_string()),
                ..CarListQuery::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(body.count, 1);
        assert_eq!(body.cars[0].brand, "Toyota");
    }

    #[tokio::test]
    async fn available_listing_excludes_unavailable_cars() {
        let (state, _temp_dir) = create_test_state();
        create_car(
            State(state.clone()),
            Json(car_request("Toyota", "Avanza", 2022)),
        )
        .await
        .unwrap();
        create_car(
            State(state.clone()),
            Json(CarRequest {
                is_available: false,
                ..car_request("Honda", "Brio", 2021)
            }),
        )
        .await
        .unwrap();

        let Json(body) = list_available_cars(State(state)).await.unwrap();
        assert_eq!(body.count, 1);
        assert_eq!(body.cars[0].brand, "Toyota");
    }

    #[tokio::test]
    async fn update_and_delete_round_trip() {
        let (state, _temp_dir) = create_test_state();
        create_car(
            State(state.clone()),
            Json(car_request("Toyota", "Avanza", 2022)),
        )
        .await
        .unwrap();

        let Json(updated) = update_car(
            State(state.clone()),
            Path(1),
            Json(car_request("Toyota", "Avanza Veloz", 2023)),
        )
        .await
        .unwrap();
        assert_eq!(updated.car.model, "Avanza Veloz");
        assert_eq!(updated.car.year, 2023);

        let Json(deleted) = delete_car(State(state.clone()), Path(1)).await.unwrap();
        assert_eq!(deleted.message, "Car deleted successfully");

        let err = get_car(State(state), Path(1)).await.err().unwrap();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
