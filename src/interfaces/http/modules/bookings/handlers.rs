//! Booking HTTP handlers

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::application::BookingService;
use crate::interfaces::http::common::{ApiError, ErrorBody, PathParam, ValidatedJson};

use super::dto::*;

/// Application state for booking handlers.
#[derive(Clone)]
pub struct BookingAppState {
    pub service: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/book",
    tag = "Bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking accepted", body = StatusResponse),
        (status = 400, description = "Invalid booking", body = ErrorBody)
    )
)]
pub async fn create_booking(
    State(state): State<BookingAppState>,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let booking = state.service.create(request.into()).await?;
    Ok(Json(StatusResponse::ok(booking.id)))
}

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings in insertion order", body = Vec<BookingDto>)
    )
)]
pub async fn list_bookings(
    State(state): State<BookingAppState>,
) -> Result<Json<Vec<BookingDto>>, ApiError> {
    let bookings = state.service.list().await?;
    Ok(Json(bookings.into_iter().map(BookingDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDto),
        (status = 400, description = "Malformed booking id", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn get_booking(
    State(state): State<BookingAppState>,
    PathParam(booking_id): PathParam<i32>,
) -> Result<Json<BookingDto>, ApiError> {
    let booking = state.service.get(booking_id).await?;
    Ok(Json(BookingDto::from(booking)))
}

#[utoipa::path(
    put,
    path = "/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = i32, Path, description = "Booking ID")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking replaced", body = StatusResponse),
        (status = 400, description = "Invalid booking", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn update_booking(
    State(state): State<BookingAppState>,
    PathParam(booking_id): PathParam<i32>,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.service.update(booking_id, request.into()).await?;
    Ok(Json(StatusResponse::updated()))
}

#[utoipa::path(
    delete,
    path = "/bookings/{booking_id}",
    tag = "Bookings",
    params(("booking_id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 400, description = "Malformed booking id", body = ErrorBody),
        (status = 404, description = "Not found", body = ErrorBody)
    )
)]
pub async fn delete_booking(
    State(state): State<BookingAppState>,
    PathParam(booking_id): PathParam<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service.delete(booking_id).await?;
    Ok(Json(MessageResponse {
        message: format!("Booking {} deleted", booking_id),
        deleted: None,
    }))
}

#[utoipa::path(
    delete,
    path = "/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings deleted", body = MessageResponse)
    )
)]
pub async fn delete_all_bookings(
    State(state): State<BookingAppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.service.delete_all().await?;
    Ok(Json(MessageResponse {
        message: "All bookings deleted".to_string(),
        deleted: Some(removed),
    }))
}
