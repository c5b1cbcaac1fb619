use crate::{
    extractor::ValidatedJson,
    model::borrower::{
        BorrowerListResponse, RegisterBorrowerRequest, SingleBorrowerResponse,
        UpdateBorrowerRequest,
    },
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use kernel::model::{borrower::event::CreateBorrower, id::BorrowerId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::str::FromStr;

pub async fn show_borrower_list(
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrowers = registry.borrower_repository().find_all().await?;
    Ok(Json(BorrowerListResponse::new(
        "Fetching all borrowers",
        borrowers,
    )))
}

pub async fn show_borrower(
    Path(id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrower_id = BorrowerId::from_str(&id)?;
    let borrower = registry
        .borrower_repository()
        .find_by_id(borrower_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Borrower not found".into()))?;
    Ok(Json(SingleBorrowerResponse::new(
        "Fetching Borrower",
        borrower,
    )))
}

pub async fn register_borrower(
    State(registry): State<AppRegistry>,
    ValidatedJson(request): ValidatedJson<RegisterBorrowerRequest>,
) -> AppResult<impl IntoResponse> {
    if registry
        .borrower_repository()
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateEmail);
    }

    let event = CreateBorrower::new(request.name, request.email, Utc::now());
    let borrower = registry.borrower_repository().create(event).await?;
    Ok((
        StatusCode::CREATED,
        Json(SingleBorrowerResponse::new("Borrower created", borrower)),
    ))
}

pub async fn update_borrower(
    Path(id): Path<String>,
    State(registry): State<AppRegistry>,
    ValidatedJson(request): ValidatedJson<UpdateBorrowerRequest>,
) -> AppResult<impl IntoResponse> {
    let borrower_id = BorrowerId::from_str(&id)?;

    // a borrower may keep their own email on update
    if let Some(email) = &request.email {
        if let Some(existing) = registry.borrower_repository().find_by_email(email).await? {
            if existing.id != borrower_id {
                return Err(AppError::DuplicateEmail);
            }
        }
    }

    let borrower = registry
        .borrower_repository()
        .update(request.into_event(borrower_id))
        .await?;
    Ok(Json(SingleBorrowerResponse::new(
        "Borrower updated",
        borrower,
    )))
}

pub async fn delete_borrower(
    Path(id): Path<String>,
    State(registry): State<AppRegistry>,
) -> AppResult<impl IntoResponse> {
    let borrower_id = BorrowerId::from_str(&id)?;
    let borrower = registry.borrower_repository().delete(borrower_id).await?;
    Ok(Json(SingleBorrowerResponse::new(
        "Borrower deleted",
        borrower,
    )))
}
