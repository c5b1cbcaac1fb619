use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use garde::Validate;
use serde::de::DeserializeOwned;
use shared::error::AppError;

/// Deserializes the JSON body and runs its validation rules before the
/// handler sees it. Rejections surface as the API's own error shape instead
/// of axum's plain-text default.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate<Context = ()>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::InvalidRequestBody(rejection.body_text()))?;
        value.validate(&())?;
        Ok(Self(value))
    }
}
