use serde::{Deserialize, Serialize};

pub mod book;
pub mod borrow;
pub mod borrower;
pub mod report;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
