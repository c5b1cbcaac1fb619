use super::super::id::BookId;
use derive_new::new;

#[derive(new, Debug)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity_available: i32,
    pub location: String,
}

// Absent fields keep their stored values.
#[derive(new, Debug)]
pub struct UpdateBook {
    pub book_id: BookId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub quantity_available: Option<i32>,
    pub location: Option<String>,
}
