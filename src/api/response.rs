use serde::Serialize;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ERROR: &str = "Error";

// Every body carries `status`; the rest depends on the outcome.

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse<T> {
    pub status: &'static str,
    pub item: T,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse<T> {
    pub status: &'static str,
    pub items: Vec<T>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: STATUS_OK }
    }
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            error: error.into(),
        }
    }
}

impl<T: Serialize> ItemResponse<T> {
    pub fn ok(item: T) -> Self {
        Self {
            status: STATUS_OK,
            item,
        }
    }
}

impl<T: Serialize> ItemsResponse<T> {
    pub fn ok(items: Vec<T>) -> Self {
        Self {
            status: STATUS_OK,
            items,
        }
    }
}
