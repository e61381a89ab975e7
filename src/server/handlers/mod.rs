use axum::http::StatusCode;

pub mod bots;
pub mod conversation;
pub mod integrations;
pub mod training;

pub async fn banner() -> (StatusCode, &'static str) {
    (
        StatusCode::OK,
        "\"It's A Difficult Thing, Realizing Your Entire Life Is Some Hideous Fiction.\" - Maeve Millay",
    )
}

pub async fn alive() -> StatusCode {
    StatusCode::OK
}
