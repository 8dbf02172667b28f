use axum::response::Html;

// GET / - static chat interface
pub async fn home_handler() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}
