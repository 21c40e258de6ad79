use axum::{
    http::header,
    response::{Html, IntoResponse, Response},
    routing, Router,
};

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const CONTACT_FORM_JS: &str = include_str!("../../assets/js/contact-form.js");

/// Serves the demo page and the browser-side form controller.
pub fn router() -> Router<()> {
    Router::new()
        .route("/", routing::get(index))
        .route("/assets/js/contact-form.js", routing::get(contact_form_js))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn contact_form_js() -> Response {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        CONTACT_FORM_JS,
    )
        .into_response()
}
