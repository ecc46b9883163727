use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use std::sync::Arc;

use axum::response::Response;
use axum::routing::get as get_route;
use axum::Router;
use tower::ServiceExt;

use rod_export::fonts::FontSource;
use rod_export::styles::DocumentStyles;
use rod_lambda::error::{INTERNAL_ERROR_MESSAGE, UNSUPPORTED_FORMAT_MESSAGE};
use rod_lambda::state::AppState;
use rod_lambda::{app, with_layers};

async fn send_to(router: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    router.oneshot(request).await.unwrap()
}

async fn send(method: Method, uri: &str) -> Response {
    send_to(app(AppState::default()), method, uri).await
}

async fn get(uri: &str) -> Response {
    send(Method::GET, uri).await
}

fn header_value(response: &Response, name: header::HeaderName) -> String {
    response
        .headers()
        .get(name)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn csv_for_artist() {
    let response = get("/api/generate?formato=csv&artista=Luna").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        "text/csv; charset=utf-8"
    );
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"contrato_Luna_Ciudad_2025-01-01.csv\""
    );

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(
        body,
        "\"Tarea\",\"Responsable\",\"Hora\"\n\
         \"Montaje sonido\",\"Técnico 1\",\"10:00\"\n\
         \"Prueba sonido\",\"Banda\",\"12:00\"\n\
         \"Actuación\",\"Luna\",\"20:00\""
    );
}

#[tokio::test]
async fn format_is_case_insensitive() {
    let response = get("/api/generate?formato=CSV").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        "text/csv; charset=utf-8"
    );
}

#[tokio::test]
async fn xlsx_with_defaults() {
    let response = get("/api/generate?formato=xlsx").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"contrato_Artista_Ciudad_2025-01-01.xlsx\""
    );
    let body = body_bytes(response).await;
    assert_eq!(&body[0..2], b"PK");
}

#[tokio::test]
async fn pdf_is_the_default_format() {
    let response = get("/api/generate").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), "application/pdf");
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"contrato_Artista_Ciudad_2025-01-01.pdf\""
    );
    let body = body_bytes(response).await;
    assert!(body.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn unknown_format_is_rejected() {
    let response = get("/api/generate?formato=zzz").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body, UNSUPPORTED_FORMAT_MESSAGE);
}

#[tokio::test]
async fn empty_format_is_rejected() {
    let response = get("/api/generate?formato=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn any_method_is_accepted() {
    let response = send(Method::POST, "/api/generate?formato=csv").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn accented_parameters_are_folded_in_filename() {
    let response = get("/api/generate?formato=csv&tipo=Rider%20t%C3%A9cnico&ciudad=M%C3%A1laga").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"Rider_tecnico_Artista_Malaga_2025-01-01.csv\""
    );
}

#[tokio::test]
async fn empty_artist_uses_fallback_row() {
    let response = get("/api/generate?formato=csv&artista=").await;
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.ends_with("\"Actuación\",\"Artista\",\"20:00\""));
}

#[tokio::test]
async fn health_reports_ok() {
    let response = get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn repeated_artist_is_joined() {
    let response = get("/api/generate?formato=csv&artista=Luna&artista=Sol").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_DISPOSITION),
        "attachment; filename=\"contrato_LunaSol_Ciudad_2025-01-01.csv\""
    );
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.ends_with("\"Actuación\",\"Luna,Sol\",\"20:00\""));
}

#[tokio::test]
async fn repeated_format_is_rejected_with_guidance() {
    let response = get("/api/generate?formato=pdf&formato=csv").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body, UNSUPPORTED_FORMAT_MESSAGE);
}

#[tokio::test]
async fn render_failure_is_a_generic_500() {
    let styles = DocumentStyles {
        fonts: FontSource::External {
            regular: Arc::from(b"not a font".as_slice()),
            bold: None,
        },
        ..Default::default()
    };
    let state = AppState {
        styles: Arc::new(styles),
    };

    let response = send_to(app(state), Method::GET, "/api/generate?artista=Luna").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body, INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn handler_panic_is_a_generic_500() {
    async fn explode() -> &'static str {
        panic!("layout blew up")
    }
    let router = with_layers(Router::new().route("/boom", get_route(explode)));

    let response = send_to(router, Method::GET, "/boom").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body, INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn broken_pdf_font_leaves_csv_working() {
    let styles = DocumentStyles {
        fonts: FontSource::External {
            regular: Arc::from(b"not a font".as_slice()),
            bold: None,
        },
        ..Default::default()
    };
    let state = AppState {
        styles: Arc::new(styles),
    };
    let response = send_to(app(state), Method::GET, "/api/generate?formato=csv").await;
    assert_eq!(response.status(), StatusCode::OK);
}
