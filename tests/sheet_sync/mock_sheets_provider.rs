//! Mock Google Sheets provider for sync tests.
//!
//! Starts an in-process HTTP server serving the `values.get` and
//! `values.append` endpoints for one worksheet, plus a token endpoint that
//! accepts JWT-bearer assertions.

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, get, post, web};
use field_tools_lib::services::sheets::SHEET_HEADERS;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

/// Access token handed out by the mock token endpoint.
pub const MOCK_ACCESS_TOKEN: &str = "mock-token";

/// Shared state for the mock provider.
#[derive(Default)]
pub struct MockSheetsState {
    /// Data rows below the header row, as stored.
    pub rows: Vec<Vec<Value>>,
    /// Rows as the sheet displays them; defaults to `rows` with every cell
    /// rendered as text.
    pub displayed_rows: Option<Vec<Vec<Value>>>,
    /// `valueRenderOption` of each `values.get` call.
    pub render_options: Vec<String>,
    /// Ranges seen by the values endpoints, decoded.
    pub ranges: Vec<String>,
    /// Number of successful token exchanges.
    pub token_requests: usize,
    /// Force every values call to fail with 500.
    pub fail_values: bool,
}

type SharedState = web::Data<Arc<Mutex<MockSheetsState>>>;

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", MOCK_ACCESS_TOKEN))
}

#[post("/token")]
async fn token_endpoint(state: SharedState, body: String) -> HttpResponse {
    let grant_ok = body.contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer");
    let assertion = body
        .split('&')
        .find_map(|pair| pair.strip_prefix("assertion="))
        .unwrap_or_default();

    if !grant_ok || assertion.split('.').count() != 3 {
        return HttpResponse::BadRequest().json(json!({ "error": "invalid_grant" }));
    }

    state.lock().unwrap().token_requests += 1;
    HttpResponse::Ok().json(json!({
        "access_token": MOCK_ACCESS_TOKEN,
        "expires_in": 3600,
        "token_type": "Bearer"
    }))
}

fn display_cell(cell: &Value) -> Value {
    match cell {
        Value::Null => json!(""),
        Value::String(_) => cell.clone(),
        other => json!(other.to_string()),
    }
}

#[get("/v4/spreadsheets/{sheet_id}/values/{range}")]
async fn get_values(
    req: HttpRequest,
    state: SharedState,
    path: web::Path<(String, String)>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({ "error": { "code": 401 } }));
    }

    let (_, range) = path.into_inner();
    let mut state = state.lock().unwrap();
    state.ranges.push(range.clone());
    if state.fail_values {
        return HttpResponse::InternalServerError().finish();
    }

    // Sheets defaults to FORMATTED_VALUE when the option is omitted.
    let render = query
        .get("valueRenderOption")
        .cloned()
        .unwrap_or_else(|| "FORMATTED_VALUE".to_string());
    state.render_options.push(render.clone());

    let mut values: Vec<Vec<Value>> = vec![SHEET_HEADERS.iter().map(|h| json!(h)).collect()];
    if render != "FORMATTED_VALUE" {
        values.extend(state.rows.iter().cloned());
    } else if let Some(ref displayed) = state.displayed_rows {
        values.extend(displayed.iter().cloned());
    } else {
        values.extend(
            state
                .rows
                .iter()
                .map(|row| row.iter().map(display_cell).collect::<Vec<_>>()),
        );
    }

    HttpResponse::Ok().json(json!({
        "range": range,
        "majorDimension": "ROWS",
        "values": values
    }))
}

#[post("/v4/spreadsheets/{sheet_id}/values/{range}")]
async fn append_values(
    req: HttpRequest,
    state: SharedState,
    path: web::Path<(String, String)>,
    body: web::Json<Value>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({ "error": { "code": 401 } }));
    }

    let (_, range) = path.into_inner();
    let mut state = state.lock().unwrap();
    state.ranges.push(range.clone());
    if state.fail_values || !range.ends_with(":append") {
        return HttpResponse::InternalServerError().finish();
    }

    let rows: Vec<Vec<Value>> = body
        .get("values")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or_default();
    let appended = rows.len();
    state.rows.extend(rows);

    HttpResponse::Ok().json(json!({
        "updates": { "updatedRows": appended }
    }))
}

/// Mock Sheets API server.
pub struct MockSheetsProvider {
    pub base_url: String,
    pub state: Arc<Mutex<MockSheetsState>>,
}

impl MockSheetsProvider {
    /// Start the mock provider on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockSheetsState::default()));

        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        let port = listener.local_addr().unwrap().port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let state_data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(state_data.clone()))
                .service(token_endpoint)
                .service(get_values)
                .service(append_values)
        })
        .workers(1)
        .listen(listener)
        .expect("failed to listen")
        .disable_signals()
        .run();

        tokio::spawn(server);

        MockSheetsProvider { base_url, state }
    }

    /// Token endpoint URL for service-account keys.
    pub fn token_uri(&self) -> String {
        format!("{}/token", self.base_url)
    }

    /// Seed data rows below the header row.
    pub fn seed_rows(&self, rows: Vec<Vec<Value>>) {
        self.state.lock().unwrap().rows = rows;
    }

    /// Seed stored rows together with how the sheet displays them.
    pub fn seed_displayed_rows(&self, rows: Vec<Vec<Value>>, displayed: Vec<Vec<Value>>) {
        let mut state = self.state.lock().unwrap();
        state.rows = rows;
        state.displayed_rows = Some(displayed);
    }

    pub fn render_options(&self) -> Vec<String> {
        self.state.lock().unwrap().render_options.clone()
    }

    pub fn rows(&self) -> Vec<Vec<Value>> {
        self.state.lock().unwrap().rows.clone()
    }

    pub fn ranges(&self) -> Vec<String> {
        self.state.lock().unwrap().ranges.clone()
    }

    pub fn token_requests(&self) -> usize {
        self.state.lock().unwrap().token_requests
    }

    pub fn set_fail_values(&self, fail: bool) {
        self.state.lock().unwrap().fail_values = fail;
    }
}
