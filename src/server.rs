// 🌐 Dashboard server - JSON API + single-page HTML dashboard

use anyhow::anyhow;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{delete, get},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::{add_expense, delete_expense, Expense, ExpenseStore, NewExpense};
use crate::input::{describe_errors, parse_date, validate_new_expense};
use crate::reports::{by_category, by_month, check_budget, total_amount, BudgetReport, CategoryTotal, MonthReport};

pub type SharedStore = Arc<Mutex<Box<dyn ExpenseStore + Send>>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: SharedStore,
    config: Arc<Config>,
}

impl AppState {
    pub fn new<S: ExpenseStore + Send + 'static>(store: S, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(Box::new(store))),
            config: Arc::new(config),
        }
    }

    /// Run `f` with exclusive access to the store
    fn with_store<T>(
        &self,
        f: impl FnOnce(&dyn ExpenseStore) -> anyhow::Result<T>,
    ) -> anyhow::Result<T> {
        let guard = self
            .store
            .lock()
            .map_err(|_| anyhow!("expense store lock poisoned"))?;
        f(&**guard)
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

fn respond<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, Json(ApiResponse::ok(data))).into_response()
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: false,
        data: None,
        error: Some(message.into()),
    };
    (status, Json(body)).into_response()
}

/// Malformed bodies, paths and query strings still answer with the wrapper
fn bad_request(body_text: String) -> Response {
    tracing::debug!(reason = %body_text, "request rejected");
    failure(StatusCode::BAD_REQUEST, body_text)
}

fn internal_error(context: &str, err: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{:#}", err), "{}", context);
    failure(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
}

// ============================================================================
// Request / Response types
// ============================================================================

#[derive(Serialize)]
struct ConfigResponse {
    categories: Vec<String>,
    data_file: String,
}

#[derive(Serialize)]
struct ExpenseListResponse {
    expenses: Vec<Expense>,
    total: f64,
}

#[derive(Serialize)]
struct CategoryResponse {
    categories: Vec<CategoryTotal>,
    total: f64,
}

#[derive(Deserialize)]
struct AddExpenseRequest {
    amount: f64,
    category: String,
    description: String,
    #[serde(default)]
    date: Option<String>,
}

#[derive(Serialize)]
struct DeleteResponse {
    id: u64,
    removed: usize,
}

#[derive(Deserialize)]
struct BudgetQuery {
    month: Option<String>,
    budget: Option<f64>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/config - Category labels for the add form
async fn get_config(State(state): State<AppState>) -> Response {
    let store_label = match state.with_store(|store| Ok(store.describe())) {
        Ok(label) => label,
        Err(e) => return internal_error("Error reading store", e),
    };

    respond(
        StatusCode::OK,
        ConfigResponse {
            categories: state.config.categories.clone(),
            data_file: store_label,
        },
    )
}

/// GET /api/expenses - All expenses plus total
async fn list_expenses(State(state): State<AppState>) -> Response {
    match state.with_store(|store| store.load()) {
        Ok(expenses) => respond(
            StatusCode::OK,
            ExpenseListResponse {
                total: total_amount(&expenses),
                expenses,
            },
        ),
        Err(e) => internal_error("Error listing expenses", e),
    }
}

/// POST /api/expenses - Add one expense
async fn create_expense(
    State(state): State<AppState>,
    request: Result<Json<AddExpenseRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let date = match parse_date(request.date.as_deref().unwrap_or("")) {
        Ok(date) => date,
        Err(e) => return failure(StatusCode::BAD_REQUEST, e.message),
    };

    let new = NewExpense::new(request.amount, request.category.trim(), request.description.trim()).on(date);

    if let Err(errors) = validate_new_expense(&new, Some(&state.config.categories)) {
        return failure(StatusCode::BAD_REQUEST, describe_errors(&errors));
    }

    let policy = state.config.id_policy;
    match state.with_store(|store| add_expense(store, new, policy)) {
        Ok(expense) => respond(StatusCode::CREATED, expense),
        Err(e) => internal_error("Error adding expense", e),
    }
}

/// DELETE /api/expenses/:id - Delete by id (missing ids succeed)
async fn remove_expense(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    match state.with_store(|store| delete_expense(store, id)) {
        Ok(removed) => respond(StatusCode::OK, DeleteResponse { id, removed }),
        Err(e) => internal_error("Error deleting expense", e),
    }
}

/// GET /api/categories - Totals per category
async fn get_categories(State(state): State<AppState>) -> Response {
    match state.with_store(|store| by_category(store)) {
        Ok(categories) => {
            let total = categories.iter().map(|c| c.total).sum();
            respond(StatusCode::OK, CategoryResponse { categories, total })
        }
        Err(e) => internal_error("Error aggregating categories", e),
    }
}

/// GET /api/months/:month - Expenses whose date starts with `month`
async fn get_month(State(state): State<AppState>, Path(month): Path<String>) -> Response {
    match state.with_store(|store| by_month(store, &month)) {
        Ok(report) => respond::<MonthReport>(StatusCode::OK, report),
        Err(e) => internal_error("Error building month report", e),
    }
}

/// GET /api/budget?month=YYYY-MM&budget=N - Budget vs spend
async fn get_budget(
    State(state): State<AppState>,
    query: Result<Query<BudgetQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_request(rejection.body_text()),
    };

    let month = query.month.unwrap_or_default();
    if month.trim().is_empty() {
        return failure(StatusCode::BAD_REQUEST, "Please enter a month.");
    }

    let budget = match query.budget {
        Some(budget) if budget.is_finite() && budget > 0.0 => budget,
        _ => return failure(StatusCode::BAD_REQUEST, "Please enter a budget greater than zero."),
    };

    match state.with_store(|store| check_budget(store, &month, budget)) {
        Ok(report) => respond::<BudgetReport>(StatusCode::OK, report),
        Err(e) => internal_error("Error building budget report", e),
    }
}

/// GET / - Serve the dashboard
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/config", get(get_config))
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/:id", delete(remove_expense))
        .route("/categories", get(get_categories))
        .route("/months/:month", get(get_month))
        .route("/budget", get(get_budget))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
