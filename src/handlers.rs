use crate::{
    AppState,
    admin_shell,
    auth::AuthUser,
    error::AppError,
    models::{Car, CreateCarRequest, DemoCategory, DemoItem, PublicUser, UpdateCarRequest},
    pagination::Paginator,
    validators::{validate_non_empty, validate_transmission},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
};
use serde_json::Map;
use tera::Context;

/// Cars shown per page of the catalog listing.
const CARS_PER_PAGE: usize = 5;

// --- Public API Resource ---

/// api_list_public_users
///
/// [Authenticated Route] Read-only collection of the user directory projected
/// to {id, email, name}, ordered by id ascending. The `AuthUser` extractor
/// rejects unauthenticated callers with 401 before any data is touched.
#[utoipa::path(
    get,
    path = "/api/public-users/",
    responses(
        (status = 200, description = "All users, id ascending", body = [PublicUser]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn api_list_public_users(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Json<Vec<PublicUser>> {
    Json(state.repo.list_users().await)
}

/// api_get_public_user
///
/// [Authenticated Route] Single projected record by id; 404 when absent.
#[utoipa::path(
    get,
    path = "/api/public-users/{id}/",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Found", body = PublicUser),
        (status = 404, description = "No such user")
    )
)]
pub async fn api_get_public_user(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PublicUser>, AppError> {
    match state.repo.get_user_projection(id).await {
        Some(user) => Ok(Json(user)),
        None => Err(AppError::NotFound),
    }
}

// --- Web Listing Views ---

/// people
///
/// [Public Route] Full-page HTML listing of every user, no pagination. Rows
/// are rendered through the same row template the partial endpoint serves, so
/// in-place swaps always match the initial render.
pub async fn people(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let users = state.repo.list_users().await;

    let mut ctx = Context::new();
    ctx.insert("users", &users);
    Ok(Html(state.renderer.render("user_list.html", &ctx)?))
}

/// user_row_partial
///
/// [Public Route] A single-row HTML fragment for incremental UI updates.
/// 404 when the primary key is unknown.
pub async fn user_row_partial(
    State(state): State<AppState>,
    Path(pk): Path<i64>,
) -> Result<Html<String>, AppError> {
    let user = state
        .repo
        .get_user_projection(pk)
        .await
        .ok_or(AppError::NotFound)?;

    let mut ctx = Context::new();
    ctx.insert("u", &user);
    Ok(Html(state.renderer.render("user_row.html", &ctx)?))
}

/// cars_index
///
/// [Public Route] Paginated catalog listing. Accepts repeated `transmission`
/// query values and an optional `page` value. Availability filtering is
/// enforced in the repository; the total count is taken post-filter and
/// pre-pagination. Requests carrying the `HX-Request` header get only the
/// list fragment; everything else gets the full page shell around the same
/// fragment.
pub async fn cars_index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let mut transmissions: Vec<String> = Vec::new();
    let mut page_raw: Option<String> = None;
    for (key, value) in params {
        match key.as_str() {
            "transmission" => transmissions.push(value),
            "page" => page_raw = Some(value),
            _ => {}
        }
    }

    let cars = state.repo.list_available_cars(&transmissions).await;

    let paginator = Paginator::new(CARS_PER_PAGE);
    let requested = Paginator::parse_page_number(page_raw.as_deref());
    let page = paginator.get_page(cars, requested);

    let mut ctx = Context::new();
    ctx.insert("page", &page);

    let template = if headers.contains_key("HX-Request") {
        "car_list.html"
    } else {
        "index.html"
    };
    Ok(Html(state.renderer.render(template, &ctx)?))
}

// --- Admin Surface ---

/// dashboard
///
/// [Staff Route] The themed admin dashboard page. Exercises the shell's
/// typed callbacks: visibility gates the page, the context is augmented with
/// project and environment, and the sidebar badge is computed from the
/// caller's flags.
pub async fn dashboard(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    if !(state.shell.sidebar_visible)(Some(&user)) {
        return Err(AppError::Forbidden);
    }

    let context = admin_shell::dashboard_context(
        &state.config.project_name,
        &state.config.env,
        Map::new(),
    );

    let mut ctx = Context::new();
    for (key, value) in &context {
        ctx.insert(key.as_str(), value);
    }
    ctx.insert("badge", &(state.shell.sidebar_badge)(Some(&user)));

    Ok(Html(state.renderer.render("dashboard.html", &ctx)?))
}

/// admin_list_cars
///
/// [Staff Route] Every car in the catalog, unavailable stock first.
#[utoipa::path(
    get,
    path = "/admin/cars",
    responses(
        (status = 200, description = "All cars", body = [Car]),
        (status = 403, description = "Not staff")
    )
)]
pub async fn admin_list_cars(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Car>>, AppError> {
    if !(state.shell.sidebar_visible)(Some(&user)) {
        return Err(AppError::Forbidden);
    }
    Ok(Json(state.repo.list_all_cars().await))
}

/// admin_create_car
///
/// [Staff Route] Creates a catalog entry. Field constraints are checked
/// before anything is persisted, so there is never a partial save.
#[utoipa::path(
    post,
    path = "/admin/cars",
    request_body = CreateCarRequest,
    responses(
        (status = 201, description = "Created", body = Car),
        (status = 422, description = "Constraint violated")
    )
)]
pub async fn admin_create_car(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    if !(state.shell.sidebar_visible)(Some(&user)) {
        return Err(AppError::Forbidden);
    }
    validate_non_empty("name", &payload.name)?;
    validate_transmission(&payload.transmission)?;

    let car = state
        .repo
        .create_car(payload)
        .await
        .ok_or(AppError::Internal)?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// admin_update_car
///
/// [Staff Route] Partial update of a catalog entry. Only provided fields are
/// validated and written; 404 when the id is unknown.
#[utoipa::path(
    put,
    path = "/admin/cars/{id}",
    params(("id" = i64, Path, description = "Car id")),
    request_body = UpdateCarRequest,
    responses(
        (status = 200, description = "Updated", body = Car),
        (status = 404, description = "No such car"),
        (status = 422, description = "Constraint violated")
    )
)]
pub async fn admin_update_car(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCarRequest>,
) -> Result<Json<Car>, AppError> {
    if !(state.shell.sidebar_visible)(Some(&user)) {
        return Err(AppError::Forbidden);
    }
    if let Some(name) = &payload.name {
        validate_non_empty("name", name)?;
    }
    if let Some(transmission) = &payload.transmission {
        validate_transmission(transmission)?;
    }

    match state.repo.update_car(id, payload).await {
        Some(car) => Ok(Json(car)),
        None => Err(AppError::NotFound),
    }
}

/// admin_list_demo_categories
///
/// [Staff Route] Demonstration categories, id ascending.
#[utoipa::path(
    get,
    path = "/admin/demo-categories",
    responses((status = 200, description = "Categories", body = [DemoCategory]))
)]
pub async fn admin_list_demo_categories(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<DemoCategory>>, AppError> {
    if !(state.shell.sidebar_visible)(Some(&user)) {
        return Err(AppError::Forbidden);
    }
    Ok(Json(state.repo.list_demo_categories().await))
}

/// admin_list_demo_items
///
/// [Staff Route] Demonstration records, title ascending.
#[utoipa::path(
    get,
    path = "/admin/demo-items",
    responses((status = 200, description = "Items", body = [DemoItem]))
)]
pub async fn admin_list_demo_items(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<DemoItem>>, AppError> {
    if !(state.shell.sidebar_visible)(Some(&user)) {
        return Err(AppError::Forbidden);
    }
    Ok(Json(state.repo.list_demo_items().await))
}
