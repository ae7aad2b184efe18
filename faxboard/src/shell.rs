//! Routing shell: maps dashboard URLs onto form controllers and serves the schema API.

use crate::error::AppError;
use crate::form::{FormController, FormMode, LoadOutcome, Navigation, SubmitOutcome};
use crate::record::{FormValues, RecordId};
use crate::registry::Registry;
use crate::render;
use crate::schema::{DefaultSource, EntitySchema, FieldKind};
use crate::store::RecordStore;
use crate::{debug, error, info};
use axum::body::Bytes;
use axum::extract::{FromRequest, Path, Request, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use http::header::CACHE_CONTROL;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

pub const LIST_LIMIT: usize = 100;

// Create our own JSON extractor by wrapping `axum::Json`. This makes it easy to override the
// rejection and provide our own which formats errors to match our application.
#[derive(FromRequest, Deserialize)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl<S> FromRequest<S> for FormValues
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        Ok(FormValues::parse(&body)?)
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub code: u16,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::JsonRejection(rej) => rej.body_text(),
            AppError::BodyRejection(rej) => rej.body_text(),
            other => other.to_string(),
        };
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, message);
        }
        (status, AppJson(ErrorResponse { message, code: status.as_u16() })).into_response()
    }
}

#[derive(Clone)]
pub struct RequestState {
    pub store: Arc<dyn RecordStore>,
    pub registry: Arc<Registry>,
}

impl RequestState {
    pub fn new(store: Arc<dyn RecordStore>, registry: Registry) -> Self {
        RequestState { store, registry: Arc::new(registry) }
    }

    fn schema(&self, entity: &str) -> Result<&'static EntitySchema, AppError> {
        self.registry.get(entity).ok_or_else(|| AppError::NotFound(format!("unknown entity `{}`", entity)))
    }

    fn form(&self, schema: &'static EntitySchema, mode: FormMode) -> FormController<dyn RecordStore> {
        FormController::mount(schema, Arc::clone(&self.store), mode)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub input_type: String,
    pub required: bool,
    pub default_source: DefaultSource,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SchemaView {
    pub table: String,
    pub route: String,
    pub label: String,
    pub plural: String,
    pub list_route: String,
    pub new_route: String,
    pub fields: Vec<FieldView>,
}

impl From<&EntitySchema> for SchemaView {
    fn from(schema: &EntitySchema) -> Self {
        SchemaView {
            table: schema.table.to_string(),
            route: schema.route.to_string(),
            label: schema.label.to_string(),
            plural: schema.plural.to_string(),
            list_route: schema.list_route(),
            new_route: schema.new_route(),
            fields: schema
                .fields
                .iter()
                .map(|f| FieldView {
                    name: f.name.to_string(),
                    label: f.label.to_string(),
                    kind: f.kind,
                    input_type: f.kind.input_type().to_string(),
                    required: f.required,
                    default_source: f.default_source,
                })
                .collect(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(info(title = "faxboard", license(name = "MIT")))]
pub struct ApiDoc;

#[utoipa::path(get, path = "/api/schemas", responses((status = OK, body = Vec<SchemaView>)), tag = "schemas")]
pub async fn list_schemas(State(state): State<RequestState>) -> AppJson<Vec<SchemaView>> {
    AppJson(state.registry.iter().map(SchemaView::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/schemas/{entity}",
    params(("entity" = String, Path, description = "Route segment of the entity, e.g. fax-numbers")),
    responses((status = OK, body = SchemaView), (status = NOT_FOUND, body = ErrorResponse)),
    tag = "schemas"
)]
pub async fn get_schema(
    State(state): State<RequestState>,
    Path(entity): Path<String>,
) -> Result<AppJson<SchemaView>, AppError> {
    Ok(AppJson(SchemaView::from(state.schema(&entity)?)))
}

fn navigate(navigation: &Navigation) -> Response {
    let redirect = Redirect::to(&navigation.to);
    if navigation.refresh {
        ([(CACHE_CONTROL, "no-store")], redirect).into_response()
    } else {
        redirect.into_response()
    }
}

fn submitted(schema: &EntitySchema, form: &FormController<dyn RecordStore>, outcome: SubmitOutcome) -> Response {
    let status = match outcome {
        SubmitOutcome::Navigate(navigation) => return navigate(&navigation),
        SubmitOutcome::Failed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Ignored | SubmitOutcome::Discarded => StatusCode::CONFLICT,
    };
    (status, Html(render::form_page(schema, &form.snapshot()))).into_response()
}

fn load_failed(schema: &EntitySchema, message: Option<&str>) -> Response {
    (StatusCode::NOT_FOUND, Html(render::not_found_page(schema, message))).into_response()
}

async fn index(State(state): State<RequestState>) -> Html<String> {
    Html(render::index_page(&state.registry))
}

async fn list(State(state): State<RequestState>, Path(entity): Path<String>) -> Result<Html<String>, AppError> {
    let schema = state.schema(&entity)?;
    let rows = state.store.list(schema.table, LIST_LIMIT).await?;
    Ok(Html(render::list_page(schema, &rows)))
}

async fn new_form(State(state): State<RequestState>, Path(entity): Path<String>) -> Result<Html<String>, AppError> {
    let schema = state.schema(&entity)?;
    let form = state.form(schema, FormMode::Create);
    Ok(Html(render::form_page(schema, &form.snapshot())))
}

async fn create(
    State(state): State<RequestState>,
    Path(entity): Path<String>,
    values: FormValues,
) -> Result<Response, AppError> {
    let schema = state.schema(&entity)?;
    let form = state.form(schema, FormMode::Create);
    let outcome = form.submit(values).await;
    Ok(submitted(schema, &form, outcome))
}

async fn edit_form(
    State(state): State<RequestState>,
    Path((entity, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let schema = state.schema(&entity)?;
    let id = RecordId::from(id);
    let form = state.form(schema, FormMode::Edit(id.clone()));
    match form.load(id).await {
        LoadOutcome::Loaded => Ok(Html(render::form_page(schema, &form.snapshot())).into_response()),
        LoadOutcome::Failed(message) => Ok(load_failed(schema, Some(&message))),
        LoadOutcome::Ignored | LoadOutcome::Discarded => Ok(Html(render::loading_page(schema)).into_response()),
    }
}

async fn update(
    State(state): State<RequestState>,
    Path((entity, id)): Path<(String, String)>,
    values: FormValues,
) -> Result<Response, AppError> {
    let schema = state.schema(&entity)?;
    let id = RecordId::from(id);
    let form = state.form(schema, FormMode::Edit(id.clone()));
    match form.load(id).await {
        LoadOutcome::Loaded => {
            let outcome = form.submit(values).await;
            Ok(submitted(schema, &form, outcome))
        }
        LoadOutcome::Failed(message) => Ok(load_failed(schema, Some(&message))),
        LoadOutcome::Ignored | LoadOutcome::Discarded => Ok(load_failed(schema, None)),
    }
}

pub fn build_router(state: RequestState, cors: Option<CorsLayer>) -> Router<()> {
    let api: OpenApiRouter<RequestState> = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(list_schemas))
        .routes(routes!(get_schema));
    let (api, openapi) = api.split_for_parts();

    let pages: Router<RequestState> = Router::new()
        .route("/", get(|| async { Redirect::to("/dashboard") }))
        .route("/dashboard", get(index))
        .route("/dashboard/{entity}", get(list))
        .route("/dashboard/{entity}/new", get(new_form).post(create))
        .route("/dashboard/{entity}/{id}/edit", get(edit_form).post(update));

    debug!("Routing {} entities", state.registry.len());
    let merged = api
        .merge(pages)
        .merge(SwaggerUi::new("/swagger-ui").url("/apidoc/openapi.json", openapi))
        .with_state(state);
    if let Some(cors_layer) = cors {
        merged.layer(cors_layer)
    } else {
        merged
    }
}

pub async fn serve(
    state: RequestState,
    socket_addr: SocketAddr,
    cors: Option<CorsLayer>,
    shutdown: watch::Receiver<bool>,
) -> Result<(), AppError> {
    let router: Router<()> = build_router(state, cors);
    let tcp = TcpListener::bind(socket_addr).await?;
    info!("Dashboard listening on http://{}/dashboard", tcp.local_addr()?);

    let mut shutdown = shutdown.clone();
    axum::serve(tcp, router)
        .with_graceful_shutdown(async move {
            if shutdown.changed().await.is_ok() {
                info!("Shutting down server...");
            }
        })
        .await?;
    Ok(())
}
