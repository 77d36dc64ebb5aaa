use axum::{
    extract::{Path as AxumPath, RawQuery, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Response},
};

use crate::components::{ListingComponent, NavigationComponent, TemplateComponent};
use crate::errors::BrowserError;
use crate::services::delivery_service::parse_range;
use crate::services::{DeliveryService, FileService, ListingService, PathKind};
use crate::types::{AppState, DeliveryRequest, RenderContext, RenderMode};
use crate::utils::{parse_width, query_flag};

/// Handle root path requests
pub async fn handle_root(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Response, BrowserError> {
    serve_path(&state, "", raw.unwrap_or_default(), &headers).await
}

/// Handle path requests: directories render, files are delivered
pub async fn handle_path(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Result<Response, BrowserError> {
    log::info!("Path request received: '{}'", path);
    serve_path(&state, &path, raw.unwrap_or_default(), &headers).await
}

/// Handle static asset requests
pub async fn handle_asset(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, BrowserError> {
    let file_service = FileService::new(state.assets_dir.as_ref().clone());
    let resolved = file_service.resolve(&path)?;
    let request = DeliveryRequest {
        absolute_path: resolved.absolute,
        requested_width: None,
        byte_range: None,
    };
    Ok(DeliveryService::new().deliver(&request).await)
}

/// Serve `favicon.ico` from the assets directory when there is one
pub async fn handle_favicon(State(state): State<AppState>) -> Result<Response, BrowserError> {
    handle_asset(State(state), AxumPath("favicon.ico".to_string())).await
}

async fn serve_path(
    state: &AppState,
    path: &str,
    query: String,
    headers: &HeaderMap,
) -> Result<Response, BrowserError> {
    let file_service = FileService::new(state.root_dir.as_ref().clone());
    let resolved = file_service.resolve(path)?;

    match file_service.kind_of(&resolved).await {
        Ok(PathKind::Directory) => {
            let mode = if query_flag(&query, "gallery") {
                RenderMode::Gallery
            } else {
                RenderMode::List
            };
            let ctx = RenderContext {
                root_dir: state.root_dir.clone(),
                current_dir: resolved.relative,
                mode,
                shuffle: mode == RenderMode::Gallery && query_flag(&query, "shuffle"),
            };
            log::debug!("Rendering directory '{}' as {:?}", ctx.current_dir, ctx.mode);
            let page = tokio::task::spawn_blocking(move || render_directory(&ctx)).await??;
            Ok(Html(page).into_response())
        }
        Ok(PathKind::File) => {
            let byte_range = headers
                .get(header::RANGE)
                .and_then(|v| v.to_str().ok())
                .and_then(parse_range);
            let request = DeliveryRequest {
                absolute_path: resolved.absolute,
                requested_width: parse_width(&query),
                byte_range,
            };
            Ok(DeliveryService::new().deliver(&request).await)
        }
        Err(e) => {
            log::warn!("Path not found: '{}'", resolved.relative);
            Err(e)
        }
    }
}

/// Build the full page for a directory
fn render_directory(ctx: &RenderContext) -> Result<String, BrowserError> {
    let listing = ListingComponent::new(ListingService::new(ctx.root_dir.as_ref().clone()));
    let body = listing.render(ctx)?;
    let header = NavigationComponent::new().build_header(ctx);
    let title = format!("/{}", ctx.current_dir);
    Ok(TemplateComponent::new().render_page(&title, &header, &body))
}
