//! Share-link management and public resolution handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::LOCATION;
use axum::response::{IntoResponse, Response};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use notevault_core::types::NoteId;

use crate::dto::request::CreateShareQuery;
use crate::dto::response::{ResolveShareResponse, ShareLinkResponse, ShareUrlResponse};
use crate::error::{ApiError, invalid_or_expired};
use crate::extractors::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

/// Bytes left unescaped in a `redirect` query value: RFC 3986 unreserved plus `/`.
const REDIRECT_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// POST /api/share/{noteId}
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(note_id): Path<NoteId>,
    Query(query): Query<CreateShareQuery>,
) -> Result<Json<ShareUrlResponse>, ApiError> {
    let link = state
        .share_service
        .create_for(&auth, note_id, query.into())
        .await?;

    Ok(Json(ShareUrlResponse {
        url: state.share_service.url_for(&link),
    }))
}

/// GET /api/share/{token}
pub async fn resolve_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ResolveShareResponse>, ApiError> {
    let policy = state.config.share.api_consumption;
    let link = state
        .share_service
        .resolve_and_consume(&token, policy)
        .await?;

    Ok(Json(ResolveShareResponse {
        resource_id: link.resource_id,
    }))
}

/// DELETE /api/share/{token}
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.share_service.revoke(&auth, &token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/shares
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ShareLinkResponse>>, ApiError> {
    let links = state.share_service.list(&auth).await?;
    let items = links
        .into_iter()
        .map(|link| {
            let url = state.share_service.url_for(&link);
            ShareLinkResponse::new(link, url)
        })
        .collect();
    Ok(Json(items))
}

/// GET /share/{token}
///
/// Anonymous visitors are sent to the login page with the link as the
/// return target; signed-in visitors are sent to the note.
pub async fn redirect_share(
    State(state): State<AppState>,
    MaybeAuthUser(ctx): MaybeAuthUser,
    Path(token): Path<String>,
) -> Response {
    let share = &state.config.share;

    if ctx.is_none() {
        let target = format!("{}/{}", share.url_prefix.trim_end_matches('/'), token);
        return found(format!(
            "{}?redirect={}",
            share.login_path,
            utf8_percent_encode(&target, REDIRECT_VALUE)
        ));
    }

    match state
        .share_service
        .resolve_and_consume(&token, share.redirect_consumption)
        .await
    {
        Ok(link) => found(format!(
            "{}/{}",
            share.note_path_prefix.trim_end_matches('/'),
            link.resource_id
        )),
        Err(e) if e.kind == notevault_core::error::ErrorKind::NotFound => invalid_or_expired(),
        Err(e) => ApiError(e).into_response(),
    }
}

fn found(location: String) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}
