//! File upload, retrieval, listing, and deletion endpoints.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::body::Body;
use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use filestash_core::FileId;
use filestash_metadata::MetadataError;
use filestash_storage::StorageError;
use serde::Serialize;

/// Name of the multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Absolute link to the stored file.
    pub link: String,
}

/// Delete response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl DeleteResponse {
    fn removed() -> Response {
        Json(Self {
            removed: true,
            error_message: None,
        })
        .into_response()
    }

    fn not_found() -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(Self {
                removed: false,
                error_message: Some("File not found".to_string()),
            }),
        )
            .into_response()
    }
}

/// Listing response: one `[link, filename]` pair per stored file.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub records: Vec<(String, String)>,
}

/// Pull the `file` part out of an upload form.
///
/// Other fields are drained and ignored. The whole part is buffered.
async fn read_file_part(multipart: &mut Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("file part has no filename".to_string()))?;
        let data = field.bytes().await?;
        return Ok((filename, data));
    }

    Err(ApiError::BadRequest(format!(
        "missing multipart field '{FILE_FIELD}'"
    )))
}

/// POST /static/upload - Store a file and return its link.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (filename, data) = read_file_part(&mut multipart).await?;
    let size = data.len();

    let row = state
        .allocator
        .allocate(state.metadata.as_ref(), &filename)
        .await?;

    if let Err(e) = state.storage.put(&row.id, data).await {
        tracing::warn!(
            file_id = %row.id,
            error = %e,
            "Blob write failed after record creation, record left without blob"
        );
        return Err(e.into());
    }

    tracing::info!(
        file_id = %row.id,
        filename = %row.filename,
        size,
        "File stored"
    );

    Ok(Json(UploadResponse {
        link: state.config.server.file_url(&row.id),
    }))
}

/// GET /static/download/{file_id} - Send a stored file as an attachment.
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Response> {
    let file_id = FileId::parse(file_id)?;

    state
        .metadata
        .get_file(file_id.as_str())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("file not found: {file_id}")))?;
    let data = state.storage.get(file_id.as_str()).await?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_id}\""),
            ),
        ],
        Body::from(data),
    )
        .into_response())
}

/// GET /static/file/{file_id} - Serve a stored file inline.
///
/// Reads the blob store only; the content type comes from the identifier's
/// extension.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Response> {
    let file_id = FileId::parse(file_id)?;
    let data = state.storage.get(file_id.as_str()).await?;
    let content_type = file_id
        .extension()
        .map(|ext| mime_guess::from_ext(ext).first_or_octet_stream())
        .unwrap_or(mime_guess::mime::APPLICATION_OCTET_STREAM)
        .to_string();

    Ok((StatusCode::OK, [(CONTENT_TYPE, content_type)], Body::from(data)).into_response())
}

/// DELETE /static/delete/file/{file_id} - Remove a file's record, then its blob.
///
/// The two removals are independent: once the record is gone it stays gone,
/// even if the blob cannot be removed. An identifier that could never have
/// been allocated is reported like any other unknown file.
pub async fn remove_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Response> {
    let Ok(file_id) = FileId::parse(file_id) else {
        return Ok(DeleteResponse::not_found());
    };

    match state.metadata.delete_file(file_id.as_str()).await {
        Ok(()) => {}
        Err(MetadataError::NotFound(_)) => return Ok(DeleteResponse::not_found()),
        Err(e) => return Err(e.into()),
    }

    match state.storage.delete(file_id.as_str()).await {
        Ok(()) => {
            tracing::info!(file_id = %file_id, "File removed");
            Ok(DeleteResponse::removed())
        }
        Err(StorageError::NotFound(_)) => {
            tracing::warn!(file_id = %file_id, "Record removed but blob was already missing");
            Ok(DeleteResponse::not_found())
        }
        Err(e) => {
            tracing::warn!(
                file_id = %file_id,
                error = %e,
                "Record removed but blob delete failed, blob orphaned"
            );
            Err(e.into())
        }
    }
}

/// GET /static/all - List every stored file.
pub async fn list_all_files(State(state): State<AppState>) -> ApiResult<Json<ListResponse>> {
    let rows = state.metadata.list_files().await?;
    let records = rows
        .into_iter()
        .map(|row| (state.config.server.file_url(&row.id), row.filename))
        .collect();

    Ok(Json(ListResponse { records }))
}
