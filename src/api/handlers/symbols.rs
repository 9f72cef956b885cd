//! Symbol CRUD handlers for the three categories.
//!
//! Every category exposes the same six endpoints. `category_handlers!`
//! stamps them out once per category so each route carries its own OpenAPI
//! path, request body, and record schema. Handlers pull the matching
//! [`CollectionService`] out of [`AppState`] via `FromRef`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::MessageResponse;
use crate::app_state::AppState;
use crate::domain::{
    CexFields, CexSymbolRequest, DexFields, DexSymbolRequest, FuturesFields,
    FuturesSymbolRequest, Record, RecordId, SymbolFields,
};
use crate::error::{ErrorResponse, SymbolError};
use crate::service::CollectionService;

/// Reply of the generate-file endpoints, e.g. "DEX file regenerated successfully".
fn regenerated_message<F: SymbolFields>() -> MessageResponse {
    MessageResponse::new(format!("{} file regenerated successfully", F::CATEGORY))
}

macro_rules! category_handlers {
    (
        $(#[$meta:meta])*
        $module:ident,
        fields = $fields:ident,
        request = $request:ident,
        tag = $tag:tt,
        collection = $collection:tt,
        item = $item:tt,
        regenerate = $regenerate:tt $(,)?
    ) => {
        $(#[$meta])*
        pub mod $module {
            use super::*;

            /// `GET /symbols`: All records in insertion order.
            ///
            /// # Errors
            ///
            /// Returns [`SymbolError`] if the document cannot be read.
            #[utoipa::path(
                get,
                path = $collection,
                tag = $tag,
                summary = "List symbols",
                description = "Returns every record of the category in insertion order.",
                responses(
                    (status = 200, description = "All records", body = [Record<$fields>]),
                    (status = 500, description = "Storage failure", body = ErrorResponse),
                )
            )]
            pub async fn list_symbols(
                State(service): State<Arc<CollectionService<$fields>>>,
            ) -> Result<Json<Vec<Record<$fields>>>, SymbolError> {
                Ok(Json(service.list().await?))
            }

            /// `POST /symbols`: Validate and add a record.
            ///
            /// # Errors
            ///
            /// Returns [`SymbolError::InvalidInput`] on validation failure or
            /// [`SymbolError::Conflict`] if the record duplicates another.
            #[utoipa::path(
                post,
                path = $collection,
                tag = $tag,
                summary = "Add a symbol",
                description = "Validates the request, appends a new record with a generated id, backs up and saves the document, and regenerates the text file.",
                request_body = $request,
                responses(
                    (status = 201, description = "Record created", body = Record<$fields>),
                    (status = 400, description = "Invalid input or duplicate", body = ErrorResponse),
                )
            )]
            pub async fn create_symbol(
                State(service): State<Arc<CollectionService<$fields>>>,
                Json(req): Json<$request>,
            ) -> Result<impl IntoResponse, SymbolError> {
                let record = service.add(req).await?;
                Ok((StatusCode::CREATED, Json(record)))
            }

            /// `GET /symbols/{id}`: One record.
            ///
            /// # Errors
            ///
            /// Returns [`SymbolError::NotFound`] if no record has `id`.
            #[utoipa::path(
                get,
                path = $item,
                tag = $tag,
                summary = "Get a symbol",
                params(("id" = String, Path, description = "Record identifier")),
                responses(
                    (status = 200, description = "Record", body = Record<$fields>),
                    (status = 404, description = "Record not found", body = ErrorResponse),
                )
            )]
            pub async fn get_symbol(
                State(service): State<Arc<CollectionService<$fields>>>,
                Path(id): Path<String>,
            ) -> Result<Json<Record<$fields>>, SymbolError> {
                Ok(Json(service.get(&RecordId::from(id)).await?))
            }

            /// `PUT /symbols/{id}`: Replace a record's fields.
            ///
            /// # Errors
            ///
            /// Returns [`SymbolError::InvalidInput`], [`SymbolError::NotFound`],
            /// or [`SymbolError::Conflict`].
            #[utoipa::path(
                put,
                path = $item,
                tag = $tag,
                summary = "Update a symbol",
                description = "Replaces every mutable field. The id and creation time are kept.",
                params(("id" = String, Path, description = "Record identifier")),
                request_body = $request,
                responses(
                    (status = 200, description = "Updated record", body = Record<$fields>),
                    (status = 400, description = "Invalid input or duplicate", body = ErrorResponse),
                    (status = 404, description = "Record not found", body = ErrorResponse),
                )
            )]
            pub async fn update_symbol(
                State(service): State<Arc<CollectionService<$fields>>>,
                Path(id): Path<String>,
                Json(req): Json<$request>,
            ) -> Result<Json<Record<$fields>>, SymbolError> {
                Ok(Json(service.update(&RecordId::from(id), req).await?))
            }

            /// `DELETE /symbols/{id}`: Remove a record.
            ///
            /// # Errors
            ///
            /// Returns [`SymbolError::NotFound`] if no record has `id`.
            #[utoipa::path(
                delete,
                path = $item,
                tag = $tag,
                summary = "Delete a symbol",
                params(("id" = String, Path, description = "Record identifier")),
                responses(
                    (status = 200, description = "Record deleted", body = MessageResponse),
                    (status = 404, description = "Record not found", body = ErrorResponse),
                )
            )]
            pub async fn delete_symbol(
                State(service): State<Arc<CollectionService<$fields>>>,
                Path(id): Path<String>,
            ) -> Result<Json<MessageResponse>, SymbolError> {
                service.delete(&RecordId::from(id)).await?;
                Ok(Json(MessageResponse::new("Symbol deleted successfully")))
            }

            /// `POST /generate-file`: Rewrite the text file without touching data.
            ///
            /// # Errors
            ///
            /// Returns [`SymbolError`] if reading or writing fails.
            #[utoipa::path(
                post,
                path = $regenerate,
                tag = $tag,
                summary = "Regenerate the text file",
                description = "Rewrites the generated file from the stored records. The document and its version are not changed.",
                responses(
                    (status = 200, description = "File regenerated", body = MessageResponse),
                    (status = 500, description = "Storage failure", body = ErrorResponse),
                )
            )]
            pub async fn regenerate_file(
                State(service): State<Arc<CollectionService<$fields>>>,
            ) -> Result<Json<MessageResponse>, SymbolError> {
                service.regenerate().await?;
                Ok(Json(regenerated_message::<$fields>()))
            }

            /// Routes for this category, nested under its `/api` prefix.
            pub fn routes() -> Router<AppState> {
                Router::new()
                    .route("/symbols", get(list_symbols).post(create_symbol))
                    .route(
                        "/symbols/{id}",
                        get(get_symbol).put(update_symbol).delete(delete_symbol),
                    )
                    .route("/generate-file", post(regenerate_file))
            }
        }
    };
}

category_handlers!(
    /// DEX pool endpoints under `/api/dex`.
    dex,
    fields = DexFields,
    request = DexSymbolRequest,
    tag = "DEX",
    collection = "/api/dex/symbols",
    item = "/api/dex/symbols/{id}",
    regenerate = "/api/dex/generate-file",
);

category_handlers!(
    /// CEX mapping endpoints under `/api/cex`.
    cex,
    fields = CexFields,
    request = CexSymbolRequest,
    tag = "CEX",
    collection = "/api/cex/symbols",
    item = "/api/cex/symbols/{id}",
    regenerate = "/api/cex/generate-file",
);

category_handlers!(
    /// Futures symbol endpoints under `/api/futures`.
    futures,
    fields = FuturesFields,
    request = FuturesSymbolRequest,
    tag = "Futures",
    collection = "/api/futures/symbols",
    item = "/api/futures/symbols/{id}",
    regenerate = "/api/futures/generate-file",
);
