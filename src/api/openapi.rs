//! OpenAPI description of the REST endpoints.

use utoipa::OpenApi;

use super::dto::{BackupResponse, FileContentResponse, FileStatusResponse, MessageResponse};
use super::handlers::symbols::{cex, dex, futures};
use super::handlers::{files, system};
use crate::domain::{
    CexFields, CexSymbolRequest, DexFields, DexSymbolRequest, DexType, FuturesFields,
    FuturesSymbolRequest, PoolAddress, RecordId,
};
use crate::error::{ErrorBody, ErrorResponse};

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Symbol Manager API",
        description = "File-backed management of DEX pools, CEX tickers and futures symbols"
    ),
    paths(
        system::health_handler,
        system::dex_types_handler,
        dex::list_symbols,
        dex::create_symbol,
        dex::get_symbol,
        dex::update_symbol,
        dex::delete_symbol,
        dex::regenerate_file,
        cex::list_symbols,
        cex::create_symbol,
        cex::get_symbol,
        cex::update_symbol,
        cex::delete_symbol,
        cex::regenerate_file,
        futures::list_symbols,
        futures::create_symbol,
        futures::get_symbol,
        futures::update_symbol,
        futures::delete_symbol,
        futures::regenerate_file,
        files::file_status,
        files::download_file,
        files::file_content,
        files::create_backup,
    ),
    components(schemas(
        ErrorResponse,
        ErrorBody,
        RecordId,
        DexType,
        PoolAddress,
        DexSymbolRequest,
        DexFields,
        CexSymbolRequest,
        CexFields,
        FuturesSymbolRequest,
        FuturesFields,
        FileStatusResponse,
        FileContentResponse,
        BackupResponse,
        MessageResponse,
    )),
    tags(
        (name = "System", description = "Health and catalog endpoints"),
        (name = "DEX", description = "DEX liquidity pools written to pooladdress.txt"),
        (name = "CEX", description = "CEX ticker mappings written to cex_symbols.txt"),
        (name = "Futures", description = "Futures symbols written to futures_symbols.txt"),
        (name = "Files", description = "Generated text files and backups"),
    )
)]
pub struct ApiDoc;
