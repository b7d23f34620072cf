use utoipa::OpenApi;

use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// List an owner's documents
#[utoipa::path(
    get,
    path = "/documents",
    params(
        ("ownerId" = String, Query, description = "Owner whose documents to list")
    ),
    responses(
        (status = 200, description = "Documents for the owner", body = DocumentsResponse),
        (status = 400, description = "Missing ownerId", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn list_documents_doc() {}

/// Fetch a document by uid
#[utoipa::path(
    get,
    path = "/document/{uid}",
    params(
        ("uid" = String, Path, description = "Document uid")
    ),
    responses(
        (status = 200, description = "The document, or null when unknown", body = FetchDocumentResponse)
    )
)]
#[allow(dead_code)]
pub async fn get_document_doc() {}

/// Create a new document
#[utoipa::path(
    post,
    path = "/document",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created successfully", body = DocumentResponse),
        (status = 400, description = "Missing fields or duplicate active name", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn create_document_doc() {}

/// Clone a document from a request-supplied payload
#[utoipa::path(
    post,
    path = "/clone-document",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document cloned successfully", body = DocumentResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn clone_document_doc() {}

/// Rename a document
#[utoipa::path(
    patch,
    path = "/document",
    request_body = RenameDocumentRequest,
    responses(
        (status = 204, description = "Renamed (vacuously on an unknown uid)"),
        (status = 400, description = "Missing fields", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn rename_document_doc() {}

/// Delete a document according to the configured lifecycle mode
#[utoipa::path(
    delete,
    path = "/document/{uid}",
    params(
        ("uid" = String, Path, description = "Document uid")
    ),
    responses(
        (status = 204, description = "Deleted (vacuously on an unknown uid)")
    )
)]
#[allow(dead_code)]
pub async fn delete_document_doc() {}

/// Remove a document record entirely
#[utoipa::path(
    delete,
    path = "/document/h/{uid}",
    params(
        ("uid" = String, Path, description = "Document uid")
    ),
    responses(
        (status = 204, description = "Removed (vacuously on an unknown uid)")
    )
)]
#[allow(dead_code)]
pub async fn hard_delete_document_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        list_documents_doc,
        get_document_doc,
        create_document_doc,
        clone_document_doc,
        rename_document_doc,
        delete_document_doc,
        hard_delete_document_doc,
    ),
    components(
        schemas(
            HealthResponse,
            Document,
            DocumentsResponse,
            FetchDocumentResponse,
            DocumentData,
            DocumentResponse,
            CreateDocumentRequest,
            RenameDocumentRequest,
            ErrorResponse,
        )
    ),
    tags(
        (name = "api", description = "Document CRUD endpoints; realtime editing runs over /ws")
    )
)]
pub struct ApiDoc;
