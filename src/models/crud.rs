use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Document;

/// Body for creating or cloning a document
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub owner_id: Option<String>,
    pub name: Option<String>,
    /// Initial payload; defaults to the empty value when absent
    #[schema(value_type = Option<Object>)]
    pub payload: Option<serde_json::Value>,
}

/// Body for renaming a document
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct RenameDocumentRequest {
    pub uid: Option<String>,
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DocumentsResponse {
    pub documents: Vec<Document>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct FetchDocumentResponse {
    pub document: Option<Document>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DocumentData {
    pub document: Document,
}

/// Envelope for successful mutations
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct DocumentResponse {
    pub message: String,
    pub data: DocumentData,
}
