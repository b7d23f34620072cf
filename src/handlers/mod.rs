pub mod doc_clone;
pub mod doc_create;
pub mod doc_delete;
pub mod doc_get;
pub mod doc_list;
pub mod doc_rename;
pub mod health;

pub use doc_clone::*;
pub use doc_create::*;
pub use doc_delete::*;
pub use doc_get::*;
pub use doc_list::*;
pub use doc_rename::*;
pub use health::*;

#[cfg(test)]
mod tests {
    use super::doc_list::ListDocumentsQuery;
    use super::*;
    use crate::db::{DocStore, LifecycleMode};
    use crate::models::{CreateDocumentRequest, RenameDocumentRequest};
    use crate::ws::registry::SessionRegistry;
    use crate::AppState;
    use axum::extract::{Path, Query, State};
    use axum::http::StatusCode;
    use axum::Json;
    use serde_json::json;
    use std::sync::Arc;

    fn app_state(lifecycle: LifecycleMode) -> Arc<AppState> {
        Arc::new(AppState {
            store: DocStore::memory(lifecycle),
            registry: SessionRegistry::new(),
        })
    }

    fn create_req(owner_id: &str, name: &str) -> CreateDocumentRequest {
        CreateDocumentRequest {
            owner_id: Some(owner_id.to_string()),
            name: Some(name.to_string()),
            payload: None,
        }
    }

    #[tokio::test]
    async fn create_then_fetch_roundtrip() {
        let state = app_state(LifecycleMode::Soft);

        let (status, Json(created)) =
            create_document(State(state.clone()), Json(create_req("o1", "Notes")))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.message, "Document created successfully.");
        let document = created.data.document;
        assert_eq!(document.owner_id, "o1");
        assert_eq!(document.name, "Notes");
        assert_eq!(document.payload, json!(""));

        let (status, Json(fetched)) =
            get_document(State(state), Path(document.uid.clone())).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let fetched = fetched.document.unwrap();
        assert_eq!(fetched.uid, document.uid);
        assert_eq!(fetched.name, "Notes");
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let state = app_state(LifecycleMode::Soft);
        let req = CreateDocumentRequest {
            owner_id: Some("o1".to_string()),
            name: None,
            payload: None,
        };

        let (status, Json(body)) = create_document(State(state), Json(req)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Must provide document name and ownerId");
    }

    #[tokio::test]
    async fn create_rejects_duplicate_active_name_in_soft_mode() {
        let state = app_state(LifecycleMode::Soft);
        let (_, Json(created)) =
            create_document(State(state.clone()), Json(create_req("o1", "Notes")))
                .await
                .unwrap();

        let (status, Json(body)) =
            create_document(State(state.clone()), Json(create_req("o2", "Notes")))
                .await
                .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Document: \"Notes\" already exists");

        // Soft-deleting the holder frees the name
        state
            .store
            .soft_delete(&created.data.document.uid)
            .await
            .unwrap();
        assert!(create_document(State(state), Json(create_req("o2", "Notes")))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn create_allows_duplicate_names_in_hard_mode() {
        let state = app_state(LifecycleMode::Hard);
        create_document(State(state.clone()), Json(create_req("o1", "Notes")))
            .await
            .unwrap();
        let result = create_document(State(state), Json(create_req("o2", "Notes"))).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn clone_takes_payload_from_the_request_not_the_source() {
        let state = app_state(LifecycleMode::Soft);

        // A source document with its own payload
        let mut source_req = create_req("o1", "Notes");
        source_req.payload = Some(json!({"text": "original"}));
        let (_, Json(created)) = create_document(State(state.clone()), Json(source_req))
            .await
            .unwrap();
        let source = created.data.document;

        let clone_req = CreateDocumentRequest {
            owner_id: Some("o1".to_string()),
            name: Some("Notes".to_string()),
            payload: Some(json!({"text": "from the request"})),
        };
        let (status, Json(cloned)) = clone_document(State(state), Json(clone_req))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let copy = cloned.data.document;
        assert_ne!(copy.uid, source.uid);
        assert!(copy.name.starts_with("Notes - "));
        assert_ne!(copy.name, "Notes");
        assert!(copy.cloned);
        assert_eq!(copy.payload, json!({"text": "from the request"}));
    }

    #[tokio::test]
    async fn list_requires_owner_and_filters_soft_deleted() {
        let state = app_state(LifecycleMode::Soft);

        let (status, _) = list_documents(
            State(state.clone()),
            Query(ListDocumentsQuery { owner_id: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, Json(created)) =
            create_document(State(state.clone()), Json(create_req("o1", "Keep")))
                .await
                .unwrap();
        let (_, Json(deleted)) =
            create_document(State(state.clone()), Json(create_req("o1", "Drop")))
                .await
                .unwrap();
        delete_document(State(state.clone()), Path(deleted.data.document.uid.clone()))
            .await
            .unwrap();

        let (_, Json(listing)) = list_documents(
            State(state.clone()),
            Query(ListDocumentsQuery {
                owner_id: Some("o1".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(listing.documents.len(), 1);
        assert_eq!(listing.documents[0].uid, created.data.document.uid);

        // The soft-deleted record is still reachable by uid, inactive
        let (_, Json(fetched)) =
            get_document(State(state), Path(deleted.data.document.uid)).await.unwrap();
        assert!(!fetched.document.unwrap().active);
    }

    #[tokio::test]
    async fn hard_delete_removes_the_record() {
        let state = app_state(LifecycleMode::Soft);
        let (_, Json(created)) =
            create_document(State(state.clone()), Json(create_req("o1", "Notes")))
                .await
                .unwrap();
        let uid = created.data.document.uid;

        let status = hard_delete_document(State(state.clone()), Path(uid.clone()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, Json(fetched)) = get_document(State(state), Path(uid)).await.unwrap();
        assert!(fetched.document.is_none());
    }

    #[tokio::test]
    async fn delete_route_is_hard_in_hard_mode() {
        let state = app_state(LifecycleMode::Hard);
        let (_, Json(created)) =
            create_document(State(state.clone()), Json(create_req("o1", "Notes")))
                .await
                .unwrap();
        let uid = created.data.document.uid;

        delete_document(State(state.clone()), Path(uid.clone()))
            .await
            .unwrap();
        let (_, Json(fetched)) = get_document(State(state), Path(uid)).await.unwrap();
        assert!(fetched.document.is_none());
    }

    #[tokio::test]
    async fn rename_updates_and_absent_uid_is_a_silent_noop() {
        let state = app_state(LifecycleMode::Soft);
        let (_, Json(created)) =
            create_document(State(state.clone()), Json(create_req("o1", "Old name")))
                .await
                .unwrap();
        let uid = created.data.document.uid;

        let status = rename_document(
            State(state.clone()),
            Json(RenameDocumentRequest {
                uid: Some(uid.clone()),
                name: Some("New name".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, Json(fetched)) = get_document(State(state.clone()), Path(uid)).await.unwrap();
        assert_eq!(fetched.document.unwrap().name, "New name");

        // Absent uid: still 204
        let status = rename_document(
            State(state.clone()),
            Json(RenameDocumentRequest {
                uid: Some("ghost".to_string()),
                name: Some("Anything".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        // Missing fields: 400
        let (status, Json(body)) = rename_document(
            State(state),
            Json(RenameDocumentRequest {
                uid: None,
                name: Some("Anything".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Must provide document name and uid");
    }
}
