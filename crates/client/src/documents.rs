//! Documents owned by the authenticated key: read, create, upload,
//! update, delete, and create-or-fetch.

use std::path::Path;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::{codes, RequestError, Result};
use crate::paths::{is_valid_json, make_document_path};
use crate::request::json_body;
use crate::transport::Transport;
use crate::types::{
    CreateDocumentBody, DeletedDocument, DocumentMeta, NewDocument, UpdatedDocument,
    UploadDocumentBody,
};
use crate::JsonBank;

fn require(value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RequestError::bad_request(message));
    }
    Ok(())
}

fn require_json(content: &str) -> Result<()> {
    if !is_valid_json(content) {
        return Err(RequestError::invalid_json_content());
    }
    Ok(())
}

/// Read an upload source. Missing and unreadable files are told apart.
fn read_upload(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(RequestError::new(codes::FILE_NOT_FOUND, "File does not exist"));
    }
    std::fs::read_to_string(path).map_err(|e| {
        log::debug!("cannot read {}: {}", path.display(), e);
        RequestError::new(codes::INVALID_FILE, "Could not read file")
    })
}

impl<T: Transport> JsonBank<T> {
    /// Content of an owned document, decoded as JSON.
    pub fn get_own_content(&self, id_or_path: &str) -> Result<Value> {
        let url = format!("{}/file/{}", self.urls.v1, id_or_path);
        self.as_structured(&self.build_keyed(Method::GET, url, None)?)
    }

    /// Content of an owned document, as the exact text stored.
    pub fn get_own_content_as_string(&self, id_or_path: &str) -> Result<String> {
        let url = format!("{}/file/{}", self.urls.v1, id_or_path);
        self.as_text(&self.build_keyed(Method::GET, url, None)?)
    }

    pub fn get_own_document_meta(&self, id_or_path: &str) -> Result<DocumentMeta> {
        let url = format!("{}/meta/file/{}", self.urls.v1, id_or_path);
        self.send(&self.build_keyed(Method::GET, url, None)?)
    }

    /// Whether an owned document exists, probed through its metadata.
    /// Any error, including a missing key, reads as "no".
    pub fn has_own_document(&self, id_or_path: &str) -> bool {
        self.get_own_document_meta(id_or_path).is_ok()
    }

    /// Create a document. Fails with `name.exists` if the path is taken.
    pub fn create_document(&self, document: &CreateDocumentBody) -> Result<NewDocument> {
        require(&document.project, "Project is required")?;
        require(&document.name, "Name is required")?;
        require_json(&document.content)?;

        let url = format!("{}/project/{}/document", self.urls.v1, document.project);
        let request = self.build_private(Method::POST, url, Some(json_body(document)?))?;

        let mut created: NewDocument = self.send(&request)?;
        created.exists = false;
        Ok(created)
    }

    /// Create a document from a local JSON file.
    pub fn upload_document(&self, upload: &UploadDocumentBody) -> Result<NewDocument> {
        require(&upload.project, "Project is required")?;

        let content = read_upload(&upload.file_path)?;
        require_json(&content)?;

        let name = if upload.name.is_empty() {
            upload
                .file_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            upload.name.clone()
        };

        self.create_document(&CreateDocumentBody {
            name,
            project: upload.project.clone(),
            folder: upload.folder.clone(),
            content,
        })
    }

    /// Create a document, or return the existing one at the same path.
    ///
    /// Only a `name.exists` conflict triggers the metadata lookup; every
    /// other error is returned as is.
    pub fn create_document_if_not_exists(&self, document: &CreateDocumentBody) -> Result<NewDocument> {
        match self.create_document(document) {
            Err(err) if err.is_name_exists() => {
                let path = make_document_path(document);
                log::info!("document {} already exists, fetching it", path);

                let meta = self.get_own_document_meta(&path)?;
                Ok(NewDocument {
                    id: meta.id,
                    name: document.name.clone(),
                    path: meta.path,
                    project: meta.project,
                    created_at: meta.created_at,
                    exists: true,
                })
            }
            result => result,
        }
    }

    /// Replace the content of an owned document.
    pub fn update_own_document(&self, id_or_path: &str, content: &str) -> Result<UpdatedDocument> {
        require_json(content)?;

        #[derive(Serialize)]
        struct Body<'a> {
            content: &'a str,
        }

        let url = format!("{}/file/{}", self.urls.v1, id_or_path);
        let body = json_body(&Body { content })?;
        self.send(&self.build_private(Method::POST, url, Some(body))?)
    }

    pub fn delete_document(&self, id_or_path: &str) -> Result<DeletedDocument> {
        let url = format!("{}/file/{}", self.urls.v1, id_or_path);
        self.send(&self.build_private(Method::DELETE, url, None)?)
    }
}
