//! Request bodies and typed response records.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Body for creating a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateDocumentBody {
    pub name: String,
    pub project: String,
    /// Folder path inside the project; empty for the project root.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub folder: String,
    /// JSON text of the document.
    pub content: String,
}

/// Body for uploading a local JSON file as a new document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDocumentBody {
    pub file_path: PathBuf,
    pub project: String,
    /// Defaults to the file's base name when empty.
    pub name: String,
    pub folder: String,
}

/// Body for creating a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreateFolderBody {
    pub name: String,
    pub project: String,
    /// Parent folder path; empty for the project root.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub folder: String,
}

/// A document as returned by the create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub id: String,
    pub name: String,
    pub path: String,
    pub project: String,
    pub created_at: String,
    /// True when the document was already there and nothing was created.
    #[serde(default)]
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSize {
    pub number: f64,
    pub string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    pub id: String,
    pub name: String,
    pub project: String,
    pub path: String,
    pub content_size: ContentSize,
    /// Absent (or null) for documents at the project root.
    #[serde(default)]
    pub folder_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedDocument {
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedDocument {
    pub deleted: bool,
}

/// Number of documents and sub-folders inside a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderStats {
    pub documents: u64,
    pub folders: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub path: String,
    pub project: String,
    pub created_at: String,
    pub updated_at: String,
    /// Only filled by [`crate::JsonBank::get_folder_with_stats`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<FolderStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFolder {
    #[serde(flatten)]
    pub folder: Folder,
    /// True when the folder was already there and nothing was created.
    pub exists: bool,
}
