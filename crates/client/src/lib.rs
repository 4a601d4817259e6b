//! jsonbank API client, shared by the `jsb` CLI and library users.
//!
//! Blocking, one HTTP round trip per call. Requests are signed with a
//! public key (reads) or a public + private key pair (writes); every
//! failure comes back as a [`RequestError`] with a `{code, message}` shape.
//!
//! No caching. No retries. No pagination.

mod client;
pub mod config;
mod documents;
pub mod error;
mod folders;
mod paths;
mod request;
mod response;
mod session;
pub mod transport;
mod types;

pub use client::JsonBank;
pub use config::{
    ClientConfig, Keys, SavedKeys, Tier, DEFAULT_HOST,
    keys_file_path, load_keys, save_keys, delete_keys,
};
pub use error::{codes, RequestError, Result};
pub use paths::{compose_path, is_valid_json, make_document_path, make_folder_path};
pub use request::{PRIVATE_KEY_HEADER, PUBLIC_KEY_HEADER};
pub use session::{AuthenticatedData, AuthenticatedKey, Session};
pub use transport::{HttpTransport, OutboundRequest, RawResponse, Transport};
pub use types::{
    ContentSize, CreateDocumentBody, CreateFolderBody, DeletedDocument, DocumentMeta,
    Folder, FolderStats, NewDocument, NewFolder, UpdatedDocument, UploadDocumentBody,
};
