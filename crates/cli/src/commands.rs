//! `jsb` subcommands.
//!
//! Each command takes a ready client and an output sink so the same code
//! runs against stdout in `main` and a buffer in tests. JSON results are
//! pretty-printed; `--raw` content is written exactly as stored.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use jsonbank_client::{
    ClientConfig, CreateDocumentBody, CreateFolderBody, JsonBank, Keys, SavedKeys, Transport,
    UploadDocumentBody,
};

use crate::exit_codes::*;
use crate::CliError;

/// Host and keys as given on the command line (or via `JSB_*` env vars).
#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub host: Option<String>,
    pub public_key: Option<String>,
    pub private_key: Option<String>,
}

/// Resolve each value: flag/env > saved keys file > default.
pub fn resolve_config(conn: &Connection, saved: Option<SavedKeys>) -> ClientConfig {
    let saved = saved.unwrap_or_default();
    let given = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

    ClientConfig {
        host: given(&conn.host).or(saved.host).unwrap_or_default(),
        keys: Keys {
            public: given(&conn.public_key).or(saved.keys.public),
            private: given(&conn.private_key).or(saved.keys.private),
        },
    }
}

/// Document content from `--content` or `--file`.
pub fn read_content(content: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    match (content, file) {
        (Some(content), _) => Ok(content),
        (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| CliError {
            code: EXIT_INVALID_INPUT,
            message: format!("Cannot read {}: {}", path.display(), e),
            hint: None,
        }),
        (None, None) => Err(CliError::usage("either --content or --file is required")),
    }
}

fn write_json<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError::io(e.to_string()))?;
    writeln!(out, "{}", json).map_err(|e| CliError::io(e.to_string()))
}

fn write_text(out: &mut dyn Write, text: &str) -> Result<(), CliError> {
    writeln!(out, "{}", text).map_err(|e| CliError::io(e.to_string()))
}

// ── Session ─────────────────────────────────────────────────────────

/// Authenticate, then save the keys together with the host they were
/// verified against.
pub fn cmd_login<T: Transport>(jsb: &mut JsonBank<T>) -> Result<(), CliError> {
    if !jsb.keys().has_tier(jsonbank_client::Tier::Public) {
        return Err(CliError::usage("No public key provided")
            .with_hint("pass --public-key or set JSB_PUBLIC_KEY"));
    }

    let identity = jsb.authenticate().map_err(CliError::request)?;

    let saved = SavedKeys {
        host: Some(jsb.host().to_string()),
        keys: jsb.keys().clone(),
    };
    let path = jsonbank_client::save_keys(&saved).map_err(CliError::io)?;

    eprintln!("Authenticated as {} (key: {})", identity.username, identity.api_key.title);
    eprintln!("Keys saved to {}", path.display());
    Ok(())
}

pub fn cmd_logout() -> Result<(), CliError> {
    jsonbank_client::delete_keys().map_err(CliError::io)?;
    eprintln!("Saved keys removed");
    Ok(())
}

pub fn cmd_whoami<T: Transport>(jsb: &mut JsonBank<T>, out: &mut dyn Write) -> Result<(), CliError> {
    let identity = jsb.authenticate().map_err(CliError::request)?;
    write_json(out, &identity)
}

// ── Documents ───────────────────────────────────────────────────────

pub fn cmd_get<T: Transport>(
    jsb: &JsonBank<T>,
    id_or_path: &str,
    own: bool,
    raw: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match (own, raw) {
        (true, true) => write_text(out, &jsb.get_own_content_as_string(id_or_path).map_err(CliError::request)?),
        (true, false) => write_json(out, &jsb.get_own_content(id_or_path).map_err(CliError::request)?),
        (false, true) => write_text(out, &jsb.get_content_as_string(id_or_path).map_err(CliError::request)?),
        (false, false) => write_json(out, &jsb.get_content(id_or_path).map_err(CliError::request)?),
    }
}

pub fn cmd_meta<T: Transport>(
    jsb: &JsonBank<T>,
    id_or_path: &str,
    own: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let meta = if own {
        jsb.get_own_document_meta(id_or_path)
    } else {
        jsb.get_document_meta(id_or_path)
    };
    write_json(out, &meta.map_err(CliError::request)?)
}

pub fn cmd_gh<T: Transport>(
    jsb: &JsonBank<T>,
    path: &str,
    raw: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if raw {
        write_text(out, &jsb.get_github_content_as_string(path).map_err(CliError::request)?)
    } else {
        write_json(out, &jsb.get_github_content(path).map_err(CliError::request)?)
    }
}

pub fn cmd_create<T: Transport>(
    jsb: &JsonBank<T>,
    body: &CreateDocumentBody,
    if_not_exists: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let created = if if_not_exists {
        jsb.create_document_if_not_exists(body)
    } else {
        jsb.create_document(body)
    };
    write_json(out, &created.map_err(CliError::request)?)
}

pub fn cmd_upload<T: Transport>(
    jsb: &JsonBank<T>,
    body: &UploadDocumentBody,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    write_json(out, &jsb.upload_document(body).map_err(CliError::request)?)
}

pub fn cmd_update<T: Transport>(
    jsb: &JsonBank<T>,
    id_or_path: &str,
    content: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    write_json(out, &jsb.update_own_document(id_or_path, content).map_err(CliError::request)?)
}

pub fn cmd_delete<T: Transport>(
    jsb: &JsonBank<T>,
    id_or_path: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    write_json(out, &jsb.delete_document(id_or_path).map_err(CliError::request)?)
}

/// Exit 0 when the document exists, 1 (silently) when it does not.
pub fn cmd_exists<T: Transport>(jsb: &JsonBank<T>, id_or_path: &str) -> Result<(), CliError> {
    if jsb.has_own_document(id_or_path) {
        Ok(())
    } else {
        Err(CliError { code: EXIT_ERROR, message: String::new(), hint: None })
    }
}

// ── Folders ─────────────────────────────────────────────────────────

pub fn cmd_mkdir<T: Transport>(
    jsb: &JsonBank<T>,
    body: &CreateFolderBody,
    if_not_exists: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let folder = if if_not_exists {
        jsb.create_folder_if_not_exists(body)
    } else {
        jsb.create_folder(body)
    };
    write_json(out, &folder.map_err(CliError::request)?)
}

pub fn cmd_folder<T: Transport>(
    jsb: &JsonBank<T>,
    id_or_path: &str,
    stats: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let folder = if stats {
        jsb.get_folder_with_stats(id_or_path)
    } else {
        jsb.get_folder(id_or_path)
    };
    write_json(out, &folder.map_err(CliError::request)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer, keys: Keys) -> JsonBank {
        JsonBank::new(ClientConfig::new(server.base_url(), keys)).unwrap()
    }

    fn output(buf: Vec<u8>) -> serde_json::Value {
        serde_json::from_slice(&buf).unwrap()
    }

    // ── Config resolution ───────────────────────────────────────────

    #[test]
    fn test_resolve_config_flags_win() {
        let conn = Connection {
            host: Some("http://flag".into()),
            public_key: Some("flag-pub".into()),
            private_key: None,
        };
        let saved = SavedKeys {
            host: Some("http://saved".into()),
            keys: Keys::new("saved-pub", "saved-prv"),
        };

        let config = resolve_config(&conn, Some(saved));
        assert_eq!(config.host, "http://flag");
        assert_eq!(config.keys.public_key(), Some("flag-pub"));
        assert_eq!(config.keys.private_key(), Some("saved-prv"));
    }

    #[test]
    fn test_resolve_config_blank_flag_falls_through() {
        let conn = Connection {
            host: Some("  ".into()),
            public_key: Some("".into()),
            private_key: None,
        };
        let saved = SavedKeys { host: None, keys: Keys::public_only("saved-pub") };

        let config = resolve_config(&conn, Some(saved));
        assert_eq!(config.host, "");
        assert_eq!(config.effective_host(), jsonbank_client::DEFAULT_HOST);
        assert_eq!(config.keys.public_key(), Some("saved-pub"));
        assert!(config.keys.private_key().is_none());
    }

    #[test]
    fn test_resolve_config_nothing_saved() {
        let config = resolve_config(&Connection::default(), None);
        assert!(config.host.is_empty());
        assert_eq!(config.keys, Keys::default());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_login_saves_verified_host() {
        let server = MockServer::start();
        let auth = server.mock(|when, then| {
            when.method(POST).path("/v1/authenticate").header("jsb-pub-key", "pub");
            then.status(200).json_body(json!({
                "authenticated": true,
                "username": "jsonbank",
                "apiKey": { "title": "sdk", "projects": ["sdk-test"] }
            }));
        });

        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", dir.path());
        let keys_file = dir.path().join("jsonbank/keys.json");

        // Host comes only from the saved file, as on a second `jsb login`.
        let previous = SavedKeys { host: Some(server.base_url()), keys: Keys::new("pub", "prv") };
        jsonbank_client::config::save_keys_to(&keys_file, &previous).unwrap();
        let mut jsb = JsonBank::new(resolve_config(&Connection::default(), Some(previous))).unwrap();

        cmd_login(&mut jsb).unwrap();
        auth.assert();

        let saved = jsonbank_client::config::load_keys_from(&keys_file).unwrap();
        assert_eq!(saved.host.as_deref(), Some(server.base_url().as_str()));
        assert_eq!(saved.keys, Keys::new("pub", "prv"));
    }

    #[test]
    fn test_read_content() {
        assert_eq!(read_content(Some("{}".into()), None).unwrap(), "{}");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "[1]").unwrap();
        assert_eq!(read_content(None, Some(path)).unwrap(), "[1]");

        let err = read_content(None, Some(dir.path().join("missing.json"))).unwrap_err();
        assert_eq!(err.code, EXIT_INVALID_INPUT);

        assert_eq!(read_content(None, None).unwrap_err().code, EXIT_USAGE);
    }

    // ── httpmock tests ──────────────────────────────────────────────

    #[test]
    fn test_get_raw_prints_stored_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/file/sdk-test/index.json");
            then.status(200).body("{\"author\":\"jsonbank\"}");
        });

        let jsb = client(&server, Keys::public_only("pub"));
        let mut buf = Vec::new();
        cmd_get(&jsb, "sdk-test/index.json", true, true, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\"author\":\"jsonbank\"}\n");
    }

    #[test]
    fn test_create_if_not_exists_prints_existing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/project/sdk-test/document");
            then.status(400).json_body(json!({
                "error": { "code": "name.exists", "message": "Document already exists" }
            }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/v1/meta/file/sdk-test/index.json");
            then.status(200).json_body(json!({
                "id": "doc1",
                "name": "index.json",
                "project": "sdk-test",
                "path": "index.json",
                "contentSize": { "number": 2, "string": "2 B" },
                "createdAt": "2023-01-01T00:00:00Z",
                "updatedAt": "2023-01-01T00:00:00Z"
            }));
        });

        let jsb = client(&server, Keys::new("pub", "prv"));
        let body = CreateDocumentBody {
            name: "index.json".into(),
            project: "sdk-test".into(),
            content: "{}".into(),
            ..Default::default()
        };

        let err = cmd_create(&jsb, &body, false, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, EXIT_SERVICE);
        assert!(err.hint.unwrap().contains("--if-not-exists"));

        let mut buf = Vec::new();
        cmd_create(&jsb, &body, true, &mut buf).unwrap();
        let printed = output(buf);
        assert_eq!(printed["id"], "doc1");
        assert_eq!(printed["exists"], true);
    }

    #[test]
    fn test_missing_private_key_exit_code() {
        let server = MockServer::start();
        let jsb = client(&server, Keys::public_only("pub"));

        let err = cmd_delete(&jsb, "doc1", &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, EXIT_MISSING_KEY);
        assert!(err.hint.is_some());
    }

    #[test]
    fn test_exists_exit_codes() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/v1/meta/file/sdk-test/missing.json");
            then.status(404).json_body(json!({
                "error": { "code": "notFound", "message": "File not found" }
            }));
        });

        let jsb = client(&server, Keys::public_only("pub"));
        let err = cmd_exists(&jsb, "sdk-test/missing.json").unwrap_err();
        assert_eq!(err.code, EXIT_ERROR);
        assert!(err.message.is_empty());
    }

    #[test]
    fn test_folder_with_stats_output() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/v1/folder/sdk-test/folder")
                .query_param("stats", "true");
            then.status(200).json_body(json!({
                "id": "fld1",
                "name": "folder",
                "path": "folder",
                "project": "sdk-test",
                "createdAt": "2023-01-01T00:00:00Z",
                "updatedAt": "2023-01-01T00:00:00Z",
                "stats": { "documents": 4, "folders": 1 }
            }));
        });

        let jsb = client(&server, Keys::public_only("pub"));
        let mut buf = Vec::new();
        cmd_folder(&jsb, "sdk-test/folder", true, &mut buf).unwrap();
        let printed = output(buf);
        assert_eq!(printed["stats"]["documents"], 4);
        assert_eq!(printed["createdAt"], "2023-01-01T00:00:00Z");
    }
}
