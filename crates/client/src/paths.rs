//! Path composition and content validation.

use crate::types::{CreateDocumentBody, CreateFolderBody};

/// `project/[folder/]name`, the path the service assigns to a resource.
pub fn compose_path(project: &str, folder: &str, name: &str) -> String {
    if folder.is_empty() {
        format!("{}/{}", project, name)
    } else {
        format!("{}/{}/{}", project, folder, name)
    }
}

pub fn make_document_path(document: &CreateDocumentBody) -> String {
    compose_path(&document.project, &document.folder, &document.name)
}

pub fn make_folder_path(folder: &CreateFolderBody) -> String {
    compose_path(&folder.project, &folder.folder, &folder.name)
}

/// Syntactic JSON check. No schema.
pub fn is_valid_json(s: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_path() {
        assert_eq!(compose_path("p", "", "n.json"), "p/n.json");
        assert_eq!(compose_path("p", "f", "n.json"), "p/f/n.json");
        assert_eq!(compose_path("p", "f/g", "n.json"), "p/f/g/n.json");
    }

    #[test]
    fn test_make_paths() {
        let doc = CreateDocumentBody {
            name: "upload.json".into(),
            project: "sdk-test".into(),
            folder: "folder".into(),
            content: "{}".into(),
        };
        assert_eq!(make_document_path(&doc), "sdk-test/folder/upload.json");

        let folder = CreateFolderBody {
            name: "folder".into(),
            project: "sdk-test".into(),
            ..Default::default()
        };
        assert_eq!(make_folder_path(&folder), "sdk-test/folder");
    }

    #[test]
    fn test_is_valid_json() {
        assert!(is_valid_json(r#"{"name": "JsonBank SDK Test File"}"#));
        assert!(is_valid_json("[1, 2, 3]"));
        assert!(is_valid_json("\"scalar\""));
        assert!(is_valid_json("  null  "));
        assert!(!is_valid_json(""));
        assert!(!is_valid_json("{name: 1}"));
        assert!(!is_valid_json(r#"{"a": 1} trailing"#));
    }
}
