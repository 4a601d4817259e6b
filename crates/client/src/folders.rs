//! Folder operations.

use reqwest::Method;

use crate::error::{RequestError, Result};
use crate::paths::make_folder_path;
use crate::request::json_body;
use crate::transport::Transport;
use crate::types::{CreateFolderBody, Folder, NewFolder};
use crate::JsonBank;

impl<T: Transport> JsonBank<T> {
    /// Create a folder. Fails with `name.exists` if the path is taken.
    pub fn create_folder(&self, body: &CreateFolderBody) -> Result<NewFolder> {
        if body.project.is_empty() {
            return Err(RequestError::bad_request("Project is required"));
        }
        if body.name.is_empty() {
            return Err(RequestError::bad_request("Name is required"));
        }

        let url = format!("{}/project/{}/folder", self.urls.v1, body.project);
        let request = self.build_private(Method::POST, url, Some(json_body(body)?))?;

        let mut folder: Folder = self.send(&request)?;
        folder.stats = None;
        Ok(NewFolder { folder, exists: false })
    }

    /// Create a folder, or return the existing one at the same path.
    pub fn create_folder_if_not_exists(&self, body: &CreateFolderBody) -> Result<NewFolder> {
        match self.create_folder(body) {
            Err(err) if err.is_name_exists() => {
                let path = make_folder_path(body);
                log::info!("folder {} already exists, fetching it", path);

                let folder = self.get_folder(&path)?;
                Ok(NewFolder { folder, exists: true })
            }
            result => result,
        }
    }

    pub fn get_folder(&self, id_or_path: &str) -> Result<Folder> {
        self.fetch_folder(id_or_path, false)
    }

    /// Folder plus its document and sub-folder counts.
    pub fn get_folder_with_stats(&self, id_or_path: &str) -> Result<Folder> {
        self.fetch_folder(id_or_path, true)
    }

    fn fetch_folder(&self, id_or_path: &str, include_stats: bool) -> Result<Folder> {
        let mut url = format!("{}/folder/{}", self.urls.v1, id_or_path);
        if include_stats {
            url.push_str("?stats=true");
        }

        let mut folder: Folder = self.send(&self.build_keyed(Method::GET, url, None)?)?;
        if !include_stats {
            folder.stats = None;
        }
        Ok(folder)
    }
}
