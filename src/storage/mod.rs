//! Object storage for recipe images
//!
//! Uploads are validated client-side (image mimetype, 5 MB cap) before any
//! network call, stored under a server-unique generated name, and exposed
//! through their public bucket URL.

use reqwest::{multipart, Client};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Error;
use crate::fetch::{Fetch, CLIENT_INFO};

/// Bucket holding all recipe and creator images
pub const RECIPE_IMAGES_BUCKET: &str = "recipe-images";

/// Client-enforced upload size limit
pub const MAX_IMAGE_SIZE: usize = 5 * 1024 * 1024;

/// Client for Supabase Storage
pub struct StorageClient {
    /// The base URL for the Supabase project
    url: String,

    /// The anonymous API key for the Supabase project
    key: String,

    /// HTTP client used for requests
    client: Client,
}

/// Client for a specific storage bucket
pub struct BucketClient<'a> {
    storage: &'a StorageClient,
    bucket_id: String,
}

/// The fields of the upload response this client cares about
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default, alias = "Key")]
    key: Option<String>,
}

impl StorageClient {
    /// Create a new StorageClient
    pub(crate) fn new(url: &str, key: &str, client: Client) -> Self {
        Self {
            url: url.to_string(),
            key: key.to_string(),
            client,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/storage/v1{}", self.url, path)
    }

    /// Get a client for a specific bucket
    pub fn from(&self, bucket_id: &str) -> BucketClient {
        BucketClient {
            storage: self,
            bucket_id: bucket_id.to_string(),
        }
    }

    /// Get a client for the recipe images bucket
    pub fn recipe_images(&self) -> BucketClient {
        self.from(RECIPE_IMAGES_BUCKET)
    }
}

impl<'a> BucketClient<'a> {
    /// Upload an image and return its public URL
    ///
    /// The file is validated before any network call: the content type must
    /// be an image and the data must not exceed [`MAX_IMAGE_SIZE`]. The
    /// stored object name is generated, keeping only the original extension,
    /// so uploads never collide.
    pub async fn upload_image(
        &self,
        file_name: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<String, Error> {
        if !content_type.starts_with("image/") {
            return Err(Error::validation("Only image files are allowed"));
        }
        if data.len() > MAX_IMAGE_SIZE {
            return Err(Error::validation("Image size must be less than 5MB"));
        }

        let object_name = Self::generate_object_name(file_name);
        let url = self
            .storage
            .get_url(&format!("/object/{}/{}", self.bucket_id, object_name));

        let part = multipart::Part::bytes(data)
            .file_name(object_name.clone())
            .mime_str(content_type)
            .map_err(|e| Error::storage(format!("invalid content type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .storage
            .client
            .post(&url)
            .header("apikey", &self.storage.key)
            .header("X-Client-Info", CLIENT_INFO)
            .header("Cache-Control", "3600")
            .header("x-upsert", "false")
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "upload failed with status {}: {}",
                status, text
            )));
        }

        // The body echoes the stored key; the generated name is authoritative,
        // but an empty response still means the upload did not land.
        let body = response.json::<UploadResponse>().await?;
        if body.key.is_none() {
            return Err(Error::storage("upload failed - no key returned"));
        }

        Ok(self.public_url(&object_name))
    }

    /// The public URL for an object in this bucket
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.storage.url, self.bucket_id, path
        )
    }

    /// Delete an object by filename
    ///
    /// Accepts either a bare filename or a full public URL; blank input is a
    /// no-op.
    pub async fn remove(&self, path: &str) -> Result<(), Error> {
        let file_name = match path.trim().rsplit('/').next().filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => return Ok(()),
        };

        let url = self.storage.get_url(&format!("/object/{}", self.bucket_id));

        let body = serde_json::json!({ "prefixes": [file_name] });

        let response = Fetch::delete(&self.storage.client, &url)
            .apikey(&self.storage.key)
            .json(&body)?
            .execute_raw()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::storage(format!(
                "delete failed with status {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    fn generate_object_name(original: &str) -> String {
        let id = Uuid::new_v4();
        match original.rsplit('.').next().filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && *ext != original
        }) {
            Some(ext) => format!("{}.{}", id, ext.to_lowercase()),
            None => id.to_string(),
        }
    }
}
