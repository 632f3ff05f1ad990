//! Image upload (owner menu photos).

use serde::Deserialize;
use tracing::instrument;

use crate::gateway::{ApiGateway, ApiResult};
use crate::storage::KvStore;

/// Response of `POST images/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedImage {
    /// Public URL of the stored image.
    pub url: String,
}

/// Image endpoint group.
pub struct ImageApi<S: KvStore> {
    gateway: ApiGateway<S>,
}

impl<S: KvStore> Clone for ImageApi<S> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}

impl<S: KvStore> ImageApi<S> {
    /// Create the group.
    pub const fn new(gateway: ApiGateway<S>) -> Self {
        Self { gateway }
    }

    /// `POST images/upload` - multipart upload, returns the hosted URL.
    #[instrument(skip(self, bytes), fields(file_name = %file_name, size = bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<UploadedImage> {
        let part = match reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
        {
            Ok(part) => part,
            Err(e) => return ApiResult::NetworkError(format!("invalid mime type: {e}")),
        };
        let form = reqwest::multipart::Form::new().part("file", part);

        self.gateway.post_multipart("images/upload", form).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uploaded_image_shape() {
        let image: UploadedImage =
            serde_json::from_str(r#"{"url": "https://cdn.maejang.com/menu/1.jpg"}"#)
                .expect("deserialize");
        assert_eq!(image.url, "https://cdn.maejang.com/menu/1.jpg");
    }
}
