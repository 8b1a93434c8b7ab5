//! Face segmentation endpoints

use reqwest::multipart::{Form, Part};

use crate::error::Result;
use crate::{FACE_SEGMENTATION_PREFIX, FaceCloudClient, MeanColour};

/// Name of the multipart part carrying the image
const FILE_FIELD: &str = "file";

impl FaceCloudClient {
    // =============================================================================
    // Face Segmentation
    // =============================================================================

    /// Greeting of the face segmentation sub-application
    pub async fn face_segmentation_root(&self) -> Result<String> {
        let url = self.face_url("/");
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }

    /// Mean skin colour of an image
    ///
    /// # Arguments
    /// * `file_name` - Name reported for the upload
    /// * `bytes` - PNG or JPEG contents
    pub async fn mean_colour(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<MeanColour> {
        let url = self.face_url("/get_mean_colour/");
        let response = self
            .client
            .post(&url)
            .multipart(file_form(file_name, bytes))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Segmented image (PNG) with everything but skin blacked out
    pub async fn segmented_image(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let url = self.face_url("/get_segmented_image/");
        let response = self
            .client
            .post(&url)
            .multipart(file_form(file_name, bytes))
            .send()
            .await?;

        self.handle_bytes_response(response).await
    }

    fn face_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, FACE_SEGMENTATION_PREFIX, path)
    }
}

fn file_form(file_name: impl Into<String>, bytes: Vec<u8>) -> Form {
    Form::new().part(FILE_FIELD, Part::bytes(bytes).file_name(file_name.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_urls() {
        let client = FaceCloudClient::new("http://api.example.com/");
        assert_eq!(
            client.face_url("/get_mean_colour/"),
            "http://api.example.com/face_segmentation/get_mean_colour/"
        );
        assert_eq!(client.face_url("/"), "http://api.example.com/face_segmentation/");
    }
}
