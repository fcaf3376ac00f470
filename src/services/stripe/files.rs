use reqwest::multipart::{Form, Part};
use reqwest::Body;
use secrecy::ExposeSecret;

use super::StripeClient;
use crate::error::StripeError;
use crate::models::StripeFile;

/// A Stripe file object tagged with the caller's document type.
#[derive(Debug)]
pub struct UploadedFile {
    pub file: StripeFile,
    /// Application-side tag, e.g. `id_front`; not sent to Stripe.
    pub file_type: String,
}

impl StripeClient {
    /// Stream the body of a caller-supplied URL into Stripe's file upload
    /// endpoint.
    pub async fn upload_file_from_url(
        &self,
        url: &str,
        purpose: &str,
        file_type: &str,
    ) -> Result<UploadedFile, StripeError> {
        let source = self.http.get(url).send().await?;
        let part = Part::stream(Body::wrap_stream(source.bytes_stream()))
            .file_name("file")
            .mime_str("application/octet-stream")?;
        let form = Form::new()
            .text("purpose", purpose.to_string())
            .part("file", part);

        let request = self
            .http
            .post(format!("{}/files", self.config.files_base_url))
            .bearer_auth(self.config.secret_key().expose_secret())
            .multipart(form);
        let file: StripeFile = self.dispatch(request).await?;

        tracing::info!(file_id = %file.id, purpose = %purpose, "file uploaded");
        Ok(UploadedFile {
            file,
            file_type: file_type.to_string(),
        })
    }
}
