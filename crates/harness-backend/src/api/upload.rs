use super::errors::ApiError;
use reqwest::header;
use url::Url;

/// the media types accepted by the pre-signed upload urls
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AssetKind {
    Jpeg,
    Heic,
    Png,
    Gif,
    Mp4,
}

impl AssetKind {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Heic => "image/heic",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Mp4 => "video/mp4",
        }
    }
}

/// uploads media to a pre-signed url returned by the backend
///
/// the url carries its own authorization, no credentials are attached
pub async fn upload(url: &Url, bytes: Vec<u8>, kind: AssetKind) -> Result<(), ApiError> {
    tracing::debug!(%kind, size = bytes.len(), "uploading media");

    let response = reqwest::Client::new()
        .put(url.clone())
        .header(header::CONTENT_TYPE, kind.content_type())
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(bytes)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Upload {
            status: response.status(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[rstest]
    #[case(AssetKind::Jpeg, "image/jpeg")]
    #[case(AssetKind::Heic, "image/heic")]
    #[case(AssetKind::Mp4, "video/mp4")]
    #[tokio::test]
    async fn uploads_with_the_asset_content_type(#[case] kind: AssetKind, #[case] content_type: &str) {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/uploads/post-1"))
            .and(header("content-type", content_type))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/uploads/post-1?X-Amz-Signature=abc", server.uri())).unwrap();

        upload(&url, vec![0xFF, 0xD8, 0xFF], kind).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_uploads_report_the_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/expired", server.uri())).unwrap();
        let error = upload(&url, Vec::new(), AssetKind::Png).await.unwrap_err();

        assert!(matches!(error, ApiError::Upload { status } if status.as_u16() == 403));
    }
}
