use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;

const FORM_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("Failed to read form: {0}")]
    Malformed(String),
}

impl FormError {
    pub fn status(&self) -> StatusCode {
        match self {
            FormError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            FormError::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Reads every non-blank value of `field` from a urlencoded or multipart
/// body, in submission order.
pub async fn read_form_values(request: Request, field: &str) -> Result<Vec<String>, FormError> {
    let mime = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();

    match mime.as_str() {
        "application/x-www-form-urlencoded" => {
            let body = axum::body::to_bytes(request.into_body(), FORM_BODY_LIMIT)
                .await
                .map_err(|e| FormError::Malformed(e.to_string()))?;
            Ok(form_values(&body, field))
        }
        "multipart/form-data" => {
            let multipart = Multipart::from_request(request, &())
                .await
                .map_err(|e| FormError::Malformed(e.to_string()))?;
            multipart_values(multipart, field).await
        }
        "" => Err(FormError::UnsupportedContentType("missing".to_string())),
        other => Err(FormError::UnsupportedContentType(other.to_string())),
    }
}

fn form_values(body: &[u8], field: &str) -> Vec<String> {
    url::form_urlencoded::parse(body)
        .filter(|(key, _)| key == field)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

async fn multipart_values(mut multipart: Multipart, field: &str) -> Result<Vec<String>, FormError> {
    let mut values = Vec::new();

    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Malformed(e.to_string()))?
    {
        if part.name() != Some(field) {
            continue;
        }
        let value = part
            .text()
            .await
            .map_err(|e| FormError::Malformed(e.to_string()))?;
        let value = value.trim();
        if !value.is_empty() {
            values.push(value.to_string());
        }
    }

    Ok(values)
}
