use serde::Deserialize;

/// Pulls a readable message out of an error body, falling back to the raw text.
pub(crate) fn extract_api_error(body: &str) -> String {
    #[derive(Debug, Deserialize)]
    struct ErrorEnvelope {
        error: Option<ErrorDetail>,
    }

    // xAI and OpenAI send an object; some compatible servers send a bare string.
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum ErrorDetail {
        Object {
            message: Option<String>,
            #[serde(rename = "type")]
            kind: Option<String>,
            code: Option<serde_json::Value>,
        },
        Text(String),
    }

    let Ok(ErrorEnvelope { error: Some(detail) }) = serde_json::from_str::<ErrorEnvelope>(body)
    else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            "empty response body".to_string()
        } else {
            trimmed.to_string()
        };
    };

    match detail {
        ErrorDetail::Text(message) => message,
        ErrorDetail::Object {
            message,
            kind,
            code,
        } => {
            let message = message.unwrap_or_else(|| "unknown error".to_string());
            let mut extras = Vec::new();
            if let Some(kind) = kind {
                extras.push(format!("type={kind}"));
            }
            match code {
                Some(serde_json::Value::String(code)) => extras.push(format!("code={code}")),
                Some(serde_json::Value::Number(code)) => extras.push(format!("code={code}")),
                _ => {}
            }
            if extras.is_empty() {
                message
            } else {
                format!("{message} ({})", extras.join(", "))
            }
        }
    }
}
