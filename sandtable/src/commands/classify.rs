// sandtable/src/commands/classify.rs
//
// USE CASE: show how a failed HTTP call is presented to the user.

use serde_json::{Map, Value};

use sandtable_core::ErrorHandler;
use sandtable_core::ports::{HttpFailure, HttpResponse};

pub struct ClassifyArgs {
    pub status: Option<u16>,
    pub business_code: Option<i64>,
    pub body: Option<String>,
    pub endpoint: Option<String>,
    pub transport_code: Option<String>,
    pub message: Option<String>,
    pub not_sent: bool,
}

/// Rebuilds the client-side failure from the flags.
pub fn build_failure(args: &ClassifyArgs) -> anyhow::Result<HttpFailure> {
    let response = match args.status {
        Some(status) => {
            let mut data = match &args.body {
                Some(raw) => serde_json::from_str(raw)?,
                None => Value::Null,
            };
            if let Some(code) = args.business_code {
                if !data.is_object() {
                    data = Value::Object(Map::new());
                }
                if let Value::Object(map) = &mut data {
                    map.insert("businessCode".to_string(), Value::from(code));
                }
            }
            Some(HttpResponse::new(status, data))
        }
        None => None,
    };

    let message = match (&args.message, args.status) {
        (Some(message), _) => message.clone(),
        (None, Some(status)) => format!("Request failed with status code {}", status),
        (None, None) => "Request failed".to_string(),
    };

    Ok(HttpFailure {
        message,
        code: args.transport_code.clone(),
        request_sent: !args.not_sent,
        response,
    })
}

pub fn execute(handler: &ErrorHandler, args: ClassifyArgs) -> anyhow::Result<()> {
    let failure = build_failure(&args)?;
    let err = handler.process_error(failure, args.endpoint.as_deref(), None);
    handler.log_error(&err, args.endpoint.as_deref());

    println!("{}", serde_json::to_string_pretty(&err.to_json())?);

    let advice = if handler.should_retry(&err) {
        "🔁 Retry advised"
    } else {
        "⛔ Do not retry"
    };
    eprintln!("\n{}: {}", advice, err.user_message());
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args() -> ClassifyArgs {
        ClassifyArgs {
            status: None,
            business_code: None,
            body: None,
            endpoint: None,
            transport_code: None,
            message: None,
            not_sent: false,
        }
    }

    #[test]
    fn test_business_code_is_merged_into_body() {
        let failure = build_failure(&ClassifyArgs {
            status: Some(400),
            business_code: Some(1001),
            body: Some(r#"{"message":"dup"}"#.to_string()),
            ..args()
        })
        .unwrap();

        let response = failure.response.unwrap();
        assert_eq!(response.data, json!({ "message": "dup", "businessCode": 1001 }));
        assert_eq!(failure.message, "Request failed with status code 400");
    }

    #[test]
    fn test_no_status_means_no_response() {
        let failure = build_failure(&ClassifyArgs {
            transport_code: Some("ETIMEDOUT".to_string()),
            ..args()
        })
        .unwrap();
        assert!(failure.response.is_none());
        assert!(failure.request_sent);
    }

    #[test]
    fn test_invalid_body_is_rejected() {
        let res = build_failure(&ClassifyArgs {
            status: Some(500),
            body: Some("{oops".to_string()),
            ..args()
        });
        assert!(res.is_err());
    }
}
