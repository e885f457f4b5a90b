//! Classification of LFSWorld replies.
//!
//! # Design
//! LFSWorld answers HTTP 200 for most failures (a bad identity key, an
//! unknown racer) and only the payload tells them apart: a usable reply is
//! JSON, a failed one is empty or a short plain-text message. A `Response`
//! is therefore only a success when it has a status below 400 *and* a
//! parsed JSON payload.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DataError;
use crate::http::HttpResponse;

/// Status reported when there was no HTTP result at all.
pub const NO_STATUS: i32 = -1;

/// Status assumed when the transport did not report one.
const UNSPECIFIED_STATUS: i32 = 500;

/// Outcome of a request that reached the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: i32,
    raw: Option<String>,
    data: Option<Value>,
    error: bool,
}

impl Response {
    /// Classifies a raw transport result. `None` means the transport never
    /// produced an HTTP response.
    pub fn from_raw(raw: Option<&HttpResponse>) -> Self {
        let Some(raw) = raw else {
            return Self {
                status: NO_STATUS,
                raw: None,
                data: None,
                error: true,
            };
        };

        let status = match raw.status {
            0 => UNSPECIFIED_STATUS,
            status => i32::from(status),
        };

        let mut error = false;
        let mut data = None;
        let mut body = None;
        if !raw.body.is_empty() {
            match serde_json::from_str::<Value>(&raw.body) {
                Ok(Value::Null) => {}
                Ok(value) => data = Some(value),
                Err(_) => error = true,
            }
            body = Some(raw.body.clone());
        }

        if data.is_none() {
            error = true;
        }

        Self {
            status,
            raw: body,
            data,
            error,
        }
    }

    /// HTTP status, or `NO_STATUS` if there was no HTTP result. LFSWorld
    /// reports 200 for most failures, so use `is_error` instead.
    pub fn status(&self) -> i32 {
        self.status
    }

    /// The unparsed body, if it was non-empty.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// The parsed JSON payload.
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn is_error(&self) -> bool {
        self.error || self.status >= 400 || self.data.is_none()
    }

    pub fn is_success(&self) -> bool {
        !self.is_error()
    }

    /// Decodes the payload into `T`.
    ///
    /// # Errors
    ///
    /// `DataError::Missing` if there is no payload, `DataError::Decode` if it
    /// does not fit `T`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T, DataError> {
        let data = self.data.as_ref().ok_or(DataError::Missing)?;
        Ok(T::deserialize(data)?)
    }

    /// Lines of the raw body. The highlights feed is newline-delimited HTML
    /// rather than JSON, so it is only reachable this way.
    pub fn raw_lines(&self) -> impl Iterator<Item = &str> {
        self.raw
            .as_deref()
            .unwrap_or_default()
            .lines()
            .filter(|line| !line.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn json_body_is_success() {
        let res = Response::from_raw(Some(&HttpResponse::new(200, r#"{"ok":true}"#)));
        assert!(res.is_success());
        assert!(!res.is_error());
        assert_eq!(res.status(), 200);
        assert_eq!(res.data(), Some(&json!({"ok": true})));
        assert_eq!(res.raw(), Some(r#"{"ok":true}"#));
    }

    #[test]
    fn empty_body_is_error_despite_200() {
        let res = Response::from_raw(Some(&HttpResponse::new(200, "")));
        assert!(res.is_error());
        assert_eq!(res.data(), None);
        assert_eq!(res.raw(), None);
        assert_eq!(res.status(), 200);
    }

    #[test]
    fn plain_text_body_is_error_but_kept_raw() {
        let res = Response::from_raw(Some(&HttpResponse::new(200, "Identification is required")));
        assert!(res.is_error());
        assert_eq!(res.raw(), Some("Identification is required"));
        assert_eq!(res.data(), None);
    }

    #[test]
    fn client_error_status_is_error_even_with_json() {
        let res = Response::from_raw(Some(&HttpResponse::new(403, r#"{"ok":true}"#)));
        assert!(res.is_error());
        assert_eq!(res.data(), Some(&json!({"ok": true})));
    }

    #[test]
    fn json_null_counts_as_no_data() {
        let res = Response::from_raw(Some(&HttpResponse::new(200, "null")));
        assert!(res.is_error());
        assert_eq!(res.data(), None);
    }

    #[test]
    fn missing_result_has_sentinel_status() {
        let res = Response::from_raw(None);
        assert!(res.is_error());
        assert_eq!(res.status(), NO_STATUS);
        assert_eq!(res.raw(), None);
        assert_eq!(res.data(), None);
    }

    #[test]
    fn zero_status_is_treated_as_500() {
        let res = Response::from_raw(Some(&HttpResponse::new(0, "[]")));
        assert_eq!(res.status(), 500);
        assert!(res.is_error());
    }

    #[test]
    fn data_as_decodes_typed_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Counter {
            laps: u64,
        }
        let res = Response::from_raw(Some(&HttpResponse::new(200, r#"{"laps":1024}"#)));
        assert_eq!(res.data_as::<Counter>().unwrap(), Counter { laps: 1024 });
        assert!(matches!(res.data_as::<Vec<u8>>(), Err(DataError::Decode(_))));

        let empty = Response::from_raw(Some(&HttpResponse::new(200, "")));
        assert!(matches!(empty.data_as::<Counter>(), Err(DataError::Missing)));
    }

    #[test]
    fn raw_lines_skips_blank_lines() {
        let res = Response::from_raw(Some(&HttpResponse::new(200, "<b>a</b>\n\n<b>b</b>\n")));
        assert_eq!(res.raw_lines().collect::<Vec<_>>(), vec!["<b>a</b>", "<b>b</b>"]);
    }
}
