//! Stateless HTTP request builder and response parser for the record API.
//!
//! # Design
//! `RecordClient` holds only the base URL. Each operation is split into a
//! `build_*` method producing an `HttpRequest` and a `parse_*` method
//! consuming an `HttpResponse`; the host performs the round-trip in between.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Confirmation, ErrorBody, PetRecord, RecordForm};

pub const RECORDS_PATH: &str = "/api/records/petRecords";

/// Bytes escaped when an id is placed in the URL as one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct RecordClient {
    base_url: String,
}

impl RecordClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{RECORDS_PATH}", self.base_url)
    }

    fn record_url(&self, id: &str) -> String {
        let id = utf8_percent_encode(id, PATH_SEGMENT);
        format!("{}{RECORDS_PATH}/{id}", self.base_url)
    }

    pub fn build_list_records(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get_record(&self, id: &str) -> HttpRequest {
        bodyless(HttpMethod::Get, self.record_url(id))
    }

    pub fn build_create_record(&self, form: &RecordForm) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.collection_url(), form)
    }

    pub fn build_update_record(&self, id: &str, form: &RecordForm) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, self.record_url(id), form)
    }

    pub fn build_delete_record(&self, id: &str) -> HttpRequest {
        bodyless(HttpMethod::Delete, self.record_url(id))
    }

    pub fn parse_list_records(&self, response: HttpResponse) -> Result<Vec<PetRecord>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    /// `Ok(None)` when the server answers `200 null` for an unknown id.
    pub fn parse_get_record(&self, response: HttpResponse) -> Result<Option<PetRecord>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_record(&self, response: HttpResponse) -> Result<Confirmation, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_record(&self, response: HttpResponse) -> Result<Confirmation, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_delete_record(&self, response: HttpResponse) -> Result<Confirmation, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }
}

fn bodyless(method: HttpMethod, path: String) -> HttpRequest {
    HttpRequest {
        method,
        path,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json(method: HttpMethod, path: String, form: &RecordForm) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(form).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(body) => Err(ApiError::Server {
            status: response.status,
            message: body.message,
            error: body.error,
        }),
        Err(_) => Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "00000000-0000-0000-0000-000000000001";

    fn client() -> RecordClient {
        RecordClient::new("http://localhost:3000")
    }

    fn rex() -> RecordForm {
        RecordForm {
            pet_name: "Rex".to_string(),
            owner_name: "Alice".to_string(),
            pet_breed: "Lab".to_string(),
            pet_age: "3".to_string(),
            special_notes: "none".to_string(),
        }
    }

    #[test]
    fn ids_are_escaped_as_one_path_segment() {
        let c = client();
        for (id, segment) in [
            ("a/b", "a%2Fb"),
            ("x?y", "x%3Fy"),
            ("#", "%23"),
            ("a b", "a%20b"),
            ("50%", "50%25"),
            (ID, ID),
        ] {
            let expected = format!("http://localhost:3000/api/records/petRecords/{segment}");
            assert_eq!(c.build_get_record(id).path, expected, "get {id:?}");
            assert_eq!(c.build_delete_record(id).path, expected, "delete {id:?}");
            assert_eq!(c.build_update_record(id, &rex()).unwrap().path, expected, "update {id:?}");
        }
    }

    #[test]
    fn build_list_records_produces_correct_request() {
        let req = client().build_list_records();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/records/petRecords");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_record_appends_id() {
        let req = client().build_get_record(ID);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            format!("http://localhost:3000/api/records/petRecords/{ID}")
        );
    }

    #[test]
    fn build_create_record_sends_all_fields() {
        let req = client().build_create_record(&rex()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["petName"], "Rex");
        assert_eq!(body["petAge"], "3");
        assert_eq!(body["specialNotes"], "none");
    }

    #[test]
    fn build_update_record_keeps_empty_fields() {
        let form = RecordForm {
            pet_breed: String::new(),
            ..rex()
        };
        let req = client().build_update_record(ID, &form).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["petBreed"], "");
    }

    #[test]
    fn build_delete_record_has_no_body() {
        let req = client().build_delete_record(ID);
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_get_record_null_is_none() {
        let got = client()
            .parse_get_record(HttpResponse::new(200, "null"))
            .unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn parse_get_record_404_is_not_found() {
        let err = client()
            .parse_get_record(HttpResponse::new(404, r#"{"message":"Failed to fetch pet record"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_record_server_error_keeps_message() {
        let err = client()
            .parse_create_record(HttpResponse::new(
                500,
                r#"{"message":"Failed to add pet record","error":"PetRecord validation failed: petName"}"#,
            ))
            .unwrap_err();
        match err {
            ApiError::Server { status, message, error } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to add pet record");
                assert_eq!(error.as_deref(), Some("PetRecord validation failed: petName"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_create_record_plain_error_body() {
        let err = client()
            .parse_create_record(HttpResponse::new(502, "bad gateway"))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 502, .. }));
    }

    #[test]
    fn parse_delete_record_success() {
        let confirmation = client()
            .parse_delete_record(HttpResponse::new(
                200,
                r#"{"message":"Pet record deleted successfully"}"#,
            ))
            .unwrap();
        assert_eq!(confirmation.message, "Pet record deleted successfully");
    }

    #[test]
    fn parse_list_records_bad_json() {
        let err = client()
            .parse_list_records(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RecordClient::new("http://localhost:3000/");
        let req = client.build_list_records();
        assert_eq!(req.path, "http://localhost:3000/api/records/petRecords");
    }
}
