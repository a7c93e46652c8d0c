//! Mock question bank API for client and import tests.
//!
//! Wraps an `httpmock` server that answers the create-question endpoint.
//! Expectations match on a fragment of the request body, so each test
//! question should carry a distinct prompt.

use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::json;

use crate::bank::client::DEFAULT_CREATE_PATH;

pub struct MockBankServer {
    server: MockServer,
}

impl MockBankServer {
    /// Start a new mock server on a random available port.
    pub fn start() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    pub fn base_url(&self) -> String {
        self.server.base_url()
    }

    /// Respond `201 {"id": id}` to a create request mentioning `fragment`.
    pub fn expect_created(&self, fragment: &str, id: &str) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST)
                .path(DEFAULT_CREATE_PATH)
                .header("content-type", "application/json")
                .body_includes(fragment);
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": id, "status": "DRAFT" }));
        })
    }

    /// Respond with `status` and a JSON `message` body.
    pub fn expect_failure(&self, fragment: &str, status: u16, message: &str) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST)
                .path(DEFAULT_CREATE_PATH)
                .body_includes(fragment);
            then.status(status)
                .header("content-type", "application/json")
                .json_body(json!({ "message": message }));
        })
    }

    /// Respond `200` with an `error` field, which still counts as a failure.
    pub fn expect_error_field(&self, fragment: &str, message: &str) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST)
                .path(DEFAULT_CREATE_PATH)
                .body_includes(fragment);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "error": message }));
        })
    }

    /// Require a bearer token on every create request.
    pub fn expect_bearer(&self, token: &str, id: &str) -> Mock<'_> {
        self.server.mock(|when, then| {
            when.method(POST)
                .path(DEFAULT_CREATE_PATH)
                .header("authorization", format!("Bearer {token}"))
                .header_exists("x-request-id");
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "id": id }));
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aiken::parse_aiken;
    use crate::bank::{
        Difficulty, ImportTarget, NoopObserver, QuestionBankClient, import_questions,
    };
    use crate::test_utils::fixtures::TWO_VALID;

    #[test]
    fn server_starts_on_http() {
        let server = MockBankServer::start();
        assert!(server.base_url().starts_with("http://"));
    }

    #[test]
    fn bearer_token_and_request_id_sent() {
        let server = MockBankServer::start();
        let mock = server.expect_bearer("t0ken", "q-1");

        let client = QuestionBankClient::new(&server.base_url(), Some("t0ken"), 5).unwrap();
        let results = parse_aiken(TWO_VALID);
        let target = ImportTarget::new("folder", Difficulty::Easy, 1.0);
        let record = crate::bank::NewQuestion::from_aiken(&results.questions[0], &target);
        let created = client.create_question(&record).unwrap();

        assert_eq!(created.id.as_deref(), Some("q-1"));
        mock.assert();
    }

    #[test]
    fn import_against_mock_counts_failures() {
        let server = MockBankServer::start();
        let first = server.expect_created("What is 2+2?", "q-1");
        let second = server.expect_error_field("Capital of France?", "Folder is archived");

        let mut client = QuestionBankClient::new(&server.base_url(), None, 5).unwrap();
        let results = parse_aiken(TWO_VALID);
        let target = ImportTarget::new("folder", Difficulty::Easy, 1.0);
        let summary =
            import_questions(&mut client, &results.questions, &target, &mut NoopObserver)
                .unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created_ids, vec!["q-1"]);
        assert!(summary.failures[0].message.contains("Folder is archived"));
        first.assert();
        second.assert();
    }
}
