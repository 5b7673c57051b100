//! Local stand-in for the Plaato API, built on tiny_http.
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tiny_http::{Header, Response, Server, StatusCode};

use super::query::API_KEY_HEADER;

const WAIT_FOR_REQUEST: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub struct RecordedRequest {
    pub url: String,
    pub api_key: Option<String>,
}

/// Answers requests with the canned `(status, body)` pairs in order and stops
/// after the last one, or once no request shows up for a while.
pub struct MockApi {
    pub base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl MockApi {
    pub fn serve(responses: Vec<(u16, &'static str)>) -> MockApi {
        let server = Server::http("127.0.0.1:0").expect("mock server binds to a free port");
        let address = server
            .server_addr()
            .to_ip()
            .expect("mock server listens on tcp");

        let handle = thread::spawn(move || {
            let mut recorded = Vec::new();
            for (status, body) in responses {
                let request = match server.recv_timeout(WAIT_FOR_REQUEST) {
                    Ok(Some(request)) => request,
                    _ => break,
                };
                recorded.push(RecordedRequest {
                    url: request.url().to_string(),
                    api_key: request
                        .headers()
                        .iter()
                        .find(|header| header.field.equiv(API_KEY_HEADER))
                        .map(|header| header.value.as_str().to_string()),
                });
                let content_type = Header::from_bytes("Content-Type", "application/json")
                    .expect("That we didn't put any garbage in the headers");
                let response = Response::from_string(body)
                    .with_status_code(StatusCode(status))
                    .with_header(content_type);
                request.respond(response).expect("mock response is written");
            }
            recorded
        });

        MockApi {
            base_url: format!("http://{address}/"),
            handle,
        }
    }

    /// Waits for the server thread and returns every request it saw.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("mock server thread does not panic")
    }
}

/// Base url nothing can ever answer on: port 0 is never assigned to a
/// listener, so connecting fails right away.
pub fn closed_port_url() -> String {
    "http://127.0.0.1:0/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_url_is_not_a_mock_server() {
        let api = MockApi::serve(Vec::new());
        assert_ne!(api.base_url, closed_port_url());
        assert!(api.finish().is_empty());

        let error = reqwest::blocking::get(closed_port_url()).unwrap_err();
        assert!(error.is_connect() || error.is_request(), "{error}");
    }
}
