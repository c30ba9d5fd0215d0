//! In-process HTTP server for exercising the WebDriver and article API clients.

use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::thread;
use tiny_http::{Header, Response, Server, StatusCode};

/// One request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Fake HTTP server answering every request with `handler`.
///
/// The handler returns a status code and a JSON payload; a `Value::String`
/// payload is sent verbatim instead of as a JSON string literal.
///
/// Requests are recorded before the response is sent, so a client that got
/// its answer always finds its request in [`FakeServer::requests`].
pub struct FakeServer {
    port: u16,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&Recorded) -> (u16, Value) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let log = Arc::new(Mutex::new(Vec::new()));

        let thread_log = Arc::clone(&log);
        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).ok();
                let recorded = Recorded {
                    method: request.method().to_string().to_uppercase(),
                    url: request.url().to_string(),
                    body,
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.as_str().as_str().to_string(), h.value.to_string()))
                        .collect(),
                };

                let (status, payload) = handler(&recorded);
                thread_log.lock().unwrap().push(recorded);

                // A JSON string payload is sent as a raw text body.
                let text = match payload {
                    Value::String(raw) => raw,
                    other => other.to_string(),
                };
                let response = Response::from_string(text)
                    .with_status_code(StatusCode(status))
                    .with_header(
                        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                            .unwrap(),
                    );
                request.respond(response).ok();
            }
        });

        Self { port, log }
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }
}
