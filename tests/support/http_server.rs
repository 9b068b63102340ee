use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// One request as seen by the mock server, in arrival order.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
    /// Header names lowercased.
    pub headers: HashMap<String, String>,
}

#[derive(Clone)]
struct CannedResponse {
    status: u16,
    body: String,
}

#[derive(Default)]
struct Route {
    queue: Vec<CannedResponse>,
    last_served: Option<CannedResponse>,
}

#[derive(Default)]
struct ServerState {
    routes: HashMap<(String, String), Route>,
    requests: Vec<RecordedRequest>,
}

/// Scripted HTTP server for exercising the REST and assist clients.
///
/// Responses queue per method+path and are served in order; once a queue
/// drains, the last served response repeats. Unmatched routes get a 404.
/// Every response closes the connection so the client cannot reuse a
/// stale socket.
pub struct MockServer {
    pub base_url: String,
    state: Arc<Mutex<ServerState>>,
}

impl MockServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");
        let state = Arc::new(Mutex::new(ServerState::default()));
        let thread_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                handle_connection(stream, &thread_state);
            }
        });
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Queue a response for the given method and path.
    pub fn enqueue(&self, method: &str, path: &str, status: u16, body: &str) {
        let mut state = self.state.lock().expect("lock mock server state");
        state
            .routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .queue
            .push(CannedResponse {
                status,
                body: body.to_string(),
            });
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .lock()
            .expect("lock mock server state")
            .requests
            .clone()
    }

    /// Requests received for one method and path, in order.
    pub fn requests_for(&self, method: &str, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|req| req.method == method && req.path == path)
            .collect()
    }
}

fn handle_connection(stream: TcpStream, state: &Mutex<ServerState>) {
    let Some((request, mut stream)) = read_request(stream) else {
        return;
    };
    let response = {
        let mut state = state.lock().expect("lock mock server state");
        let key = (request.method.clone(), request.path.clone());
        let canned = match state.routes.get_mut(&key) {
            Some(route) if !route.queue.is_empty() => {
                let response = route.queue.remove(0);
                route.last_served = Some(response.clone());
                response
            }
            Some(route) => route.last_served.clone().unwrap_or_else(not_found),
            None => not_found(),
        };
        state.requests.push(request);
        canned
    };
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason(response.status),
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(payload.as_bytes());
}

fn not_found() -> CannedResponse {
    CannedResponse {
        status: 404,
        body: String::new(),
    }
}

fn read_request(stream: TcpStream) -> Option<(RecordedRequest, TcpStream)> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).ok()? == 0 {
        return None;
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = HashMap::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if name == "content-length" {
                content_length = value.parse().unwrap_or(0);
            }
            headers.insert(name, value);
        }
    }

    let mut body = vec![0u8; content_length];
    if content_length > 0 {
        reader.read_exact(&mut body).ok()?;
    }
    let body = String::from_utf8_lossy(&body).into_owned();
    Some((
        RecordedRequest {
            method,
            path,
            body,
            headers,
        },
        reader.into_inner(),
    ))
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Status",
    }
}
