//! Process-wide blocking HTTP agent plus size-capped body reading.
//!
//! Both REST and assist clients go through here so timeouts stay uniform
//! and no response can balloon memory.

use std::io::{self, Read};
use std::sync::OnceLock;
use std::time::Duration;

/// Shared agent; connections pool per host.
pub(crate) fn agent() -> &'static ureq::Agent {
    static AGENT: OnceLock<ureq::Agent> = OnceLock::new();
    AGENT.get_or_init(build_agent)
}

fn build_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(10))
        .timeout_read(Duration::from_secs(30))
        .timeout_write(Duration::from_secs(30))
        .build()
}

/// Read a response body into memory, failing once it passes `max_bytes`.
///
/// A declared Content-Length over the limit fails before any body bytes
/// are pulled; without one, reading stops at the first byte past the cap.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    if let Some(declared) = declared_length(&response) {
        if declared > max_bytes as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Declared length {declared} exceeds the {max_bytes} byte limit"),
            ));
        }
    }
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(max_bytes as u64 + 1)
        .read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response body exceeds the {max_bytes} byte limit"),
        ));
    }
    Ok(bytes)
}

fn declared_length(response: &ureq::Response) -> Option<u64> {
    response.header("Content-Length")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::net::TcpListener;
    use std::thread;

    fn one_shot_server(payload: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 2048];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(payload.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn rejects_declared_length_over_limit() {
        let url = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 4096\r\n\r\nstub".to_string(),
        );
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 64).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("Declared length"));
    }

    #[test]
    fn caps_bodies_missing_a_content_length() {
        let body = "x".repeat(48);
        let url = one_shot_server(format!("HTTP/1.0 200 OK\r\n\r\n{body}"));
        let response = agent().get(&url).call().unwrap();
        let err = read_response_bytes(response, 24).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn reads_small_bodies_intact() {
        let body = r#"{"id":"c1"}"#;
        let url = one_shot_server(format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        ));
        let response = agent().get(&url).call().unwrap();
        let bytes = read_response_bytes(response, 64).unwrap();
        assert_eq!(bytes, body.as_bytes());
    }
}
