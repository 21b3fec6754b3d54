//! Shared utilities for prober integration tests.

#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use net_connectivity::config::{ProberConfig, ServerConfig};

/// A stub beacon listening on an ephemeral port.
pub struct StubServer {
    pub addr: SocketAddr,
    /// Request lines received, in arrival order.
    pub requests: mpsc::Receiver<String>,
}

impl StubServer {
    pub fn url(&self) -> String {
        format!("http://{}/probe", self.addr)
    }
}

/// Start a stub that answers every request with `status_line` and `headers`.
pub fn start_stub(status_line: &'static str, headers: &'static [(&'static str, &'static str)]) -> StubServer {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            let tx = tx.clone();
            thread::spawn(move || {
                if let Some(request_line) = read_request_head(&stream) {
                    let _ = tx.send(request_line);
                }
                let mut response = format!("HTTP/1.1 {}\r\n", status_line);
                for (name, value) in headers {
                    response.push_str(&format!("{}: {}\r\n", name, value));
                }
                response.push_str("Content-Length: 0\r\nConnection: close\r\n\r\n");
                let mut stream = stream;
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            });
        }
    });

    StubServer { addr, requests: rx }
}

/// Start a stub that accepts connections and never answers.
pub fn start_silent_stub() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            let Ok(stream) = stream else { break };
            held.push(stream);
        }
    });

    addr
}

/// An address nothing is listening on.
pub fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn read_request_head(stream: &TcpStream) -> Option<String> {
    stream.set_read_timeout(Some(Duration::from_secs(5))).ok()?;
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;

    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) if line == "\r\n" || line == "\n" => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }
    Some(request_line.trim_end().to_string())
}

/// Config probing the given `(name, url)` beacons with short timeouts.
pub fn config_for(servers: &[(&str, String)]) -> ProberConfig {
    let mut config = ProberConfig::default();
    config.timeouts.connect_ms = 1_000;
    config.timeouts.request_ms = 2_000;
    config.servers = servers
        .iter()
        .map(|(name, url)| ServerConfig {
            name: name.to_string(),
            url: url.clone(),
        })
        .collect();
    config
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "net_connectivity=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
