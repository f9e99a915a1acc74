//! Credential prober tests against in-process strategies and a loopback stub

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hackersim::bruteforce::{AuthMethod, CredentialProber, Credentials};
use hackersim::SimConfig;
use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Strategy with a canned answer that records every call
struct Scripted {
    name: &'static str,
    accept: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl AuthMethod for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    async fn attempt(&self, _client: &Client, _url: &str, credentials: &Credentials) -> reqwest::Result<bool> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, credentials.password));
        Ok(self.accept)
    }
}

fn scripted(script: &[(&'static str, bool)], calls: &Arc<Mutex<Vec<String>>>) -> Vec<Box<dyn AuthMethod>> {
    script
        .iter()
        .map(|&(name, accept)| {
            Box::new(Scripted {
                name,
                accept,
                calls: Arc::clone(calls),
            }) as Box<dyn AuthMethod>
        })
        .collect()
}

/// Serve `connections` requests, answering each with `status` and `body`
async fn serve(status: &'static str, body: &'static str, connections: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for _ in 0..connections {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/login", addr)
}

/// Consume headers plus any declared body so the client sees a clean exchange
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut data = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let Ok(n) = socket.read(&mut buf).await else { return };
        if n == 0 {
            return;
        }
        data.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&data).to_string();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|line| {
                    let (key, value) = line.split_once(':')?;
                    key.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                return;
            }
        }
    }
}

#[tokio::test]
async fn test_first_success_short_circuits() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let prober = CredentialProber::new(&SimConfig::default(), false)
        .unwrap()
        .with_methods(scripted(&[("one", false), ("two", true), ("three", true)], &calls));

    assert!(prober.try_login("http://target.local", "admin", "letmein").await);
    assert_eq!(*calls.lock().unwrap(), vec!["one:letmein", "two:letmein"]);
}

#[tokio::test]
async fn test_all_rejections_is_false() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let prober = CredentialProber::new(&SimConfig::default(), false)
        .unwrap()
        .with_methods(scripted(&[("one", false), ("two", false)], &calls));

    assert!(!prober.try_login("http://target.local", "root", "toor").await);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stealth_pauses_before_trial() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let config = SimConfig::default().with_stealth_login_delay(1.0, 1.5);
    let prober = CredentialProber::new(&config, true)
        .unwrap()
        .with_methods(scripted(&[("only", false)], &calls));

    let start = tokio::time::Instant::now();
    assert!(!prober.try_login("http://target.local", "admin", "admin").await);
    let waited = start.elapsed().as_secs_f64();
    assert!((1.0..=1.6).contains(&waited), "waited {}", waited);
}

#[tokio::test]
async fn test_basic_auth_accepted_on_ok() {
    let url = serve("200 OK", "", 1).await;
    let prober = CredentialProber::new(&SimConfig::default().with_http_timeout(2000), false).unwrap();

    assert!(prober.try_login(&url, "admin", "hunter2").await);
}

#[tokio::test]
async fn test_form_auth_recognises_logged_in_page() {
    // Basic auth sees a 403 but the form strategy reads the dashboard body
    let url = serve("403 Forbidden", "<h1>Welcome back, admin</h1><a href=\"/logout\">", 3).await;
    let prober = CredentialProber::new(&SimConfig::default().with_http_timeout(2000), false).unwrap();

    assert!(prober.try_login(&url, "admin", "hunter2").await);
}

#[tokio::test]
async fn test_rejecting_server() {
    let url = serve("401 Unauthorized", "{\"success\": false}", 3).await;
    let prober = CredentialProber::new(&SimConfig::default().with_http_timeout(2000), false).unwrap();

    assert!(!prober.try_login(&url, "admin", "wrong").await);
}
