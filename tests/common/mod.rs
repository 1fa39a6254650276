// SPDX-License-Identifier: MPL-2.0
//! In-process stand-in for the Dog CEO API and its image host.
//!
//! Routes (relative to the server origin):
//! - `api/breeds/list/all`: three breeds, one with sub-breeds
//! - `api/breed/hound/images/random/10`: ten image URLs on this server
//! - `api/breed/short/images/random/10`: four image URLs, one of them broken
//! - `api/breed/empty/images/random/10`: an empty list
//! - `api/breed/nope/images/random/10`: 404 with the API's error JSON
//! - `api/breed/boom/images/random/10`: 500 with an HTML body
//! - `api/breed/quiet/images/random/10`: 202 with an empty body
//! - `img/missing-*.png`: 404, `img/text-*.png`: 200 with non-image bytes,
//!   any other `img/*.png`: an 8x6 PNG served after a short delay
#![allow(dead_code)]

use reqwest::Url;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const IMAGE_WIDTH: u32 = 8;
pub const IMAGE_HEIGHT: u32 = 6;
const IMAGE_DELAY: Duration = Duration::from_millis(40);

#[derive(Debug, Default)]
pub struct ServerStats {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    image_requests: AtomicUsize,
}

impl ServerStats {
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn image_requests(&self) -> usize {
        self.image_requests.load(Ordering::SeqCst)
    }
}

pub struct FakeApi {
    pub origin: Url,
    pub stats: Arc<ServerStats>,
}

impl FakeApi {
    pub fn base_url(&self) -> Url {
        self.origin.join("api/").unwrap()
    }

    pub fn image_url(&self, name: &str) -> Url {
        self.origin.join(&format!("img/{name}")).unwrap()
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image_rs::RgbImage::from_pixel(width, height, image_rs::Rgb([90, 60, 30]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image_rs::ImageFormat::Png).unwrap();
    out.into_inner()
}

pub async fn start() -> FakeApi {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let origin = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
    let stats = Arc::new(ServerStats::default());

    let server_origin = origin.clone();
    let server_stats = Arc::clone(&stats);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(handle(stream, server_origin.clone(), Arc::clone(&server_stats)));
        }
    });

    FakeApi { origin, stats }
}

struct Response {
    status: u16,
    reason: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Response {
    fn json(status: u16, reason: &'static str, value: serde_json::Value) -> Self {
        Self {
            status,
            reason,
            content_type: "application/json",
            body: value.to_string().into_bytes(),
        }
    }

    fn not_found() -> Self {
        Self::json(
            404,
            "Not Found",
            serde_json::json!({
                "status": "error",
                "message": "Breed not found (master breed does not exist)",
                "code": 404
            }),
        )
    }
}

fn photo_list(origin: &Url, names: &[String]) -> Response {
    let urls: Vec<String> = names
        .iter()
        .map(|name| origin.join(&format!("img/{name}")).unwrap().to_string())
        .collect();
    Response::json(200, "OK", serde_json::json!({ "message": urls, "status": "success" }))
}

async fn route(path: &str, origin: &Url, stats: &ServerStats) -> Response {
    match path {
        "/api/breeds/list/all" => Response::json(
            200,
            "OK",
            serde_json::json!({
                "message": { "pug": [], "bulldog": ["french", "boston"], "akita": [] },
                "status": "success"
            }),
        ),
        "/api/breed/hound/images/random/10" => {
            let names: Vec<String> = (0..10).map(|i| format!("hound-{i}.png")).collect();
            photo_list(origin, &names)
        }
        "/api/breed/short/images/random/10" => {
            let names = ["short-0.png", "missing-1.png", "text-2.png", "short-3.png"]
                .map(String::from);
            photo_list(origin, &names)
        }
        "/api/breed/empty/images/random/10" => photo_list(origin, &[]),
        "/api/breed/boom/images/random/10" => Response {
            status: 500,
            reason: "Internal Server Error",
            content_type: "text/html",
            body: b"<html>oops</html>".to_vec(),
        },
        "/api/breed/quiet/images/random/10" => Response {
            status: 202,
            reason: "Accepted",
            content_type: "text/plain",
            body: Vec::new(),
        },
        p if p.starts_with("/img/") => image(&p["/img/".len()..], stats).await,
        _ => Response::not_found(),
    }
}

async fn image(name: &str, stats: &ServerStats) -> Response {
    stats.image_requests.fetch_add(1, Ordering::SeqCst);
    let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.max_in_flight.fetch_max(now, Ordering::SeqCst);
    tokio::time::sleep(IMAGE_DELAY).await;
    stats.in_flight.fetch_sub(1, Ordering::SeqCst);

    if name.starts_with("missing-") {
        Response::not_found()
    } else if name.starts_with("text-") {
        Response {
            status: 200,
            reason: "OK",
            content_type: "image/png",
            body: b"definitely not a png".to_vec(),
        }
    } else {
        Response {
            status: 200,
            reason: "OK",
            content_type: "image/png",
            body: png_bytes(IMAGE_WIDTH, IMAGE_HEIGHT),
        }
    }
}

async fn handle(mut stream: TcpStream, origin: Url, stats: Arc<ServerStats>) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&request);
    let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
    let response = route(&path, &origin, &stats).await;

    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.reason,
        response.content_type,
        response.body.len()
    );
    let _ = stream.write_all(header.as_bytes()).await;
    let _ = stream.write_all(&response.body).await;
    let _ = stream.shutdown().await;
}
