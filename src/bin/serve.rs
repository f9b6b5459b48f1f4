//! Static asset server for the visualizer's web exports: maps request
//! paths straight onto a directory tree, with a health check and a
//! diagnostics page listing the expected assets.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Serve a directory of visualizer assets over HTTP")]
struct Args {
    /// Directory tree to serve.
    #[arg(long, default_value = "public")]
    root: PathBuf,

    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, default_value_t = 3000)]
    port: u16,
}

/// Assets the diagnostics page checks for, relative to the root.
const EXPECTED_ASSETS: &[&str] = &["index.html", "main.js", "style.css", "vendor/orbitcontrols.js"];

struct Response {
    status: u16,
    reason: &'static str,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Response {
    fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type,
            body,
        }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            reason: "Not Found",
            content_type: "text/plain; charset=utf-8",
            body: b"not found".to_vec(),
        }
    }

    fn method_not_allowed() -> Self {
        Self {
            status: 405,
            reason: "Method Not Allowed",
            content_type: "text/plain; charset=utf-8",
            body: b"method not allowed".to_vec(),
        }
    }
}

/// Some hosts misreport `.js` as text/plain, which breaks ES modules;
/// always hand scripts out as application/javascript.
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "application/javascript; charset=utf-8",
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("wasm") => "application/wasm",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Request path → relative file path. Rejects traversal; `/` maps to the
/// index page.
fn sanitize_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Some(PathBuf::from("index.html"));
    }
    let mut out = PathBuf::new();
    for segment in trimmed.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return None;
        }
        out.push(segment);
    }
    Some(out)
}

fn diag_page(root: &Path) -> String {
    let rows: String = EXPECTED_ASSETS
        .iter()
        .map(|name| {
            let path = root.join(name);
            let ok = path.exists();
            format!(
                "<tr><td>{name}</td><td>{}</td><td><code>{}</code></td></tr>",
                if ok { "yes" } else { "MISSING" },
                path.display()
            )
        })
        .collect();

    format!(
        "<!doctype html>\n<meta charset=\"utf-8\"/>\n<title>diag</title>\n\
         <h1>Diagnostics</h1>\n<p>root: <code>{}</code></p>\n\
         <table><thead><tr><th>File</th><th>Exists</th><th>Path</th></tr></thead>\
         <tbody>{rows}</tbody></table>\n",
        root.display()
    )
}

fn respond(root: &Path, method: &str, target: &str) -> Response {
    if method != "GET" && method != "HEAD" {
        return Response::method_not_allowed();
    }
    let path = target.split('?').next().unwrap_or(target);

    if path == "/healthz" {
        return Response::ok("text/plain; charset=utf-8", b"ok".to_vec());
    }
    if path == "/diag" {
        return Response::ok("text/html; charset=utf-8", diag_page(root).into_bytes());
    }

    let Some(relative) = sanitize_path(path) else {
        return Response::not_found();
    };
    let full = root.join(&relative);
    if !full.is_file() {
        return Response::not_found();
    }
    match fs::read(&full) {
        Ok(body) => Response::ok(content_type_for(&full), body),
        Err(e) => {
            log::warn!("failed to read {}: {e}", full.display());
            Response::not_found()
        }
    }
}

fn handle_client(stream: TcpStream, root: &Path) -> anyhow::Result<()> {
    let peer = stream.peer_addr().ok();
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .context("reading request line")?;
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Ok(());
    };

    // Drain headers; nothing in them changes the response.
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).context("reading header")? == 0 || line.trim().is_empty() {
            break;
        }
    }

    let response = respond(root, method, target);
    log::info!(
        "{} {} -> {} ({:?})",
        method,
        target,
        response.status,
        peer
    );

    let mut stream = reader.into_inner();
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        response.reason,
        response.content_type,
        response.body.len()
    )
    .context("writing response head")?;
    if method != "HEAD" {
        stream.write_all(&response.body).context("writing body")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr).context("binding asset server socket")?;
    log::info!("listening on http://{addr}");
    log::info!("serving {}", args.root.display());

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(s) => s,
            Err(e) => {
                log::warn!("accept failed: {e}");
                continue;
            }
        };
        let root = args.root.clone();
        thread::Builder::new()
            .name("asset_conn".to_string())
            .spawn(move || {
                if let Err(e) = handle_client(stream, &root) {
                    log::warn!("connection error: {e:#}");
                }
            })
            .context("spawning connection thread")?;
    }
    Ok(())
}
