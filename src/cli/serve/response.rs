//! HTTP response helpers.

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::embed::RenderedAsset;
use crate::utils::html::escape;
use crate::utils::mime::{self, types::{HTML, PLAIN}};

/// Respond with rendered HTML.
pub fn respond_html(request: Request, status: u16, body: String) -> Result<()> {
    send_body(request, status, HTML, body.into_bytes())
}

/// Respond with an embedded asset from memory.
pub fn respond_asset(request: Request, asset: &RenderedAsset) -> Result<()> {
    send_body(request, 200, asset.kind.mime(), asset.content.clone().into_bytes())
}

/// Respond with a file from the content directory.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);
    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }
    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Permanent redirect, e.g. `/posts/a` → `/posts/a/`.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let header = Header::from_bytes("Location", location.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid redirect location `{location}`"))?;
    request.respond(Response::empty(StatusCode(308)).with_header(header))?;
    Ok(())
}

pub fn respond_not_found(request: Request, message: &str) -> Result<()> {
    let body = format!(
        "<!doctype html>\n<title>404 Not Found</title>\n<h1>404 Not Found</h1>\n<p>{}</p>\n",
        escape(message)
    );
    send_body(request, 404, HTML, body.into_bytes())
}

/// Respond with rendering error (500).
pub fn respond_error(request: Request, error: &anyhow::Error) -> Result<()> {
    let body = format!(
        "<!doctype html>\n<title>Error</title>\n<h1>Render error</h1>\n<pre>{}</pre>\n",
        escape(&format!("{error:#}"))
    );
    send_body(request, 500, HTML, body.into_bytes())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN))
        .with_header(make_header("Allow", "GET, HEAD"));
    request.respond(response)?;
    Ok(())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

/// Send `body`, or only the headers for a HEAD request.
fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, content_type);
    }
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type))
        .with_header(make_header("Cache-Control", "no-cache"));
    request.respond(response)?;
    Ok(())
}

/// Header from static ASCII strings.
fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
