//! Development server that renders pages on request.
//!
//! | Route                | Response                                  |
//! |----------------------|-------------------------------------------|
//! | `/`                  | Index page                                |
//! | `/posts/<slug>/`     | Post page (`/posts/<slug>` redirects)     |
//! | `/posts/<file>`      | File next to the posts (images, ...)      |
//! | `/assets/<name>`     | Embedded scrollspy script or stylesheet   |
//!
//! Content is re-read on every page request, so edits show up on reload.

mod lifecycle;
mod response;
mod route;

use crate::{
    config::{SiteConfig, cfg},
    content::Collection,
    core::{is_shutdown, register_shutdown},
    debug,
    embed::SiteAssets,
    log,
    render::{render_index_page, render_post_page},
};
use anyhow::{Context, Result};
use crossbeam::channel;
use route::{Route, post_location, resolve_file};
use std::sync::Arc;
use tiny_http::{Method, Request};

/// Worker threads for request handling.
const REQUEST_THREADS: usize = 4;

/// Shared by every request handler.
struct ServeState {
    config: Arc<SiteConfig>,
    assets: SiteAssets,
}

/// Bind the server and handle requests until Ctrl+C.
pub fn serve_site() -> Result<()> {
    let config = cfg();
    let posts = Collection::load(&config.build.content, config.build.skip_drafts)?;
    log!("serve"; "{} posts in {}", posts.len(), config.root_relative(&config.build.content).display());

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::bounded::<()>(1);
    register_shutdown(shutdown_tx);
    let watcher = lifecycle::spawn_shutdown_watcher(Arc::clone(&server), shutdown_rx);

    log!("serve"; "http://{}", addr);

    let state = Arc::new(ServeState {
        assets: SiteAssets::from_config(&config),
        config,
    });
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(REQUEST_THREADS)
        .build()
        .context("Failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let state = Arc::clone(&state);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &state) {
                log!("serve"; "request error: {e:#}");
            }
        });
    }

    // Dropping the pool waits for in-flight requests
    drop(pool);
    watcher.join().ok();
    log!("serve"; "stopped");
    Ok(())
}

/// Handle a single HTTP request.
fn handle_request(request: Request, state: &ServeState) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    debug!("serve"; "{} {}", request.method(), request.url());
    let config = &state.config;

    match Route::parse(request.url()) {
        Route::Index => match Collection::load(&config.build.content, config.build.skip_drafts) {
            Ok(posts) => {
                let html = render_index_page(&posts, config, &state.assets);
                response::respond_html(request, 200, html)
            }
            Err(e) => response::respond_error(request, &e.into()),
        },
        Route::Asset(name) => match state.assets.get(&name) {
            Some(asset) => response::respond_asset(request, asset),
            None => response::respond_not_found(request, &format!("no asset `{name}`")),
        },
        Route::Posts {
            rest,
            trailing_slash,
        } => serve_posts_route(request, state, &rest, trailing_slash),
        Route::NotFound(path) => response::respond_not_found(request, &format!("no page at `/{path}`")),
    }
}

/// `/posts/<rest>`: a post page, or a file colocated with the posts.
fn serve_posts_route(
    request: Request,
    state: &ServeState,
    rest: &str,
    trailing_slash: bool,
) -> Result<()> {
    let config = &state.config;

    if let Some(path) = resolve_file(rest, &config.build.content) {
        return response::respond_file(request, &path);
    }

    let posts = match Collection::load(&config.build.content, config.build.skip_drafts) {
        Ok(posts) => posts,
        Err(e) => return response::respond_error(request, &e.into()),
    };

    match posts.resolve(rest) {
        Ok(_) if !trailing_slash => {
            response::respond_redirect(request, &post_location(rest))
        }
        Ok(post) => {
            let html = render_post_page(post, config, &state.assets);
            response::respond_html(request, 200, html)
        }
        Err(e) if e.is_not_found() => response::respond_not_found(request, &e.to_string()),
        Err(e) => response::respond_error(request, &e.into()),
    }
}
