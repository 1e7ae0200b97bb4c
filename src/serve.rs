use std::{
    fs, io,
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use axum::{
    extract::State,
    handler::Handler,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use minijinja::{context, Environment};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// default port for `serve`
pub const DEFAULT_PORT: u16 = 8000;

/// characters left as is in the links of a directory listing
const LINK: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const LISTING: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Directory listing for {{ path }}</title>
</head>
<body>
<h1>Directory listing for {{ path }}</h1>
<hr>
<ul>
{%- for entry in entries %}
<li><a href="{{ entry.link }}">{{ entry.name }}</a></li>
{%- endfor %}
</ul>
<hr>
</body>
</html>
"#;

#[derive(Debug, Serialize)]
struct Entry {
    name: String,
    link: String,
}

/// a router that serves the files under `root`
///
/// directories without an `index.html` get a generated listing of their contents
pub fn router<T: AsRef<Path>>(root: T) -> Router {
    let root = root.as_ref().to_path_buf();
    let listing = list_dir.with_state(root.clone());
    Router::new()
        .fallback_service(ServeDir::new(root).fallback(listing))
        .layer(TraceLayer::new_for_http())
}

/// serve the current directory on `port` on all interfaces until the process is stopped
pub async fn serve(port: u16) -> io::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(addr).await?;
    println!("serving at port {port}");
    serve_listener(listener, ".").await
}

/// serve the files under `root` on an already bound listener
pub async fn serve_listener<T: AsRef<Path>>(listener: TcpListener, root: T) -> io::Result<()> {
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(root)).await
}

async fn list_dir(State(root): State<PathBuf>, uri: Uri) -> Response {
    let Some((dir, path)) = resolve_dir(&root, uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match render_listing(&dir, &path) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::warn!("Failed to list {dir:?}: {err}");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// the directory under `root` a request path points to, along with the decoded path
fn resolve_dir(root: &Path, uri_path: &str) -> Option<(PathBuf, String)> {
    let path = percent_decode_str(uri_path).decode_utf8().ok()?.into_owned();
    let mut dir = root.to_path_buf();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            segment if segment.contains('\\') => return None,
            segment => dir.push(segment),
        }
    }
    dir.is_dir().then_some((dir, path))
}

fn render_listing(dir: &Path, path: &str) -> anyhow::Result<String> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let mut name = entry.file_name().to_string_lossy().into_owned();
        let mut link = utf8_percent_encode(&name, LINK).to_string();
        if entry.path().is_dir() {
            name.push('/');
            link.push('/');
        }
        entries.push(Entry { name, link });
    }
    entries.sort_by_key(|entry| entry.name.to_lowercase());

    let mut env = Environment::new();
    env.add_template("listing.html", LISTING)?;
    let html = env
        .get_template("listing.html")?
        .render(context! { path => path, entries => entries })?;
    Ok(html)
}
