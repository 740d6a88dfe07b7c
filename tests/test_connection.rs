use std::fs;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use webserver::HttpError;
use webserver::app::{self, MemoryUserStore, TemplateRenderer, User, UserStore};
use webserver::http::connection::{Connection, ConnectionState};
use webserver::router::{Router, StaticFiles};
use webserver::server::listener;

struct Site {
    _dir: TempDir,
    router: Arc<Router>,
}

fn site() -> Site {
    let dir = TempDir::new().unwrap();
    let static_root = dir.path().join("static");
    let template_root = dir.path().join("templates");
    fs::create_dir_all(static_root.join("css")).unwrap();
    fs::create_dir_all(template_root.join("user")).unwrap();
    fs::write(static_root.join("css/styles.css"), "h1{}").unwrap();
    fs::write(template_root.join("index.html"), "<h1>home</h1>").unwrap();
    fs::write(
        template_root.join("user/list.html"),
        "<ul>{{#each users}}<li>{{userId}}</li>{{/each}}</ul>",
    )
    .unwrap();

    let store = MemoryUserStore::new();
    store.add_user(User {
        user_id: "foo".into(),
        password: "bar".into(),
        name: "Foo".into(),
        email: "foo@example.com".into(),
    });

    let router = app::routes(
        StaticFiles::new(&static_root, &template_root, vec!["/css".into()]),
        Arc::new(store),
        Arc::new(TemplateRenderer::new(&template_root).unwrap()),
    );

    Site {
        _dir: dir,
        router: Arc::new(router),
    }
}

/// Sends `raw` over an in-memory pipe and returns whatever the server wrote
/// before closing, together with the worker's result.
async fn exchange(router: Arc<Router>, raw: &[u8]) -> (Vec<u8>, Result<(), HttpError>) {
    let (mut client, server) = tokio::io::duplex(16 * 1024);

    let worker = tokio::spawn(async move {
        let mut conn = Connection::new(server, router);
        let result = conn.run().await;
        assert!(matches!(conn.state(), ConnectionState::Closed));
        result
    });

    client.write_all(raw).await.unwrap();
    let mut received = Vec::new();
    client.read_to_end(&mut received).await.unwrap();

    (received, worker.await.unwrap())
}

#[tokio::test]
async fn test_serves_page_then_closes() {
    let site = site();

    let raw = b"GET /index.html HTTP/1.1\r\nHost: localhost\r\n\r\n";
    let (wire, result) = exchange(site.router, raw).await;

    result.unwrap();
    assert_eq!(
        wire,
        b"HTTP/1.1 200 OK\r\n\
Content-Type: text/html;charset=utf-8\r\n\
Content-Length: 13\r\n\
\r\n\
<h1>home</h1>"
    );
}

#[tokio::test]
async fn test_serves_stylesheet_with_css_type() {
    let site = site();

    let (wire, result) = exchange(site.router, b"GET /css/styles.css HTTP/1.1\r\n\r\n").await;

    result.unwrap();
    assert_eq!(
        wire,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/css\r\nContent-Length: 4\r\n\r\nh1{}"
    );
}

#[tokio::test]
async fn test_login_redirect_has_no_body() {
    let site = site();
    let raw = b"POST /user/login HTTP/1.1\r\n\
Content-Type: application/x-www-form-urlencoded\r\n\
Content-Length: 23\r\n\
\r\n\
userId=foo&password=bar";

    let (wire, result) = exchange(site.router, raw).await;

    result.unwrap();
    assert_eq!(
        wire,
        b"HTTP/1.1 302 Found\r\nLocation: /index.html\r\nSet-Cookie: logined=true; Path=/\r\n\r\n"
    );
}

#[tokio::test]
async fn test_user_list_requires_login_cookie() {
    let site = site();

    let (wire, _) = exchange(Arc::clone(&site.router), b"GET /user/list HTTP/1.1\r\n\r\n").await;
    assert_eq!(wire, b"HTTP/1.1 302 Found\r\nLocation: /user/login.html\r\n\r\n");

    let (wire, result) = exchange(
        site.router,
        b"GET /user/list HTTP/1.1\r\nCookie: logined=true\r\n\r\n",
    )
    .await;
    result.unwrap();
    assert!(wire.ends_with(b"\r\n\r\n<ul><li>foo</li></ul>"));
}

#[tokio::test]
async fn test_bad_request_line_closes_without_response() {
    let site = site();

    let (wire, result) = exchange(site.router, b"GARBAGE\r\n\r\n").await;

    assert!(wire.is_empty());
    assert!(matches!(result, Err(HttpError::BadRequestLine(_))));
}

#[tokio::test]
async fn test_missing_asset_closes_without_response() {
    let site = site();

    let (wire, result) = exchange(site.router, b"GET /css/nope.css HTTP/1.1\r\n\r\n").await;

    assert!(wire.is_empty());
    assert!(matches!(result, Err(HttpError::StaticAssetNotFound { .. })));
}

#[tokio::test]
async fn test_client_hangup_before_request_line() {
    let site = site();
    let (client, server) = tokio::io::duplex(1024);
    drop(client);

    let mut conn = Connection::new(server, site.router);
    let result = conn.run().await;

    assert!(matches!(result, Err(HttpError::MalformedStream(_))));
}

async fn round_trip(addr: std::net::SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    let mut received = Vec::new();
    // A refused request may surface as a reset rather than a clean EOF.
    let _ = stream.read_to_end(&mut received).await;
    received
}

#[tokio::test]
async fn test_malformed_connection_does_not_affect_others() {
    let site = site();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(listener::serve(listener, site.router));

    // A client that never finishes its headers holds one worker open.
    let mut stalled = TcpStream::connect(addr).await.unwrap();
    stalled.write_all(b"GET /index.html HTTP/1.1\r\n").await.unwrap();

    let (bad, good) = tokio::join!(
        round_trip(addr, b"NOT-A-REQUEST\r\n"),
        round_trip(addr, b"GET /index.html HTTP/1.1\r\n\r\n"),
    );

    assert!(bad.is_empty());
    assert!(good.starts_with(b"HTTP/1.1 200 OK\r\n"));
    assert!(good.ends_with(b"<h1>home</h1>"));

    // The server keeps accepting after the failure.
    let again = tokio::time::timeout(
        Duration::from_secs(5),
        round_trip(addr, b"GET /css/styles.css HTTP/1.1\r\n\r\n"),
    )
    .await
    .unwrap();
    assert!(again.ends_with(b"h1{}"));

    drop(stalled);
    server.abort();
}
