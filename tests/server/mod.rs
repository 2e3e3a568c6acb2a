use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use std::time::Duration;

pub const PREVIEW_PAGE: &str = r#"<!doctype html>
<html>
<head>
<title>Fixture Page</title>
<meta property="og:title" content="Fixture Title" />
<meta property="og:description" content="A page with a complete preview" />
<meta property="og:image" content="https://cdn.example.com/og.png" />
<meta name="twitter:card" content="summary_large_image" />
<link rel="canonical" href="https://example.com/fixture" />
</head>
<body><h1>Fixture</h1></body>
</html>"#;

const BARE_PAGE: &str = r#"<!doctype html>
<html><head><title>Bare Page</title>
<meta property="og:image" content="/images/relative.png" />
</head><body></body></html>"#;

async fn preview_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .append_header(("Cache-Control", "public, max-age=600"))
        .append_header(("ETag", "\"fixture-v1\""))
        .append_header(("Server", "fixture"))
        .body(PREVIEW_PAGE)
}

async fn bare_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .append_header(("X-Robots-Tag", "noindex, nofollow"))
        .append_header(("Cache-Control", "no-store"))
        .body(BARE_PAGE)
}

/// `/hop/{n}` redirects with a relative Location until n reaches zero
async fn hop(path: web::Path<u32>) -> HttpResponse {
    let remaining = path.into_inner();
    if remaining == 0 {
        return preview_page().await;
    }
    HttpResponse::Found()
        .append_header(("Location", format!("/hop/{}", remaining - 1)))
        .finish()
}

async fn redirect_loop() -> HttpResponse {
    HttpResponse::MovedPermanently()
        .append_header(("Location", "/loop"))
        .append_header(("Cache-Control", "max-age=60"))
        .finish()
}

async fn absolute_redirect(req: HttpRequest) -> HttpResponse {
    let location = format!("http://{}/ok", req.connection_info().host());
    HttpResponse::PermanentRedirect()
        .append_header(("Location", location))
        .finish()
}

async fn nested_relative_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .append_header(("Location", "target"))
        .finish()
}

async fn nested_target() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body("<html><head><title>Nested Target</title></head></html>")
}

/// A redirect status without Location: treated as terminal
async fn redirect_without_location() -> HttpResponse {
    HttpResponse::Found()
        .content_type("text/html")
        .body(r#"<html><head><meta property="og:title" content="Stuck Redirect" /></head></html>"#)
}

async fn json_document() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"og:title": "not html"}"#)
}

async fn missing_page() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html")
        .body("<html><head><title>Not Found</title></head></html>")
}

/// Reflects the crawler User-Agent into the og:title
async fn echo_user_agent(req: HttpRequest) -> HttpResponse {
    let agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .replace('"', "&quot;");
    let range = req
        .headers()
        .get("range")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string();
    HttpResponse::Ok()
        .content_type("text/html")
        .body(format!(
            r#"<html><head><meta property="og:title" content="{}" /><meta name="twitter:description" content="{}" /></head></html>"#,
            agent, range
        ))
}

async fn slow_page() -> HttpResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    preview_page().await
}

pub async fn get_test_server_url() -> String {
    let http_server = HttpServer::new(|| {
        App::new()
            .route("/ok", web::get().to(preview_page))
            .route("/bare", web::get().to(bare_page))
            .route("/hop/{n}", web::get().to(hop))
            .route("/loop", web::get().to(redirect_loop))
            .route("/absolute", web::get().to(absolute_redirect))
            .route("/nested/start", web::get().to(nested_relative_redirect))
            .route("/nested/target", web::get().to(nested_target))
            .route("/no-location", web::get().to(redirect_without_location))
            .route("/data.json", web::get().to(json_document))
            .route("/missing", web::get().to(missing_page))
            .route("/echo", web::get().to(echo_user_agent))
            .route("/slow", web::get().to(slow_page))
    })
    .workers(2)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind test server");

    let addr = http_server
        .addrs()
        .first()
        .cloned()
        .expect("No address bound");
    let url = format!("http://{}", addr);

    let app_server = http_server.run();

    tokio::spawn(async move {
        if let Err(e) = app_server.await {
            eprintln!("Test server error: {}", e);
        }
    });

    url
}

/// Returns a URL on a port with nothing listening
#[allow(dead_code)]
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Probe port has no address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}
