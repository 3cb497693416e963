//! End-to-end pipeline tests against a mock HTTP server.
//!
//! The headless fallback is disabled so no browser is needed.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};

use img_curate::error_handling::{DiscardKind, PageEvent};
use img_curate::{scrape_images, DiscardReason, FilterPolicy, PageSource, ScrapeContext};

use helpers::{mock_config, png_bytes};

fn serve_png(server: &Server, path: &'static str, width: u32, height: u32) {
    server.expect(
        Expectation::matching(request::method_path("GET", path))
            .times(1..)
            .respond_with(
                status_code(200)
                    .insert_header("Content-Type", "image/png")
                    .body(png_bytes(width, height)),
            ),
    );
}

#[tokio::test]
async fn test_scrape_validates_only_large_images() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/products/1")).respond_with(
            status_code(200).body(
                r#"<html><body>
                    <img src="/media/hero.png">
                    <img src="../media/detail.png">
                    <img src="/media/swatch.png">
                    <img src="/media/missing.png">
                    <img src="/media/not-an-image.png">
                    <img src="">
                </body></html>"#,
            ),
        ),
    );
    serve_png(&server, "/media/hero.png", 1200, 900);
    serve_png(&server, "/media/detail.png", 200, 200);
    serve_png(&server, "/media/swatch.png", 40, 40);
    server.expect(
        Expectation::matching(request::method_path("GET", "/media/missing.png"))
            .times(2)
            .respond_with(status_code(404)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/media/not-an-image.png"))
            .respond_with(status_code(200).body("<html>soft 404</html>")),
    );

    let ctx = ScrapeContext::from_config(&mock_config()).expect("Failed to build context");
    let report = scrape_images(&ctx, &server.url_str("/products/1")).await;

    assert_eq!(report.source, PageSource::Direct);
    assert_eq!(report.candidates, 5);
    let mut validated = report.validated_urls();
    validated.sort_unstable();
    assert_eq!(
        validated,
        vec![
            server.url_str("/media/detail.png").as_str(),
            server.url_str("/media/hero.png").as_str(),
        ]
    );

    assert_eq!(ctx.stats.get_discard_count(DiscardKind::TooSmall), 1);
    assert_eq!(ctx.stats.get_discard_count(DiscardKind::Unreachable), 1);
    assert_eq!(ctx.stats.get_discard_count(DiscardKind::Undecodable), 1);
    assert_eq!(ctx.stats.get_page_count(PageEvent::FetchedDirect), 1);

    let unreachable = report
        .discarded()
        .into_iter()
        .find(|(_, reason)| matches!(reason, DiscardReason::Unreachable { .. }))
        .map(|(_, reason)| reason.clone());
    match unreachable {
        Some(DiscardReason::Unreachable { attempts, last_error }) => {
            assert_eq!(attempts, 2);
            assert!(last_error.contains("404"));
        }
        other => panic!("expected one unreachable image, got {:?}", other),
    }
}

#[tokio::test]
async fn test_page_without_images_is_empty() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/products/2"))
            .respond_with(status_code(200).body("<html><p>Coming soon</p></html>")),
    );

    let ctx = ScrapeContext::from_config(&mock_config()).expect("Failed to build context");
    let report = scrape_images(&ctx, &server.url_str("/products/2")).await;

    assert_eq!(report.source, PageSource::Direct);
    assert!(report.outcomes.is_empty());
}

#[tokio::test]
async fn test_failed_page_without_renderer_is_unavailable() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/products/3"))
            .times(3)
            .respond_with(status_code(500)),
    );

    let ctx = ScrapeContext::from_config(&mock_config()).expect("Failed to build context");
    let report = scrape_images(&ctx, &server.url_str("/products/3")).await;

    assert!(!report.is_available());
    assert!(report.outcomes.is_empty());
    assert_eq!(ctx.stats.get_page_count(PageEvent::Unavailable), 1);
}

#[tokio::test]
async fn test_keyword_filter_skips_fetch() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/products/4")).respond_with(
            status_code(200)
                .body(r#"<img src="/img/brand-logo.png"><img src="/img/product.png">"#),
        ),
    );
    serve_png(&server, "/img/product.png", 600, 600);

    let mut config = mock_config();
    config.filters = FilterPolicy {
        exclude_keywords: true,
        enforce_formats: false,
    };
    let ctx = ScrapeContext::from_config(&config).expect("Failed to build context");
    let report = scrape_images(&ctx, &server.url_str("/products/4")).await;

    assert_eq!(
        report.validated_urls(),
        vec![server.url_str("/img/product.png").as_str()]
    );
    assert_eq!(ctx.stats.get_discard_count(DiscardKind::ExcludedKeyword), 1);
}
