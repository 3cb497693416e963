//! Curation session over a CSV sheet, scraping a mock server.

mod helpers;

use httptest::{matchers::*, responders::*, Expectation, Server};

use img_curate::{
    ColumnRange, CsvRowStore, CurationSession, Navigation, RowStore, RowView, ScrapeContext,
};

use helpers::{mock_config, png_bytes, sheet_file};

#[tokio::test]
async fn test_load_select_and_advance() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/p/widget"))
            .respond_with(status_code(200).body(r#"<img src="/a.png"><img src="/b.png">"#)),
    );
    for path in ["/a.png", "/b.png"] {
        server.expect(
            Expectation::matching(request::method_path("GET", path))
                .respond_with(status_code(200).body(png_bytes(300, 300))),
        );
    }

    let page = server.url_str("/p/widget");
    let file = sheet_file(&format!(
        "id,sku,brand,url,label\n1,W1,Acme,{page},Widget\n2,W2,Acme,,Gadget\n"
    ));
    let store = CsvRowStore::open(file.path()).expect("Failed to open sheet");
    let ctx = ScrapeContext::from_config(&mock_config()).expect("Failed to build context");
    let mut session = CurationSession::new();

    let view = session.load_row(&store, &ctx).await.expect("Row should load");
    let images = match view {
        RowView::Images { images, label, .. } => {
            assert_eq!(label.as_deref(), Some("Widget"));
            images
        }
        other => panic!("expected images, got {:?}", other),
    };
    assert_eq!(images.len(), 2);

    let mut sorted = images.clone();
    sorted.sort();
    let picks = vec![
        (sorted[0].clone(), "p1".to_string()),
        (sorted[1].clone(), "l3".to_string()),
    ];
    let next = session
        .apply_selection(&store, &picks, Navigation::Advance)
        .expect("Selection should save");
    assert_eq!(next, 3);

    let written = store
        .get(2, &ColumnRange::parse("F:O").expect("valid range"))
        .expect("Row should read back");
    assert_eq!(written[0], sorted[0]);
    assert_eq!(written[7], sorted[1]);

    // The next row has no link, so nothing is fetched
    let view = session.load_row(&store, &ctx).await.expect("Row should load");
    assert_eq!(view, RowView::NoLink { row: 3 });

    // Existing cells survive the rewrite
    let reopened = CsvRowStore::open(file.path()).expect("Failed to reopen sheet");
    assert_eq!(
        reopened.cell(2, &ColumnRange::parse("D").expect("valid range")).expect("read"),
        Some(page)
    );
}

#[test]
fn test_jump_from_no_link_row() {
    let file = sheet_file("h\n");
    let store = CsvRowStore::open(file.path()).expect("Failed to open sheet");
    let mut session = CurationSession::at(5);

    let next = session
        .apply_selection(&store, &[], Navigation::parse(Some("2")))
        .expect("Empty selection should save");
    assert_eq!(next, 2);

    session.jump_to(8);
    assert_eq!(session.current_row(), 8);
}
