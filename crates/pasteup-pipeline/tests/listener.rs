mod helpers;

use std::sync::Arc;
use std::time::Duration;

use futures::stream;
use helpers::*;
use http::Method;
use pasteup_pipeline::{
    DiscoveredSurface, EditableSurface, MemoryClipboardItem, PasteEvent, PasteListener,
    PipelineState, ValueField,
};
use tokio::sync::mpsc;
use tokio::time::timeout;

fn discovered(field: &Arc<ValueField>) -> (DiscoveredSurface, mpsc::Sender<PasteEvent>) {
    let (tx, rx) = mpsc::channel(8);
    (DiscoveredSurface::new(field.clone(), rx), tx)
}

#[tokio::test]
async fn test_attaches_once_per_surface() {
    let h = graph_harness(graph_config());
    let listener = PasteListener::new(h.pipeline.clone());

    let a = Arc::new(ValueField::new("a", ""));
    let b = Arc::new(ValueField::new("b", ""));
    let (da, _ta) = discovered(&a);
    let (da_again, _ta_again) = discovered(&a);
    let (db, _tb) = discovered(&b);

    let attached = listener.run(stream::iter(vec![da, da_again, db])).await;
    assert_eq!(attached, 2);
    assert_eq!(listener.attached_count(), 2);

    // a fresh discovery stream only attaches unseen surfaces
    let c = Arc::new(ValueField::new("c", ""));
    let (db_again, _tb_again) = discovered(&b);
    let (dc, _tc) = discovered(&c);
    let attached = listener.run(stream::iter(vec![db_again, dc])).await;
    assert_eq!(attached, 1);
    assert_eq!(listener.attached_count(), 3);
}

#[tokio::test]
async fn test_image_paste_on_discovered_surface_inserts_url() {
    let h = graph_harness(graph_config());
    h.http
        .on(Method::GET, PROBE_PICTURES, 200, "{}")
        .on_prefix(Method::PUT, UPLOAD_PREFIX, 201, drive_item("abc", "https://x/y.png"));

    let (reports_tx, mut reports) = mpsc::unbounded_channel();
    let listener = PasteListener::new(h.pipeline.clone()).with_reports(reports_tx);

    let field = Arc::new(ValueField::new("comment", "see "));
    let (surface, pastes) = discovered(&field);
    listener.run(stream::iter(vec![surface])).await;

    pastes
        .send(PasteEvent::single(MemoryClipboardItem::text("ignored")))
        .await
        .unwrap();
    pastes.send(png_paste()).await.unwrap();

    let report = timeout(Duration::from_secs(5), reports.recv())
        .await
        .expect("pipeline did not finish")
        .expect("report channel closed");

    assert_eq!(report.state(), PipelineState::Done);
    assert_eq!(field.text(), "see https://x/y.png");
    assert_eq!(h.http.count_method(Method::PUT), 1);

    // the text paste produced no run
    assert!(timeout(Duration::from_millis(100), reports.recv())
        .await
        .is_err());
}

#[tokio::test]
async fn test_failed_paste_does_not_stop_listener() {
    let h = graph_harness(graph_config());
    h.http
        .on(Method::GET, PROBE_PICTURES, 200, "{}")
        .on_prefix(Method::PUT, UPLOAD_PREFIX, 500, "boom")
        .on_prefix(Method::PUT, UPLOAD_PREFIX, 201, drive_item("abc", "https://x/y.png"));

    let (reports_tx, mut reports) = mpsc::unbounded_channel();
    let listener = PasteListener::new(h.pipeline.clone()).with_reports(reports_tx);

    let field = Arc::new(ValueField::new("comment", ""));
    let (surface, pastes) = discovered(&field);
    listener.run(stream::iter(vec![surface])).await;

    pastes.send(png_paste()).await.unwrap();
    let first = timeout(Duration::from_secs(5), reports.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(!first.is_success());

    pastes.send(png_paste()).await.unwrap();
    let second = timeout(Duration::from_secs(5), reports.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(second.is_success());
    assert_eq!(field.text(), "https://x/y.png");
}

async fn wait_until_detached(listener: &PasteListener) {
    timeout(Duration::from_secs(5), async {
        while listener.attached_count() > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("surface was never detached");
}

#[tokio::test]
async fn test_surface_reattaches_after_channel_closes() {
    let h = graph_harness(graph_config());
    h.http
        .on(Method::GET, PROBE_PICTURES, 200, "{}")
        .on_prefix(Method::PUT, UPLOAD_PREFIX, 201, drive_item("abc", "https://x/y.png"));

    let (reports_tx, mut reports) = mpsc::unbounded_channel();
    let listener = PasteListener::new(h.pipeline.clone()).with_reports(reports_tx);

    let field = Arc::new(ValueField::new("comment", ""));
    let (surface, pastes) = discovered(&field);
    assert_eq!(listener.run(stream::iter(vec![surface])).await, 1);

    drop(pastes);
    wait_until_detached(&listener).await;

    let (surface, pastes) = discovered(&field);
    assert_eq!(listener.run(stream::iter(vec![surface])).await, 1);
    assert_eq!(listener.attached_count(), 1);

    pastes.send(png_paste()).await.unwrap();
    let report = timeout(Duration::from_secs(5), reports.recv())
        .await
        .expect("pipeline did not finish")
        .expect("report channel closed");

    assert!(report.is_success());
    assert_eq!(field.text(), "https://x/y.png");
}

#[tokio::test]
async fn test_host_sees_default_prevented_only_for_images() {
    let h = graph_harness(graph_config());
    h.http
        .on(Method::GET, PROBE_PICTURES, 200, "{}")
        .on_prefix(Method::PUT, UPLOAD_PREFIX, 201, drive_item("abc", "https://x/y.png"));

    let (reports_tx, mut reports) = mpsc::unbounded_channel();
    let listener = PasteListener::new(h.pipeline.clone()).with_reports(reports_tx);

    let field = Arc::new(ValueField::new("comment", ""));
    let (surface, pastes) = discovered(&field);
    listener.run(stream::iter(vec![surface])).await;

    let text = PasteEvent::single(MemoryClipboardItem::text("plain"));
    let image = png_paste();
    pastes.send(text.clone()).await.unwrap();
    pastes.send(image.clone()).await.unwrap();

    // events are handled in order, so the text paste is done once the image run reports
    timeout(Duration::from_secs(5), reports.recv())
        .await
        .expect("pipeline did not finish")
        .expect("report channel closed");

    assert!(image.is_default_prevented());
    assert!(!text.is_default_prevented());
}
