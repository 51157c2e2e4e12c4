//! Integration tests for pagination, cache invalidation, and per-item
//! error isolation.

use async_trait::async_trait;
use canopy_tree::{
    NodeBuilder, NodeError, NodeKind, PageCursor, ResourcePage, ResourceSource, SourceError,
    TreeLoader, TreeNode,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One raw item, as a remote listing would return it.
#[derive(Debug, Clone)]
struct RawApp {
    /// Identifier present on every raw item, valid or not.
    raw_id: String,
    name: Option<String>,
    /// Label derivable even when `name` is missing.
    fallback_label: Option<String>,
    /// Delay before construction completes, to exercise concurrency.
    build_delay_ms: u64,
}

impl RawApp {
    fn good(name: &str) -> Self {
        Self {
            raw_id: name.to_string(),
            name: Some(name.to_string()),
            fallback_label: None,
            build_delay_ms: 0,
        }
    }

    fn broken_with_label(label: &str) -> Self {
        Self {
            raw_id: label.to_string(),
            name: None,
            fallback_label: Some(label.to_string()),
            build_delay_ms: 0,
        }
    }

    fn broken_unlabelable(raw_id: &str) -> Self {
        Self {
            raw_id: raw_id.to_string(),
            name: None,
            fallback_label: None,
            build_delay_ms: 0,
        }
    }

    fn delayed(name: &str, delay_ms: u64) -> Self {
        Self {
            raw_id: name.to_string(),
            name: Some(name.to_string()),
            fallback_label: None,
            build_delay_ms: delay_ms,
        }
    }

    fn with_delay(mut self, delay_ms: u64) -> Self {
        self.build_delay_ms = delay_ms;
        self
    }
}

struct AppBuilder;

#[async_trait]
impl NodeBuilder<RawApp> for AppBuilder {
    async fn build(&self, item: &RawApp) -> Result<TreeNode, NodeError> {
        if item.build_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(item.build_delay_ms)).await;
        }
        let name = item
            .name
            .clone()
            .ok_or_else(|| NodeError::Construction(format!("item {} has no name", item.raw_id)))?;
        Ok(TreeNode::new(format!("apps/{name}"), name, "canopy.app"))
    }

    fn label_on_error(&self, item: &RawApp) -> Option<String> {
        item.fallback_label.clone()
    }
}

/// Source serving canned pages and recording the cursors it was handed.
struct RecordingSource {
    pages: Vec<ResourcePage<RawApp>>,
    seen_cursors: Arc<Mutex<Vec<Option<String>>>>,
}

impl RecordingSource {
    fn new(pages: Vec<ResourcePage<RawApp>>) -> (Self, Arc<Mutex<Vec<Option<String>>>>) {
        let seen_cursors = Arc::new(Mutex::new(Vec::new()));
        (Self { pages, seen_cursors: Arc::clone(&seen_cursors) }, seen_cursors)
    }
}

#[async_trait]
impl ResourceSource for RecordingSource {
    type Item = RawApp;

    async fn fetch_page(
        &self,
        cursor: Option<&PageCursor>,
    ) -> Result<ResourcePage<RawApp>, SourceError> {
        self.seen_cursors
            .lock()
            .expect("cursor lock poisoned")
            .push(cursor.map(|c| c.as_str().to_string()));
        let index = match cursor {
            None => 0,
            Some(c) => c
                .as_str()
                .parse::<usize>()
                .map_err(|_| SourceError::InvalidCursor(c.to_string()))?,
        };
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| SourceError::InvalidCursor(index.to_string()))
    }
}

fn single_page(items: Vec<RawApp>) -> RecordingSource {
    RecordingSource::new(vec![ResourcePage::last(items)]).0
}

#[tokio::test]
async fn test_cursor_is_echoed_back_to_the_source() {
    let (source, seen) = RecordingSource::new(vec![
        ResourcePage::with_next(vec![RawApp::good("a")], PageCursor::new("1")),
        ResourcePage::with_next(vec![RawApp::good("b")], PageCursor::new("2")),
        ResourcePage::last(vec![RawApp::good("c")]),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    loader.load_more(false).await.unwrap();
    loader.load_more(false).await.unwrap();
    loader.load_more(false).await.unwrap();
    assert!(!loader.has_more());

    let cursors = seen.lock().expect("cursor lock poisoned").clone();
    assert_eq!(cursors, vec![None, Some("1".to_string()), Some("2".to_string())]);
}

#[tokio::test]
async fn test_has_more_tracks_cursor_presence_exactly() {
    let (source, _) = RecordingSource::new(vec![
        ResourcePage::with_next(vec![RawApp::good("a")], PageCursor::new("1")),
        ResourcePage::last(vec![RawApp::good("b")]),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    // Before any fetch there is no cursor.
    assert!(!loader.has_more());

    loader.load_more(false).await.unwrap();
    assert!(loader.has_more());

    loader.load_more(false).await.unwrap();
    assert!(!loader.has_more());
}

#[tokio::test]
async fn test_clear_cache_discards_cursor_and_fetches_page_one() {
    let (source, seen) = RecordingSource::new(vec![
        ResourcePage::with_next(vec![RawApp::good("a")], PageCursor::new("1")),
        ResourcePage::last(vec![RawApp::good("b")]),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    loader.load_more(false).await.unwrap();
    assert!(loader.has_more());

    // Mid-pagination forced refresh goes back to page one.
    let nodes = loader.load_more(true).await.unwrap();
    assert_eq!(nodes[0].label, "a");
    assert!(loader.has_more());

    let cursors = seen.lock().expect("cursor lock poisoned").clone();
    assert_eq!(cursors, vec![None, None]);
}

#[tokio::test]
async fn test_exhausted_loader_returns_empty_without_fetching() {
    let (source, seen) = RecordingSource::new(vec![ResourcePage::last(vec![RawApp::good("a")])]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    loader.load_more(false).await.unwrap();
    assert!(!loader.has_more());

    let again = loader.load_more(false).await.unwrap();
    assert!(again.is_empty());
    assert!(!loader.has_more());

    // The no-op did not touch the remote.
    assert_eq!(seen.lock().expect("cursor lock poisoned").len(), 1);
}

#[tokio::test]
async fn test_labelled_failure_yields_placeholder_at_original_position() {
    let source = single_page(vec![
        RawApp::good("one"),
        RawApp::good("two"),
        RawApp::broken_with_label("three-broken"),
        RawApp::good("four"),
        RawApp::good("five"),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    let nodes = loader.load_more(false).await.unwrap();
    assert_eq!(nodes.len(), 5);

    let labels: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["one", "two", "three-broken", "four", "five"]);

    assert_eq!(nodes[2].kind, NodeKind::Invalid);
    assert!(nodes[2].error.as_deref().unwrap_or("").contains("has no name"));
    for (index, node) in nodes.iter().enumerate() {
        if index != 2 {
            assert_eq!(node.kind, NodeKind::Resource);
        }
    }
}

#[tokio::test]
async fn test_unlabelable_failures_collapse_to_one_trailing_summary() {
    let source = single_page(vec![
        RawApp::good("one"),
        RawApp::broken_unlabelable("item-2"),
        RawApp::good("three"),
        RawApp::broken_unlabelable("item-4"),
        RawApp::good("five"),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    let nodes = loader.load_more(false).await.unwrap();

    // Items 2 and 4 are dropped; exactly one trailing summary remains.
    assert_eq!(nodes.len(), 4);
    let labels: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["one", "three", "five", "Some items could not be displayed"]
    );

    let summaries: Vec<&TreeNode> =
        nodes.iter().filter(|n| n.kind == NodeKind::ErrorSummary).collect();
    assert_eq!(summaries.len(), 1);

    // Last unlabelable error wins; earlier ones are discarded.
    let error = nodes[3].error.as_deref().unwrap_or("");
    assert!(error.contains("item-4"));
    assert!(!error.contains("item-2"));
}

#[tokio::test]
async fn test_summary_uses_page_order_not_completion_order() {
    // The earlier failure finishes last; page order still decides which
    // error the summary carries.
    let source = single_page(vec![
        RawApp::broken_unlabelable("early-slow").with_delay(30),
        RawApp::good("middle"),
        RawApp::broken_unlabelable("late-fast"),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    let nodes = loader.load_more(false).await.unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1].kind, NodeKind::ErrorSummary);

    let error = nodes[1].error.as_deref().unwrap_or("");
    assert!(error.contains("late-fast"));
    assert!(!error.contains("early-slow"));
}

#[tokio::test]
async fn test_concurrent_construction_preserves_page_order() {
    let source = single_page(vec![
        RawApp::delayed("slow", 30),
        RawApp::delayed("medium", 10),
        RawApp::delayed("fast", 0),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    let nodes = loader.load_more(false).await.unwrap();
    let labels: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["slow", "medium", "fast"]);
}

#[tokio::test]
async fn test_mixed_labelled_and_unlabelable_failures() {
    let source = single_page(vec![
        RawApp::broken_with_label("shown-broken"),
        RawApp::broken_unlabelable("hidden"),
        RawApp::good("ok"),
    ]);
    let mut loader = TreeLoader::new(source, AppBuilder);

    let nodes = loader.load_more(false).await.unwrap();
    let labels: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["shown-broken", "ok", "Some items could not be displayed"]
    );
    assert_eq!(nodes[0].kind, NodeKind::Invalid);
    assert_eq!(nodes[2].kind, NodeKind::ErrorSummary);
}
