//! End-to-end crawl scenarios over an in-memory site

use doccrawl::config::{Config, OutputConfig};
use doccrawl::crawler::{Coordinator, FetchFailure, FetchResult, PageFetcher};
use doccrawl::output::{CrawlSummary, Termination};
use doccrawl::url::{dedup_key, Scope};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::path::Path;
use tempfile::TempDir;

const ROOT: &str = "https://example.test/doc/";

/// Serves a fixed set of pages and records every requested URL
#[derive(Default)]
struct FakeSite {
    pages: HashMap<String, FetchResult>,
    requests: RefCell<Vec<String>>,
}

impl FakeSite {
    fn html(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchResult::Success {
                final_url: url.to_string(),
                status_code: 200,
                content_type: "text/html; charset=utf-8".to_string(),
                body: body.to_string(),
            },
        );
        self
    }

    fn file(mut self, url: &str, content_type: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchResult::Success {
                final_url: url.to_string(),
                status_code: 200,
                content_type: content_type.to_string(),
                body: body.to_string(),
            },
        );
        self
    }

    fn redirect(mut self, url: &str, target: &str, body: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchResult::Success {
                final_url: target.to_string(),
                status_code: 200,
                content_type: "text/html".to_string(),
                body: body.to_string(),
            },
        );
        self
    }
}

impl PageFetcher for &FakeSite {
    fn fetch(&self, url: &str) -> impl Future<Output = FetchResult> {
        self.requests.borrow_mut().push(url.to_string());
        let result = self.pages.get(url).cloned().unwrap_or(FetchResult::Failure {
            kind: FetchFailure::Connect,
            detail: format!("no page at {}", url),
        });
        async move { result }
    }
}

fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.crawler.allowed_roots = vec![ROOT.to_string()];
    config.output = OutputConfig {
        base_dir: dir.path().to_path_buf(),
        ..OutputConfig::default()
    };
    config
}

async fn run(dir: &TempDir, site: &FakeSite, seeds: &[&str], max_urls: usize) -> CrawlSummary {
    let seeds: Vec<String> = seeds.iter().map(|s| s.to_string()).collect();
    let mut coordinator = Coordinator::with_fetcher(test_config(dir), &seeds, max_urls, site)
        .expect("Failed to create coordinator");
    coordinator.run().await
}

fn read_lines(path: impl AsRef<Path>) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read log")
        .lines()
        .map(str::to_string)
        .collect()
}

/// All files under `dir`, relative paths, sorted
fn files_under(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, out: &mut Vec<String>) {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return;
        };
        for entry in entries {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                out.push(path.strip_prefix(base).unwrap().display().to_string());
            }
        }
    }

    let mut out = Vec::new();
    walk(dir, dir, &mut out);
    out.sort();
    out
}

#[tokio::test]
async fn test_single_seed_cap_of_one() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default().html(
        "https://example.test/doc/",
        r#"<a href="a.html">a</a><a href="b.html">b</a>"#,
    );

    // Seed without trailing slash is coerced to directory form
    let summary = run(&dir, &site, &["https://example.test/doc"], 1).await;

    assert_eq!(summary.termination, Termination::CapReached);
    assert_eq!(summary.discovered, 1);
    assert_eq!(summary.stored, 1);
    assert_eq!(
        read_lines(dir.path().join("crawled.txt")),
        vec!["https://example.test/doc/"]
    );

    let mut stored = files_under(&dir.path().join("html_files"));
    stored.extend(files_under(&dir.path().join("ck_files")));
    assert_eq!(stored, vec!["doc_.html/index.html"]);
    assert_eq!(site.requests.borrow().len(), 1);
}

#[tokio::test]
async fn test_fragment_links_not_logged() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default().html(
        "https://example.test/doc/",
        r##"<a href="#section">jump</a><a href="page.html#section">page</a>"##,
    );

    run(&dir, &site, &[ROOT], 10).await;

    let edges = read_lines(dir.path().join("links.output"));
    assert_eq!(
        edges,
        vec!["https://example.test/doc/ https://example.test/doc/page.html"]
    );
    assert!(edges.iter().all(|line| !line.contains('#')));
}

#[tokio::test]
async fn test_parent_relative_special_file() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default()
        .html(
            "https://example.test/doc/",
            r#"<a href="sub/page.html">page</a>"#,
        )
        .html(
            "https://example.test/doc/sub/page.html",
            r#"<a href="../other.ck">example</a>"#,
        )
        .file(
            "https://example.test/doc/other.ck",
            "text/plain",
            "SinOsc s => dac;\n1::second => now;\n",
        );

    let summary = run(&dir, &site, &[ROOT], 10).await;

    assert_eq!(summary.termination, Termination::FrontierExhausted);
    let discovered = read_lines(dir.path().join("crawler.output"));
    assert!(discovered.contains(&"https://example.test/doc/other.ck".to_string()));

    let stored = std::fs::read_to_string(dir.path().join("ck_files/doc_other.ck")).unwrap();
    assert_eq!(stored, "SinOsc s => dac;\n1::second => now;\n");
    assert!(dir.path().join("html_files/doc_sub_page.html").is_file());
}

#[tokio::test]
async fn test_cap_reached_mid_page() {
    let dir = TempDir::new().unwrap();
    let mut site = FakeSite::default().html(
        "https://example.test/doc/",
        r#"
            <a href="l1.html">1</a>
            <a href="l2.html">2</a>
            <a href="l3.html">3</a>
            <a href="l4.html">4</a>
            <a href="l5.html">5</a>
        "#,
    );
    for i in 1..=5 {
        site = site.html(&format!("https://example.test/doc/l{}.html", i), "leaf");
    }

    // Seed + 3 links fills a cap of 4
    let summary = run(&dir, &site, &[ROOT], 4).await;

    assert_eq!(summary.termination, Termination::CapReached);
    assert_eq!(summary.discovered, 4);

    let discovered = read_lines(dir.path().join("crawler.output"));
    assert_eq!(
        discovered,
        vec![
            "https://example.test/doc/l1.html",
            "https://example.test/doc/l2.html",
            "https://example.test/doc/l3.html",
        ]
    );

    let crawled = read_lines(dir.path().join("crawled.txt"));
    assert_eq!(crawled, vec!["https://example.test/doc/"]);
    assert_eq!(*site.requests.borrow(), vec![ROOT.to_string()]);

    let edges = read_lines(dir.path().join("links.output"));
    assert_eq!(
        edges,
        vec![
            "https://example.test/doc/ https://example.test/doc/l1.html",
            "https://example.test/doc/ https://example.test/doc/l2.html",
            "https://example.test/doc/ https://example.test/doc/l3.html",
        ]
    );
    assert_eq!(summary.edges, 3);
    assert!(!crawled.iter().any(|u| u.ends_with("l4.html") || u.ends_with("l5.html")));
}

#[tokio::test]
async fn test_rerun_is_identical() {
    let site = FakeSite::default()
        .html(
            "https://example.test/doc/",
            r#"<a href="a.html">a</a><a href="ex/">examples</a><a href="https://other.test/">x</a>"#,
        )
        .html(
            "https://example.test/doc/a.html",
            r#"<a href="/doc/">up</a><a href="ex/one.ck">one</a>"#,
        )
        .html(
            "https://example.test/doc/ex/",
            r#"<a href="one.ck">one</a><a href="two.ck">two</a>"#,
        )
        .file("https://example.test/doc/ex/one.ck", "text/plain", "one")
        .file("https://example.test/doc/ex/two.ck", "text/plain", "two");

    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    run(&first, &site, &[ROOT], 50).await;
    run(&second, &site, &[ROOT], 50).await;

    assert_eq!(
        read_lines(first.path().join("crawled.txt")),
        read_lines(second.path().join("crawled.txt"))
    );

    let files = files_under(first.path());
    assert_eq!(files, files_under(second.path()));
    for file in &files {
        assert_eq!(
            std::fs::read(first.path().join(file)).unwrap(),
            std::fs::read(second.path().join(file)).unwrap(),
            "{} differs between runs",
            file
        );
    }

    // Running again in the same directory overwrites with the same content
    run(&first, &site, &[ROOT], 50).await;
    assert_eq!(
        read_lines(first.path().join("crawled.txt")),
        read_lines(second.path().join("crawled.txt"))
    );
}

#[tokio::test]
async fn test_breadth_first_order_and_invariants() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default()
        .html(
            "https://example.test/doc/",
            r#"<a href="a/">a</a><a href="b/">b</a><a href="a">a again</a>"#,
        )
        .html(
            "https://example.test/doc/a/",
            r#"<a href="a1.html">a1</a><a href="../b">b again</a><a href="/blog/">blog</a>"#,
        )
        .html("https://example.test/doc/b/", r#"<a href="b1.html">b1</a>"#)
        .html("https://example.test/doc/a/a1.html", "leaf")
        .html("https://example.test/doc/b/b1.html", "leaf");

    let summary = run(&dir, &site, &[ROOT], 100).await;
    assert_eq!(summary.termination, Termination::FrontierExhausted);
    assert_eq!(summary.discovered, 5);

    let crawled = read_lines(dir.path().join("crawled.txt"));
    assert_eq!(
        crawled,
        vec![
            "https://example.test/doc/",
            "https://example.test/doc/a/",
            "https://example.test/doc/b/",
            "https://example.test/doc/a/a1.html",
            "https://example.test/doc/b/b1.html",
        ]
    );

    let scope = Scope::prefix(vec![ROOT.to_string()]);
    let discovered = read_lines(dir.path().join("crawler.output"));
    assert!(discovered.iter().all(|url| scope.contains(url)));

    let keys: HashSet<&str> = discovered.iter().map(|url| dedup_key(url)).collect();
    assert_eq!(keys.len(), discovered.len());

    // Duplicates and out-of-scope links still appear as edges
    let edges = read_lines(dir.path().join("links.output"));
    assert!(edges.contains(&"https://example.test/doc/ https://example.test/doc/a".to_string()));
    assert!(edges.contains(&"https://example.test/doc/a/ https://example.test/blog/".to_string()));
    assert_eq!(summary.edges, edges.len());
}

#[tokio::test]
async fn test_failures_do_not_stop_the_crawl() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default()
        .html(
            "https://example.test/doc/",
            r#"<a href="broken.html">broken</a><a href="ok.html">ok</a>"#,
        )
        .html("https://example.test/doc/ok.html", "fine");

    let summary = run(&dir, &site, &[ROOT], 100).await;

    assert_eq!(summary.failed, 1);
    assert_eq!(
        read_lines(dir.path().join("crawled.txt")),
        vec!["https://example.test/doc/", "https://example.test/doc/ok.html"]
    );
}

#[tokio::test]
async fn test_redirect_final_url_is_logged_and_used_as_base() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default()
        .redirect(
            "https://example.test/doc/",
            "https://example.test/doc/index.html",
            r#"<a href="next.html">next</a>"#,
        )
        .html("https://example.test/doc/next.html", "leaf");

    run(&dir, &site, &[ROOT], 100).await;

    let crawled = read_lines(dir.path().join("crawled.txt"));
    assert_eq!(crawled[0], "https://example.test/doc/index.html");
    assert!(dir.path().join("html_files/doc_index.html").is_file());

    let edges = read_lines(dir.path().join("links.output"));
    assert_eq!(
        edges,
        vec!["https://example.test/doc/index.html https://example.test/doc/next.html"]
    );
}

#[tokio::test]
async fn test_seeds_out_of_scope_or_over_cap() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default()
        .html("https://example.test/doc/a/", r#"<a href="x.html">x</a>"#)
        .html("https://example.test/doc/b/", "b");

    let summary = run(
        &dir,
        &site,
        &[
            "https://other.test/doc/",
            "https://example.test/doc/a",
            "https://example.test/doc/b",
            "https://example.test/doc/c",
        ],
        2,
    )
    .await;

    // The seeds fill the cap, so only the first one is fetched
    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.termination, Termination::CapReached);
    assert_eq!(*site.requests.borrow(), vec!["https://example.test/doc/a/"]);
    assert!(read_lines(dir.path().join("links.output")).is_empty());
}

#[tokio::test]
async fn test_full_seed_set_stops_regardless_of_content() {
    let seeds = ["https://example.test/doc/a/", "https://example.test/doc/b/"];

    // First seed fails to fetch
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default().html("https://example.test/doc/b/", "b");
    let summary = run(&dir, &site, &seeds, 2).await;
    assert_eq!(summary.termination, Termination::CapReached);
    assert_eq!(summary.failed, 1);
    assert_eq!(*site.requests.borrow(), vec![seeds[0]]);

    // First seed is not HTML
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default()
        .file("https://example.test/doc/a/", "application/pdf", "%PDF")
        .html("https://example.test/doc/b/", "b");
    let summary = run(&dir, &site, &seeds, 2).await;
    assert_eq!(summary.termination, Termination::CapReached);
    assert_eq!(summary.discarded, 1);
    assert_eq!(*site.requests.borrow(), vec![seeds[0]]);
}

#[tokio::test]
async fn test_empty_seed_list() {
    let dir = TempDir::new().unwrap();
    let site = FakeSite::default();

    let summary = run(&dir, &site, &[], 10).await;

    assert_eq!(summary.termination, Termination::FrontierExhausted);
    assert_eq!(summary.discovered, 0);
    assert!(dir.path().join("crawled.txt").is_file());
    assert!(dir.path().join("html_files").is_dir());
    assert!(dir.path().join("ck_files").is_dir());
}
