//! Batch download behaviour against the in-memory backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use matchlog_api::testing::FakeBackend;
use matchlog_api::{ApiClientConfig, MatchFilesClient};
use matchlog_core::{Endpoint, FileDescriptor, NamingScheme};
use matchlog_download::{Downloader, DownloaderConfig, FetchOptions};

const M1: &str = "M1";

fn downloader(backend: FakeBackend, config: DownloaderConfig) -> Downloader<FakeBackend> {
    let client = MatchFilesClient::with_backend(&ApiClientConfig::new(), backend).unwrap();
    Downloader::new(Arc::new(client), config)
}

/// Six files on the primary endpoint, each a few fake chunks long.
fn six_files() -> (FakeBackend, Vec<FileDescriptor>) {
    let mut backend = FakeBackend::new().with_chunk_delay(Duration::from_millis(5));
    let mut descriptors = Vec::new();
    for i in 0..6 {
        let name = format!("CombatLog_S{i}.log");
        backend = backend.with_body(
            &format!("file/v1/file/match/{M1}/{name}"),
            vec![b'a' + i; 10_000],
        );
        descriptors.push(FileDescriptor::new(name, Endpoint::Primary));
    }
    (backend, descriptors)
}

#[tokio::test]
async fn concurrency_bound_is_respected() {
    let dir = tempfile::tempdir().unwrap();
    let (backend, descriptors) = six_files();
    let d = downloader(backend, DownloaderConfig::new().with_max_concurrency(2));

    let paths = d
        .fetch_many(M1, &descriptors, "t", dir.path(), &FetchOptions::new())
        .await;

    assert_eq!(paths.len(), 6);
    let backend = d_backend(&d);
    assert_eq!(backend.max_in_flight(), 2);
    assert_eq!(backend.in_flight(), 0);
}

#[tokio::test]
async fn sequential_mode_preserves_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let (backend, descriptors) = six_files();
    let d = downloader(backend, DownloaderConfig::new().sequential());

    let paths = d
        .fetch_many(M1, &descriptors, "t", dir.path(), &FetchOptions::new())
        .await;

    let expected: Vec<PathBuf> = descriptors
        .iter()
        .map(|desc| dir.path().join(&desc.name))
        .collect();
    assert_eq!(paths, expected);
    assert_eq!(d_backend(&d).max_in_flight(), 1);
}

#[tokio::test]
async fn failed_file_is_isolated_and_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new()
        .with_body("match/M1/one.log", vec![1u8; 9_000])
        .with_broken_body("match/M1/two.log", vec![2u8; 9_000], 5_000)
        .with_body("match/M1/three.log", vec![3u8; 9_000]);
    let descriptors = vec![
        FileDescriptor::new("one.log", Endpoint::Primary),
        FileDescriptor::new("two.log", Endpoint::Primary),
        FileDescriptor::new("three.log", Endpoint::Primary),
    ];
    let d = downloader(backend, DownloaderConfig::new());

    let mut paths = d
        .fetch_many(M1, &descriptors, "t", dir.path(), &FetchOptions::new())
        .await;
    paths.sort();

    let mut expected = vec![dir.path().join("one.log"), dir.path().join("three.log")];
    expected.sort();
    assert_eq!(paths, expected);
    assert!(!dir.path().join("two.log").exists());

    let mut on_disk: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    on_disk.sort();
    assert_eq!(on_disk, vec!["one.log", "three.log"]);
}

#[tokio::test]
async fn missing_file_does_not_abort_batch() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new().with_body("match/M1/one.log", "1");
    let descriptors = vec![
        FileDescriptor::new("gone.log", Endpoint::Developer),
        FileDescriptor::new("one.log", Endpoint::Primary),
    ];
    let d = downloader(backend, DownloaderConfig::new().sequential());

    let paths = d
        .fetch_many(M1, &descriptors, "t", dir.path(), &FetchOptions::new())
        .await;
    assert_eq!(paths, vec![dir.path().join("one.log")]);
}

#[tokio::test]
async fn redownload_overwrites_with_identical_content() {
    let dir = tempfile::tempdir().unwrap();
    let body = b"[2024.01.01-00.00.00:000] [1:Hero] Spawn(): ok\n".repeat(500);
    let backend = FakeBackend::new().with_body("match/M1/CombatLog_S1.log", body.clone());
    let descriptors = vec![FileDescriptor::new("CombatLog_S1.log", Endpoint::Primary)];
    let d = downloader(backend, DownloaderConfig::new());

    let first = d
        .fetch_many(M1, &descriptors, "t", dir.path(), &FetchOptions::new())
        .await;
    let first_bytes = std::fs::read(&first[0]).unwrap();
    let second = d
        .fetch_many(M1, &descriptors, "t", dir.path(), &FetchOptions::new())
        .await;
    let second_bytes = std::fs::read(&second[0]).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first_bytes, body);
}

#[tokio::test]
async fn match_prefixed_naming() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FakeBackend::new().with_body("match/M1/ChatLog_S1.log", "hi");
    let descriptors = vec![FileDescriptor::new("ChatLog_S1.log", Endpoint::Developer)];
    let d = downloader(backend, DownloaderConfig::new());
    let options = FetchOptions::new().with_naming(NamingScheme::MatchPrefixed);

    let paths = d
        .fetch_many(M1, &descriptors, "t", dir.path(), &options)
        .await;
    assert_eq!(paths, vec![dir.path().join("M1_ChatLog_S1.log")]);
}

#[tokio::test]
async fn progress_reports_completion_per_file() {
    let dir = tempfile::tempdir().unwrap();
    let (backend, descriptors) = six_files();
    let d = downloader(backend, DownloaderConfig::new());
    let finished = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = Arc::clone(&finished);
    let options = FetchOptions::new().with_progress(move |name, so_far, total| {
        if total == Some(so_far) {
            sink.lock().unwrap().push(name.to_string());
        }
    });

    d.fetch_many(M1, &descriptors, "t", dir.path(), &options)
        .await;

    let mut finished = finished.lock().unwrap().clone();
    finished.sort();
    let mut expected: Vec<String> = descriptors.iter().map(|d| d.name.clone()).collect();
    expected.sort();
    assert_eq!(finished, expected);
}

fn d_backend(d: &Downloader<FakeBackend>) -> Arc<FakeBackend> {
    Arc::clone(d.client().backend())
}
