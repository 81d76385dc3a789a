//! Integration tests for asset-cache.

#![allow(clippy::expect_used)]

use asset_cache::error::StoreError;
use asset_cache::io::compat::{
    SEEK_END, SEEK_SET, file_exists, fopen, fread, fseek, ftell, save_to_cache,
};
use asset_cache::{
    AssetCache, DefaultCache, DiskCache, Error, PersistOutcome, SeekOrigin, VirtualStore,
    default_cache,
};
use std::borrow::Cow;
use std::io::Read;
use tempfile::TempDir;

/// Helper to create a store holding one entry.
fn store_with<'a>(name: &str, data: &'a [u8]) -> VirtualStore<'a> {
    let mut store = VirtualStore::new();
    store
        .persist(name, data, false)
        .expect("persist failed");
    store
}

#[test]
fn test_end_to_end_hello() {
    let data = b"hello";
    let mut store = store_with("a", data);

    let handle = store.open("a").expect("entry should exist");
    let mut dest = [0u8; 5];
    let elements = store.read(&mut dest, 5, 1, handle).expect("read failed");
    assert_eq!(elements, 1);
    assert_eq!(&dest, b"hello");

    let elements = store.read(&mut dest, 5, 1, handle).expect("read failed");
    assert_eq!(elements, 0);
}

#[test]
fn test_second_persist_without_overwrite_is_noop() {
    let original = b"original";
    let replacement = b"replacement";
    let mut store = store_with("asset", original);

    let outcome = store
        .persist("asset", &replacement[..], false)
        .expect("persist failed");
    assert_eq!(outcome, PersistOutcome::Kept);

    let handle = store.open("asset").expect("entry should exist");
    let mut out = Vec::new();
    store
        .file(handle)
        .expect("file failed")
        .read_to_end(&mut out)
        .expect("read failed");
    assert_eq!(out, original);
}

#[test]
fn test_forced_persist_returns_newest() {
    let mut store = store_with("asset", b"v1");
    store.persist("asset", &b"v2"[..], true).expect("persist failed");
    store.persist("asset", &b"v3!"[..], true).expect("persist failed");

    let handle = store.open("asset").expect("entry should exist");
    let mut dest = [0u8; 3];
    assert_eq!(store.read(&mut dest, 3, 1, handle).expect("read failed"), 1);
    assert_eq!(&dest, b"v3!");
    assert_eq!(store.len(), 3);
}

#[test]
fn test_reopen_after_partial_read_rewinds() {
    let mut store = store_with("a", b"abcdef");
    let handle = store.open("a").expect("entry should exist");
    let mut dest = [0u8; 2];
    store.read(&mut dest, 1, 2, handle).expect("read failed");
    store.close(handle).expect("close failed");

    let handle = store.open("a").expect("entry should exist");
    assert_eq!(store.tell(handle).expect("tell failed"), 0);
    store.read(&mut dest, 1, 2, handle).expect("read failed");
    assert_eq!(&dest, b"ab");
}

#[test]
fn test_open_never_persisted() {
    let mut store = store_with("a", b"x");
    assert!(store.open("b").is_none());
    assert!(!store.exists("b"));
}

#[test]
fn test_seek_from_end_convention() {
    let mut store = store_with("a", b"0123456789");
    let handle = store.open("a").expect("entry should exist");

    store.seek(handle, 4, SeekOrigin::End).expect("seek failed");
    assert_eq!(store.tell(handle).expect("tell failed"), 6);

    store.seek(handle, -3, SeekOrigin::End).expect("seek failed");
    assert_eq!(store.tell(handle).expect("tell failed"), 13);

    let mut dest = [0u8; 4];
    assert_eq!(store.read(&mut dest, 1, 4, handle).expect("read failed"), 0);
}

#[test]
fn test_invalid_handle_is_unified() {
    let mut a = store_with("a", b"x");
    let mut b = store_with("a", b"x");
    let handle = a.open("a").expect("entry should exist");

    let mut dest = [0u8; 1];
    for err in [
        b.close(handle).expect_err("close should fail"),
        b.seek(handle, 0, SeekOrigin::Start).expect_err("seek should fail"),
        b.tell(handle).expect_err("tell should fail"),
        b.read(&mut dest, 1, 1, handle).expect_err("read should fail"),
    ] {
        assert!(matches!(err, Error::Store(StoreError::InvalidHandle)));
    }
}

#[test]
fn test_legacy_reader_over_compat_layer() {
    // A header (u32 count) followed by `count` little-endian u16 values.
    let mut blob = 3u32.to_le_bytes().to_vec();
    blob.extend_from_slice(&[1, 0, 2, 0, 3, 0]);
    let mut store = VirtualStore::new();
    store.persist("table.bin", blob.as_slice(), false).expect("persist failed");

    let stream = fopen(&mut store, "table.bin", "rb");
    assert_eq!(fseek(&mut store, stream, 0, SEEK_END), 0);
    assert_eq!(ftell(&store, stream), 10);
    assert_eq!(fseek(&mut store, stream, 0, SEEK_SET), 0);

    let mut header = [0u8; 4];
    assert_eq!(fread(&mut header, 4, 1, &mut store, stream), 1);
    let count = usize::try_from(u32::from_le_bytes(header)).expect("count fits");

    let mut values = vec![0u8; count * 2];
    assert_eq!(fread(&mut values, 2, count, &mut store, stream), count);
    let values: Vec<u16> = values
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_backends_share_persist_contract() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data = b"shared contract";

    let mut disk = DiskCache::new(temp_dir.path());
    let mut memory = VirtualStore::new();
    let backends: [&mut dyn AssetCache<'_>; 2] = [&mut disk, &mut memory];

    for cache in backends {
        assert_eq!(
            cache
                .persist("a", Cow::Borrowed(data.as_slice()), false)
                .expect("persist failed"),
            PersistOutcome::Stored
        );
        assert!(cache.exists("a"));
        assert_eq!(
            cache
                .persist("a", Cow::Borrowed(data.as_slice()), false)
                .expect("persist failed"),
            PersistOutcome::Kept
        );
        assert!(matches!(
            cache.persist(&"n".repeat(300), Cow::Borrowed(data.as_slice()), false),
            Err(Error::Store(_) | Error::Io(_))
        ));
    }

    let written = std::fs::read(temp_dir.path().join("a")).expect("read failed");
    assert_eq!(written, data);
}

#[test]
fn test_default_cache_through_compat() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut cache: DefaultCache = default_cache(temp_dir.path());

    assert!(!file_exists(&cache, "fonts/a.ttf"));
    assert!(save_to_cache(&mut cache, "fonts/a.ttf", &b"glyphs"[..], false));
    assert!(file_exists(&cache, "fonts/a.ttf"));
    assert!(save_to_cache(&mut cache, "fonts/a.ttf", &b"other"[..], false));
    assert!(!file_exists(&cache, "fonts/b.ttf"));

    #[cfg(feature = "disk-cache")]
    assert_eq!(
        std::fs::read(temp_dir.path().join("fonts/a.ttf")).expect("cached file"),
        b"glyphs"
    );
    #[cfg(not(feature = "disk-cache"))]
    assert_eq!(cache.get("fonts/a.ttf").expect("entry").data(), b"glyphs");
}

mod property_tests {
    use asset_cache::{SeekOrigin, VirtualStore};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn read_to_exhaustion_reads_whole_elements(
            data in proptest::collection::vec(any::<u8>(), 1..512),
            element_size in 1usize..32,
        ) {
            let mut store = VirtualStore::new();
            store.persist("p", data.as_slice(), false).unwrap();
            let handle = store.open("p").unwrap();

            let mut total = 0;
            let mut collected = Vec::new();
            let mut dest = vec![0u8; element_size * 3];
            loop {
                let elements = store.read(&mut dest, element_size, 3, handle).unwrap();
                if elements == 0 {
                    break;
                }
                total += elements * element_size;
                collected.extend_from_slice(&dest[..elements * element_size]);
            }

            let n = data.len();
            prop_assert_eq!(total, n - (n % element_size));
            prop_assert_eq!(&collected[..], &data[..total]);
        }

        #[test]
        fn seek_start_then_tell(len in 0usize..256, k in 0usize..256) {
            let data = vec![0u8; len];
            let k = k.min(len);
            let mut store = VirtualStore::new();
            store.persist("p", data.as_slice(), false).unwrap();
            let handle = store.open("p").unwrap();

            store.seek(handle, i64::try_from(k).unwrap(), SeekOrigin::Start).unwrap();
            prop_assert_eq!(store.tell(handle).unwrap(), i64::try_from(k).unwrap());
        }

        #[test]
        fn seek_end_negative_lands_past_end(len in 0usize..256, k in 0i64..256) {
            let data = vec![0u8; len];
            let mut store = VirtualStore::new();
            store.persist("p", data.as_slice(), false).unwrap();
            let handle = store.open("p").unwrap();

            store.seek(handle, -k, SeekOrigin::End).unwrap();
            prop_assert_eq!(store.tell(handle).unwrap(), i64::try_from(len).unwrap() + k);
        }
    }
}

/// CLI binary integration tests.
mod cli_tests {
    use asset_cache::config::{CACHE_DIR_ENV, LOG_ENV};
    use assert_cmd::Command;
    use predicates::prelude::*;
    use tempfile::TempDir;

    fn cli() -> Command {
        let mut cmd = Command::cargo_bin("asset-cache").expect("binary should build");
        cmd.env_remove(CACHE_DIR_ENV).env_remove(LOG_ENV);
        cmd
    }

    #[test]
    fn test_persist_then_exists() {
        let temp_dir = TempDir::new().expect("temp dir");
        let source = temp_dir.path().join("source.bin");
        std::fs::write(&source, b"payload").expect("write source");
        let cache_dir = temp_dir.path().join("cache");

        cli()
            .arg("--cache-dir")
            .arg(&cache_dir)
            .args(["persist", "seas_18.se1"])
            .arg(&source)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Stored seas_18.se1"));

        cli()
            .arg("--cache-dir")
            .arg(&cache_dir)
            .args(["persist", "seas_18.se1"])
            .arg(&source)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Kept seas_18.se1"));

        cli()
            .arg("--cache-dir")
            .arg(&cache_dir)
            .args(["exists", "seas_18.se1"])
            .assert()
            .success()
            .stdout("seas_18.se1: exists\n");

        let written = std::fs::read(cache_dir.join("seas_18.se1")).expect("cached file");
        assert_eq!(written, b"payload");
    }

    #[test]
    fn test_persist_with_config_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let cache_dir = temp_dir.path().join("cache");
        let config = temp_dir.path().join("cache.json");
        std::fs::write(
            &config,
            format!(
                r#"{{"root": {}, "force_overwrite": true}}"#,
                serde_json::to_string(&cache_dir).expect("path json")
            ),
        )
        .expect("write config");

        for contents in [&b"v1"[..], &b"v2"[..]] {
            let source = temp_dir.path().join("source.bin");
            std::fs::write(&source, contents).expect("write source");
            cli()
                .arg("--config")
                .arg(&config)
                .args(["persist", "a.bin"])
                .arg(&source)
                .assert()
                .success()
                .stdout(predicate::str::starts_with("Stored a.bin"));
        }

        let written = std::fs::read(cache_dir.join("a.bin")).expect("cached file");
        assert_eq!(written, b"v2");
    }

    #[test]
    fn test_read_with_end_origin() {
        let temp_dir = TempDir::new().expect("temp dir");
        let source = temp_dir.path().join("digits.txt");
        std::fs::write(&source, b"0123456789").expect("write source");

        cli()
            .args(["read", "digits.txt", "--load"])
            .arg(&source)
            .args(["--origin", "end", "--offset", "3"])
            .assert()
            .success()
            .stdout("789");
    }

    #[test]
    fn test_read_json_output() {
        let temp_dir = TempDir::new().expect("temp dir");
        let source = temp_dir.path().join("h.bin");
        std::fs::write(&source, b"hello").expect("write source");

        let output = cli()
            .args(["--format", "json", "read", "a", "--load"])
            .arg(format!("a={}", source.display()))
            .args(["-e", "5", "-n", "1"])
            .output()
            .expect("run");
        assert!(output.status.success());

        let value: serde_json::Value =
            serde_json::from_slice(&output.stdout).expect("valid json");
        assert_eq!(value["elements"], 1);
        assert_eq!(value["cursor"], 5);
        assert_eq!(value["text"], "hello");
    }

    #[test]
    fn test_read_missing_entry_fails() {
        let temp_dir = TempDir::new().expect("temp dir");
        let source = temp_dir.path().join("a.bin");
        std::fs::write(&source, b"x").expect("write source");

        cli()
            .args(["read", "missing", "--load"])
            .arg(&source)
            .assert()
            .failure()
            .stderr(predicate::str::contains("entry not found: missing"));
    }

    #[test]
    fn test_list_shows_shadowed() {
        let temp_dir = TempDir::new().expect("temp dir");
        let first = temp_dir.path().join("first.bin");
        let second = temp_dir.path().join("second.bin");
        std::fs::write(&first, b"old").expect("write first");
        std::fs::write(&second, b"newer").expect("write second");

        cli()
            .args(["list", "--load"])
            .arg(format!("font={}", first.display()))
            .arg("--load")
            .arg(format!("font={}", second.display()))
            .assert()
            .success()
            .stdout(predicate::str::contains("shadowed"))
            .stdout(predicate::str::contains("visible"));
    }
}
