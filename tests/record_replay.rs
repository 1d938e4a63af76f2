//! Cassette replay integration tests — zero network I/O.
//!
//! Each test writes a cassette holding synthetic solid-color images and points
//! `CATSAYS_REPLAY` at it, so the binary never contacts the live service.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use base64::Engine;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use predicates::prelude::*;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

fn cmd(cassette: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("catsays");
    cmd.env("CATSAYS_REPLAY", cassette.to_str().unwrap())
        .env("CATSAYS_CONFIG", "/nonexistent/catsays/config.toml")
        .env_remove("CATSAYS_BASE_URL")
        .env_remove("CATSAYS_REC");
    cmd
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn solid_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, color))
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

fn url(caption: &str, width: u32, height: u32) -> String {
    format!("https://cataas.com/cat/says/{caption}?width={width}&height={height}&color=Pink&s=100")
}

/// One entry per recorded fetch: `Ok(bytes)` or `Err(message)`.
fn write_cassette(dir: &Path, entries: &[(String, Result<Vec<u8>, &str>)]) -> PathBuf {
    let mut yaml = String::from(
        "name: replay-test\nrecorded_at: \"2026-01-01T00:00:00Z\"\ncommit: test\ninteractions:\n",
    );
    for (seq, (url, outcome)) in entries.iter().enumerate() {
        yaml.push_str(&format!("  - seq: {seq}\n"));
        yaml.push_str("    port: image_fetcher\n    method: fetch\n");
        yaml.push_str(&format!("    input:\n      url: \"{url}\"\n    output:\n"));
        match outcome {
            Ok(bytes) => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
                yaml.push_str(&format!("      Ok:\n        data: {b64}\n"));
                yaml.push_str("        content_type: image/png\n");
            }
            Err(message) => yaml.push_str(&format!("      Err: \"{message}\"\n")),
        }
    }
    let path = dir.join("fetch.cassette.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn hi_bob_png_halves_match_sources() {
    let dir = scratch_dir("catsays_replay_png");
    // Recorded in completion order: the right image finished first.
    let cassette = write_cassette(
        &dir,
        &[
            (url("Bob", 100, 100), Ok(solid_png(100, 100, BLUE))),
            (url("Hi", 100, 100), Ok(solid_png(100, 100, RED))),
        ],
    );
    let out = dir.join("pair.png");

    cmd(&cassette)
        .args(["--greeting", "Hi", "--who", "Bob", "--width", "100", "--height", "100"])
        .args(["--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(format!("{}\n", out.display()));

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (200, 100));
    for (x, y, px) in img.enumerate_pixels() {
        let expected = if x < 100 { RED } else { BLUE };
        assert_eq!(*px, expected, "pixel at ({x}, {y})");
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn default_output_is_jpeg_in_current_dir() {
    let dir = scratch_dir("catsays_replay_default");
    let cassette = write_cassette(
        &dir,
        &[
            (url("Hello", 40, 30), Ok(solid_png(40, 30, RED))),
            (url("You", 40, 30), Ok(solid_png(40, 30, BLUE))),
        ],
    );

    let assert = cmd(&cassette)
        .args(["--width", "40", "--height", "30"])
        .current_dir(&dir)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let printed = PathBuf::from(stdout.trim_end());
    assert!(printed.is_absolute(), "printed path should be absolute: {stdout}");
    assert_eq!(printed.file_name().unwrap(), "cat.jpg");

    let data = std::fs::read(dir.join("cat.jpg")).unwrap();
    assert_eq!(&data[..3], &[0xFF, 0xD8, 0xFF], "output should be a JPEG");
    let img = image::load_from_memory(&data).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (80, 30));
    let left = img.get_pixel(10, 15);
    let right = img.get_pixel(70, 15);
    assert!(left[0] > 200 && left[2] < 60, "left was {left:?}");
    assert!(right[2] > 200 && right[0] < 60, "right was {right:?}");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn caption_with_spaces_is_percent_encoded() {
    let dir = scratch_dir("catsays_replay_encoded");
    let cassette = write_cassette(
        &dir,
        &[
            (url("Good%20morning", 10, 10), Ok(solid_png(10, 10, RED))),
            (url("dear%2Ffriend", 10, 10), Ok(solid_png(10, 10, BLUE))),
        ],
    );
    let out = dir.join("pair.png");

    cmd(&cassette)
        .args(["--greeting", "Good morning", "--who", "dear/friend"])
        .args(["--width", "10", "--height", "10", "--output", out.to_str().unwrap()])
        .assert()
        .success();

    assert!(out.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn fetch_failure_writes_nothing() {
    let dir = scratch_dir("catsays_replay_network");
    let cassette = write_cassette(
        &dir,
        &[
            (url("Hello", 10, 10), Ok(solid_png(10, 10, RED))),
            (url("You", 10, 10), Err("HTTP 503 from https://cataas.com/cat/says/You")),
        ],
    );
    let out = dir.join("cat.png");

    cmd(&cassette)
        .args(["--width", "10", "--height", "10", "--output", out.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Network error").and(predicate::str::contains("503")));

    assert!(!out.exists(), "no output should be written after a failed fetch");
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_image_is_decode_error() {
    let dir = scratch_dir("catsays_replay_corrupt");
    let cassette = write_cassette(
        &dir,
        &[
            (url("Hello", 10, 10), Ok(b"<html>rate limited</html>".to_vec())),
            (url("You", 10, 10), Ok(solid_png(10, 10, BLUE))),
        ],
    );
    let out = dir.join("cat.png");

    cmd(&cassette)
        .args(["--width", "10", "--height", "10", "--output", out.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to decode image 0"));

    assert!(!out.exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn mismatched_source_width_is_clipped_not_rescaled() {
    // The service returned wider images than requested; the right image still
    // starts at the configured width and the overflow is clipped.
    let dir = scratch_dir("catsays_replay_clip");
    let cassette = write_cassette(
        &dir,
        &[
            (url("Hello", 20, 10), Ok(solid_png(30, 10, RED))),
            (url("You", 20, 10), Ok(solid_png(30, 10, BLUE))),
        ],
    );
    let out = dir.join("cat.png");

    cmd(&cassette)
        .args(["--width", "20", "--height", "10", "--output", out.to_str().unwrap()])
        .assert()
        .success();

    let img = image::open(&out).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (40, 10));
    assert_eq!(*img.get_pixel(19, 5), RED);
    assert_eq!(*img.get_pixel(20, 5), BLUE);
    assert_eq!(*img.get_pixel(39, 5), BLUE);

    let _ = std::fs::remove_dir_all(&dir);
}
