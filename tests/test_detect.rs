// Detection suite:
// * header-based identification on real containers
// * extension fallback for unreadable headers
// * nothing-detected cases (tiny files, unknown extensions)
// * encrypted path naming

use std::fs;
use std::path::Path;

use filecrypt_core::cipher::identity::{
    display_name, encrypted_path_for, tag_for_extension, AlgorithmTag, TAG_CC20, TAG_XCCH,
};
use filecrypt_core::detect::detect_algorithm;
use filecrypt_core::pipeline::{CancelToken, FilePipeline};

#[test]
fn detects_tag_from_header_for_every_catalog_cipher() {
    let pipeline = FilePipeline::default();
    for cipher in filecrypt_core::cipher::catalog() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.bin");
        let sealed = dir.path().join("sealed.bin");
        fs::write(&input, b"detection fixture").unwrap();
        pipeline
            .encrypt_file(&input, &sealed, *cipher, None, None, &CancelToken::new())
            .unwrap();

        let detection = detect_algorithm(&sealed);
        assert_eq!(detection.tag, Some(cipher.tag()));
        assert_eq!(detection.header.map(|h| h.tag), Some(cipher.tag()));
    }
}

#[test]
fn falls_back_to_extension_when_header_is_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive.cc20");
    fs::write(&path, [0xFFu8; 64]).unwrap(); // no valid header

    let detection = detect_algorithm(&path);
    assert_eq!(detection.tag, Some(TAG_CC20));
    assert!(detection.header.is_none());
}

#[test]
fn detects_nothing_for_tiny_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tiny.cc20");
    fs::write(&path, [0u8; 4]).unwrap();

    let detection = detect_algorithm(&path);
    assert!(detection.tag.is_none());
    assert!(detection.header.is_none());
}

#[test]
fn detects_nothing_for_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blob.xyz");
    fs::write(&path, [0xFFu8; 64]).unwrap();

    let detection = detect_algorithm(&path);
    assert!(detection.tag.is_none());
}

#[test]
fn detects_nothing_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let detection = detect_algorithm(&dir.path().join("absent.cc20"));
    assert!(detection.tag.is_none());
}

// ---- Identity map ----

#[test]
fn extension_lookup_is_case_insensitive_and_dot_tolerant() {
    assert_eq!(tag_for_extension("cc20"), Some(TAG_CC20));
    assert_eq!(tag_for_extension(".CC20"), Some(TAG_CC20));
    assert_eq!(tag_for_extension("xcch"), Some(TAG_XCCH));
    assert_eq!(tag_for_extension("tar"), None);
}

#[test]
fn display_name_falls_back_to_raw_tag() {
    assert_eq!(display_name(TAG_CC20), "ChaCha20");
    assert_eq!(display_name(AlgorithmTag::from_name("ZZZZ")), "ZZZZ");
}

#[test]
fn encrypted_path_appends_cipher_extension() {
    let path = encrypted_path_for(Path::new("/data/report.txt"), TAG_CC20);
    assert_eq!(path, Path::new("/data/report.txt.cc20"));

    let detected = tag_for_extension(path.extension().unwrap().to_str().unwrap());
    assert_eq!(detected, Some(TAG_CC20));
}
