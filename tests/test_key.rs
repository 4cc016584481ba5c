// Key loader and size-validation suite:
// * normalization rules (pass-through, extension mask, SHA-256 compression)
// * idempotence
// * format sniffing order (hex before Base64 before raw)
// * hex persistence round trip

use filecrypt_core::constants::KEY_LEN;
use filecrypt_core::key::{load_key, normalize_key, save_key, KeyError};

// ---- Normalization ----

#[test]
fn normalize_rejects_empty() {
    let err = normalize_key(&[]).unwrap_err();
    assert!(matches!(err, KeyError::Empty));
}

#[test]
fn normalize_passes_exact_32() {
    let raw: Vec<u8> = (0..32).collect();
    let key = normalize_key(&raw).unwrap();
    assert_eq!(key.as_bytes(), &raw[..]);
}

#[test]
fn normalize_extends_short_keys_with_mask() {
    // two-byte key [0x0A, 0xBC]: extension cycles input XOR 0x5C
    let key = normalize_key(&[0x0A, 0xBC]).unwrap();
    let bytes = key.as_bytes();
    assert_eq!(bytes.len(), KEY_LEN);
    assert_eq!(bytes[0], 0x0A);
    assert_eq!(bytes[1], 0xBC);
    assert_eq!(bytes[2], 0x0A ^ 0x5C); // 0x56
    assert_eq!(bytes[3], 0xBC ^ 0x5C); // 0xE0
    assert_eq!(bytes[4], 0x56);
    for i in 2..KEY_LEN {
        assert_eq!(bytes[i], [0x0A, 0xBC][i % 2] ^ 0x5C);
    }
}

#[test]
fn normalize_compresses_long_keys_with_sha256() {
    // SHA-256 of 64 zero bytes is a fixed, well-known digest
    let key = normalize_key(&[0u8; 64]).unwrap();
    assert_eq!(
        hex::encode(key.as_bytes()),
        "f5a5fd42d16a20302798ef6ed309979b43003d2320d9f0e8ea9831a92759fb4b"
    );
}

#[test]
fn normalize_is_idempotent() {
    for raw in [&b"abc"[..], &[0xAAu8; 32][..], &[0x11u8; 100][..]] {
        let once = normalize_key(raw).unwrap();
        let twice = normalize_key(once.as_bytes()).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn normalize_always_yields_32_bytes() {
    for len in [1usize, 2, 16, 31, 32, 33, 64, 200] {
        let raw = vec![0x42u8; len];
        assert_eq!(normalize_key(&raw).unwrap().as_bytes().len(), KEY_LEN);
    }
}

// ---- Loader sniffing ----

#[test]
fn loader_parses_hex_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hex.key");
    std::fs::write(&path, "000102030405060708090a0b0c0d0e0f").unwrap();
    let key = load_key(&path).unwrap();
    assert_eq!(&key.as_bytes()[..16], &(0u8..16).collect::<Vec<_>>()[..]);
}

#[test]
fn loader_zero_prefixes_odd_hex() {
    // "abc" -> "0abc" -> [0x0A, 0xBC] -> masked extension
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.key");
    std::fs::write(&path, "abc").unwrap();
    let key = load_key(&path).unwrap();
    let bytes = key.as_bytes();
    assert_eq!(bytes[0], 0x0A);
    assert_eq!(bytes[1], 0xBC);
    assert_eq!(bytes[2], 0x56);
    assert_eq!(bytes[3], 0xE0);
    assert_eq!(bytes[4], 0x56);
}

#[test]
fn loader_prefers_hex_over_base64() {
    // all-hex text is also a plausible Base64 string; hex must win
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ambiguous.key");
    std::fs::write(&path, "DEADBEEF").unwrap();
    let key = load_key(&path).unwrap();
    assert_eq!(&key.as_bytes()[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn loader_falls_back_to_base64() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("b64.key");
    std::fs::write(&path, "aGVsbG8gd29ybGQh").unwrap(); // "hello world!"
    let key = load_key(&path).unwrap();
    assert_eq!(&key.as_bytes()[..12], b"hello world!");
}

#[test]
fn loader_falls_back_to_raw_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("raw.key");
    let raw: Vec<u8> = (0..32).map(|i| (i * 7 + 200) as u8).collect();
    std::fs::write(&path, &raw).unwrap();
    let key = load_key(&path).unwrap();
    assert_eq!(key.as_bytes(), &raw[..]);
}

#[test]
fn loader_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_key(&dir.path().join("nope.key")).unwrap_err();
    assert!(matches!(err, KeyError::NotFound(_)));
}

#[test]
fn loader_rejects_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.key");
    std::fs::write(&path, "").unwrap();
    let err = load_key(&path).unwrap_err();
    assert!(matches!(err, KeyError::Empty));
}

// ---- Persistence ----

#[test]
fn save_writes_uppercase_hex_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.key");
    let key = normalize_key(&[0xAB; 32]).unwrap();
    save_key(&path, &key).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.len(), 64);
    assert_eq!(text, text.to_uppercase());
    assert!(text.chars().all(|c| c.is_ascii_hexdigit()));

    let loaded = load_key(&path).unwrap();
    assert_eq!(loaded, key);
}
