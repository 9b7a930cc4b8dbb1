use oms_auth::{hash_password, verify_password};

#[test]
fn hash_and_verify_round_trip() {
    let hash = hash_password("correct horse").expect("hash");
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password(&hash, "correct horse").expect("verify"));
    assert!(!verify_password(&hash, "wrong horse").expect("verify"));
}

#[test]
fn malformed_hash_is_an_error() {
    assert!(verify_password("not-a-hash", "whatever").is_err());
}
