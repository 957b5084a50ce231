use super::*;

fn temp_session_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("product-admin-{tag}-{}.cookie", std::process::id()))
}

// =============================================================
// Cookie encoding
// =============================================================

#[test]
fn session_cookie_has_fixed_attributes() {
    let now = OffsetDateTime::now_utc();
    let cookie = session_cookie("tok", SESSION_TTL, now);
    assert_eq!(cookie.name(), AUTH_COOKIE_NAME);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.same_site(), Some(SameSite::Strict));
    assert!(cookie.expires_datetime().is_some());
}

#[test]
fn live_token_reads_back_encoded_cookie() {
    let now = OffsetDateTime::now_utc();
    let line = session_cookie("abc123", SESSION_TTL, now).to_string();
    assert_eq!(live_token(&line, now), Some("abc123".to_owned()));
}

#[test]
fn live_token_rejects_expired_cookie() {
    let now = OffsetDateTime::now_utc();
    let line = session_cookie("abc123", SESSION_TTL, now).to_string();
    assert_eq!(live_token(&line, now + Duration::days(2)), None);
}

#[test]
fn live_token_rejects_other_cookie_names() {
    let now = OffsetDateTime::now_utc();
    assert_eq!(live_token("session_token=abc; Path=/", now), None);
    assert_eq!(live_token("auth_token=; Path=/", now), None);
    assert_eq!(live_token("not a cookie", now), None);
}

// =============================================================
// MemoryTokenStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.get(), None);
    assert!(!store.is_present());
}

#[test]
fn memory_store_set_then_get() {
    let store = MemoryTokenStore::new();
    store.set("t1", SESSION_TTL).unwrap();
    assert_eq!(store.get().as_deref(), Some("t1"));
    store.set("t2", SESSION_TTL).unwrap();
    assert_eq!(store.get().as_deref(), Some("t2"));
}

#[test]
fn memory_store_expired_token_reads_as_absent() {
    let store = MemoryTokenStore::new();
    store.set("t1", Duration::seconds(-1)).unwrap();
    assert_eq!(store.get(), None);
}

#[test]
fn memory_store_clear_is_idempotent() {
    let store = MemoryTokenStore::with_token("t1");
    store.clear();
    store.clear();
    assert_eq!(store.get(), None);
}

// =============================================================
// CookieFileTokenStore
// =============================================================

#[test]
fn file_store_round_trips_through_disk() {
    let path = temp_session_path("roundtrip");
    let store = CookieFileTokenStore::new(&path);
    store.clear();
    assert_eq!(store.get(), None);

    store.set("disk-token", SESSION_TTL).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("auth_token=disk-token"));
    assert!(raw.contains("SameSite=Strict"));
    assert!(raw.contains("Path=/"));

    let reopened = CookieFileTokenStore::new(&path);
    assert_eq!(reopened.get().as_deref(), Some("disk-token"));

    store.clear();
    assert_eq!(reopened.get(), None);
    assert!(!path.exists());
}

#[test]
fn file_store_clear_without_file_is_noop() {
    let path = temp_session_path("absent");
    let store = CookieFileTokenStore::new(&path);
    store.clear();
    store.clear();
    assert_eq!(store.get(), None);
}

#[test]
fn file_store_ignores_expired_cookie() {
    let path = temp_session_path("expired");
    let store = CookieFileTokenStore::new(&path);
    store.set("old", Duration::seconds(-60)).unwrap();
    assert_eq!(store.get(), None);
    store.clear();
}
