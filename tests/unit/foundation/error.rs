use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ThumbError::unresolvable("x")
            .to_string()
            .contains("unresolvable identifier:")
    );
    assert!(ThumbError::fetch("x").to_string().contains("fetch error:"));
    assert!(ThumbError::decode("x").to_string().contains("decode error:"));
    assert!(ThumbError::output("x").to_string().contains("output error:"));
    assert!(ThumbError::write("x").to_string().contains("write error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_output_errors_are_batch_fatal() {
    assert!(ThumbError::output("disk full").is_batch_fatal());
    assert!(!ThumbError::write("name too long").is_batch_fatal());
    assert!(!ThumbError::fetch("404").is_batch_fatal());
    assert!(!ThumbError::unresolvable("no id").is_batch_fatal());
    assert!(!ThumbError::decode("garbage").is_batch_fatal());
    assert!(!ThumbError::validation("ratio").is_batch_fatal());
}
