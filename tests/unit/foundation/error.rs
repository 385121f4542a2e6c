use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::precondition("x")
            .to_string()
            .contains("precondition violated:")
    );
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ReelError::sink("x").to_string().contains("sink error:"));
    assert!(
        ReelError::display("x")
            .to_string()
            .contains("display error:")
    );
    assert!(ReelError::input("x").to_string().contains("input error:"));
    assert!(
        ReelError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
