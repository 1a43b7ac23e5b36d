use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CosmatesqueError::parameter("x")
            .to_string()
            .contains("parameter error:")
    );
    assert!(CosmatesqueError::size("x").to_string().contains("size error:"));
    assert!(
        CosmatesqueError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CosmatesqueError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: CosmatesqueError = serde_json::from_str::<u32>("not json").unwrap_err().into();
    assert!(matches!(err, CosmatesqueError::Serde(_)));
}
