use directory_portal::{
    error::AppError,
    validators::{ERR_NON_EMPTY, validate_non_empty, validate_transmission},
};

#[test]
fn test_non_empty_accepts_real_values() {
    assert!(validate_non_empty("name", "Corolla").is_ok());
    assert!(validate_non_empty("name", "  padded  ").is_ok());
}

#[test]
fn test_non_empty_rejects_blank_and_whitespace() {
    for value in ["", "   ", "\t\n"] {
        let err = validate_non_empty("name", value).expect_err("blank value must be rejected");
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("name"), "message should name the field: {msg}");
                assert!(msg.contains(ERR_NON_EMPTY));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}

#[test]
fn test_transmission_accepts_categorical_values() {
    assert!(validate_transmission("manual").is_ok());
    assert!(validate_transmission("automatic").is_ok());
}

#[test]
fn test_transmission_rejects_unknown_values() {
    let err = validate_transmission("cvt").expect_err("unknown transmission must be rejected");
    assert!(matches!(err, AppError::Validation(_)));
}
