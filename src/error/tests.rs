use super::*;

#[test]
fn test_validation_functions() {
    // Parameter validation
    assert!(validate::parameter(true, "test", "should pass").is_ok());
    let err = validate::parameter(false, "test", "should fail").unwrap_err();

    match err {
        Error::Parameter { name, reason } => {
            assert_eq!(name, "test");
            assert_eq!(reason, "should fail");
        }
        _ => panic!("Expected Parameter error"),
    }

    // Length validation
    assert!(validate::length("buffer", 32, 32).is_ok());
    let err = validate::length("buffer", 16, 32).unwrap_err();

    match err {
        Error::Length {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "buffer");
            assert_eq!(expected, 32);
            assert_eq!(actual, 16);
        }
        _ => panic!("Expected Length error"),
    }
}

#[test]
fn test_block_multiple() {
    assert!(validate::block_multiple("CBC plaintext", 0, 16).is_ok());
    assert!(validate::block_multiple("CBC plaintext", 48, 16).is_ok());

    let err = validate::block_multiple("CBC plaintext", 17, 16).unwrap_err();
    match err {
        Error::Length {
            context,
            expected,
            actual,
        } => {
            assert_eq!(context, "CBC plaintext");
            assert_eq!(expected, 32);
            assert_eq!(actual, 17);
        }
        _ => panic!("Expected Length error"),
    }
}

#[test]
fn test_authentication_validation() {
    assert!(validate::authentication(true, "GCM").is_ok());
    let err = validate::authentication(false, "GCM").unwrap_err();
    assert_eq!(err, Error::Authentication { algorithm: "GCM" });
}

#[test]
fn test_display() {
    let err = Error::Length {
        context: "AES block",
        expected: 16,
        actual: 15,
    };
    assert_eq!(
        err.to_string(),
        "Invalid length for AES block: expected 16, got 15"
    );

    let err = Error::Authentication { algorithm: "GCM" };
    assert_eq!(err.to_string(), "Authentication failed for GCM");
}
