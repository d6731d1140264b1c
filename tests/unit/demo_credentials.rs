//! Demo login gate behavior

use pretty_assertions::assert_eq;
use test_log::test;

use har_ghar_munga::demo::{validate_demo_credentials, CredentialError, DEMO_PASSWORD};
use har_ghar_munga::models::UserRole;

#[test]
fn test_each_demo_role_logs_in() {
    let cases = [
        ("CGCO001", UserRole::Admin),
        ("CGAB001", UserRole::Anganwadi),
        ("CGPV001", UserRole::Family),
    ];
    for (username, role) in cases {
        let user = validate_demo_credentials(username, DEMO_PASSWORD).unwrap();
        assert_eq!(user.role, Some(role));
        assert_eq!(user.username, username);
    }
}

#[test]
fn test_password_failure_reported_before_username() {
    // Even an unknown username gets the wrong-password message first
    let err = validate_demo_credentials("NOBODY", "letmein").unwrap_err();
    assert_eq!(err, CredentialError::WrongPassword);
    assert_eq!(err.to_string(), "गलत पासवर्ड!");
}

#[test]
fn test_unknown_username_with_correct_password() {
    let err = validate_demo_credentials("CGZZ999", DEMO_PASSWORD).unwrap_err();
    assert_eq!(err, CredentialError::UnknownUser);
    assert_eq!(err.to_string(), "गलत उपयोगकर्ता नाम!");
}

#[test]
fn test_username_comparison_is_uppercased() {
    let user = validate_demo_credentials("cgco001", DEMO_PASSWORD).unwrap();
    assert_eq!(user.role, Some(UserRole::Admin));
}
