use super::*;

#[test]
fn test_config_error_display() {
    let error = CliError::ConfigError("bad allow-list".to_string());

    assert_eq!(error.to_string(), "Configuration error: bad allow-list");
}

#[test]
fn test_auth_error_display() {
    let error = CliError::AuthError("token rejected".to_string());

    assert_eq!(error.to_string(), "Authentication error: token rejected");
}

#[test]
fn test_network_error_display() {
    let error = CliError::NetworkError("connection refused".to_string());

    assert_eq!(error.to_string(), "Network error: connection refused");
}

#[test]
fn test_invalid_arguments_display() {
    let error = CliError::InvalidArguments("missing token".to_string());

    assert_eq!(error.to_string(), "Invalid arguments: missing token");
}

#[test]
fn test_gate_failed_display() {
    let error = CliError::GateFailed("no acceptable label on pr #85".to_string());

    assert_eq!(error.to_string(), "Gate failed: no acceptable label on pr #85");
}

#[test]
fn test_from_anyhow_error() {
    let source = anyhow::anyhow!("something went sideways");

    let error: CliError = source.into();

    assert!(matches!(error, CliError::Other(_)));
    assert_eq!(error.to_string(), "Error: something went sideways");
}
