// crates/launch-gate-config/tests/load_validation.rs
// ============================================================================
// Module: Config Load Tests
// Description: Tests for configuration loading, defaults, and validation.
// Purpose: Validate fail-closed parsing and the derived core settings.
// Dependencies: launch_gate_config::config, tempfile
// ============================================================================
//! ## Overview
//! Validates TOML loading from disk, the built-in defaults, and the
//! fail-closed rejection of invalid settings.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::fs;
use std::path::Path;

use launch_gate_config::ConfigError;
use launch_gate_config::LaunchGateConfig;
use launch_gate_core::DocumentKey;
use support::TestResult;
use support::ensure;
use tempfile::TempDir;

/// Writes `content` to a temp config file and loads it.
fn load_from(content: &str) -> TestResult<(TempDir, Result<LaunchGateConfig, ConfigError>)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("launch-gate.toml");
    fs::write(&path, content)?;
    let result = LaunchGateConfig::load(Some(&path));
    Ok((dir, result))
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Tests the defaults of an empty config file.
#[test]
fn test_empty_config_uses_defaults() -> TestResult {
    let (_dir, result) = load_from("")?;
    let config = result?;
    ensure(config.evaluation.warning_days == 90, "default warning window is 90 days")?;
    ensure(config.ttl.default_days == 365, "default ttl is one year")?;
    ensure(config.ttl.long_lived_days == 1_095, "long-lived ttl is three years")?;
    ensure(
        config.evaluator_config().warning_days == 90,
        "the evaluator settings mirror the config",
    )?;
    Ok(())
}

/// Tests that settings and overrides flow into the derived tables.
#[test]
fn test_settings_flow_into_core_types() -> TestResult {
    let (_dir, result) = load_from(
        r#"
        [evaluation]
        warning_days = 30

        [ttl]
        default_days = 180
        [ttl.overrides]
        Invoice_Scan = 60
        "#,
    )?;
    let config = result?;
    ensure(config.evaluator_config().warning_days == 30, "warning window is tunable")?;

    let table = config.ttl_table();
    ensure(
        table.ttl_for(&DocumentKey::new("invoice_scan")) == 60,
        "override keys are normalized case-insensitively",
    )?;
    ensure(
        table.ttl_for(&DocumentKey::new("other_doc")) == 180,
        "the tuned default applies to unlisted keys",
    )?;
    Ok(())
}

// ============================================================================
// SECTION: Rejections
// ============================================================================

/// Tests that a missing file is an I/O error.
#[test]
fn test_missing_file_fails_closed() -> TestResult {
    let result = LaunchGateConfig::load(Some(Path::new("/nonexistent/launch-gate.toml")));
    ensure(matches!(result, Err(ConfigError::Io(_))), "a missing file is an io error")
}

/// Tests that malformed TOML is a parse error.
#[test]
fn test_malformed_toml_rejected() -> TestResult {
    let (_dir, result) = load_from("[evaluation\nwarning_days = ")?;
    ensure(matches!(result, Err(ConfigError::Parse(_))), "malformed toml is a parse error")
}

/// Tests validation rejections for out-of-range settings.
#[test]
fn test_invalid_settings_rejected() -> TestResult {
    let (_dir, zero_warning) = load_from("[evaluation]\nwarning_days = 0\n")?;
    ensure(
        matches!(zero_warning, Err(ConfigError::Invalid(_))),
        "a zero warning window is invalid",
    )?;

    let (_dir, zero_ttl) = load_from("[ttl]\ndefault_days = 0\n")?;
    ensure(matches!(zero_ttl, Err(ConfigError::Invalid(_))), "a zero ttl is invalid")?;

    // The conflict window is fixed by the evidence lifecycle; a differing
    // value would make documentation lie about behavior.
    let (_dir, wrong_window) = load_from("[evaluation]\nconflict_window_days = 15\n")?;
    ensure(
        matches!(wrong_window, Err(ConfigError::Invalid(_))),
        "a mismatched conflict window is invalid",
    )?;
    Ok(())
}
