// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for firmware file name matching.

use fwdrop_common::matcher::{is_stale_firmware, MatchRule, FIRMWARE_SUFFIX};

// =============================================================================
// Suffix rule
// =============================================================================

#[test]
fn test_suffix_matches_bin_extension() {
    assert!(MatchRule::Suffix.matches("firmware.bin"));
    assert!(MatchRule::Suffix.matches("nucleo_f401re.bin"));
}

#[test]
fn test_suffix_matches_names_without_extension() {
    // Literal last-three-characters check, not an extension check
    assert!(MatchRule::Suffix.matches("robin"));
    assert!(MatchRule::Suffix.matches("cabin"));
    assert!(MatchRule::Suffix.matches(FIRMWARE_SUFFIX));
}

#[test]
fn test_suffix_rejects_other_files() {
    assert!(!MatchRule::Suffix.matches("notes.txt"));
    assert!(!MatchRule::Suffix.matches("firmware.hex"));
    assert!(!MatchRule::Suffix.matches("bin.txt"));
    assert!(!MatchRule::Suffix.matches("in"));
    assert!(!MatchRule::Suffix.matches(""));
}

#[test]
fn test_suffix_is_case_sensitive() {
    assert!(!MatchRule::Suffix.matches("FIRMWARE.BIN"));
}

#[test]
fn test_default_rule_is_suffix() {
    assert_eq!(MatchRule::default(), MatchRule::Suffix);
}

// =============================================================================
// Extension rule
// =============================================================================

#[test]
fn test_extension_matches_bin_extension() {
    assert!(MatchRule::Extension.matches("firmware.bin"));
    assert!(MatchRule::Extension.matches("FIRMWARE.BIN"));
    assert!(MatchRule::Extension.matches(".old.bin"));
}

#[test]
fn test_extension_rejects_bare_suffix() {
    assert!(!MatchRule::Extension.matches("robin"));
    assert!(!MatchRule::Extension.matches("cabin"));
    assert!(!MatchRule::Extension.matches("bin"));
    assert!(!MatchRule::Extension.matches("firmware.bin.txt"));
}

// =============================================================================
// Parsing and display
// =============================================================================

#[test]
fn test_parse_rule_names() {
    assert_eq!("suffix".parse::<MatchRule>(), Ok(MatchRule::Suffix));
    assert_eq!("Extension".parse::<MatchRule>(), Ok(MatchRule::Extension));
    assert_eq!("ext".parse::<MatchRule>(), Ok(MatchRule::Extension));
}

#[test]
fn test_parse_unknown_rule_fails() {
    let err = "glob".parse::<MatchRule>().unwrap_err();
    assert!(err.contains("glob"));
}

#[test]
fn test_display_matches_parse() {
    for rule in [MatchRule::Suffix, MatchRule::Extension] {
        assert_eq!(rule.to_string().parse::<MatchRule>(), Ok(rule));
    }
}

// =============================================================================
// Stale firmware
// =============================================================================

#[test]
fn test_stale_includes_hidden_files() {
    assert!(is_stale_firmware(MatchRule::Suffix, ".old.bin"));
    assert!(is_stale_firmware(MatchRule::Suffix, "._firmware.bin"));
}

#[test]
fn test_stale_follows_rule() {
    assert!(is_stale_firmware(MatchRule::Suffix, "robin"));
    assert!(!is_stale_firmware(MatchRule::Extension, "robin"));
    assert!(!is_stale_firmware(MatchRule::Suffix, "DETAILS.TXT"));
    assert!(!is_stale_firmware(MatchRule::Suffix, "MBED.HTM"));
}
