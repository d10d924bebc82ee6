// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Firmware file name predicates.
//!
//! Both the candidate scan and the stale-file cleanup go through
//! [`MatchRule::matches`], so changing what counts as firmware is a
//! one-line change here.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Characters a firmware file name must end with.
pub const FIRMWARE_SUFFIX: &str = "bin";

/// How file names are matched against [`FIRMWARE_SUFFIX`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchRule {
    /// Literal suffix: the last three characters are `bin`.
    ///
    /// This also matches names without an extension such as `robin`.
    #[default]
    Suffix,
    /// Path extension is `bin` (ASCII case-insensitive).
    Extension,
}

impl MatchRule {
    /// Check whether `name` is a firmware file name under this rule.
    pub fn matches(self, name: &str) -> bool {
        match self {
            MatchRule::Suffix => name.ends_with(FIRMWARE_SUFFIX),
            MatchRule::Extension => Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(FIRMWARE_SUFFIX)),
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::Suffix => f.write_str("suffix"),
            MatchRule::Extension => f.write_str("extension"),
        }
    }
}

impl FromStr for MatchRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "suffix" => Ok(MatchRule::Suffix),
            "extension" | "ext" => Ok(MatchRule::Extension),
            other => Err(format!(
                "unknown match rule '{}' (expected 'suffix' or 'extension')",
                other
            )),
        }
    }
}

/// Check whether a destination entry is a stale firmware image to remove.
///
/// Hidden files are NOT excluded: `.old.bin` is removed like any other
/// image. Whether dotfiles should be skipped is still undecided.
pub fn is_stale_firmware(rule: MatchRule, name: &str) -> bool {
    rule.matches(name)
}
