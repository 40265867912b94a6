use serde::{Deserialize, Serialize};

use super::ResolverConfig;

/// How the digit run extracted from a mask name is written into the target name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierStyle {
    /// Strip the leading zeros, `000012` becomes `12` and `000` becomes `0`.
    #[default]
    Unpadded,
    /// Left-pad with zeros up to `width` digits. Longer runs are kept as they are.
    ZeroPadded {
        /// Minimum number of digits.
        width: usize,
    },
    /// Keep the digits exactly as they appear in the mask name.
    Verbatim,
}

impl IdentifierStyle {
    /// Renormalize a run of ASCII digits.
    pub fn normalize(&self, digits: &str) -> String {
        match self {
            IdentifierStyle::Verbatim => digits.to_string(),
            IdentifierStyle::Unpadded => unpadded(digits).to_string(),
            IdentifierStyle::ZeroPadded { width } => {
                format!("{:0>width$}", unpadded(digits), width = *width)
            }
        }
    }
}

fn unpadded(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Extract the canonical identifier from a mask file name.
///
/// The accepted shape is `<digits>[<suffix>].<mask_extension>` where `<suffix>` is one
/// of [`ResolverConfig::suffixes`]. Any other name yields `None`.
///
/// # Arguments
///
/// * `file_name` - The mask file name, without any directory component.
/// * `config` - The resolver configuration.
///
/// # Returns
///
/// The renormalized identifier, e.g. `12` for `000012_mask.png` with the default config.
pub fn parse_mask_identifier(file_name: &str, config: &ResolverConfig) -> Option<String> {
    parse_identifier(
        file_name,
        &config.mask_extension,
        &config.suffixes,
        config.identifier_style,
    )
}

/// Extract the canonical identifier from an image file name.
///
/// Only `<digits>.<image_extension>` names carry an identifier, so `000012.png` and
/// `12.png` both give `12` with the default config.
pub fn parse_image_identifier(file_name: &str, config: &ResolverConfig) -> Option<String> {
    parse_identifier(
        file_name,
        &config.image_extension,
        &[],
        config.identifier_style,
    )
}

fn parse_identifier(
    file_name: &str,
    extension: &str,
    suffixes: &[String],
    style: IdentifierStyle,
) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if ext != extension {
        return None;
    }

    let digits_end = stem
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(stem.len());
    if digits_end == 0 {
        return None;
    }

    let (digits, rest) = stem.split_at(digits_end);
    let suffix_ok = rest.is_empty() || suffixes.iter().any(|s| s == rest);
    if !suffix_ok {
        return None;
    }

    Some(style.normalize(digits))
}
