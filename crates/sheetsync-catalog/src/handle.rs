//! Deterministic URL-safe handles for parent and individual products.
//!
//! Parent handles end in `-p` and individual handles end in `-i`, so the two
//! namespaces never overlap for the same brand and model.

use std::collections::HashMap;

use sheetsync_core::ProductRecord;
use unicode_normalization::UnicodeNormalization;

use crate::error::HandleError;

const PARENT_SUFFIX: &str = "-p";
const INDIVIDUAL_SUFFIX: &str = "-i";

/// Lowercase, trim and strip diacritics (NFD then drop combining marks).
fn fold(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}

/// Reduces free text to a handle fragment of `[a-z0-9-]`.
///
/// Whitespace runs become a single hyphen, `/` is dropped, `+` becomes
/// `plus`, every other character outside the alphabet is removed, and
/// repeated or edge hyphens are collapsed. Empty input yields an empty string.
///
/// ```
/// use sheetsync_catalog::handle::sanitize;
/// assert_eq!(sanitize("Pirelli P Zero™"), "pirelli-p-zero");
/// assert_eq!(sanitize("225/45 R17"), "22545-r17");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    let folded = fold(text);

    let mut out = String::with_capacity(folded.len());
    let mut in_whitespace = false;
    for c in folded.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        match c {
            '/' => {}
            '+' => out.push_str("plus"),
            'a'..='z' | '0'..='9' | '-' => out.push(c),
            _ => {}
        }
    }

    out.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Builds `{brand}-{model}-p`.
///
/// # Errors
///
/// Returns [`HandleError::InvalidInput`] if brand or model sanitizes to empty.
pub fn create_parent_handle(brand: &str, model: &str) -> Result<String, HandleError> {
    let (brand_part, model_part) = required_parts("parent", brand, model)?;
    Ok(format!("{brand_part}-{model_part}{PARENT_SUFFIX}"))
}

/// Builds `{brand}-{model}[-{size}][-{sku}]-i`.
///
/// Size and SKU are appended only when they sanitize to something non-empty.
/// When both are empty the handle degenerates to `{brand}-{model}-i`; see
/// [`find_duplicate_handles`] for detecting the resulting collisions.
///
/// # Errors
///
/// Returns [`HandleError::InvalidInput`] if brand or model sanitizes to empty.
pub fn create_individual_handle(
    brand: &str,
    model: &str,
    size: &str,
    sku: &str,
) -> Result<String, HandleError> {
    let (brand_part, model_part) = required_parts("individual", brand, model)?;

    let mut handle = format!("{brand_part}-{model_part}");
    for extra in [sanitize(size), sanitize(sku)] {
        if !extra.is_empty() {
            handle.push('-');
            handle.push_str(&extra);
        }
    }
    handle.push_str(INDIVIDUAL_SUFFIX);
    Ok(handle)
}

fn required_parts(
    kind: &'static str,
    brand: &str,
    model: &str,
) -> Result<(String, String), HandleError> {
    let brand_part = sanitize(brand);
    let model_part = sanitize(model);
    if brand_part.is_empty() || model_part.is_empty() {
        return Err(HandleError::InvalidInput {
            kind,
            brand: brand.to_string(),
            model: model.to_string(),
        });
    }
    Ok((brand_part, model_part))
}

/// Strips a trailing `-p` or `-i`, recovering the shared brand-model stem.
#[must_use]
pub fn extract_base_handle(handle: &str) -> &str {
    handle
        .strip_suffix(PARENT_SUFFIX)
        .or_else(|| handle.strip_suffix(INDIVIDUAL_SUFFIX))
        .unwrap_or(handle)
}

#[must_use]
pub fn is_parent_handle(handle: &str) -> bool {
    handle.ends_with(PARENT_SUFFIX)
}

#[must_use]
pub fn is_individual_handle(handle: &str) -> bool {
    handle.ends_with(INDIVIDUAL_SUFFIX)
}

/// Comparison key for free text: folded like [`sanitize`] but keeping words
/// separated by single spaces instead of hyphenating them.
#[must_use]
pub fn normalize_for_comparison(text: &str) -> String {
    fold(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns primary-row handles that occur more than once, in first-seen order.
///
/// Variant rows legitimately repeat their parent's handle and are ignored.
#[must_use]
pub fn find_duplicate_handles(records: &[ProductRecord]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for record in records.iter().filter(|r| r.is_primary()) {
        let count = counts.entry(record.handle.as_str()).or_insert(0);
        if *count == 0 {
            order.push(record.handle.as_str());
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter(|handle| counts.get(handle).copied().unwrap_or(0) > 1)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_symbols() {
        assert_eq!(sanitize("Pirelli P Zero™"), "pirelli-p-zero");
    }

    #[test]
    fn sanitize_strips_accents() {
        assert_eq!(sanitize("Neumático Ñandú"), "neumatico-nandu");
    }

    #[test]
    fn sanitize_handles_slash_and_plus() {
        assert_eq!(sanitize("225/45R17"), "22545r17");
        assert_eq!(sanitize("Cinturato P7+"), "cinturato-p7plus");
    }

    #[test]
    fn sanitize_collapses_hyphens_and_trims() {
        assert_eq!(sanitize("  --Pilot   Sport -- 4S--  "), "pilot-sport-4s");
    }

    #[test]
    fn sanitize_empty_is_empty() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   "), "");
        assert_eq!(sanitize("™®"), "");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "Pirelli P Zero™",
            "  Michelin  Pilot Sport 4S ",
            "225/45 R17 94Y XL",
            "Cinturato P7+ Run-Flat",
            "Ñ-ñ--é",
            "",
            "---",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn parent_handle_basic() {
        assert_eq!(
            create_parent_handle("Michelin", "Pilot Sport 4S").unwrap(),
            "michelin-pilot-sport-4s-p"
        );
    }

    #[test]
    fn parent_handle_rejects_empty_parts() {
        assert!(matches!(
            create_parent_handle("", "X"),
            Err(HandleError::InvalidInput { .. })
        ));
        assert!(matches!(
            create_parent_handle("X", ""),
            Err(HandleError::InvalidInput { .. })
        ));
        assert!(create_parent_handle("™", "X").is_err());
    }

    #[test]
    fn individual_handle_includes_size_and_sku() {
        assert_eq!(
            create_individual_handle("Acme", "X1", "225/45R17", "C-100").unwrap(),
            "acme-x1-22545r17-c-100-i"
        );
    }

    #[test]
    fn individual_handle_skips_empty_parts() {
        assert_eq!(
            create_individual_handle("Acme", "X1", "", "C100").unwrap(),
            "acme-x1-c100-i"
        );
        assert_eq!(
            create_individual_handle("Acme", "X1", "10", "").unwrap(),
            "acme-x1-10-i"
        );
        assert_eq!(
            create_individual_handle("Acme", "X1", "", "").unwrap(),
            "acme-x1-i"
        );
    }

    #[test]
    fn individual_handle_rejects_empty_brand() {
        let err = create_individual_handle(" ", "X1", "10", "C1").unwrap_err();
        assert!(err.to_string().contains("individual"));
    }

    #[test]
    fn base_handle_and_suffix_checks() {
        assert_eq!(extract_base_handle("michelin-pilot-sport-4s-p"), "michelin-pilot-sport-4s");
        assert_eq!(extract_base_handle("acme-x1-10-i"), "acme-x1-10");
        assert_eq!(extract_base_handle("acme-x1"), "acme-x1");
        assert!(is_parent_handle("acme-x1-p"));
        assert!(!is_parent_handle("acme-x1-i"));
        assert!(is_individual_handle("acme-x1-i"));
    }

    #[test]
    fn normalize_for_comparison_keeps_spaces() {
        assert_eq!(
            normalize_for_comparison("  Pilot   Spórt\t4S "),
            "pilot sport 4s"
        );
    }

    #[test]
    fn duplicate_handles_ignore_variant_rows() {
        let primary = |handle: &str| ProductRecord {
            handle: handle.to_string(),
            title: "T".to_string(),
            ..ProductRecord::default()
        };
        let variant = ProductRecord {
            handle: "acme-x1-p".to_string(),
            ..ProductRecord::default()
        };
        let records = vec![
            primary("acme-x1-p"),
            variant,
            primary("acme-x1-i"),
            primary("acme-x1-i"),
            primary("acme-x1-i"),
        ];
        assert_eq!(find_duplicate_handles(&records), vec!["acme-x1-i".to_string()]);
    }
}
