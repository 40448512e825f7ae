use crate::utils::error::{DeployError, Result};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use url::Url;

static DNS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

static DNS_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
});

static RFC1035_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]([-a-z0-9]*[a-z0-9])?$").unwrap());

// [registry[:port]/]path, path components per the distribution reference grammar
static IMAGE_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?)*(:[0-9]+)?/)?",
        r"[a-z0-9]+((\.|_|__|-+)[a-z0-9]+)*(/[a-z0-9]+((\.|_|__|-+)[a-z0-9]+)*)*$",
    ))
    .unwrap()
});

static IMAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}$").unwrap());

// Kubernetes resource.Quantity, without the exponent forms (1e3)
static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)?(m|k|M|G|T|P|E|Ki|Mi|Gi|Ti|Pi|Ei)?$").unwrap()
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> DeployError {
    DeployError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str, allowed_schemes: &[&str]) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => {
            if allowed_schemes.contains(&url.scheme()) {
                Ok(())
            } else {
                Err(invalid(
                    field_name,
                    url_str,
                    format!(
                        "Unsupported URL scheme: {}. Allowed schemes: {}",
                        url.scheme(),
                        allowed_schemes.join(", ")
                    ),
                ))
            }
        }
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Rejects empty values and any embedded whitespace.
pub fn validate_token(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    if value.chars().any(char::is_whitespace) {
        return Err(invalid(field_name, value, "Value cannot contain whitespace"));
    }
    Ok(())
}

/// For values placed inside double-quoted YAML scalars.
pub fn validate_quoted_scalar(field_name: &str, value: &str) -> Result<()> {
    validate_token(field_name, value)?;
    if value.contains(['"', '\\']) {
        return Err(invalid(
            field_name,
            value,
            "Value cannot contain '\"' or '\\'",
        ));
    }
    Ok(())
}

/// RFC 1123 label, as required for namespaces and most object names.
pub fn validate_dns_label(field_name: &str, value: &str) -> Result<()> {
    if value.len() > 63 {
        return Err(invalid(field_name, value, "Must be at most 63 characters"));
    }
    if !DNS_LABEL.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Must consist of lowercase alphanumeric characters or '-', and start and end with an alphanumeric character",
        ));
    }
    Ok(())
}

/// RFC 1123 subdomain, the rule for Deployment names.
pub fn validate_dns_subdomain(field_name: &str, value: &str) -> Result<()> {
    if value.len() > 253 {
        return Err(invalid(field_name, value, "Must be at most 253 characters"));
    }
    if !DNS_SUBDOMAIN.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Must be lowercase alphanumeric labels separated by '.', each label may contain '-'",
        ));
    }
    Ok(())
}

/// RFC 1035 label, the stricter rule Services follow (must start with a letter).
pub fn validate_rfc1035_label(field_name: &str, value: &str) -> Result<()> {
    validate_dns_label(field_name, value)?;
    if !RFC1035_LABEL.is_match(value) {
        return Err(invalid(field_name, value, "Must start with a lowercase letter"));
    }
    Ok(())
}

pub fn validate_image_ref(field_name: &str, value: &str) -> Result<()> {
    if value.len() > 255 || !IMAGE_REF.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Not a valid image name (examples: nginx, ghcr.io/team/worker, registry:5000/app)",
        ));
    }
    Ok(())
}

pub fn validate_image_tag(field_name: &str, value: &str) -> Result<()> {
    if !IMAGE_TAG.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Must match [A-Za-z0-9_][A-Za-z0-9_.-]{0,127}",
        ));
    }
    Ok(())
}

pub fn validate_quantity(field_name: &str, value: &str) -> Result<()> {
    if !QUANTITY.is_match(value) {
        return Err(invalid(
            field_name,
            value,
            "Not a valid resource quantity (examples: 500m, 1, 256Mi, 1.5Gi)",
        ));
    }
    Ok(())
}

pub fn parse_number<T: FromStr>(field_name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| invalid(field_name, value, "Not a valid number"))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(invalid(
            field_name,
            value,
            format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        ));
    }
    Ok(())
}
