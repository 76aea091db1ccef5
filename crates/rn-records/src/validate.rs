//! Configuration validation logic.

use crate::schema::PipelineConfig;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_config(config: &PipelineConfig) -> Result<(), ValidationError> {
    if config.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    if let Some(c) = config
        .canonical
        .strip_chars
        .chars()
        .find(|c| c.is_whitespace())
    {
        return Err(ValidationError::InvalidValue {
            field: "canonical.strip_chars".to_string(),
            value: format!("{c:?}"),
            reason: "whitespace is always collapsed, never stripped".to_string(),
        });
    }

    if let Some(c) = config
        .canonical
        .strip_chars
        .chars()
        .find(|c| rn_names::normalized_strip_char(*c).is_none())
    {
        return Err(ValidationError::InvalidValue {
            field: "canonical.strip_chars".to_string(),
            value: format!("{c:?}"),
            reason: "NFKC expands it, so normalized labels never contain it".to_string(),
        });
    }

    for (raw, standardized) in &config.track_types.0 {
        if standardized.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("track_types '{raw}'"),
                value: standardized.clone(),
                reason: "standardized type must not be empty".to_string(),
            });
        }
    }

    if config.rail_filter.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "rail_filter".to_string(),
            value: config.rail_filter.clone(),
            reason: "must not be empty".to_string(),
        });
    }

    if !config.gazetteer_delimiter.is_ascii() {
        return Err(ValidationError::InvalidValue {
            field: "gazetteer_delimiter".to_string(),
            value: config.gazetteer_delimiter.to_string(),
            reason: "must be a single ASCII character".to_string(),
        });
    }

    Ok(())
}
