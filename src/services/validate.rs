//! Write-time field validation shared by the catalog services.

use url::Url;

use super::error::{CatalogError, Result};
use crate::choices::Choices;

/// Trim a required text field, rejecting blank input.
pub fn required_text(entity: &'static str, field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::MissingField { entity, field });
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, mapping blank input to None.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

/// Check membership of a choice domain, returning the matched variant.
pub fn choice<C: Choices>(value: &str) -> Result<C> {
    C::from_value(value).ok_or_else(|| CatalogError::InvalidChoice {
        domain: C::DOMAIN,
        value: value.to_string(),
    })
}

pub fn optional_choice<C: Choices>(value: Option<&str>) -> Result<Option<C>> {
    match value {
        Some(v) => choice::<C>(v).map(Some),
        None => Ok(None),
    }
}

/// Check every element of a list field against its choice domain.
pub fn choice_list<C: Choices>(values: &[String]) -> Result<Vec<C>> {
    values.iter().map(|v| choice::<C>(v)).collect()
}

/// Require an absolute URL (scheme and all).
pub fn absolute_url(entity: &'static str, field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if Url::parse(trimmed).is_err() {
        return Err(CatalogError::InvalidUrl {
            entity,
            field,
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

pub fn optional_absolute_url(
    entity: &'static str,
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>> {
    match optional_text(value) {
        Some(v) => absolute_url(entity, field, &v).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choices::{PreProcessingScript, TableType};

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(
            required_text("projects", "name", "  Sales  ").unwrap(),
            "Sales"
        );
        let err = required_text("projects", "name", "   ").unwrap_err();
        assert_eq!(err.to_string(), "projects.name must not be blank");
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(Some("  notes ")), Some("notes".to_string()));
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn choice_rejects_out_of_domain_values() {
        assert_eq!(
            choice::<TableType>("STANDARD_TABLE").unwrap(),
            TableType::StandardTable
        );
        let err = choice::<TableType>("BOGUS").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_FAILED");
    }

    #[test]
    fn choice_list_checks_every_element() {
        let ok = vec!["DROP_EMPTY_ROWS".to_string(), "DEDUPLICATE".to_string()];
        assert_eq!(choice_list::<PreProcessingScript>(&ok).unwrap().len(), 2);

        let bad = vec!["DROP_EMPTY_ROWS".to_string(), "rm -rf".to_string()];
        assert!(choice_list::<PreProcessingScript>(&bad).is_err());
    }

    #[test]
    fn absolute_url_rejects_relative_paths() {
        assert!(absolute_url("prep_flows", "filepath", "https://prep.example.com/f/1").is_ok());
        assert!(absolute_url("prep_flows", "filepath", "/flows/1").is_err());
        assert!(absolute_url("prep_flows", "filepath", "not a url").is_err());
    }
}
