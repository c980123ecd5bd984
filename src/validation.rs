//! Structural validation of model trees
//!
//! The [`Diagnostician`] walks an object through the registry and the
//! generic dispatcher and reports every multiplicity or datatype problem
//! it finds, instead of stopping at the first one.

use crate::datatypes;
use crate::error::{Error, Result, ValidationError};
use crate::model::{FesObject, MixedEntry, ModelObject, Value};
use crate::registry::{fes20, FeatureDescriptor, FeatureKind, Registry, UNBOUNDED, UNSPECIFIED};
use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Suspicious but allowed
    Warning,
    /// The tree violates the schema
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One problem found in a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Location, e.g. `/FilterType/comparisonOpsGroup[0]/escapeChar`
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.path, self.message)
    }
}

/// Validates model trees against a registry
#[derive(Debug, Clone)]
pub struct Diagnostician<'r> {
    registry: &'r Registry,
    max_depth: Option<usize>,
}

impl Diagnostician<'static> {
    /// Diagnostician over the FES 2.0 package
    pub fn fes20() -> Result<Self> {
        Ok(Self::new(fes20()?))
    }
}

impl<'r> Diagnostician<'r> {
    /// Diagnostician over `registry`
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            max_depth: None,
        }
    }

    /// Stop descending below `depth` nested objects
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// All diagnostics for `object` and its contents, in tree order
    pub fn validate(&self, object: &dyn ModelObject) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let path = format!("/{}", object.class_name());
        self.validate_object(object, &path, 0, &mut diagnostics);
        tracing::debug!(
            class = object.class_name(),
            diagnostics = diagnostics.len(),
            "validated object tree"
        );
        diagnostics
    }

    /// The first error diagnostic as [`Error::Validation`]
    pub fn check(&self, object: &dyn ModelObject) -> Result<()> {
        match self
            .validate(object)
            .into_iter()
            .find(|d| d.severity == Severity::Error)
        {
            Some(diagnostic) => Err(Error::Validation(
                ValidationError::new(diagnostic.message)
                    .with_path(diagnostic.path)
                    .with_component(object.class_name()),
            )),
            None => Ok(()),
        }
    }

    /// True when no error diagnostics are reported
    pub fn is_valid(&self, object: &dyn ModelObject) -> bool {
        self.check(object).is_ok()
    }

    fn validate_object(&self, object: &dyn ModelObject, path: &str, depth: usize, out: &mut Vec<Diagnostic>) {
        if self.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let class = match self.registry.class(object.class_id()) {
            Ok(class) => class,
            Err(err) => {
                out.push(error(path, err.to_string()));
                return;
            }
        };
        for feature in class.features() {
            let value = match object.get_feature(feature.id, false, true) {
                Ok(value) => value,
                Err(err) => {
                    out.push(error(path, err.to_string()));
                    continue;
                }
            };
            let feature_path = format!("{}/{}", path, feature.name);
            // Read-only views repeat what their group already holds
            if feature.is_derived() && !feature.is_changeable() {
                continue;
            }
            self.check_bounds(class.name.as_str(), feature, &value, &feature_path, out);
            if feature.is_derived() {
                continue;
            }
            if feature.is_many() && feature.flags.unique && !matches!(value, Value::Group(_) | Value::Mixed(_)) {
                check_unique(class.name.as_str(), feature, &value, &feature_path, out);
            }
            if feature.kind == FeatureKind::Attribute {
                self.check_data_values(feature, &value, &feature_path, out);
            }
            self.descend(&value, &feature_path, feature.is_many(), depth, out);
        }
    }

    fn check_bounds(
        &self,
        class: &str,
        feature: &FeatureDescriptor,
        value: &Value,
        path: &str,
        out: &mut Vec<Diagnostic>,
    ) {
        let count = value_count(value);
        let lower = usize::try_from(feature.lower_bound).unwrap_or(0);
        if count < lower {
            let message = if feature.is_many() {
                format!(
                    "The feature '{}' of '{}' with {} values must have at least {} values",
                    feature.name, class, count, lower
                )
            } else {
                format!("The required feature '{}' of '{}' must be set", feature.name, class)
            };
            out.push(error(path, message));
        }
        if feature.upper_bound != UNBOUNDED && feature.upper_bound != UNSPECIFIED {
            let upper = usize::try_from(feature.upper_bound).unwrap_or(0);
            if count > upper {
                out.push(error(
                    path,
                    format!(
                        "The feature '{}' of '{}' with {} values may have at most {} values",
                        feature.name, class, count, upper
                    ),
                ));
            }
        }
    }

    fn check_data_values(&self, feature: &FeatureDescriptor, value: &Value, path: &str, out: &mut Vec<Diagnostic>) {
        let items: Vec<&Value> = match value {
            Value::Null => Vec::new(),
            Value::List(items) if feature.is_many() => items.iter().collect(),
            other => vec![other],
        };
        for (index, item) in items.into_iter().enumerate() {
            if matches!(item, Value::Group(_) | Value::Mixed(_) | Value::Any(_) | Value::Null) {
                continue;
            }
            if let Err(err) = datatypes::validate_typed(self.registry, &feature.type_ref, item) {
                let item_path = if feature.is_many() {
                    format!("{}[{}]", path, index)
                } else {
                    path.to_string()
                };
                out.push(error(
                    &item_path,
                    format!("The value '{}' of feature '{}' is invalid: {}", item, feature.name, err),
                ));
            }
        }
    }

    fn descend(&self, value: &Value, path: &str, many: bool, depth: usize, out: &mut Vec<Diagnostic>) {
        match value {
            Value::Object(object) => self.validate_child(object, path, depth, out),
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Object(object) = item {
                        self.validate_child(object, &format!("{}[{}]", path, index), depth, out);
                    }
                }
            }
            Value::Group(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    if let Some(object) = entry.as_object() {
                        let entry_path = if many || entries.len() > 1 {
                            format!("{}[{}]", path, index)
                        } else {
                            path.to_string()
                        };
                        self.validate_child(object, &entry_path, depth, out);
                    }
                }
            }
            Value::Mixed(entries) => {
                for (index, entry) in entries.iter().enumerate() {
                    if let MixedEntry::Element(element) = entry {
                        if let Some(object) = element.as_object() {
                            self.validate_child(object, &format!("{}[{}]", path, index), depth, out);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn validate_child(&self, object: &FesObject, path: &str, depth: usize, out: &mut Vec<Diagnostic>) {
        let child_path = format!("{}/{}", path, object.class_name());
        self.validate_object(object, &child_path, depth + 1, out);
    }
}

fn error(path: &str, message: String) -> Diagnostic {
    Diagnostic {
        severity: Severity::Error,
        path: path.to_string(),
        message,
    }
}

fn value_count(value: &Value) -> usize {
    match value {
        Value::Null => 0,
        Value::List(items) => items.len(),
        Value::Group(entries) => entries.len(),
        Value::Mixed(entries) => entries.len(),
        Value::Map(map) => map.len(),
        _ => 1,
    }
}

fn check_unique(class: &str, feature: &FeatureDescriptor, value: &Value, path: &str, out: &mut Vec<Diagnostic>) {
    let Value::List(items) = value else {
        return;
    };
    for (index, item) in items.iter().enumerate() {
        if items[..index].contains(item) {
            out.push(Diagnostic {
                severity: Severity::Warning,
                path: format!("{}[{}]", path, index),
                message: format!(
                    "The feature '{}' of '{}' has a duplicate value at index {}",
                    feature.name, class, index
                ),
            });
        }
    }
}

/// All diagnostics for an object, against the FES 2.0 package
pub fn validate(object: &dyn ModelObject) -> Result<Vec<Diagnostic>> {
    Ok(Diagnostician::fes20()?.validate(object))
}

/// First error of an object, against the FES 2.0 package
pub fn check(object: &dyn ModelObject) -> Result<()> {
    Diagnostician::fes20()?.check(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::registry::ids::{measure_type, property_is_like_type};

    #[test]
    fn test_missing_required_features() {
        let like = PropertyIsLikeType::default();
        let diagnostics = validate(&like).unwrap();
        let paths: Vec<&str> = diagnostics.iter().map(|d| d.path.as_str()).collect();
        assert!(paths.contains(&"/PropertyIsLikeType/expressionGroup"));
        assert!(paths.contains(&"/PropertyIsLikeType/escapeChar"));
        assert!(paths.contains(&"/PropertyIsLikeType/wildCard"));
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Error));
        let escape = diagnostics
            .iter()
            .find(|d| d.path.ends_with("escapeChar"))
            .unwrap();
        assert_eq!(
            escape.message,
            "The required feature 'escapeChar' of 'PropertyIsLikeType' must be set"
        );
    }

    #[test]
    fn test_check_returns_first_error() {
        let mut like = PropertyIsLikeType::default();
        like.set_feature(property_is_like_type::ESCAPE_CHAR, Value::from("\\")).unwrap();
        let err = check(&like).unwrap_err();
        match err {
            Error::Validation(v) => {
                assert!(v.message.contains("expressionGroup"));
                assert_eq!(v.path.as_deref(), Some("/PropertyIsLikeType/expressionGroup"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_facet_failures_are_reported() {
        let mut measure = MeasureType::default();
        measure.set_feature(measure_type::UOM, Value::from("not a uom")).unwrap();
        let diagnostics = validate(&measure).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "/MeasureType/uom");
        assert!(diagnostics[0].message.contains("not a uom"));

        measure.set_feature(measure_type::UOM, Value::from("m")).unwrap();
        assert!(validate(&measure).unwrap().is_empty());
    }

    #[test]
    fn test_descends_into_contents() {
        let sort_by = SortByType::default().with_property(SortPropertyType::default());
        let diagnostics = validate(&sort_by).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "/SortByType/sortProperty[0]/SortPropertyType/valueReference");
    }

    #[test]
    fn test_max_depth_stops_descent() {
        let sort_by = SortByType::default().with_property(SortPropertyType::default());
        let diagnostician = Diagnostician::fes20().unwrap().with_max_depth(0);
        assert!(diagnostician.validate(&sort_by).is_empty());
    }

    #[test]
    fn test_duplicates_are_warnings() {
        let mut query = AbstractAdhocQueryExpressionType::default();
        query.aliases = vec!["a".into(), "a".into()];
        let diagnostics = Diagnostician::fes20().unwrap().validate(&query);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(Diagnostician::fes20().unwrap().is_valid(&query));
    }

    #[test]
    fn test_ncname_items() {
        let mut query = AbstractAdhocQueryExpressionType::default();
        query.aliases = vec!["ok".into(), "1bad".into()];
        let diagnostics = validate(&query).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "/AbstractAdhocQueryExpressionType/aliases[1]");
    }
}
