//! Merging of included values
//!
//! Values contributed by one directive are combined in order:
//! - a single value is used unchanged, whatever its shape
//! - sequences are concatenated
//! - mappings are merged shallowly, later keys overwrite earlier ones
//! - `null` contributions are skipped when there is more than one value
//!
//! Mixing sequences with mappings, or merging scalars, is an error.

use serde_yaml::{Mapping, Value};

use crate::error::{ConfigError, ConfigResult};

/// Merge contributed values in order; no values yields `null`
pub fn merge_items(items: Vec<Value>) -> ConfigResult<Value> {
    if items.len() <= 1 {
        return Ok(items.into_iter().next().unwrap_or(Value::Null));
    }

    let mut merged: Option<Value> = None;

    for (index, item) in items.into_iter().enumerate() {
        if item.is_null() {
            continue;
        }

        merged = Some(match (merged, item) {
            (None, item @ (Value::Sequence(_) | Value::Mapping(_))) => item,
            (Some(Value::Sequence(mut acc)), Value::Sequence(seq)) => {
                acc.extend(seq);
                Value::Sequence(acc)
            }
            (Some(Value::Mapping(mut acc)), Value::Mapping(map)) => {
                merge_mapping(&mut acc, map);
                Value::Mapping(acc)
            }
            (None, other) => {
                return Err(ConfigError::MergeShape {
                    expected: "sequence or mapping",
                    found: shape_name(&other),
                    index,
                })
            }
            (Some(acc), other) => {
                return Err(ConfigError::MergeShape {
                    expected: shape_name(&acc),
                    found: shape_name(&other),
                    index,
                })
            }
        });
    }

    Ok(merged.unwrap_or(Value::Null))
}

fn merge_mapping(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        base.insert(key, value);
    }
}

/// Human readable name of a value's shape, for error messages
pub fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_no_items_is_null() {
        assert_eq!(merge_items(vec![]).unwrap(), Value::Null);
    }

    #[test]
    fn test_single_item_unchanged() {
        assert_eq!(merge_items(vec![yaml("42")]).unwrap(), yaml("42"));
        assert_eq!(merge_items(vec![Value::Null]).unwrap(), Value::Null);
        assert_eq!(merge_items(vec![yaml("[1, 2]")]).unwrap(), yaml("[1, 2]"));
    }

    #[test]
    fn test_mappings_later_wins() {
        let merged = merge_items(vec![yaml("{x: 1, y: 1}"), yaml("{y: 2, z: 3}")]).unwrap();
        assert_eq!(merged, yaml("{x: 1, y: 2, z: 3}"));
    }

    #[test]
    fn test_mapping_key_keeps_first_position() {
        let merged = merge_items(vec![yaml("{a: 1, b: 1}"), yaml("{a: 2}")]).unwrap();
        let keys: Vec<&Value> = merged.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec![&Value::from("a"), &Value::from("b")]);
    }

    #[test]
    fn test_mapping_merge_is_shallow() {
        let merged = merge_items(vec![yaml("{db: {host: a, port: 1}}"), yaml("{db: {host: b}}")]).unwrap();
        assert_eq!(merged, yaml("{db: {host: b}}"));
    }

    #[test]
    fn test_sequences_concatenate() {
        let merged = merge_items(vec![yaml("[1, 2]"), yaml("[3]"), yaml("[]")]).unwrap();
        assert_eq!(merged, yaml("[1, 2, 3]"));
    }

    #[test]
    fn test_nulls_skipped() {
        let merged = merge_items(vec![Value::Null, yaml("{a: 1}"), Value::Null]).unwrap();
        assert_eq!(merged, yaml("{a: 1}"));
        assert_eq!(merge_items(vec![Value::Null, Value::Null]).unwrap(), Value::Null);
    }

    #[test]
    fn test_mixed_shapes_rejected() {
        let result = merge_items(vec![yaml("[1]"), yaml("{a: 1}")]);
        match result {
            Err(ConfigError::MergeShape {
                expected,
                found,
                index,
            }) => {
                assert_eq!(expected, "sequence");
                assert_eq!(found, "mapping");
                assert_eq!(index, 1);
            }
            other => panic!("expected MergeShape, got {:?}", other),
        }
    }

    #[test]
    fn test_scalars_rejected() {
        let result = merge_items(vec![yaml("a"), yaml("b")]);
        assert!(matches!(
            result,
            Err(ConfigError::MergeShape {
                found: "string",
                index: 0,
                ..
            })
        ));
    }
}
