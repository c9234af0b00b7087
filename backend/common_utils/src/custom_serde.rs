//! Custom serialization/deserialization implementations.

/// Canonical JSON serialization.
///
/// Compact output with object keys sorted lexicographically at every depth. The byte
/// output does not depend on map iteration order, so it stays stable whether or not
/// `serde_json/preserve_order` is enabled somewhere in the dependency graph.
pub mod canonical_json {
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
    use serde_json::Value;

    struct Canonical<'a>(&'a Value);

    impl Serialize for Canonical<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self.0 {
                Value::Object(map) => {
                    let mut entries: Vec<_> = map.iter().collect();
                    entries.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));

                    let mut state = serializer.serialize_map(Some(entries.len()))?;
                    for (key, value) in entries {
                        state.serialize_entry(key, &Canonical(value))?;
                    }
                    state.end()
                }
                Value::Array(items) => {
                    let mut state = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        state.serialize_element(&Canonical(item))?;
                    }
                    state.end()
                }
                scalar => scalar.serialize(serializer),
            }
        }
    }

    /// Serialize `value` to its canonical string form
    pub fn to_string(value: &Value) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Canonical(value))
    }

    #[cfg(test)]
    mod tests {
        use serde_json::json;

        #[test]
        fn test_keys_are_sorted_at_every_depth() {
            let value = json!({
                "zeta": 1,
                "alpha": { "b": true, "a": null },
                "mid": [ { "y": "2", "x": "1" } ]
            });

            assert_eq!(
                super::to_string(&value).expect("serialization failed"),
                r#"{"alpha":{"a":null,"b":true},"mid":[{"x":"1","y":"2"}],"zeta":1}"#
            );
        }

        #[test]
        fn test_scalars_match_serde_json() {
            for value in [json!(42), json!("text \"quoted\""), json!(1.5), json!(null)] {
                assert_eq!(
                    super::to_string(&value).expect("serialization failed"),
                    serde_json::to_string(&value).expect("serialization failed")
                );
            }
        }
    }
}

/// Use with `#[serde(serialize_with = "exposed_secret::serialize")]` on a `Secret` field
/// that has to go out on the wire in clear. Debug output stays masked.
pub mod exposed_secret {
    use hyperswitch_masking::{PeekInterface, Secret};
    use serde::{Serialize, Serializer};

    pub fn serialize<T, S>(value: &Secret<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        value.peek().serialize(serializer)
    }
}

/// [`exposed_secret`] for optional fields
pub mod exposed_optional_secret {
    use hyperswitch_masking::{PeekInterface, Secret};
    use serde::{Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Secret<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        value.as_ref().map(|secret| secret.peek()).serialize(serializer)
    }
}
