//! serde 辅助函数

use serde::{Deserialize, Deserializer};

/// 后端对缺省字段既可能省略，也可能显式写 `null`，两者都取默认值
///
/// 配合 `#[serde(default, deserialize_with = "null_as_default")]` 使用，
/// 单独的 `default` 只覆盖省略的情况。
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tagged {
        #[serde(default, deserialize_with = "null_as_default")]
        name: String,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    }

    #[test]
    fn null_and_missing_both_fall_back() {
        let from_null: Tagged = serde_json::from_value(json!({ "name": null, "tags": null })).unwrap();
        let from_missing: Tagged = serde_json::from_value(json!({})).unwrap();
        assert_eq!(from_null, from_missing);
        assert_eq!(from_null.name, "");

        let present: Tagged = serde_json::from_value(json!({ "name": "a", "tags": ["x"] })).unwrap();
        assert_eq!(present.tags, vec!["x"]);
    }
}
