use serde::{Deserialize, Deserializer, Serialize};

/// Most inspiration images a single draft may carry.
pub const MAX_INSPIRATION_IMAGES: usize = 5;

/// Descriptor of an uploaded inspiration image.
///
/// `url` is a transient display handle; it is persisted with the draft but is
/// not expected to survive a restart of whatever produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    #[serde(deserialize_with = "deserialize_file_id")]
    pub id: String,
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub url: String,
}

/// File ids were historically generated as numbers; accept both forms.
fn deserialize_file_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number for file id, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn numeric_id_is_read_as_string() {
        let json = r#"{"id":1736929292929,"name":"stage.jpg","size":2048,"type":"image/jpeg","url":"blob:1"}"#;

        let file: UploadedFile = serde_json::from_str(json).unwrap();

        assert_eq!(file.id, "1736929292929");
        assert_eq!(file.mime_type, "image/jpeg");
    }

    #[test]
    fn mime_type_is_written_as_type() {
        let file = UploadedFile {
            id: "a".to_string(),
            name: "flowers.png".to_string(),
            size: 10,
            mime_type: "image/png".to_string(),
            url: "blob:2".to_string(),
        };

        let json = serde_json::to_value(&file).unwrap();

        assert_eq!(json["type"], "image/png");
    }
}
