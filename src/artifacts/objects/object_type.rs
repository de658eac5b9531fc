use crate::artifacts::core::error::TwigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Split a stored object into its type tag and payload
    ///
    /// The header is everything up to the first NUL byte.
    pub fn split_header(raw: &[u8]) -> anyhow::Result<(ObjectType, &[u8])> {
        let separator = raw
            .iter()
            .position(|&byte| byte == b'\0')
            .ok_or_else(|| TwigError::CorruptObject("missing type header".to_string()))?;

        let tag = std::str::from_utf8(&raw[..separator])
            .map_err(|_| TwigError::CorruptObject("type header is not UTF-8".to_string()))?;

        Ok((ObjectType::try_from(tag)?, &raw[separator + 1..]))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(TwigError::CorruptObject(format!("unknown object type {value:?}")).into()),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
