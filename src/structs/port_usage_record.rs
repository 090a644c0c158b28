use serde::{Deserialize, Deserializer, Serialize};

/// One exposed container port and what it is used for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortUsageRecord {
    #[serde(deserialize_with = "deserialize_port")]
    pub internal_port: u16,
    #[serde(default)]
    pub usage_purpose: String,
}

impl PortUsageRecord {
    pub fn new(internal_port: u16, usage_purpose: &str) -> Self {
        Self {
            internal_port,
            usage_purpose: usage_purpose.to_string(),
        }
    }
}

// The portal has been seen sending ports both as numbers and as numeric strings.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Number(u64),
        Text(String),
    }

    let raw = RawPort::deserialize(deserializer)?;
    let value = match raw {
        RawPort::Number(n) => n,
        RawPort::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid port '{}'", s)))?,
    };
    match u16::try_from(value) {
        Ok(port) if port >= 1 => Ok(port),
        _ => Err(serde::de::Error::custom(format!("port {} out of range", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_string_ports() {
        let record: PortUsageRecord =
            serde_json::from_str(r#"{"internalPort":"8080","usagePurpose":"web"}"#).unwrap();
        assert_eq!(record, PortUsageRecord::new(8080, "web"));
    }

    #[test]
    fn rejects_port_zero() {
        let result = serde_json::from_str::<PortUsageRecord>(r#"{"internalPort":0,"usagePurpose":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_port_as_integer() {
        let json = serde_json::to_value(PortUsageRecord::new(22, "ssh")).unwrap();
        assert_eq!(json, serde_json::json!({"internalPort": 22, "usagePurpose": "ssh"}));
    }
}
