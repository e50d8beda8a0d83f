use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// Transport encoding used for every binary part sent to the model.
pub fn to_base64(data: &[u8]) -> String {
    BASE64.encode(data)
}

pub fn from_base64(text: &str) -> anyhow::Result<Vec<u8>> {
    Ok(BASE64.decode(text.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_payload_survives_transport_encoding() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(4099).collect();
        let encoded = to_base64(&payload);
        assert!(encoded.is_ascii());
        assert_eq!(from_base64(&encoded).unwrap(), payload);
    }

    #[test]
    fn rejects_non_base64_text() {
        assert!(from_base64("not base64!!").is_err());
    }
}
