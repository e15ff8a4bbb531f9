//! Payload to transaction-data encoding.

use serde::Deserialize;
use thiserror::Error;

/// Inscription used when the operator leaves the payload empty.
pub const DEFAULT_PAYLOAD: &str =
    r#"data:,{"a":"NextInscription","p":"nirc-20","op":"mint","tick":"niux","amt":"100000000"}"#;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("encoded data {hex} has an odd number of hex digits")]
    OddLength { hex: String },

    #[error("encoded data is not valid hex: {0}")]
    InvalidHex(String),
}

/// How characters become hex digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PayloadEncoding {
    /// Hex of each character's code point, unpadded. Identical to `Utf8`
    /// for ASCII text in 0x10..=0x7f.
    #[default]
    CodePoint,
    /// Hex of the UTF-8 bytes, two digits per byte.
    Utf8,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HexEncoder {
    encoding: PayloadEncoding,
}

impl HexEncoder {
    pub fn new(encoding: PayloadEncoding) -> Self {
        Self { encoding }
    }

    /// `"0x"` followed by the payload digits. Empty input gives `"0x"`.
    pub fn encode(&self, text: &str) -> String {
        match self.encoding {
            PayloadEncoding::CodePoint => {
                let mut out = String::with_capacity(2 + text.len() * 2);
                out.push_str("0x");
                for c in text.chars() {
                    out.push_str(&format!("{:x}", c as u32));
                }
                out
            }
            PayloadEncoding::Utf8 => format!("0x{}", hex::encode(text.as_bytes())),
        }
    }

    /// Bytes carried by the transaction for `text`.
    pub fn to_bytes(&self, text: &str) -> Result<Vec<u8>, EncodeError> {
        let encoded = self.encode(text);
        let digits = &encoded[2..];
        if digits.len() % 2 != 0 {
            return Err(EncodeError::OddLength { hex: encoded });
        }
        hex::decode(digits).map_err(|e| EncodeError::InvalidHex(e.to_string()))
    }
}

/// Operator input with the default inscription substituted for blank text.
pub fn resolve_payload(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        DEFAULT_PAYLOAD.to_string()
    } else {
        trimmed.to_string()
    }
}
