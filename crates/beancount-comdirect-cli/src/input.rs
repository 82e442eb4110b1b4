use std::path::Path;

use anyhow::{Context, Result};

const BOM: char = '\u{feff}';

/// Read an export file as text.
///
/// comdirect writes ISO-8859-1, files that were re-saved as UTF-8 are accepted as well.
pub fn read_export(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(decode(bytes))
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => match text.strip_prefix(BOM) {
            Some(stripped) => stripped.to_string(),
            None => text,
        },
        Err(err) => {
            let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(err.as_bytes());
            tracing::debug!("decoded as windows-1252");
            text.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1() {
        let bytes = b"\"Ums\xe4tze Girokonto\";\"Stra\xdfe\"".to_vec();
        assert_eq!(decode(bytes), r#""Umsätze Girokonto";"Straße""#);
    }

    #[test]
    fn utf8() {
        let text = r#""Umsätze Girokonto";"#;
        assert_eq!(decode(text.as_bytes().to_vec()), text);
        assert_eq!(decode(format!("{BOM}{text}").into_bytes()), text);
    }
}
