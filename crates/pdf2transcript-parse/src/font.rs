//! Per-font string decoding.
//!
//! A PDF string operand is a byte sequence whose meaning depends on the
//! active font. [`FontDecoder`] covers the three cases this crate handles:
//! an embedded `/ToUnicode` CMap (parsed from `beginbfchar`/`endbfchar` and
//! `beginbfrange`/`endbfrange` sections with UTF-16BE values), a predefined
//! CJK encoding name resolved through `encoding_rs`, and the single-byte
//! WinAnsi (windows-1252) fallback.

use std::collections::HashMap;

use encoding_rs::Encoding;

use crate::error::BackendError;

/// A parsed ToUnicode CMap that maps character codes to Unicode strings.
///
/// Unicode values may be single characters or multi-character strings
/// (e.g., ligatures like "fi" → "fi").
#[derive(Debug, Clone)]
pub struct CMap {
    /// Mapping from character code to Unicode string.
    mappings: HashMap<u32, String>,
    /// Bytes per character code, from the codespacerange (1 or 2).
    code_width: usize,
}

impl CMap {
    /// Parse a ToUnicode CMap from its raw byte content.
    ///
    /// Extracts `beginbfchar`/`endbfchar` and `beginbfrange`/`endbfrange`
    /// sections to build the code → Unicode table, and reads the code width
    /// from the first `begincodespacerange` entry (2 bytes when absent).
    pub fn parse(data: &[u8]) -> Result<Self, BackendError> {
        let text = String::from_utf8_lossy(data);
        let mut mappings = HashMap::new();

        let mut search_from = 0;
        while let Some(start) = text[search_from..].find("beginbfchar") {
            let section_start = search_from + start + "beginbfchar".len();
            if let Some(end) = text[section_start..].find("endbfchar") {
                let section = &text[section_start..section_start + end];
                parse_bfchar_section(section, &mut mappings)?;
                search_from = section_start + end + "endbfchar".len();
            } else {
                break;
            }
        }

        search_from = 0;
        while let Some(start) = text[search_from..].find("beginbfrange") {
            let section_start = search_from + start + "beginbfrange".len();
            if let Some(end) = text[section_start..].find("endbfrange") {
                let section = &text[section_start..section_start + end];
                parse_bfrange_section(section, &mut mappings)?;
                search_from = section_start + end + "endbfrange".len();
            } else {
                break;
            }
        }

        let code_width = parse_code_width(&text);

        Ok(CMap {
            mappings,
            code_width,
        })
    }

    /// Look up the Unicode string for a character code.
    pub fn lookup(&self, code: u32) -> Option<&str> {
        self.mappings.get(&code).map(|s| s.as_str())
    }

    /// Look up the Unicode string for a character code, with fallback.
    ///
    /// If no mapping is found, returns U+FFFD (REPLACEMENT CHARACTER).
    pub fn lookup_or_replacement(&self, code: u32) -> String {
        self.lookup(code)
            .map(|s| s.to_string())
            .unwrap_or_else(|| "\u{FFFD}".to_string())
    }

    /// Bytes consumed per character code (1 or 2).
    pub fn code_width(&self) -> usize {
        self.code_width
    }

    /// Returns the number of mappings in this CMap.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if this CMap has no mappings.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// How string bytes are decoded for one font.
#[derive(Debug, Clone)]
pub enum FontDecoder {
    /// Embedded `/ToUnicode` CMap.
    ToUnicode(CMap),
    /// Predefined CJK encoding resolved from the `/Encoding` name.
    Cjk(&'static Encoding),
    /// Single-byte WinAnsi (windows-1252) fallback.
    WinAnsi,
}

impl FontDecoder {
    /// Decode a string operand's bytes into Unicode text.
    ///
    /// Unmappable codes decode to U+FFFD rather than being dropped.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            FontDecoder::ToUnicode(cmap) => {
                let mut out = String::new();
                match cmap.code_width() {
                    1 => {
                        for &b in bytes {
                            out.push_str(&cmap.lookup_or_replacement(u32::from(b)));
                        }
                    }
                    _ => {
                        for pair in bytes.chunks(2) {
                            let code = match pair {
                                [hi, lo] => u32::from(*hi) << 8 | u32::from(*lo),
                                [only] => u32::from(*only),
                                _ => unreachable!(),
                            };
                            out.push_str(&cmap.lookup_or_replacement(code));
                        }
                    }
                }
                out
            }
            FontDecoder::Cjk(encoding) => {
                let (decoded, _, _) = encoding.decode(bytes);
                decoded.into_owned()
            }
            FontDecoder::WinAnsi => {
                let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
                decoded.into_owned()
            }
        }
    }
}

/// Detect the `encoding_rs` encoding from a predefined CMap name.
///
/// Returns `None` for Identity-H/V and unknown names, in which case the
/// caller falls back to another decoding strategy.
pub fn encoding_for_cmap(cmap_name: &str) -> Option<&'static Encoding> {
    // Strip -H/-V suffix for matching
    let base = cmap_name
        .strip_suffix("-H")
        .or_else(|| cmap_name.strip_suffix("-V"))
        .unwrap_or(cmap_name);

    match base {
        // Chinese Simplified
        "GBK-EUC" | "GB-EUC" | "GBKp-EUC" | "GBK2K" | "UniGB-UCS2" | "UniGB-UTF16" => {
            Some(encoding_rs::GB18030)
        }

        // Chinese Traditional
        "B5pc" | "ETen-B5" | "ETenms-B5" | "HKscs-B5" | "UniCNS-UCS2" | "UniCNS-UTF16" => {
            Some(encoding_rs::BIG5)
        }

        // Japanese
        "90ms-RKSJ" | "90msp-RKSJ" | "90pv-RKSJ" | "83pv-RKSJ" | "78-RKSJ" | "Add-RKSJ"
        | "Ext-RKSJ" => Some(encoding_rs::SHIFT_JIS),

        // Identity or unknown: not a legacy CJK encoding
        _ => None,
    }
}

/// Read the code width from the first `begincodespacerange` entry.
///
/// The low bound's hex digit count gives the byte width (`<00>` → 1 byte,
/// `<0000>` → 2 bytes). ToUnicode CMaps are conventionally 2-byte, so that
/// is the default when the section is missing or malformed.
fn parse_code_width(text: &str) -> usize {
    let Some(start) = text.find("begincodespacerange") else {
        return 2;
    };
    let section_start = start + "begincodespacerange".len();
    let Some(end) = text[section_start..].find("endcodespacerange") else {
        return 2;
    };
    let section = &text[section_start..section_start + end];
    match extract_hex_tokens(section).first() {
        Some(low) if low.len() <= 2 => 1,
        _ => 2,
    }
}

fn parse_hex_code(hex: &str) -> Result<u32, BackendError> {
    u32::from_str_radix(hex, 16)
        .map_err(|e| BackendError::Font(format!("invalid hex code '{hex}': {e}")))
}

/// Decode a hex string as UTF-16BE bytes into a Unicode string.
///
/// The hex string represents UTF-16BE code units: a single 2-byte value for
/// BMP characters, a surrogate pair for supplementary characters, multiple
/// code units for ligature mappings.
fn decode_utf16be_hex(hex: &str) -> Result<String, BackendError> {
    if hex.len() % 4 != 0 {
        // 2-digit hex like "41" is a single byte padded to "0041"
        if hex.len() == 2 {
            let padded = format!("00{hex}");
            return decode_utf16be_hex(&padded);
        }
        return Err(BackendError::Font(format!(
            "UTF-16BE hex string must have length divisible by 4, got '{hex}' (len={})",
            hex.len()
        )));
    }

    let mut code_units = Vec::with_capacity(hex.len() / 4);
    for chunk in hex.as_bytes().chunks(4) {
        let chunk_str = std::str::from_utf8(chunk)
            .map_err(|e| BackendError::Font(format!("invalid UTF-8 in hex: {e}")))?;
        let unit = u16::from_str_radix(chunk_str, 16)
            .map_err(|e| BackendError::Font(format!("invalid hex in UTF-16BE '{chunk_str}': {e}")))?;
        code_units.push(unit);
    }

    String::from_utf16(&code_units)
        .map_err(|e| BackendError::Font(format!("invalid UTF-16BE sequence: {e}")))
}

/// Extract all `<hex>` tokens from a span of text.
fn extract_hex_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        if let Some(end) = rest[start + 1..].find('>') {
            let hex = &rest[start + 1..start + 1 + end];
            tokens.push(hex);
            rest = &rest[start + 1 + end + 1..];
        } else {
            break;
        }
    }
    tokens
}

/// Parse a beginbfchar...endbfchar section.
///
/// Each line has format: `<srcCode> <dstUnicode>`
fn parse_bfchar_section(
    section: &str,
    mappings: &mut HashMap<u32, String>,
) -> Result<(), BackendError> {
    for line in section.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || !trimmed.contains('<') {
            continue;
        }

        let tokens = extract_hex_tokens(trimmed);
        if tokens.len() >= 2 {
            let src_code = parse_hex_code(tokens[0])?;
            let unicode_str = decode_utf16be_hex(tokens[1])?;
            mappings.insert(src_code, unicode_str);
        }
    }
    Ok(())
}

/// Parse a beginbfrange...endbfrange section.
///
/// Each line has format: `<srcLow> <srcHigh> <dstStart>`
/// or: `<srcLow> <srcHigh> [<str1> <str2> ...]`
fn parse_bfrange_section(
    section: &str,
    mappings: &mut HashMap<u32, String>,
) -> Result<(), BackendError> {
    for line in section.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || !trimmed.contains('<') {
            continue;
        }

        if let Some(bracket_start) = trimmed.find('[') {
            // Array form: <srcLow> <srcHigh> [<str1> <str2> ...]
            let before_bracket = &trimmed[..bracket_start];
            let src_tokens = extract_hex_tokens(before_bracket);
            if src_tokens.len() < 2 {
                continue;
            }
            let src_low = parse_hex_code(src_tokens[0])?;
            let src_high = parse_hex_code(src_tokens[1])?;

            let bracket_end = trimmed.rfind(']').unwrap_or(trimmed.len());
            let array_content = &trimmed[bracket_start + 1..bracket_end];
            let dst_tokens = extract_hex_tokens(array_content);

            for (i, dst_hex) in dst_tokens.iter().enumerate() {
                let code = src_low + i as u32;
                if code > src_high {
                    break;
                }
                let unicode_str = decode_utf16be_hex(dst_hex)?;
                mappings.insert(code, unicode_str);
            }
        } else {
            // Standard form: <srcLow> <srcHigh> <dstStart>
            let tokens = extract_hex_tokens(trimmed);
            if tokens.len() < 3 {
                continue;
            }
            let src_low = parse_hex_code(tokens[0])?;
            let src_high = parse_hex_code(tokens[1])?;
            let dst_start = parse_hex_code(tokens[2])?;

            // Reversed bounds in a corrupt CMap must not underflow the loop.
            if src_high < src_low {
                continue;
            }

            for offset in 0..=(src_high - src_low) {
                let code = src_low + offset;
                let unicode_cp = dst_start + offset;
                if let Some(ch) = char::from_u32(unicode_cp) {
                    mappings.insert(code, ch.to_string());
                }
            }
        }
    }
    Ok(())
}
