/// Administrative suffixes stripped from province names, longest first so that
/// e.g. "壮族自治区" wins over "自治区"
const CHINESE_SUFFIXES: [&str; 7] = [
    "维吾尔自治区",
    "壮族自治区",
    "回族自治区",
    "特别行政区",
    "自治区",
    "省",
    "市",
];

const ENGLISH_SUFFIXES: [&str; 3] = ["autonomous region", "province", "city"];

/// Normalizes a free-text province name to the bare form stored with admission rows.
///
/// "河南省" → "河南", "广西壮族自治区" → "广西", "Henan Province" → "Henan".
/// A value that is nothing but a suffix is returned trimmed and otherwise untouched.
pub fn normalize_province(raw: &str) -> String {
    let trimmed = raw.trim();

    for suffix in CHINESE_SUFFIXES {
        if let Some(stem) = trimmed.strip_suffix(suffix) {
            let stem = stem.trim_end();
            if !stem.is_empty() {
                return stem.to_string();
            }
        }
    }

    for suffix in ENGLISH_SUFFIXES {
        let Some(split) = trimmed.len().checked_sub(suffix.len()) else {
            continue;
        };
        if !trimmed.is_char_boundary(split) || !trimmed[split..].eq_ignore_ascii_case(suffix) {
            continue;
        }
        let stem = trimmed[..split].trim_end();
        if !stem.is_empty() {
            return stem.to_string();
        }
    }

    trimmed.to_string()
}
