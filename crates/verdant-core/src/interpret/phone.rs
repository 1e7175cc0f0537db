//! Phone-number keys for identifying who sent a message.

/// Keys to probe, in order, when looking a sender up by phone number.
///
/// The raw string first, then its digits, then the `+1` form of a 10-digit
/// number or the 10-digit form of an 11-digit number with a leading `1`.
/// Duplicates and empty keys are dropped.
pub fn lookup_keys(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let mut candidates = vec![raw.to_owned(), digits.clone()];
    if digits.len() == 10 {
        candidates.push(format!("+1{digits}"));
    }
    if digits.len() == 11 && digits.starts_with('1') {
        candidates.push(digits[1..].to_owned());
    }

    let mut keys: Vec<String> = Vec::with_capacity(candidates.len());
    for key in candidates {
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
