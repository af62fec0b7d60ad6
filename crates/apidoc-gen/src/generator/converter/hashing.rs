/// Stable short key for conditions with no canonical textual form.
///
/// Eight hex characters of a BLAKE3 digest. Stable across generation passes
/// for the same input; the truncation collision risk is accepted.
pub(crate) fn short_hash(input: &str) -> String {
  let hash = blake3::hash(input.as_bytes());
  hash.to_hex().as_str()[..8].to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_short_hash_is_stable() {
    assert_eq!(short_hash("user()->isAdmin()"), short_hash("user()->isAdmin()"));
  }

  #[test]
  fn test_short_hash_is_eight_hex_chars() {
    let key = short_hash("anything");
    assert_eq!(key.len(), 8);
    assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn test_short_hash_distinguishes_inputs() {
    assert_ne!(short_hash("a"), short_hash("b"));
  }
}
