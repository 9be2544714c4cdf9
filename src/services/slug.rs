use rand::distributions::Alphanumeric;
use rand::Rng;

/// Lowercase ascii slug: alphanumeric runs separated by single dashes.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

pub fn random_suffix(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|byte| (byte as char).to_ascii_lowercase())
        .collect()
}

/// `base` plus a random suffix, the usual shape for externally addressable
/// slugs ("carrinho-4f9a2c1b", "pedido-x2x9a").
pub fn suffixed(base: &str, len: usize) -> String {
    format!("{base}-{}", random_suffix(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("Cerveja Pilsen 600ml"), "cerveja-pilsen-600ml");
        assert_eq!(slugify("  Mesa   12  "), "mesa-12");
        assert_eq!(slugify("Água c/ Gás"), "gua-c-g-s");
    }

    #[test]
    fn slugify_never_produces_leading_or_trailing_dashes() {
        for input in ["---abc---", "!!!", "", "a"] {
            let slug = slugify(input);
            assert!(!slug.starts_with('-'), "input {input:?} gave {slug:?}");
            assert!(!slug.ends_with('-'), "input {input:?} gave {slug:?}");
        }
    }

    #[test]
    fn random_suffix_has_requested_length_and_charset() {
        let suffix = random_suffix(8);
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn suffixed_keeps_base_prefix() {
        let slug = suffixed("carrinho", 8);
        assert!(slug.starts_with("carrinho-"));
        assert_eq!(slug.len(), "carrinho-".len() + 8);

        // two draws colliding would mean the rng is broken
        assert_ne!(suffixed("pedido", 10), suffixed("pedido", 10));
    }
}
