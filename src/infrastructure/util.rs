use crate::domain::slug::SlugGenerator;
use slug::slugify;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// `slug` crate transliteration for ASCII output; an NFKC-normalized lowercase
/// alphanumeric walk when Unicode slugs are allowed.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str, allow_unicode: bool) -> String {
        if allow_unicode {
            unicode_slugify(input)
        } else {
            slugify(input)
        }
    }
}

fn unicode_slugify(input: &str) -> String {
    // Lowercasing can emit combining marks (`İ` becomes `i` + U+0307), so the
    // text is normalized again afterwards and leftover marks are dropped.
    let lowered: String = input.nfkc().flat_map(char::to_lowercase).collect();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_dash = false;
    for c in lowered.nfkc().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_mode_transliterates() {
        let generator = DefaultSlugGenerator;
        assert_eq!(generator.slugify("Hello World", false), "hello-world");
        assert_eq!(generator.slugify("Ça & Là!", false), "ca-la");
        assert_eq!(generator.slugify("  --  ", false), "");
    }

    #[test]
    fn unicode_mode_keeps_letters() {
        let generator = DefaultSlugGenerator;
        assert_eq!(generator.slugify("Ça & Là!", true), "ça-là");
        assert_eq!(generator.slugify("  Dungeon -- World  ", true), "dungeon-world");
        assert_eq!(generator.slugify("???", true), "");
    }

    #[test]
    fn unicode_mode_normalizes_before_slugifying() {
        let generator = DefaultSlugGenerator;
        let decomposed = "Cre\u{300}me Bru\u{302}le\u{301}e";
        assert_eq!(generator.slugify(decomposed, true), "crème-brûlée");
        assert_eq!(generator.slugify("Crème Brûlée", true), "crème-brûlée");
        assert_eq!(generator.slugify("İstanbul", true), "istanbul");
        assert_eq!(generator.slugify("ＡＢＣ ２", true), "abc-2");
        assert_eq!(generator.slugify("ﬁnal", true), "final");
    }
}
