use unicode_normalization::UnicodeNormalization;

pub const AVOID_URL_CHARS: &[char] = &[
    '!', '#', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=', ':', '@', '%', '[', ']', '?', '/',
    '~', '|', '{', '}', '^', '`', '"', '<', '>', '.',
];

/// Anchor slug for a heading: NFC-normalized, lowercased, whitespace runs
/// collapsed to `-`, URL-hostile punctuation dropped.
pub fn slugify(text: &str) -> String {
    let normalized: String = text.trim().nfc().collect();
    let mut slug = String::with_capacity(normalized.len());
    let mut pending_dash = false;
    for c in normalized.chars() {
        if c.is_whitespace() {
            pending_dash = !slug.is_empty();
            continue;
        }
        if AVOID_URL_CHARS.contains(&c) {
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.extend(c.to_lowercase());
    }
    slug
}

/// Hands out unique slugs within one document: repeats get `-1`, `-2`, …
#[derive(Debug, Default)]
pub struct SlugSet {
    seen: std::collections::HashMap<String, usize>,
}

impl SlugSet {
    pub fn unique(&mut self, text: &str) -> String {
        let base = slugify(text);
        let base = if base.is_empty() {
            "section".to_string()
        } else {
            base
        };
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        if slug != base {
            // reserve the suffixed form so a later literal heading doesn't collide
            self.seen.entry(slug.clone()).or_insert(1);
        }
        slug
    }
}
