//! URL slug generation for blog posts.

/// Fallback slug for titles with no usable characters.
const EMPTY_SLUG: &str = "post";

/// Lowercase `title`, keep ASCII alphanumerics, and collapse every other run
/// of characters into a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn collapses_punctuation_runs() {
        assert_eq!(slugify("  Spring Gala -- 2026!  "), "spring-gala-2026");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Café Night"), "caf-night");
    }

    #[test]
    fn empty_falls_back() {
        assert_eq!(slugify("!!!"), "post");
        assert_eq!(slugify(""), "post");
    }
}
