use std::collections::HashSet;

/// Lowercase a tag name and strip anything that is not alphanumeric, so
/// `motion.section` becomes `motionsection` and `My_Widget` becomes
/// `mywidget`. Falls back to `node` for tags with no usable characters.
pub fn tag_slug(tag: &str) -> String {
    let slug: String = tag
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    if slug.is_empty() {
        "node".to_string()
    } else {
        slug
    }
}

/// Sequential id generator for tree nodes.
///
/// A fresh generator is scoped to a single parse call, which guarantees
/// uniqueness within one tree. The editor session keeps its own generator
/// alive across operations and pairs it with the set of ids already taken.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    count: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Generate the next sequential id for a tag.
    pub fn next_for_tag(&mut self, tag: &str) -> String {
        self.count += 1;
        format!("{}-{}", tag_slug(tag), self.count)
    }

    /// Generate an id that is not already taken, recording it as taken.
    ///
    /// Needed after parse time: source text may carry literal `id`
    /// attributes that a naive counter could collide with.
    pub fn next_unique(&mut self, tag: &str, taken: &mut HashSet<String>) -> String {
        loop {
            let id = self.next_for_tag(tag);
            if taken.insert(id.clone()) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new();

        assert_eq!(gen.next_for_tag("div"), "div-1");
        assert_eq!(gen.next_for_tag("div"), "div-2");
        assert_eq!(gen.next_for_tag("p"), "p-3");
    }

    #[test]
    fn test_slug_strips_invalid_chars() {
        assert_eq!(tag_slug("motion.section"), "motionsection");
        assert_eq!(tag_slug("My_Widget"), "mywidget");
        assert_eq!(tag_slug("..."), "node");
    }

    #[test]
    fn test_next_unique_skips_taken_ids() {
        let mut gen = IdGenerator::new();
        let mut taken: HashSet<String> = ["div-1".to_string()].into_iter().collect();

        let id = gen.next_unique("div", &mut taken);
        assert_eq!(id, "div-2");
        assert!(taken.contains("div-2"));
    }
}
