//! Sprite names are unique among live sprites. A wanted name that is already taken gets the smallest
//! free `" (n)"` suffix, n >= 1.

use hashbrown::HashSet;

/// Resolve `ideal` against the names already in use.
#[must_use]
pub fn resolve(ideal: &str, taken: &HashSet<&str>) -> String {
    if !taken.contains(ideal) {
        return ideal.to_owned();
    }
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{ideal} ({n})");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod test {
    use super::resolve;
    use hashbrown::HashSet;

    #[test]
    fn free_name_kept() {
        assert_eq!(resolve("cat", &HashSet::new()), "cat");
        assert_eq!(resolve("cat", &HashSet::from_iter(["dog"])), "cat");
    }
    #[test]
    fn smallest_suffix() {
        assert_eq!(resolve("cat", &HashSet::from_iter(["cat"])), "cat (1)");
        assert_eq!(
            resolve("cat", &HashSet::from_iter(["cat", "cat (1)", "cat (3)"])),
            "cat (2)"
        );
    }
    #[test]
    fn suffixes_stack() {
        // Ideal names that already carry a suffix are not parsed.
        assert_eq!(
            resolve("cat (1)", &HashSet::from_iter(["cat", "cat (1)"])),
            "cat (1) (1)"
        );
    }
}
