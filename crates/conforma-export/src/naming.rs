//! Output file names.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

/// Characters that may not appear in a file name on common filesystems.
const PATH_UNSAFE: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Lowercase `name`, collapse whitespace runs to `-` and replace
/// path-unsafe characters with `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if PATH_UNSAFE.contains(&c) {
            slug.push('-');
        } else {
            slug.extend(c.to_lowercase());
        }
    }
    slug
}

/// Milliseconds since the Unix epoch, strictly increasing across calls in
/// this process.
pub fn next_timestamp_millis() -> u64 {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let mut last = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_STAMP.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// `resumo-<slug>-<millis>.pdf`
pub fn summary_file_name(project_name: &str, millis: u64) -> String {
    format!("resumo-{}-{millis}.pdf", slugify(project_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_hyphenates() {
        assert_eq!(slugify("Projeto Vale 46778/a153"), "projeto-vale-46778-a153");
        assert_eq!(slugify("  Usina   Hidrelétrica\tSul "), "usina-hidrelétrica-sul");
    }

    #[test]
    fn slug_replaces_every_unsafe_character() {
        assert_eq!(slugify(r#"a/b\c:d*e?f"g<h>i|j"#), "a-b-c-d-e-f-g-h-i-j");
    }

    #[test]
    fn file_name_has_no_slash_and_ends_in_timestamp() {
        let name = summary_file_name("Projeto Vale 46778/a153", next_timestamp_millis());
        assert!(name.starts_with("resumo-projeto-vale-46778-a153-"));
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains('/'));
        let stamp = name
            .trim_start_matches("resumo-projeto-vale-46778-a153-")
            .trim_end_matches(".pdf");
        assert!(stamp.parse::<u64>().is_ok());
        assert_eq!(name, name.to_lowercase());
    }

    #[test]
    fn timestamps_strictly_increase() {
        let stamps: Vec<u64> = (0..1000).map(|_| next_timestamp_millis()).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }
}
