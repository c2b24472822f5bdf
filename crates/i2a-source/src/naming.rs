use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Minuscules, puis tout caractère hors `[a-z0-9]` devient `_` (un par caractère).
///
/// # Example
/// ```
/// use i2a_source::naming::snake_case;
/// assert_eq!(snake_case("Hello, World!"), "hello__world_");
/// ```
#[must_use]
pub fn snake_case(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `{snake_case(prompt)}_{secondes}.{microsecondes}.png`.
///
/// Deux appels dans la même microseconde avec le même prompt donnent le même nom.
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use i2a_source::naming::generated_file_name;
/// let at = Utc.timestamp_opt(1_700_000_000, 42_000).unwrap();
/// assert_eq!(generated_file_name("A cat", at), "a_cat_1700000000.000042.png");
/// ```
#[must_use]
pub fn generated_file_name(prompt: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{:06}.png",
        snake_case(prompt),
        at.timestamp(),
        at.timestamp_subsec_micros()
    )
}

/// Chemin complet de sauvegarde, horodaté maintenant.
#[must_use]
pub fn output_path(dir: &Path, prompt: &str) -> PathBuf {
    dir.join(generated_file_name(prompt, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn snake_case_replaces_each_char() {
        assert_eq!(snake_case("a  b"), "a__b");
        assert_eq!(snake_case("Crème brûlée 42"), "cr_me_br_l_e_42");
        assert_eq!(snake_case(""), "");
    }

    #[test]
    fn file_name_is_png_with_timestamp() {
        let at = Utc.timestamp_opt(12, 345_678_901).unwrap();
        assert_eq!(generated_file_name("Sunset!", at), "sunset__12.345678.png");
    }

    #[test]
    fn output_path_lives_in_dir() {
        let path = output_path(Path::new("out"), "x");
        assert!(path.starts_with("out"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("x_"));
        assert!(name.ends_with(".png"));
    }
}
