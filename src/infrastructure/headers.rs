// Header normalization shared by the tabular readers

/// Renames repeated header names to `name_1`, `name_2`, ... keeping the first
/// occurrence as-is and never producing a name already taken.
pub fn unique_column_names<I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut names: Vec<String> = Vec::new();

    for header in headers {
        if !names.contains(&header) {
            names.push(header);
            continue;
        }

        let mut suffix = 1;
        let mut candidate = format!("{}_{}", header, suffix);
        while names.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}_{}", header, suffix);
        }
        names.push(candidate);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(input: &[&str]) -> Vec<String> {
        unique_column_names(input.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_unique_headers_unchanged() {
        assert_eq!(names(&["a", "b"]), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_get_suffix() {
        assert_eq!(names(&["a", "a", "a"]), vec!["a", "a_1", "a_2"]);
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        assert_eq!(names(&["a", "a_1", "a"]), vec!["a", "a_1", "a_2"]);
    }
}
