// Named color palettes with cyclic assignment
use super::error::PaletteError;
use std::collections::BTreeMap;

pub const DEFAULT_SCHEME: &str = "default";

const BUILTIN: [(&str, [&str; 8]); 4] = [
    (
        DEFAULT_SCHEME,
        ["#8884d8", "#82ca9d", "#ffc658", "#ff7c7c", "#8dd1e1", "#d084d0", "#ffb347", "#67b7dc"],
    ),
    (
        "ocean",
        ["#003f5c", "#2f4b7c", "#665191", "#a05195", "#d45087", "#f95d6a", "#ff7c43", "#ffa600"],
    ),
    (
        "forest",
        ["#2d4a2b", "#4a7c59", "#8eb897", "#c5d86d", "#f7f3ce", "#e8b04b", "#c85450", "#8b4049"],
    ),
    (
        "sunset",
        ["#ff6b6b", "#f9844a", "#ee6c4d", "#c9ada7", "#f8b500", "#ffcb69", "#e76f51", "#f4a261"],
    ),
];

/// Palette id to ordered colors. Always contains a non-empty `default` palette.
#[derive(Debug, Clone)]
pub struct PaletteSet {
    schemes: BTreeMap<String, Vec<String>>,
}

impl Default for PaletteSet {
    fn default() -> Self {
        let schemes = BUILTIN
            .iter()
            .map(|(id, colors)| {
                (
                    id.to_string(),
                    colors.iter().map(|c| c.to_string()).collect(),
                )
            })
            .collect();
        Self { schemes }
    }
}

impl PaletteSet {
    /// Adds or replaces a palette. The `default` palette may be replaced but never emptied.
    pub fn register(&mut self, id: impl Into<String>, colors: Vec<String>) -> Result<(), PaletteError> {
        let id = id.into();
        if colors.is_empty() {
            return Err(PaletteError::Empty(id));
        }
        self.schemes.insert(id, colors);
        Ok(())
    }

    /// Colors for `scheme_id`, falling back to the default palette for unknown ids.
    pub fn resolve(&self, scheme_id: &str) -> &[String] {
        self.schemes
            .get(scheme_id)
            .or_else(|| self.schemes.get(DEFAULT_SCHEME))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn color_for(&self, scheme_id: &str, index: usize) -> &str {
        cycle(self.resolve(scheme_id), index)
    }

    pub fn contains(&self, scheme_id: &str) -> bool {
        self.schemes.contains_key(scheme_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.schemes.iter().map(|(id, colors)| (id.as_str(), colors.as_slice()))
    }
}

/// `palette[index mod len]`, or "" for an empty palette.
fn cycle(palette: &[String], index: usize) -> &str {
    if palette.is_empty() {
        return "";
    }
    &palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_palettes() {
        let palettes = PaletteSet::default();
        for id in ["default", "ocean", "forest", "sunset"] {
            assert!(palettes.contains(id));
            assert_eq!(palettes.resolve(id).len(), 8);
        }
        assert_eq!(palettes.resolve("ocean")[0], "#003f5c");
    }

    #[test]
    fn test_unknown_scheme_falls_back() {
        let palettes = PaletteSet::default();
        assert_eq!(palettes.resolve("neon"), palettes.resolve(DEFAULT_SCHEME));
        assert_eq!(palettes.color_for("neon", 0), "#8884d8");
    }

    #[test]
    fn test_color_cycles() {
        let mut palettes = PaletteSet::default();
        palettes
            .register("rgb", vec!["red".to_string(), "green".to_string(), "blue".to_string()])
            .unwrap();

        assert_eq!(palettes.color_for("rgb", 5), "blue");
        assert_eq!(palettes.color_for("rgb", 3), "red");
        assert_eq!(palettes.color_for("default", 9), "#82ca9d");
    }

    #[test]
    fn test_rejects_empty_palette() {
        let mut palettes = PaletteSet::default();
        assert_eq!(
            palettes.register("default", vec![]),
            Err(PaletteError::Empty("default".to_string()))
        );
        assert_eq!(palettes.resolve(DEFAULT_SCHEME).len(), 8);
    }
}
