#![forbid(unsafe_code)]

//! Breadcrumb trail resolution.
//!
//! Screens carry synthetic paths ("/usuarios/estudiantes"); the trail
//! is resolved from the path plus a label table, with a formatting
//! fallback for unmapped segments.

/// One entry of a resolved trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    /// Display label.
    pub label: String,
    /// Cumulative path this crumb stands for.
    pub path: String,
}

/// Resolve a path into its breadcrumb trail.
///
/// Trailing slashes are stripped (an empty result reads as the root),
/// then the root plus every cumulative segment prefix becomes a crumb.
/// Labels come from the table; unmapped segments fall back to
/// [`fallback_label`]. Crumbs that resolve to an empty label are
/// dropped, so an unmapped root contributes nothing.
#[must_use]
pub fn resolve(path: &str, labels: &[(&str, &str)]) -> Vec<Crumb> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };

    let mut paths: Vec<String> = vec!["/".to_string()];
    let mut prefix = String::new();
    for segment in normalized.split('/').filter(|s| !s.is_empty()) {
        prefix.push('/');
        prefix.push_str(segment);
        if !paths.iter().any(|p| *p == prefix) {
            paths.push(prefix.clone());
        }
    }

    paths
        .into_iter()
        .filter_map(|p| {
            let label = match lookup(labels, &p) {
                Some(mapped) => mapped.to_string(),
                None => fallback_label(last_segment(&p)),
            };
            if label.is_empty() {
                None
            } else {
                Some(Crumb { label, path: p })
            }
        })
        .collect()
}

/// Format an unmapped segment: dashes become spaces and each word gets
/// an uppercased first letter.
#[must_use]
pub fn fallback_label(segment: &str) -> String {
    segment
        .replace('-', " ")
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn lookup<'a>(labels: &'a [(&str, &str)], path: &str) -> Option<&'a str> {
    labels
        .iter()
        .find(|(mapped, _)| *mapped == path)
        .map(|(_, label)| *label)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[(&str, &str)] = &[
        ("/", "Inicio"),
        ("/usuarios", "Usuarios"),
        ("/asistencia", "Asistencia"),
    ];

    #[test]
    fn root_resolves_to_single_mapped_crumb() {
        let trail = resolve("/", LABELS);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].label, "Inicio");
        assert_eq!(trail[0].path, "/");
    }

    #[test]
    fn unmapped_root_is_dropped() {
        let trail = resolve("/", &[]);
        assert!(trail.is_empty());
    }

    #[test]
    fn nested_path_builds_cumulative_trail() {
        let trail = resolve("/usuarios/estudiantes", LABELS);
        let labels: Vec<&str> = trail.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Inicio", "Usuarios", "Estudiantes"]);
        assert_eq!(trail[2].path, "/usuarios/estudiantes");
    }

    #[test]
    fn trailing_slashes_are_stripped() {
        assert_eq!(resolve("/usuarios/", LABELS), resolve("/usuarios", LABELS));
        assert_eq!(resolve("///", LABELS), resolve("/", LABELS));
    }

    #[test]
    fn empty_path_reads_as_root() {
        assert_eq!(resolve("", LABELS), resolve("/", LABELS));
    }

    #[test]
    fn fallback_replaces_dashes_and_capitalizes() {
        assert_eq!(fallback_label("registro-academico"), "Registro Academico");
        assert_eq!(fallback_label("reportes"), "Reportes");
    }

    #[test]
    fn fallback_uppercases_accented_initials() {
        assert_eq!(fallback_label("área-tecnica"), "Área Tecnica");
    }

    #[test]
    fn unmapped_segment_uses_fallback() {
        let trail = resolve("/asistencia/por-grado", LABELS);
        assert_eq!(trail.last().map(|c| c.label.as_str()), Some("Por Grado"));
    }
}
