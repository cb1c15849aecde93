use crate::options::CrudOptions;

/// Resolves the path-parameter identifier used by the single-entity routes
/// (`/{slug}`) when no literal path is configured.
///
/// A declared `id` param wins unconditionally, regardless of declaration
/// order. Otherwise the first declared param whose placeholder is not
/// already part of the base path is used, falling back to `id`.
pub fn resolve_slug(options: &CrudOptions, base_path: &str) -> String {
    if options.params.iter().any(|(name, _)| name == "id") {
        return "id".to_string();
    }

    options
        .params
        .iter()
        .map(|(name, _)| name)
        .find(|name| !base_path.contains(&format!("{{{name}}}")))
        .cloned()
        .unwrap_or_else(|| "id".to_string())
}
