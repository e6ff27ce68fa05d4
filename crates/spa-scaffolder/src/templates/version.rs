//! CLI / template-set version compatibility

use semver::Version;

/// Parse a version string, tolerating a leading `v`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Warn when the template set expects a newer CLI than the one running.
/// Unparseable versions are not compared.
pub fn check_compatibility(
    cli_version: &str,
    template_name: &str,
    template_version: &str,
) -> Option<String> {
    let cli = parse_version(cli_version)?;
    let wanted = parse_version(template_version)?;

    (cli < wanted).then(|| {
        format!(
            "Templates '{}' require CLI version {} or newer, but this is {}. Generated files may be incomplete.",
            template_name, wanted, cli
        )
    })
}
