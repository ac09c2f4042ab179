use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A jewelry retailer whose product pages can be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Hostname pattern, e.g. `tiffany.com` or `www.bluenile.com`.
    pub domain: String,
    pub name: String,
}

impl Vendor {
    fn new(domain: &str, name: &str) -> Self {
        Self {
            domain: domain.to_string(),
            name: name.to_string(),
        }
    }

    /// The domain with any leading `www.` removed and lower-cased; this is
    /// the substring searched for in request hostnames.
    #[must_use]
    pub fn match_pattern(&self) -> String {
        let lower = self.domain.trim().to_lowercase();
        if let Some(rest) = lower.strip_prefix("www.") {
            return rest.to_string();
        }
        lower
    }
}

/// Ordered list of supported vendors. Order defines match priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRegistry {
    vendors: Vec<Vendor>,
}

#[derive(Debug, Deserialize)]
pub struct VendorsFile {
    pub vendors: Vec<Vendor>,
}

impl Default for VendorRegistry {
    fn default() -> Self {
        Self {
            vendors: vec![
                Vendor::new("www.tiffany.com", "Tiffany & Co."),
                Vendor::new("www.bluenile.com", "Blue Nile"),
                Vendor::new("www.jamesallen.com", "James Allen"),
                Vendor::new("www.brilliantearth.com", "Brilliant Earth"),
                Vendor::new("www.cartier.com", "Cartier"),
                Vendor::new("www.kay.com", "Kay Jewelers"),
                Vendor::new("www.zales.com", "Zales"),
                Vendor::new("www.jared.com", "Jared"),
                Vendor::new("www.helzberg.com", "Helzberg Diamonds"),
                Vendor::new("www.ritani.com", "Ritani"),
                Vendor::new("www.vraiandoro.com", "VRAI"),
                Vendor::new("www.cleanorigin.com", "Clean Origin"),
                Vendor::new("www.adiamor.com", "Adiamor"),
                Vendor::new("www.withclarity.com", "With Clarity"),
                Vendor::new("www.harrywinston.com", "Harry Winston"),
                Vendor::new("www.debeers.com", "De Beers"),
                Vendor::new("mejuri.com", "Mejuri"),
                Vendor::new("www.grownbrilliance.com", "Grown Brilliance"),
                Vendor::new("www.rarecarat.com", "Rare Carat"),
                Vendor::new("www.whiteflash.com", "Whiteflash"),
            ],
        }
    }
}

impl VendorRegistry {
    /// Build a registry from an explicit vendor list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any entry is blank or two entries
    /// share a match pattern.
    pub fn new(vendors: Vec<Vendor>) -> Result<Self, ConfigError> {
        validate_vendors(&vendors)?;
        Ok(Self { vendors })
    }

    #[must_use]
    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.vendors.iter().map(|v| v.name.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

/// Load the vendor registry, either from the YAML file at `path` or the
/// built-in list when no path is configured.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_vendor_registry(path: Option<&Path>) -> Result<VendorRegistry, ConfigError> {
    let Some(path) = path else {
        return Ok(VendorRegistry::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::VendorsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: VendorsFile = serde_yaml::from_str(&content)?;
    VendorRegistry::new(file.vendors)
}

fn validate_vendors(vendors: &[Vendor]) -> Result<(), ConfigError> {
    if vendors.is_empty() {
        return Err(ConfigError::Validation(
            "vendor list must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for vendor in vendors {
        if vendor.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' has an empty name",
                vendor.domain
            )));
        }

        let pattern = vendor.match_pattern();
        if pattern.is_empty() {
            return Err(ConfigError::Validation(format!(
                "vendor '{}' has an empty domain",
                vendor.name
            )));
        }

        if !seen.insert(pattern.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate vendor domain: '{pattern}'"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn match_pattern_strips_www_and_lowercases() {
        let vendor = Vendor::new("WWW.Tiffany.com", "Tiffany");
        assert_eq!(vendor.match_pattern(), "tiffany.com");
    }

    #[test]
    fn match_pattern_keeps_bare_domain() {
        let vendor = Vendor::new("mejuri.com", "Mejuri");
        assert_eq!(vendor.match_pattern(), "mejuri.com");
    }

    #[test]
    fn default_registry_is_valid() {
        let registry = VendorRegistry::default();
        assert!(validate_vendors(registry.vendors()).is_ok());
        assert!(registry.names().contains(&"Blue Nile".to_string()));
    }

    #[test]
    fn rejects_duplicate_patterns() {
        let result = VendorRegistry::new(vec![
            Vendor::new("www.kay.com", "Kay"),
            Vendor::new("kay.com", "Kay Again"),
        ]);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("duplicate")),
            "expected duplicate validation error, got: {result:?}"
        );
    }

    #[test]
    fn rejects_empty_domain() {
        let result = VendorRegistry::new(vec![Vendor::new("www.", "Nothing")]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn rejects_empty_list() {
        assert!(matches!(
            VendorRegistry::new(Vec::new()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn no_path_loads_builtin_registry() {
        let registry = load_vendor_registry(None).expect("builtin registry");
        assert_eq!(registry, VendorRegistry::default());
    }

    #[test]
    fn loads_registry_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "vendors:\n  - domain: www.example-rings.com\n    name: Example Rings\n  - domain: shop.local\n    name: Local Shop"
        )
        .expect("write yaml");

        let registry = load_vendor_registry(Some(file.path())).expect("load yaml");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.vendors()[0].name, "Example Rings");
        assert_eq!(registry.vendors()[1].match_pattern(), "shop.local");
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_vendor_registry(Some(Path::new("/nonexistent/vendors.yaml")));
        assert!(matches!(result, Err(ConfigError::VendorsFileIo { .. })));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "vendors: [unclosed").expect("write yaml");
        let result = load_vendor_registry(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::VendorsFileParse(_))));
    }
}
