use anyhow::{Context, Result};
use fluent_bundle::{concurrent::FluentBundle, FluentResource};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::language::SupportedLanguage;

pub type Bundle = FluentBundle<FluentResource>;

/// Loads and manages Fluent translation resources.
///
/// Every locale starts from the resources compiled into the binary. `.ftl`
/// files found under `<locales_dir>/<code>/` are layered on top and win on
/// conflicting message ids.
pub struct FluentLoader {
    bundles: HashMap<SupportedLanguage, Bundle>,
    locales_dir: Option<PathBuf>,
}

impl FluentLoader {
    pub fn new() -> Self {
        Self {
            bundles: HashMap::new(),
            locales_dir: None,
        }
    }

    pub fn with_locales_dir(locales_dir: impl Into<PathBuf>) -> Self {
        Self {
            bundles: HashMap::new(),
            locales_dir: Some(locales_dir.into()),
        }
    }

    /// Build the bundle for a locale
    pub fn load_locale(&mut self, language: SupportedLanguage) -> Result<()> {
        let mut bundle = FluentBundle::new_concurrent(vec![language.lang_id()]);
        // Plain-text output, no Unicode isolation marks
        bundle.set_use_isolating(false);

        let builtin = parse_resource(builtin_source(language), language.code())?;
        bundle
            .add_resource(builtin)
            .map_err(|errors| anyhow::anyhow!("Conflicting built-in messages: {:?}", errors))?;

        let mut overrides = 0;
        if let Some(dir) = &self.locales_dir {
            let locale_dir = dir.join(language.code());
            if locale_dir.is_dir() {
                for path in ftl_files(&locale_dir)? {
                    let content = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read file: {:?}", path))?;
                    let resource = parse_resource(content, &path.display().to_string())?;
                    bundle.add_resource_overriding(resource);
                    overrides += 1;
                }
            }
        }

        tracing::info!(
            locale = language.code(),
            overrides,
            "Loaded translation bundle"
        );

        self.bundles.insert(language, bundle);
        Ok(())
    }

    /// Get a bundle for a specific language
    pub fn get_bundle(&self, language: &SupportedLanguage) -> Option<&Bundle> {
        self.bundles.get(language)
    }
}

impl Default for FluentLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_source(language: SupportedLanguage) -> String {
    match language {
        SupportedLanguage::Portuguese => include_str!("../../locales/pt-BR/main.ftl").to_string(),
        SupportedLanguage::English => include_str!("../../locales/en/main.ftl").to_string(),
    }
}

fn parse_resource(content: String, origin: &str) -> Result<FluentResource> {
    FluentResource::try_new(content)
        .map_err(|(_, errors)| anyhow::anyhow!("Failed to parse FTL {}: {:?}", origin, errors))
}

fn ftl_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Failed to read locale directory: {:?}", dir))?
    {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ftl") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
