//! Admin site branding, fixed for the lifetime of the process.

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_SITE_HEADER: &str = "🎨 Painel de Administração do Portfólio";
pub const DEFAULT_SITE_TITLE: &str = "Administração do Portfólio";
pub const DEFAULT_INDEX_TITLE: &str = "Bem-vindo ao painel de administração do seu portfólio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSiteSettings {
    site_header: String,
    site_title: String,
    index_title: String,
}

impl AdminSiteSettings {
    /// Build settings, falling back to the defaults for absent or blank values.
    pub fn new(
        site_header: Option<String>,
        site_title: Option<String>,
        index_title: Option<String>,
    ) -> Self {
        fn or_default(value: Option<String>, fallback: &str) -> String {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| fallback.to_owned())
        }
        Self {
            site_header: or_default(site_header, DEFAULT_SITE_HEADER),
            site_title: or_default(site_title, DEFAULT_SITE_TITLE),
            index_title: or_default(index_title, DEFAULT_INDEX_TITLE),
        }
    }

    pub fn site_header(&self) -> &str {
        &self.site_header
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    pub fn index_title(&self) -> &str {
        &self.index_title
    }
}

impl Default for AdminSiteSettings {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_overrides_fall_back_to_defaults() {
        let settings = AdminSiteSettings::new(Some("  ".into()), Some("Painel".into()), None);
        assert_eq!(settings.site_header(), DEFAULT_SITE_HEADER);
        assert_eq!(settings.site_title(), "Painel");
        assert_eq!(settings.index_title(), DEFAULT_INDEX_TITLE);
    }
}
