//! Active-tab resolution from the replay view's location.

use lens_dispatch::{ActiveKeyResolver, ResolvedKey, TabNameResolver};
use url::{form_urlencoded, ParseError, Url};

use crate::config::{LensConfigError, NavigationConfig};
use crate::tabs::ReplayTab;

pub const DEFAULT_TAB_QUERY_PARAM: &str = "t_main";

/// Location of the replay view for one render: an absolute URL or an
/// origin-relative path such as `/replays/abc/?t_main=network`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayNavigation {
    url: String,
}

impl ReplayNavigation {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayNavigationResolver {
    query_param: String,
    tabs: TabNameResolver<ReplayTab>,
}

impl ReplayNavigationResolver {
    pub fn new(query_param: impl Into<String>, tabs: TabNameResolver<ReplayTab>) -> Self {
        Self {
            query_param: query_param.into(),
            tabs,
        }
    }

    pub fn from_config(config: &NavigationConfig) -> Result<Self, LensConfigError> {
        config.validate()?;
        let tabs = TabNameResolver::with_disabled(config.default_tab()?, config.disabled_tabs()?)?;
        Ok(Self::new(config.query_param.trim(), tabs))
    }

    pub fn query_param(&self) -> &str {
        &self.query_param
    }

    pub fn tabs(&self) -> &TabNameResolver<ReplayTab> {
        &self.tabs
    }

    /// First value of the tab query parameter. A URL that cannot be parsed
    /// yields `None`, which resolves to the default tab.
    pub fn requested_tab(&self, navigation: &ReplayNavigation) -> Option<String> {
        let raw = navigation.as_str().trim();
        let query = match Url::parse(raw) {
            Ok(url) => url.query().map(str::to_string),
            Err(ParseError::RelativeUrlWithoutBase) => relative_query(raw).map(str::to_string),
            Err(error) => {
                tracing::debug!(url = raw, %error, "malformed replay location, using default tab");
                return None;
            }
        }?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == self.query_param.as_str())
            .map(|(_, value)| value.into_owned())
    }
}

impl Default for ReplayNavigationResolver {
    fn default() -> Self {
        Self::new(
            DEFAULT_TAB_QUERY_PARAM,
            TabNameResolver::new(ReplayTab::Console),
        )
    }
}

impl ActiveKeyResolver<ReplayNavigation> for ReplayNavigationResolver {
    type Key = ReplayTab;

    fn resolve(&self, navigation: &ReplayNavigation) -> ResolvedKey<ReplayTab> {
        let requested = self.requested_tab(navigation);
        self.tabs.resolve_tab(requested.as_deref())
    }
}

fn relative_query(raw: &str) -> Option<&str> {
    let without_fragment = raw.split_once('#').map_or(raw, |(head, _)| head);
    without_fragment.split_once('?').map(|(_, query)| query)
}

#[cfg(test)]
mod tests {
    use lens_dispatch::{ActiveKeyResolver, ResolvedKey, TabNameResolver};
    use proptest::prelude::*;

    use super::{ReplayNavigation, ReplayNavigationResolver};
    use crate::config::NavigationConfig;
    use crate::tabs::ReplayTab;

    fn resolve(url: &str) -> ResolvedKey<ReplayTab> {
        ReplayNavigationResolver::default().resolve(&ReplayNavigation::new(url))
    }

    #[test]
    fn unit_relative_location_reads_tab_query_param() {
        assert_eq!(
            resolve("/replays/abc/?t_main=memory"),
            ResolvedKey::Panel(ReplayTab::Memory)
        );
        assert_eq!(
            resolve("/replays/abc/?query=x&t_main=Network#frag"),
            ResolvedKey::Panel(ReplayTab::Network)
        );
    }

    #[test]
    fn unit_absolute_location_reads_tab_query_param() {
        assert_eq!(
            resolve("https://sentry.example/replays/abc/?t_main=trace"),
            ResolvedKey::Panel(ReplayTab::Trace)
        );
    }

    #[test]
    fn functional_missing_tab_uses_default() {
        assert_eq!(resolve("/replays/abc/"), ResolvedKey::Panel(ReplayTab::Console));
        assert_eq!(resolve(""), ResolvedKey::Panel(ReplayTab::Console));
        assert_eq!(
            resolve("/replays/abc/?t_main="),
            ResolvedKey::Panel(ReplayTab::Console)
        );
    }

    #[test]
    fn functional_unknown_tab_is_unrecognized() {
        assert_eq!(
            resolve("/replays/abc/?t_main=unknown-tab"),
            ResolvedKey::Unrecognized("unknown-tab".to_string())
        );
    }

    #[test]
    fn functional_percent_encoded_tab_is_decoded() {
        assert_eq!(
            resolve("/replays/abc/?t_main=%20tags%20"),
            ResolvedKey::Panel(ReplayTab::Tags)
        );
    }

    #[test]
    fn regression_malformed_absolute_url_uses_default() {
        assert_eq!(
            resolve("http://[::1/replays?t_main=memory"),
            ResolvedKey::Panel(ReplayTab::Console)
        );
    }

    #[test]
    fn integration_from_config_applies_param_default_and_disabled_tabs() {
        let config = NavigationConfig {
            query_param: "tab".to_string(),
            default_tab: "issues".to_string(),
            disabled_tabs: vec!["memory".to_string()],
        };
        let resolver = ReplayNavigationResolver::from_config(&config).expect("valid config");
        assert_eq!(resolver.query_param(), "tab");
        assert_eq!(
            resolver.resolve(&ReplayNavigation::new("/r/?t_main=trace")),
            ResolvedKey::Panel(ReplayTab::Issues)
        );
        assert_eq!(
            resolver.resolve(&ReplayNavigation::new("/r/?tab=memory")),
            ResolvedKey::Unrecognized("memory".to_string())
        );
    }

    #[test]
    fn unit_default_resolver_matches_default_config() {
        let from_config = ReplayNavigationResolver::from_config(&NavigationConfig::default())
            .expect("default config is valid");
        assert_eq!(from_config, ReplayNavigationResolver::default());
        assert_eq!(
            ReplayNavigationResolver::default().tabs(),
            &TabNameResolver::new(ReplayTab::Console)
        );
    }

    proptest! {
        #[test]
        fn property_resolve_never_panics_on_arbitrary_locations(url in any::<String>()) {
            let _ = resolve(&url);
        }
    }
}
