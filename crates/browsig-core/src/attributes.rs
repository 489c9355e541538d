use crate::{host::Host, record::BaseAttributes};

/// Substituted for string attributes the host leaves undefined or empty.
pub const NONE: &str = "none";

/// Synchronous extraction of the static navigator attributes.
pub struct AttributeReader;

impl AttributeReader {
    /// Every field is defaulted, so this cannot fail.
    pub fn read<H: Host + ?Sized>(host: &H) -> BaseAttributes {
        let nav = host.navigator();

        BaseAttributes {
            app_code_name: or_none(nav.app_code_name),
            app_name: or_none(nav.app_name),
            app_version: or_none(nav.app_version),
            cookie_enabled: nav.cookie_enabled.unwrap_or(false),
            language: or_none(nav.language),
            languages: nav.languages.unwrap_or_default().join(";"),
            platform: or_none(nav.platform),
            product: or_none(nav.product),
            product_sub: or_none(nav.product_sub),
            user_agent: or_none(nav.user_agent),
            vendor: or_none(nav.vendor),
            do_not_track: or_none(nav.do_not_track),
        }
    }
}

fn or_none(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NONE.to_string())
}

#[cfg(all(test, feature = "fixture"))]
mod tests {
    use super::*;
    use crate::{fixture::FixtureHost, host::NavigatorInfo};

    #[test]
    fn test_missing_attributes_are_defaulted() {
        let host = FixtureHost::default();
        let attrs = AttributeReader::read(&host);

        assert_eq!(attrs.app_code_name, "none");
        assert_eq!(attrs.user_agent, "none");
        assert_eq!(attrs.do_not_track, "none");
        assert!(!attrs.cookie_enabled);
        assert_eq!(attrs.languages, "");
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let host = FixtureHost {
            navigator: NavigatorInfo {
                vendor: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(AttributeReader::read(&host).vendor, "none");
    }

    #[test]
    fn test_languages_joined_in_host_order() {
        let host = FixtureHost {
            navigator: NavigatorInfo {
                languages: Some(vec!["fr-CA".into(), "en-US".into(), "en".into()]),
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(AttributeReader::read(&host).languages, "fr-CA;en-US;en");
    }
}
