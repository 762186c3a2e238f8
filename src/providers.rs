//! Provider descriptors for the supported web translation services.
//!
//! Each provider is pure data: a URL, three CSS locators, and a settle
//! delay. One generic driver algorithm (see [`crate::engine`]) serves all of
//! them, so when a provider ships new markup only the table entry changes.

use std::time::Duration;

/// Supported web translation services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Baidu Fanyi.
    Baidu,
    /// Youdao Fanyi.
    Youdao,
    /// Caiyun Xiaoyi.
    Caiyun,
    /// Alibaba Translate.
    Ali,
    /// Tencent TranSmart.
    TencentTransmart,
    /// Google Translate.
    Google,
    /// DeepL Translator.
    DeepL,
}

impl ProviderKind {
    /// Get the provider name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Baidu => "baidu",
            ProviderKind::Youdao => "youdao",
            ProviderKind::Caiyun => "caiyun",
            ProviderKind::Ali => "ali",
            ProviderKind::TencentTransmart => "tencent-transmart",
            ProviderKind::Google => "google",
            ProviderKind::DeepL => "deepl",
        }
    }

    /// Parse a provider from a user-facing name.
    ///
    /// Tolerates the aliases a GUI combo box or config file is likely to
    /// carry ("GoogleTranslator", "deepl-translator", ...). Returns `None`
    /// for unknown names; the registry decides the fallback policy.
    pub fn from_string(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace(['-', '_', ' '], "");
        match normalized.trim_end_matches("translator") {
            "baidu" => Some(ProviderKind::Baidu),
            "youdao" => Some(ProviderKind::Youdao),
            "caiyun" => Some(ProviderKind::Caiyun),
            "ali" | "alibaba" => Some(ProviderKind::Ali),
            "tencent" | "tencenttransmart" | "transmart" => Some(ProviderKind::TencentTransmart),
            "google" => Some(ProviderKind::Google),
            "deepl" => Some(ProviderKind::DeepL),
            _ => None,
        }
    }

    /// List all supported providers.
    pub fn all() -> &'static [ProviderKind] {
        &[
            ProviderKind::Baidu,
            ProviderKind::Youdao,
            ProviderKind::Caiyun,
            ProviderKind::Ali,
            ProviderKind::TencentTransmart,
            ProviderKind::Google,
            ProviderKind::DeepL,
        ]
    }

    /// Get the static descriptor driving this provider.
    pub fn descriptor(&self) -> ProviderDescriptor {
        match self {
            ProviderKind::Baidu => ProviderDescriptor {
                kind: *self,
                url: "https://fanyi.baidu.com/mtpe-individual/multimodal",
                input_selector: "#editor-text > div.fAuuTI2d > div > div.Ssl84aLh > div > div > div > div > span > span > span",
                output_selector: "#trans-selection > div > span",
                clear_selector: "#editor-text > div.fAuuTI2d > div > div.Ssl84aLh > span",
                settle_delay: Duration::from_millis(200),
            },
            ProviderKind::Youdao => ProviderDescriptor {
                kind: *self,
                url: "https://fanyi.youdao.com/#/TextTranslate",
                input_selector: "#js_fanyi_input",
                output_selector: "#js_fanyi_output_resultOutput > p > span",
                clear_selector: "#TextTranslate > div.source > div.text-translate-top-right > a",
                settle_delay: Duration::from_millis(500),
            },
            ProviderKind::Caiyun => ProviderDescriptor {
                kind: *self,
                url: "https://fanyi.caiyunapp.com/",
                input_selector: "#textarea",
                output_selector: "#target_trans_0",
                clear_selector: "#app > div > div > div.page-content > div.page-content-box > div > div > div.trans-action-box > div > div.two-column-layout > div:nth-child(1) > div > div.column-choose-langBox > img.closeImg",
                settle_delay: Duration::from_millis(200),
            },
            ProviderKind::Ali => ProviderDescriptor {
                kind: *self,
                url: "https://translate.alibaba.com/",
                input_selector: "#source",
                output_selector: "#pre",
                clear_selector: "#root > div > div > div.smart-translation > div > div.tabs-content > div > div.example > div.translat-exhibit > div > div.original > div > span",
                settle_delay: Duration::from_millis(300),
            },
            ProviderKind::TencentTransmart => ProviderDescriptor {
                kind: *self,
                url: "https://transmart.qq.com/zh-CN/index",
                input_selector: "#ORIGINAL_TEXTAREA",
                output_selector: "#root > div > div.src-routes--container__2sG4U > div > div:nth-child(1) > div:nth-child(2) > div.src-views-InteractiveTranslation-components-PanelTarget--container-content__24R3o > div.src-views-InteractiveTranslation-components-PanelTarget--content__1zYZJ > span.src-views-InteractiveTranslation-components-PanelTarget--content-sentence__viSNx.src-views-InteractiveTranslation-components-PanelTarget--active__1hbv3",
                clear_selector: "#root > div > div.src-routes--container__2sG4U > div > div:nth-child(1) > div:nth-child(1) > div.src-views-InteractiveTranslation-components-PanelSource--container-textarea__2SIoV",
                settle_delay: Duration::from_millis(500),
            },
            ProviderKind::Google => ProviderDescriptor {
                kind: *self,
                url: "https://translate.google.com/",
                input_selector: "#yDmH0d > c-wiz > div > div.ToWKne > c-wiz > div.OlSOob > c-wiz > div.ccvoYb > div.AxqVh > div.OPPzxe > div > c-wiz > span > span > div > textarea",
                output_selector: "#yDmH0d > c-wiz > div > div.ToWKne > c-wiz > div.OlSOob > c-wiz > div.ccvoYb > div.AxqVh > div.OPPzxe > c-wiz > div > div.usGWQd > div > div.lRu31 > span.HwtZe > span > span",
                clear_selector: "#yDmH0d > c-wiz > div > div.ToWKne > c-wiz > div.OlSOob > c-wiz > div.ccvoYb > div.AxqVh > div.OPPzxe > div > c-wiz > div.DVHrxd > span > button",
                settle_delay: Duration::from_secs(1),
            },
            ProviderKind::DeepL => ProviderDescriptor {
                kind: *self,
                url: "https://www.deepl.com/zh/translator",
                input_selector: r"#textareasContainer > div.rounded-es-inherit.relative.min-h-\[240px\].min-w-0.md\:min-h-\[clamp\(250px\,50vh\,557px\)\].mobile\:min-h-0.TextTranslatorLayout-module--textareaContainerMobilePortraitMaxHeight--50d46 > section > div > div.relative.flex-1.rounded-inherit.mobile\:min-h-0 > d-textarea > div:nth-child(1)",
                output_selector: r"#textareasContainer > div.rounded-ee-inherit.relative.min-h-\[240px\].min-w-0.md\:min-h-\[clamp\(250px\,50vh\,557px\)\].mobile\:min-h-0.mobile\:flex-1.max-\[768px\]\:min-h-\[375px\].TextTranslatorLayout-module--textareaContainerMobilePortraitMaxHeight--50d46 > section > div.relative.flex.flex-1.flex-col.rounded-inherit.mobile\:min-h-0 > d-textarea > div > p > span",
                clear_selector: "#translator-source-clear-button",
                settle_delay: Duration::from_secs(2),
            },
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_string(s)
            .ok_or_else(|| crate::Error::Config(format!("unknown provider: {}", s)))
    }
}

/// Static data describing how to drive one provider.
///
/// Selectors are deep CSS paths into uncontrolled third-party markup; they
/// break whenever the provider redesigns, and updating this entry is the
/// entire fix.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Which provider this descriptor drives.
    pub kind: ProviderKind,
    /// Page URL to navigate to.
    pub url: &'static str,
    /// CSS selector for the source-text input.
    pub input_selector: &'static str,
    /// CSS selector for the translated-output container.
    pub output_selector: &'static str,
    /// CSS selector for the clear/reset control.
    pub clear_selector: &'static str,
    /// Base wait applied before reading the output, to let the provider's
    /// server-rendered translation settle.
    pub settle_delay: Duration,
}

/// Resolve a user-facing provider name to its descriptor.
///
/// Unknown names fall back to `default`; the fallback is logged, never
/// silent, and never an error. A stale name in a config file should not
/// brick the application.
pub fn resolve(name: &str, default: ProviderKind) -> ProviderDescriptor {
    match ProviderKind::from_string(name) {
        Some(kind) => kind.descriptor(),
        None => {
            tracing::warn!(
                requested = name,
                fallback = default.name(),
                "unknown provider name, falling back to default"
            );
            default.descriptor()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_provider_has_a_descriptor() {
        for kind in ProviderKind::all() {
            let d = kind.descriptor();
            assert_eq!(d.kind, *kind);
            assert!(d.url.starts_with("https://"));
            assert!(!d.input_selector.is_empty());
            assert!(!d.output_selector.is_empty());
            assert!(!d.clear_selector.is_empty());
        }
    }

    #[test]
    fn from_string_accepts_gui_aliases() {
        assert_eq!(
            ProviderKind::from_string("GoogleTranslator"),
            Some(ProviderKind::Google)
        );
        assert_eq!(
            ProviderKind::from_string("DeepL"),
            Some(ProviderKind::DeepL)
        );
        assert_eq!(
            ProviderKind::from_string("tencent-transmart"),
            Some(ProviderKind::TencentTransmart)
        );
        assert_eq!(ProviderKind::from_string("bing"), None);
    }

    #[test]
    fn resolve_binds_exact_descriptor() {
        let d = resolve("GoogleTranslator", ProviderKind::Baidu);
        assert_eq!(d.kind, ProviderKind::Google);
        assert_eq!(d.url, "https://translate.google.com/");
    }

    #[test]
    fn resolve_unknown_falls_back_to_default() {
        let d = resolve("no-such-service", ProviderKind::Baidu);
        assert_eq!(d.kind, ProviderKind::Baidu);
        // Deterministic: same input, same fallback.
        let again = resolve("no-such-service", ProviderKind::Baidu);
        assert_eq!(again.kind, d.kind);
    }

    #[test]
    fn settle_delays_match_provider_speed() {
        assert_eq!(
            ProviderKind::Baidu.descriptor().settle_delay,
            Duration::from_millis(200)
        );
        assert_eq!(
            ProviderKind::DeepL.descriptor().settle_delay,
            Duration::from_secs(2)
        );
    }
}
