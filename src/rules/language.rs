use serde::{Deserialize, Serialize};

/// Languages known to the scanner.
///
/// Custom rules may only target the subset returned by
/// [`Language::is_custom_rule_target`]; the others are handled by built-in
/// analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Go,
    #[serde(rename = "C#")]
    CSharp,
    Dart,
    Ruby,
    Python,
    Java,
    Kotlin,
    #[serde(rename = "JavaScript")]
    Javascript,
    #[serde(rename = "TypeScript")]
    Typescript,
    Leaks,
    #[serde(rename = "HCL")]
    Hcl,
    C,
    #[serde(rename = "PHP")]
    Php,
    #[serde(rename = "HTML")]
    Html,
    Generic,
    #[serde(rename = "YAML")]
    Yaml,
    Elixir,
    Shell,
    Nginx,
    Swift,
    Unknown,
}

/// Languages a custom rule is allowed to declare.
pub const CUSTOM_RULE_LANGUAGES: [Language; 8] = [
    Language::CSharp,
    Language::Dart,
    Language::Java,
    Language::Kotlin,
    Language::Yaml,
    Language::Leaks,
    Language::Javascript,
    Language::Nginx,
];

impl Language {
    pub const ALL: [Language; 21] = [
        Self::Go,
        Self::CSharp,
        Self::Dart,
        Self::Ruby,
        Self::Python,
        Self::Java,
        Self::Kotlin,
        Self::Javascript,
        Self::Typescript,
        Self::Leaks,
        Self::Hcl,
        Self::C,
        Self::Php,
        Self::Html,
        Self::Generic,
        Self::Yaml,
        Self::Elixir,
        Self::Shell,
        Self::Nginx,
        Self::Swift,
        Self::Unknown,
    ];

    /// Wire name used in rule files and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "Go",
            Self::CSharp => "C#",
            Self::Dart => "Dart",
            Self::Ruby => "Ruby",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
            Self::Javascript => "JavaScript",
            Self::Typescript => "TypeScript",
            Self::Leaks => "Leaks",
            Self::Hcl => "HCL",
            Self::C => "C",
            Self::Php => "PHP",
            Self::Html => "HTML",
            Self::Generic => "Generic",
            Self::Yaml => "YAML",
            Self::Elixir => "Elixir",
            Self::Shell => "Shell",
            Self::Nginx => "Nginx",
            Self::Swift => "Swift",
            Self::Unknown => "Unknown",
        }
    }

    /// Accepts the wire name in any case, plus `csharp` for `C#`.
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("csharp") {
            return Some(Self::CSharp);
        }
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(s))
    }

    pub fn is_custom_rule_target(self) -> bool {
        CUSTOM_RULE_LANGUAGES.contains(&self)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_names_in_any_case() {
        assert_eq!(Language::from_str_lenient("C#"), Some(Language::CSharp));
        assert_eq!(Language::from_str_lenient("csharp"), Some(Language::CSharp));
        assert_eq!(Language::from_str_lenient("javascript"), Some(Language::Javascript));
        assert_eq!(Language::from_str_lenient("yaml"), Some(Language::Yaml));
        assert_eq!(Language::from_str_lenient("COBOL"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        for lang in Language::ALL {
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang.as_str()));
        }
    }

    #[test]
    fn only_subset_accepts_custom_rules() {
        assert!(Language::Nginx.is_custom_rule_target());
        assert!(Language::Leaks.is_custom_rule_target());
        assert!(!Language::Go.is_custom_rule_target());
        assert!(!Language::Python.is_custom_rule_target());
    }
}
