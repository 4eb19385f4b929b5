//! Raw argument tokenization
//!
//! Splits the process arguments into positional arguments and
//! `--key[=value]` options. A bare `--key` is a boolean flag, `--key=value`
//! carries a string, and anything else is positional. Options are collected
//! without validation; unknown keys sit in the map unharmed.

use camino::Utf8PathBuf;
use std::collections::BTreeMap;

/// Value carried by a parsed option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Bare `--key`, boolean true
    Flag,

    /// `--key=value`
    Value(String),
}

/// Tokenized process arguments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argv {
    pub positional: Vec<String>,
    pub options: BTreeMap<String, OptionValue>,
}

impl Argv {
    /// Tokenize the current process arguments (binary name excluded).
    pub fn from_env() -> Self {
        Self::parse(std::env::args().skip(1))
    }

    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = Self::default();

        for token in tokens {
            let token = token.into();
            match token.strip_prefix("--") {
                Some(option) => match option.split_once('=') {
                    Some((key, value)) => {
                        argv.options
                            .insert(key.to_string(), OptionValue::Value(value.to_string()));
                    }
                    None => {
                        argv.options.insert(option.to_string(), OptionValue::Flag);
                    }
                },
                None => argv.positional.push(token),
            }
        }

        argv
    }

    /// True when the option is present as a bare flag or carries a
    /// non-empty value. `--key=` counts as false.
    pub fn flag(&self, name: &str) -> bool {
        match self.options.get(name) {
            Some(OptionValue::Flag) => true,
            Some(OptionValue::Value(value)) => !value.is_empty(),
            None => false,
        }
    }

    /// The string value of a `--key=value` option.
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.options.get(name) {
            Some(OptionValue::Value(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// The options the scaffold pipeline consumes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Fetch the template's dev branch
    pub dev: bool,

    /// Debug-level logging, also forwarded to the installer script
    pub verbose: bool,

    /// Package manager run inside the install directory
    pub installer: String,

    /// Copy the template from a local checkout instead of downloading
    pub local: Option<Utf8PathBuf>,
}

impl Options {
    pub fn from_argv(argv: &Argv) -> Self {
        Self {
            dev: argv.flag("dev"),
            verbose: argv.flag("verbose"),
            installer: argv.value("installer").unwrap_or("npm").to_string(),
            local: argv
                .value("local")
                .filter(|value| !value.is_empty())
                .map(Utf8PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- tokenization ----

    #[test]
    fn test_parse_flag_and_value_options() {
        let argv = Argv::parse(["--dev", "--installer=yarn"]);

        let expected: BTreeMap<String, OptionValue> = [
            ("dev".to_string(), OptionValue::Flag),
            (
                "installer".to_string(),
                OptionValue::Value("yarn".to_string()),
            ),
        ]
        .into();

        assert_eq!(argv.options, expected);
        assert!(argv.positional.is_empty());
    }

    #[test]
    fn test_parse_keeps_positional_order() {
        let argv = Argv::parse(["one", "--dev", "two"]);
        assert_eq!(argv.positional, vec!["one", "two"]);
        assert!(argv.flag("dev"));
    }

    #[test]
    fn test_parse_accepts_unknown_options() {
        let argv = Argv::parse(["--whatever=5", "--mystery"]);
        assert_eq!(argv.value("whatever"), Some("5"));
        assert!(argv.flag("mystery"));
    }

    #[test]
    fn test_empty_value_is_falsy() {
        let argv = Argv::parse(["--dev="]);
        assert!(!argv.flag("dev"));
        assert_eq!(argv.value("dev"), Some(""));
    }

    #[test]
    fn test_flag_true_for_nonempty_value() {
        let argv = Argv::parse(["--dev=yes"]);
        assert!(argv.flag("dev"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let argv = Argv::parse(["--installer=npm", "--installer=yarn"]);
        assert_eq!(argv.value("installer"), Some("yarn"));
    }

    // ---- typed options ----

    #[test]
    fn test_options_defaults() {
        let opts = Options::from_argv(&Argv::parse::<_, String>([]));
        assert!(!opts.dev);
        assert!(!opts.verbose);
        assert_eq!(opts.installer, "npm");
        assert_eq!(opts.local, None);
    }

    #[test]
    fn test_options_from_flags() {
        let opts = Options::from_argv(&Argv::parse([
            "--dev",
            "--verbose",
            "--installer=yarn",
            "--local=/tmp/starter",
        ]));
        assert!(opts.dev);
        assert!(opts.verbose);
        assert_eq!(opts.installer, "yarn");
        assert_eq!(opts.local, Some(Utf8PathBuf::from("/tmp/starter")));
    }

    #[test]
    fn test_options_empty_local_is_unset() {
        let opts = Options::from_argv(&Argv::parse(["--local="]));
        assert_eq!(opts.local, None);
    }
}
