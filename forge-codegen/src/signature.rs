//! Parameter lists for generated methods.

use std::fmt;

use botforge_request::ArgSpec;

/// A rendered Python parameter list.
///
/// Order is fixed: leading names, plain positional names, `name = default`
/// pairs, then variadics with every `*` form before every `**` form.
/// Duplicate names are not detected and render as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    params: Vec<String>,
}

impl Signature {
    pub fn build<S: AsRef<str>>(leading: &[S], args: &ArgSpec) -> Self {
        let mut params: Vec<String> = leading.iter().map(|s| s.as_ref().to_string()).collect();

        params.extend(
            args.positional
                .iter()
                .filter(|name| !name.starts_with('*'))
                .cloned(),
        );
        params.extend(
            args.defaults
                .iter()
                .map(|(name, default)| format!("{name} = {default}")),
        );

        let (double, single): (Vec<&String>, Vec<&String>) = args
            .positional
            .iter()
            .filter(|name| name.starts_with('*'))
            .partition(|name| name.starts_with("**"));
        params.extend(single.into_iter().cloned());
        params.extend(double.into_iter().cloned());

        Self { params }
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.params.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_ordering() {
        let args = ArgSpec::new()
            .with_positional("name")
            .with_positional("**kwargs")
            .with_positional("file")
            .with_positional("*args")
            .with_default("is_def", "False");

        let signature = Signature::build(&["self"], &args);
        assert_eq!(
            signature.to_string(),
            "self, name, file, is_def = False, *args, **kwargs"
        );
    }

    #[test]
    fn test_leading_only() {
        let signature = Signature::build(&["self", "token"], &ArgSpec::new());
        assert_eq!(signature.to_string(), "self, token");
    }

    #[test]
    fn test_defaults_keep_insertion_order() {
        let args = ArgSpec::new()
            .with_default("zeta", "1")
            .with_default("alpha", "'a'");
        let signature = Signature::build(&["self"], &args);
        assert_eq!(signature.params(), ["self", "zeta = 1", "alpha = 'a'"]);
    }

    #[test]
    fn test_duplicates_render_verbatim() {
        let args = ArgSpec::new().with_positional("users").with_positional("users");
        let signature = Signature::build(&["self"], &args);
        assert_eq!(signature.to_string(), "self, users, users");
    }

    #[test]
    fn test_no_leading() {
        let args = ArgSpec::new().with_positional("*rest");
        let signature = Signature::build::<&str>(&[], &args);
        assert_eq!(signature.to_string(), "*rest");
    }
}
