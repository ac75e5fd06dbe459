//! CLI configuration -- thin wrapper around `atlas_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--profile, --timeout, --output, --color).

use std::time::Duration;

use clap::ValueEnum;

use atlas_core::{AtlasConfig, Credentials};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use atlas_config::{
    Config, Profile, SecretKind, config_path, load_config, load_config_or_default, save_config,
    store_secret,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Fill unset --output/--color flags from the config's `[defaults]`.
///
/// Unparseable values in the file are ignored in favour of the
/// built-in defaults.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// The active profile. An explicitly requested profile must exist; the
/// implicit default may be absent, in which case a blank profile is used.
pub fn select_profile<'a>(
    global: &GlobalOpts,
    config: &'a Config,
    name: &str,
) -> Result<Option<&'a Profile>, CliError> {
    match config.profiles.get(name) {
        Some(profile) => Ok(Some(profile)),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            name: name.to_owned(),
            available: available_profiles(config),
        }),
        None => Ok(None),
    }
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Translate a `Profile` + global flags into an `AtlasConfig`.
///
/// Timeout: `--timeout` flag > profile > `[defaults]`.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    config: &Config,
) -> Result<AtlasConfig, CliError> {
    let mut cfg = atlas_config::profile_to_atlas_config(profile, profile_name)?;
    let secs = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);
    cfg.timeout = Duration::from_secs(secs);
    Ok(cfg)
}

/// Sign-in credentials for a command that needs the backend.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, CliError> {
    Ok(atlas_config::resolve_credentials(profile, profile_name)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["atlas"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["countries", "regions"]);
        Cli::parse_from(argv).global
    }

    fn config_with(profile: Profile) -> Config {
        let mut cfg = Config::default();
        cfg.defaults.timeout = 45;
        cfg.defaults.output = "json".into();
        cfg.profiles.insert("home".into(), profile);
        cfg
    }

    #[test]
    fn timeout_precedence() {
        let cfg = config_with(Profile {
            timeout: Some(5),
            ..Profile::default()
        });
        let profile = &cfg.profiles["home"];

        let flag = resolve_profile(profile, "home", &global(&["--timeout", "9"]), &cfg).unwrap();
        assert_eq!(flag.timeout, Duration::from_secs(9));

        let from_profile = resolve_profile(profile, "home", &global(&[]), &cfg).unwrap();
        assert_eq!(from_profile.timeout, Duration::from_secs(5));

        let blank = Profile::default();
        let from_defaults = resolve_profile(&blank, "home", &global(&[]), &cfg).unwrap();
        assert_eq!(from_defaults.timeout, Duration::from_secs(45));
    }

    #[test]
    fn defaults_fill_unset_flags_only() {
        let cfg = config_with(Profile::default());

        let mut unset = global(&[]);
        apply_defaults(&mut unset, &cfg);
        assert_eq!(unset.output(), OutputFormat::Json);
        assert_eq!(unset.color(), ColorMode::Auto);

        let mut explicit = global(&["-o", "yaml"]);
        apply_defaults(&mut explicit, &cfg);
        assert_eq!(explicit.output(), OutputFormat::Yaml);
    }

    #[test]
    fn only_explicit_profiles_must_exist() {
        let cfg = config_with(Profile::default());

        let implicit = global(&[]);
        assert!(select_profile(&implicit, &cfg, "default").unwrap().is_none());
        assert!(select_profile(&implicit, &cfg, "home").unwrap().is_some());

        let explicit = global(&["--profile", "work"]);
        let err = select_profile(&explicit, &cfg, "work").unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "home"));
    }
}
