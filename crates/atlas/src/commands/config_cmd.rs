//! Config subcommand handlers.

use dialoguer::{Input, Password, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile, SecretKind};
use crate::error::CliError;
use crate::output::{self, Painter};

const REDACTED: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Where a secret entered in the wizard should live.
fn ask_storage(what: &str) -> Result<bool, CliError> {
    let choices = &["Store in system keyring (recommended)", "Save to config file (plaintext)"];
    let selection = Select::new()
        .with_prompt(format!("Where to store the {what}?"))
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(selection == 0)
}

/// Keep `secret` in the keyring (returning `None`) or hand it back for
/// the config file.
fn stash(kind: SecretKind, profile_name: &str, what: &str, secret: String) -> Result<Option<String>, CliError> {
    if ask_storage(what)? {
        config::store_secret(kind, profile_name, &secret)?;
        eprintln!("   ✓ {what} stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(secret))
    }
}

fn redact(value: &mut Option<String>) {
    if value.is_some() {
        *value = Some(REDACTED.into());
    }
}

/// Copy of `cfg` safe to print.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        redact(&mut profile.password);
        redact(&mut profile.weather_api_key);
        redact(&mut profile.backend_anon_key);
    }
    cfg
}

fn describe(cfg: &Config, paint: Painter) -> String {
    let mut lines = vec![
        paint.heading("Defaults"),
        format!(
            "  {}{}",
            paint.label("Profile"),
            cfg.default_profile.as_deref().unwrap_or("default")
        ),
        format!("  {}{}", paint.label("Output"), cfg.defaults.output),
        format!("  {}{}", paint.label("Color"), cfg.defaults.color),
        format!("  {}{}s", paint.label("Timeout"), cfg.defaults.timeout),
    ];

    for (name, p) in &cfg.profiles {
        let field = |v: Option<&str>| v.unwrap_or("-").to_owned();
        lines.push(String::new());
        lines.push(paint.heading(&format!("Profile '{name}'")));
        lines.push(format!("  {}{}", paint.label("Countries"), field(p.countries_url.as_deref())));
        lines.push(format!("  {}{}", paint.label("Weather"), field(p.weather_url.as_deref())));
        lines.push(format!("  {}{}", paint.label("Weather key"), field(p.weather_api_key.as_deref())));
        lines.push(format!("  {}{}", paint.label("Backend"), field(p.backend_url.as_deref())));
        lines.push(format!("  {}{}", paint.label("Anon key"), field(p.backend_anon_key.as_deref())));
        lines.push(format!("  {}{}", paint.label("Email"), field(p.email.as_deref())));
        lines.push(format!("  {}{}", paint.label("Password"), field(p.password.as_deref())));
        if let Some(secs) = p.timeout {
            lines.push(format!("  {}{secs}s", paint.label("Timeout")));
        }
    }
    lines.join("\n")
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("atlas configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let mut cfg = config::load_config_or_default();

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default(config::active_profile_name(global, &cfg))
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile::default();

            // 2. Backend (optional)
            let backend_url: String = Input::new()
                .with_prompt("Backend URL (leave empty to skip favourites)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            if let Some(url) = non_empty(&backend_url) {
                let anon_key: String = Input::new()
                    .with_prompt("Backend anon key")
                    .interact_text()
                    .map_err(prompt_err)?;
                let email: String = Input::new()
                    .with_prompt("Email")
                    .interact_text()
                    .map_err(prompt_err)?;
                let password = Password::new()
                    .with_prompt("Password")
                    .interact()
                    .map_err(prompt_err)?;

                if email.trim().is_empty() || password.is_empty() {
                    return Err(CliError::Validation {
                        field: "credentials".into(),
                        reason: "email and password cannot be empty".into(),
                    });
                }

                profile.backend_url = Some(url);
                profile.backend_anon_key = non_empty(&anon_key);
                profile.email = Some(email.trim().to_owned());
                profile.password = stash(SecretKind::Password, &profile_name, "password", password)?;
            }

            // 3. Weather key (optional)
            let weather_key = Password::new()
                .with_prompt("OpenWeather API key (leave empty to skip)")
                .allow_empty_password(true)
                .interact()
                .map_err(prompt_err)?;
            if let Some(key) = non_empty(&weather_key) {
                profile.weather_api_key =
                    stash(SecretKind::WeatherApiKey, &profile_name, "API key", key)?;
            }

            // 4. Write config
            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.default_profile.is_none() || cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }
            let path = config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Profile: {profile_name}");
            eprintln!("\n  Test it: atlas countries list --search fra");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let paint = Painter::new(global);
            let out = output::render_single(
                &global.output(),
                &cfg,
                |c| describe(c, paint),
                |c| c.profiles.keys().cloned().collect::<Vec<_>>().join("\n"),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        // ── Secrets ─────────────────────────────────────────────────
        ConfigCommand::SetPassword => set_secret(global, SecretKind::Password, "Password"),
        ConfigCommand::SetWeatherKey => {
            set_secret(global, SecretKind::WeatherApiKey, "OpenWeather API key")
        }
    }
}

fn set_secret(global: &GlobalOpts, kind: SecretKind, what: &str) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = config::active_profile_name(global, &cfg);
    config::select_profile(global, &cfg, &profile_name)?;

    let secret = Password::new()
        .with_prompt(format!("{what} for profile '{profile_name}'"))
        .interact()
        .map_err(prompt_err)?;
    if secret.is_empty() {
        return Err(CliError::Validation {
            field: what.to_lowercase(),
            reason: "cannot be empty".into(),
        });
    }

    config::store_secret(kind, &profile_name, &secret)?;
    output::status(global, &format!("✓ {what} stored in system keyring for '{profile_name}'"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_hides_secrets_only() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "home".into(),
            Profile {
                email: Some("ada@example.com".into()),
                password: Some("hunter2".into()),
                backend_anon_key: Some("anon".into()),
                ..Profile::default()
            },
        );

        let shown = redacted(&cfg);
        let home = &shown.profiles["home"];
        assert_eq!(home.email.as_deref(), Some("ada@example.com"));
        assert_eq!(home.password.as_deref(), Some(REDACTED));
        assert_eq!(home.backend_anon_key.as_deref(), Some(REDACTED));
        assert_eq!(home.weather_api_key, None);
        assert_eq!(cfg.profiles["home"].password.as_deref(), Some("hunter2"));
    }

    #[test]
    fn blank_input_is_none() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" x ").as_deref(), Some("x"));
    }
}
