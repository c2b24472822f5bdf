use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration complète de l'application.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use i2a_core::config::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!((config.render.width, config.render.height), (128, 128));
/// assert_eq!(config.text.style, "modern");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Rendu d'images fichiers (`render`).
    pub render: RenderConfig,
    /// Rendu du chemin texte (`render-from-text`).
    pub text: TextConfig,
    /// Backend text-to-image.
    pub generator: GeneratorConfig,
}

/// Taille cible et options de rendu pour `render`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Largeur de la grille en caractères.
    pub width: u32,
    /// Hauteur de la grille en caractères.
    pub height: u32,
    /// Inverser la luminance (pour fond clair).
    pub invert: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
            invert: false,
        }
    }
}

/// Style et taille fixes du chemin texte → ASCII.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TextConfig {
    /// Nom de style (voir `RampRegistry`).
    pub style: String,
    /// Largeur de la grille.
    pub width: u32,
    /// Hauteur de la grille.
    pub height: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            style: "modern".into(),
            width: 128,
            height: 128,
        }
    }
}

/// Endpoint et options du générateur HTTP.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// URL complète de l'endpoint `images/generations`.
    pub endpoint: String,
    /// Identifiant du modèle transmis au serveur.
    pub model: String,
    /// Taille demandée, format `"WxH"`.
    pub size: String,
    /// Variable d'environnement contenant la clé API (optionnelle).
    pub api_key_env: String,
    /// Timeout de la requête, en secondes.
    pub timeout_secs: u64,
    /// Dossier de sauvegarde des images générées.
    pub output_dir: PathBuf,
    /// Sauvegarder l'image générée par `render-from-text`.
    pub save_image: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:7860/v1/images/generations".into(),
            model: "runwayml/stable-diffusion-v1-5".into(),
            size: "512x512".into(),
            api_key_env: "IMG2ASCII_API_KEY".into(),
            timeout_secs: 300,
            output_dir: PathBuf::from("."),
            save_image: true,
        }
    }
}

impl AppConfig {
    /// Reject values that cannot drive a render or a request.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidConfiguration` on a zero size, a zero timeout
    /// or an empty endpoint.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_size("render", self.render.width, self.render.height)?;
        check_size("text", self.text.width, self.text.height)?;
        if self.generator.timeout_secs == 0 {
            return Err(CoreError::InvalidConfiguration(
                "generator.timeout_secs doit être > 0".into(),
            ));
        }
        if self.generator.endpoint.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "generator.endpoint est vide".into(),
            ));
        }
        Ok(())
    }
}

fn check_size(section: &str, width: u32, height: u32) -> Result<(), CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidConfiguration(format!(
            "{section} : dimensions invalides {width}×{height}"
        )));
    }
    Ok(())
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    render: Option<RenderSection>,
    text: Option<TextSection>,
    generator: Option<GeneratorSection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderSection {
    width: Option<u32>,
    height: Option<u32>,
    invert: Option<bool>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TextSection {
    style: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GeneratorSection {
    endpoint: Option<String>,
    model: Option<String>,
    size: Option<String>,
    api_key_env: Option<String>,
    timeout_secs: Option<u64>,
    output_dir: Option<PathBuf>,
    save_image: Option<bool>,
}

/// Parse une config TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the TOML is malformed or a value is out of range.
///
/// # Example
/// ```
/// use i2a_core::config::parse_config;
/// let config = parse_config("[render]\nwidth = 80\n").unwrap();
/// assert_eq!(config.render.width, 80);
/// assert_eq!(config.render.height, 128);
/// ```
pub fn parse_config(content: &str) -> Result<AppConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = AppConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.width {
            config.render.width = v;
        }
        if let Some(v) = r.height {
            config.render.height = v;
        }
        if let Some(v) = r.invert {
            config.render.invert = v;
        }
    }

    if let Some(t) = file.text {
        if let Some(v) = t.style {
            config.text.style = v;
        }
        if let Some(v) = t.width {
            config.text.width = v;
        }
        if let Some(v) = t.height {
            config.text.height = v;
        }
    }

    if let Some(g) = file.generator {
        if let Some(v) = g.endpoint {
            config.generator.endpoint = v;
        }
        if let Some(v) = g.model {
            config.generator.model = v;
        }
        if let Some(v) = g.size {
            config.generator.size = v;
        }
        if let Some(v) = g.api_key_env {
            config.generator.api_key_env = v;
        }
        if let Some(v) = g.timeout_secs {
            config.generator.timeout_secs = v;
        }
        if let Some(v) = g.output_dir {
            config.generator.output_dir = v;
        }
        if let Some(v) = g.save_image {
            config.generator.save_image = v;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use i2a_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.render.width, 128);
        assert!(!config.render.invert);
        assert!(config.generator.save_image);
    }

    #[test]
    fn shipped_default_toml_matches_defaults() {
        let config = parse_config(include_str!("../../../config/default.toml")).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.text.style, defaults.text.style);
        assert_eq!(config.generator.endpoint, defaults.generator.endpoint);
        assert_eq!(config.render.width, defaults.render.width);
    }

    #[test]
    fn partial_sections_override_only_given_fields() {
        let config = parse_config(
            "[text]\nstyle = \"retro\"\n[generator]\ntimeout_secs = 12\n",
        )
        .unwrap();
        assert_eq!(config.text.style, "retro");
        assert_eq!(config.text.width, 128);
        assert_eq!(config.generator.timeout_secs, 12);
        assert_eq!(config.generator.model, "runwayml/stable-diffusion-v1-5");
    }

    #[test]
    fn zero_size_is_invalid_configuration() {
        let err = parse_config("[render]\nwidth = 0\n").unwrap_err();
        let core = err.downcast_ref::<CoreError>();
        assert!(matches!(core, Some(CoreError::InvalidConfiguration(_))));
    }

    #[test]
    fn negative_size_fails_to_parse() {
        assert!(parse_config("[render]\nheight = -4\n").is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(parse_config("[render]\ncolour = true\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nwidth = 64\nheight = 32\ninvert = true").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!((config.render.width, config.render.height), (64, 32));
        assert!(config.render.invert);
    }

    #[test]
    fn load_config_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }
}
