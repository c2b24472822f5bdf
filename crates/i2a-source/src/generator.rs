//! Backend text-to-image HTTP (API compatible `images/generations`).
//!
//! Le modèle tourne ailleurs (serveur local ou distant) ; ce module ne fait
//! qu'envoyer le prompt et décoder l'image renvoyée.

use std::time::Duration;

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose;
use i2a_core::config::GeneratorConfig;
use i2a_core::error::CoreError;
use i2a_core::frame::FrameBuffer;
use i2a_core::traits::Generator;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::image::decode_image;

/// Corps de requête envoyé au serveur.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    size: &'a str,
    response_format: &'a str,
}

/// Réponse du serveur : une liste d'images encodées en base64.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    data: Vec<GeneratedItem>,
}

#[derive(Debug, Deserialize)]
struct GeneratedItem {
    #[serde(default)]
    b64_json: Option<String>,
}

/// Rejette un prompt vide ou composé uniquement d'espaces.
///
/// # Errors
/// Returns `CoreError::EmptyInput` for a blank prompt.
///
/// # Example
/// ```
/// use i2a_source::generator::validate_prompt;
/// assert!(validate_prompt("a lighthouse at dusk").is_ok());
/// assert!(validate_prompt("   ").is_err());
/// ```
pub fn validate_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::EmptyInput("le prompt est vide".into()));
    }
    Ok(())
}

/// Générateur bloquant adossé à un endpoint HTTP.
pub struct HttpGenerator {
    client: Client,
    endpoint: String,
    model: String,
    size: String,
    api_key: Option<String>,
}

impl HttpGenerator {
    /// Construit le client HTTP depuis la config.
    ///
    /// La clé API est lue dans `config.api_key_env` ; absente = pas d'en-tête `Authorization`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Impossible de créer le client HTTP")?;
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            log::debug!("{} non défini, requêtes sans authentification", config.api_key_env);
        }
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            size: config.size.clone(),
            api_key,
        })
    }
}

impl Generator for HttpGenerator {
    fn generate(&mut self, prompt: &str) -> Result<FrameBuffer> {
        validate_prompt(prompt)?;

        let body = GenerateRequest {
            model: &self.model,
            prompt,
            n: 1,
            size: &self.size,
            response_format: "b64_json",
        };

        log::info!("Génération via {} (modèle {})", self.endpoint, self.model);
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .with_context(|| format!("Requête vers {} échouée", self.endpoint))?;

        let status = response.status();
        let text = response
            .text()
            .context("Impossible de lire la réponse du générateur")?;
        if !status.is_success() {
            anyhow::bail!("Le générateur a répondu {status} : {text}");
        }

        let frame = decode_response(&text)?;
        log::info!("Image générée ({}×{})", frame.width, frame.height);
        Ok(frame)
    }
}

/// Décode le JSON de réponse en image.
///
/// Seule la première entrée de `data` est utilisée.
///
/// # Errors
/// Returns an error if the JSON, the base64 payload or the image is invalid.
pub fn decode_response(body: &str) -> Result<FrameBuffer> {
    let response: GenerateResponse =
        serde_json::from_str(body).context("Réponse JSON invalide")?;
    let payload = response
        .data
        .into_iter()
        .next()
        .and_then(|item| item.b64_json)
        .ok_or_else(|| anyhow::anyhow!("Réponse sans image (data[0].b64_json absent)"))?;
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .context("Base64 invalide dans la réponse")?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use std::io::Cursor;

    fn png_base64(width: u32, height: u32) -> String {
        let img = ::image::RgbaImage::from_pixel(width, height, ::image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ::image::ImageFormat::Png)
            .unwrap();
        general_purpose::STANDARD.encode(&bytes)
    }

    #[test]
    fn decodes_first_image() {
        let body = format!(
            r#"{{"created": 1, "data": [{{"b64_json": "{}"}}, {{"b64_json": "{}"}}]}}"#,
            png_base64(3, 2),
            png_base64(9, 9)
        );
        let frame = decode_response(&body).unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert!(frame.data.chunks_exact(4).all(|px| px == [10, 20, 30, 255]));
    }

    #[test]
    fn empty_data_is_an_error() {
        assert!(decode_response(r#"{"data": []}"#).is_err());
        assert!(decode_response(r#"{"data": [{"url": "http://x"}]}"#).is_err());
    }

    #[test]
    fn bad_base64_is_an_error() {
        assert!(decode_response(r#"{"data": [{"b64_json": "***"}]}"#).is_err());
    }

    #[test]
    fn blank_prompt_rejected_before_any_request() {
        let config = GeneratorConfig {
            endpoint: "http://127.0.0.1:9/unreachable".into(),
            ..GeneratorConfig::default()
        };
        let mut generator = HttpGenerator::new(&config).unwrap();
        let err = generator.generate(" \t").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::EmptyInput(_))
        ));
    }
}
