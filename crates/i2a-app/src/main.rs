use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use i2a_ascii::luminance::AsciiRenderer;
use i2a_core::charset::RampRegistry;
use i2a_core::config::AppConfig;
use i2a_core::traits::Source;
use i2a_source::generator::HttpGenerator;
use i2a_source::image::ImageSource;

pub mod cli;
pub mod pipeline;

use cli::Command;

fn main() -> Result<()> {
    // 1. Parser CLI (erreur d'usage → code 1, --help/--version → code 0)
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(cli::usage_exit_code(&e));
        }
    };

    // 2. Initialiser le logging (stderr, stdout reste réservé à l'art)
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let config = resolve_config(&cli.config)?;

    // 4. Exécuter la commande
    match cli.command {
        Command::Render {
            image,
            style,
            width,
            height,
            invert,
        } => {
            let renderer = AsciiRenderer::new(
                RampRegistry::lookup(&style),
                width.unwrap_or(config.render.width),
                height.unwrap_or(config.render.height),
            )?
            .with_invert(invert || config.render.invert);
            let mut source = ImageSource::new(image)?;
            log::info!("Rendu de {} (style {style})", source.describe());
            let grid = pipeline::render_source(&mut source, &renderer)?;
            pipeline::write_grid(&mut std::io::stdout().lock(), &grid)?;
        }
        Command::RenderFromText { prompt } => {
            // Valider avant de construire le client HTTP
            i2a_source::generator::validate_prompt(&prompt)?;
            let renderer = AsciiRenderer::new(
                RampRegistry::lookup(&config.text.style),
                config.text.width,
                config.text.height,
            )?;
            let mut generator = HttpGenerator::new(&config.generator)?;
            let save_dir = config
                .generator
                .save_image
                .then_some(config.generator.output_dir.as_path());
            let art = pipeline::render_from_text(&mut generator, &prompt, &renderer, save_dir)?;

            let mut out = std::io::stdout().lock();
            if let Some(ref path) = art.saved {
                log::info!("Image sauvegardée : {}", path.display());
            }
            pipeline::write_text_art(&mut out, &prompt, &art.grid)?;
        }
        Command::Generate { prompt } => {
            i2a_source::generator::validate_prompt(&prompt)?;
            let mut generator = HttpGenerator::new(&config.generator)?;
            let path =
                pipeline::generate_to_file(&mut generator, &prompt, &config.generator.output_dir)?;
            let mut out = std::io::stdout().lock();
            writeln!(out, "Your Imaginary: {prompt}")?;
            writeln!(out, "Generated: {}", path.display())?;
        }
        Command::Styles => {
            let mut out = std::io::stdout().lock();
            for (name, ramp) in RampRegistry::entries() {
                writeln!(out, "{name:<8} \"{ramp}\"")?;
            }
        }
    }

    Ok(())
}

/// Config absente → défauts avec un avertissement.
fn resolve_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        let config = i2a_core::config::load_config(path)?;
        log::info!("Config chargée depuis {}", path.display());
        Ok(config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(AppConfig::default())
    }
}
