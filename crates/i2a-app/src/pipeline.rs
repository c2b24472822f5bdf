use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use i2a_ascii::luminance::AsciiRenderer;
use i2a_core::frame::{AsciiGrid, FrameBuffer};
use i2a_core::traits::{Generator, Source};
use i2a_source::generator::validate_prompt;
use i2a_source::image::save_frame;
use i2a_source::naming::output_path;

/// Résultat du chemin texte → ASCII.
pub struct TextArt {
    /// Grille rendue.
    pub grid: AsciiGrid,
    /// Image générée, si elle a été sauvegardée.
    pub saved: Option<PathBuf>,
}

/// Charge la source puis la rend.
///
/// # Errors
/// Returns an error if loading or rendering fails. Rien n'est émis en cas d'échec.
pub fn render_source(source: &mut dyn Source, renderer: &AsciiRenderer) -> Result<AsciiGrid> {
    let frame = source
        .load()
        .with_context(|| format!("Source {}", source.describe()))?;
    Ok(renderer.render(&frame)?)
}

/// Prompt → image → ASCII. Le prompt est validé avant tout appel au générateur.
///
/// `save_dir` : si fourni, l'image générée y est sauvegardée avant le rendu.
///
/// # Errors
/// Returns `CoreError::EmptyInput` for a blank prompt, or the first failure of
/// generation, saving or rendering.
pub fn render_from_text(
    generator: &mut dyn Generator,
    prompt: &str,
    renderer: &AsciiRenderer,
    save_dir: Option<&Path>,
) -> Result<TextArt> {
    validate_prompt(prompt)?;
    let frame = generator.generate(prompt)?;
    let saved = match save_dir {
        Some(dir) => Some(save_generated(&frame, dir, prompt)?),
        None => None,
    };
    let grid = renderer.render(&frame)?;
    Ok(TextArt { grid, saved })
}

/// Prompt → image sauvegardée dans `dir`. Retourne le chemin écrit.
///
/// # Errors
/// Returns `CoreError::EmptyInput` for a blank prompt, or the generation/saving failure.
pub fn generate_to_file(generator: &mut dyn Generator, prompt: &str, dir: &Path) -> Result<PathBuf> {
    validate_prompt(prompt)?;
    let frame = generator.generate(prompt)?;
    save_generated(&frame, dir, prompt)
}

fn save_generated(frame: &FrameBuffer, dir: &Path, prompt: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Impossible de créer {}", dir.display()))?;
    let path = output_path(dir, prompt);
    save_frame(frame, &path)?;
    Ok(path)
}

/// Écrit la grille, une ligne par rangée, terminée par un saut de ligne.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn write_grid(out: &mut impl Write, grid: &AsciiGrid) -> io::Result<()> {
    writeln!(out, "{grid}")?;
    out.flush()
}

/// En-tête `Your wish` / `Your Artwork` puis la grille.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn write_text_art(out: &mut impl Write, prompt: &str, grid: &AsciiGrid) -> io::Result<()> {
    writeln!(out, "Your wish: {prompt}")?;
    writeln!(out, "Your Artwork")?;
    write_grid(out, grid)
}
