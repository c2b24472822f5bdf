use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// img2ascii : images et prompts texte en art ASCII.
#[derive(Parser, Debug)]
#[command(name = "img2ascii", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convertit une image en ASCII et l'affiche sur stdout.
    Render {
        /// Chemin vers une image (PNG, JPEG, BMP, GIF).
        image: PathBuf,

        /// Style de ramp : classic, modern, retro, thick, thin, simple.
        style: String,

        /// Largeur en caractères (défaut : config [render]).
        #[arg(long)]
        width: Option<u32>,

        /// Hauteur en caractères (défaut : config [render]).
        #[arg(long)]
        height: Option<u32>,

        /// Inverser la luminance (pour fond clair).
        #[arg(long, default_value_t = false)]
        invert: bool,
    },

    /// Génère une image depuis un prompt puis l'affiche en ASCII.
    RenderFromText {
        /// Description de l'image à générer.
        prompt: String,
    },

    /// Génère une image depuis un prompt et la sauvegarde en PNG.
    Generate {
        /// Description de l'image à générer.
        prompt: String,
    },

    /// Liste les styles disponibles.
    Styles,
}

/// Code de sortie pour une erreur de parsing : 1 pour un usage invalide,
/// 0 pour `--help` / `--version` (affichés sur stdout).
#[must_use]
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    i32::from(err.use_stderr())
}
