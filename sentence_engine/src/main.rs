#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Suspended Sentence **
//! Point-and-click escape from a prison ship, played from the terminal.

use sentence_engine::config::load_config;
use sentence_engine::data_paths::data_path;
use sentence_engine::i18n::{install, load_catalog};
use sentence_engine::resources::FileResources;
use sentence_engine::sound::{SilentBackend, Sound};
use sentence_engine::style::GameStyle;
use sentence_engine::{ENGINE_VERSION, Game, run_repl, scenes};

use anyhow::{Context, Result};
use colored::Colorize;

use log::{info, warn};

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    let config = load_config();
    info!(
        "Start: Suspended Sentence engine v{ENGINE_VERSION}, start scene '{}'",
        config.start_scene
    );

    if let Some(locale) = &config.locale {
        match load_catalog(&data_path(locale)) {
            Ok(catalog) => install(catalog),
            Err(e) => warn!("translations unavailable: {e:#}"),
        }
    }

    let content = scenes::build_content(&config.start_scene).context("while loading game content")?;
    let sound = if config.sound {
        Sound::new(Box::new(SilentBackend))
    } else {
        Sound::disabled()
    };
    let mut game = Game::new(content, &FileResources::new(), sound)
        .context("while starting the game")?
        .with_debug_rects(config.debug_rects);
    info!("game content loaded successfully.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush()?;

    println!("{:^84}", config.title.to_uppercase().bright_yellow().underline());
    println!(
        "\nYou wake in the {}. Type {} for a list of commands.\n",
        game.world().active_scene().scene_style(),
        "help".bold()
    );

    run_repl(&mut game)
}
