#![warn(clippy::pedantic)]

pub mod actions;
pub mod global;
pub mod io;
pub mod session;

use anyhow::{Context, Result as AnyResult};

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "log.out" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        let _ = simple_logging::log_to_file("log.out", log::LevelFilter::Debug);
    }

    // Args are the session script, then a list of image paths to load.
    // Paths are OSStrings, let the system handle character encoding restrictions.
    let mut args = std::env::args_os().skip(1);
    let script_path: std::path::PathBuf = args
        .next()
        .map(Into::into)
        .ok_or_else(|| anyhow::anyhow!("usage: collage <session.toml> [images...]"))?;
    let image_paths: Vec<std::path::PathBuf> = args.map(Into::into).collect();

    let num_paths = image_paths.len();
    let images = io::read_images(image_paths);
    log::info!("Loaded {} of {num_paths} images", images.len());
    if num_paths != 0 && images.is_empty() {
        log::warn!("Failed to load any provided image.");
    }

    let hotkeys = global::hotkeys::Hotkeys::get();
    if let Err(e) = hotkeys.save() {
        log::warn!("Failed to save hotkey config:\n{e:?}");
    };
    for action in <actions::Action as strum::IntoEnumIterator>::iter() {
        let keys: Vec<String> = hotkeys
            .actions_to_keys
            .keys_of(action)
            .map(|key| ToString::to_string(&key))
            .collect();
        log::trace!("{} = {keys:?}", action.as_ref());
    }

    let script = session::Script::load(&script_path)?;
    let mut session =
        session::Session::new(&script.canvas, images, &hotkeys.keys_to_actions);
    session.run(&script.events);
    let (image, records) = session.finish()?;

    let base = script_path
        .parent()
        .map(std::path::Path::to_path_buf)
        .unwrap_or_default();
    let image_path = base.join(&script.output.image);
    image
        .save(&image_path)
        .with_context(|| format!("writing {image_path:?}"))?;
    let records_path = base.join(&script.output.records);
    std::fs::write(&records_path, records).with_context(|| format!("writing {records_path:?}"))?;
    log::info!("Wrote {image_path:?} and {records_path:?}");

    Ok(())
}
