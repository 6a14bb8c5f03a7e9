// Flux architecture modules
mod actions;
mod app;
mod dispatcher;
mod effects;
mod keyboard;
mod logger;
mod stores;
mod ui;

mod common;
mod tui;

pub use app::App;

use datepick_core::PickerConfig;
use log::LevelFilter;

/// Runs the picker page until the user quits, then prints the committed values as JSON.
pub async fn tui_main(config: PickerConfig, dual: bool, level: LevelFilter) -> color_eyre::Result<()> {
    if let Err(e) = color_eyre::install() {
        eprintln!("Warning: Failed to install color-eyre: {}", e);
    }

    let log_buffer = logger::init_memory_logger(level)?;
    let (mut app, action_receiver) = App::new(config, dual, log_buffer)?;

    let mut terminal = tui::init()?;
    let result = app.run(&mut terminal, action_receiver).await;
    let _ = tui::restore();

    let committed = result?;
    println!("{}", serde_json::to_string_pretty(&committed)?);
    Ok(())
}
