//! commissions-tui - A terminal client for the commissions report service
//!
//! Pick a date range, query the service, and browse the computed
//! commissions as a table. Uses the Component Architecture pattern from
//! ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod report;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::services::HttpCommissionSource;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let log_path = match logging::init() {
        Ok(path) => path,
        Err(err) => {
            eprintln!("warning: logging disabled: {:#}", err);
            None
        }
    };

    match Config::write_starter() {
        Ok(Some(path)) => info!("wrote starter config to {}", path.display()),
        Ok(None) => {}
        Err(err) => warn!("could not write default config: {:#}", err),
    }
    let config = Config::resolve();

    let source = HttpCommissionSource::new(config.api_url.clone())?;
    info!(
        "starting against {} (log: {:?})",
        source.url(),
        log_path.as_deref()
    );

    let mut app = App::new(config, Arc::new(source));

    tui::install_panic_hook();
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    app.init()?;
    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        error!("fatal: {:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("exiting");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!("draw error: {}", e);
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // An action may produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No input this tick; collect finished queries
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
