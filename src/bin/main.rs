use std::{io, process::ExitCode};

use clap::Parser;
use log::{debug, error, info};
use pocketdict_core::app::{DictionaryApp, TickResult};
use pocketdict_hal_linux::{
    HalError,
    input::ConsoleKeypad,
    platform::gpio,
    render::{FrameRenderer, ListRenderer},
    storage::{EcdictLookup, FontAtlas},
};
use st7920::FrameBuffer;

use config::Cli;

#[path = "main/config.rs"]
mod config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(&cli);
    info!("pocketdict {} starting", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("fatal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(filter) = cli.log_level.as_deref() {
        builder.parse_filters(filter);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<(), HalError> {
    // Resources first: a missing atlas or store must fail before the panel
    // is touched.
    let font = FontAtlas::load(&cli.font)?;
    let lookup = EcdictLookup::open(&cli.dict, cli.search_policy())?;

    let mut display = gpio::open_display(&cli.gpio_chip, cli.display_lines(), cli.driver_config())?;
    display.setup()?;
    display.set_backlight(!cli.no_backlight)?;

    let keypad = ConsoleKeypad::new(io::stdin().lock());
    let mut app = DictionaryApp::new(lookup, keypad);
    let mut renderer = ListRenderer::new(&font);
    let mut frame = FrameBuffer::new();

    app.with_screen(|screen| renderer.render(screen, &mut frame));
    let words = display.commit_full(&frame)?;
    info!("display: first frame committed words={}", words);

    loop {
        match app.tick()? {
            TickResult::NoRender => {}
            TickResult::RenderRequested => {
                app.with_screen(|screen| renderer.render(screen, &mut frame));
                let words = display.commit_diff(&frame)?;
                debug!("display: frame committed words={}", words);
            }
            TickResult::InputClosed => break,
        }
    }

    display.set_backlight(false)?;
    info!("input closed, shutting down");
    Ok(())
}
