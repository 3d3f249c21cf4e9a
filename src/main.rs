use std::io;
use std::time::Duration;

use clap::Parser;

use snapgrid::cli::Cli;
use snapgrid::constants::POLL_INTERVAL_MS;
use snapgrid::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use snapgrid::drivers::{InputDriver, OutputDriver};
use snapgrid::event_loop::{ControlFlow, EventLoop};
use snapgrid::host::TerminalHost;
use snapgrid::render;
use snapgrid::tracing_sub;
use snapgrid::window::decorator::TitleBarDecorator;

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    match &cli.log_file {
        Some(path) => tracing_sub::init_with_file(path)?,
        None => tracing_sub::init_discard(),
    }

    let mut output = ConsoleOutputDriver::new()?;
    let (cols, rows) = output.size()?;
    let mut host = TerminalHost::new(cols, rows, cli.config(), cli.scale());
    tracing::info!(cols, rows, config = ?host.workspace().config(), "starting");

    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;

    let decorator = TitleBarDecorator;
    let mut event_loop = EventLoop::new(input, Duration::from_millis(POLL_INTERVAL_MS));
    let result = event_loop.run(|driver, event| {
        if let Some(event) = event {
            if host.handle_event(&event) == ControlFlow::Quit {
                return Ok(ControlFlow::Quit);
            }
            if let Some(enabled) = host.state_mut().take_mouse_capture_change() {
                driver.set_mouse_capture(enabled)?;
            }
            return Ok(ControlFlow::Continue);
        }
        let snapshot = host.snapshot();
        let help = host.state().help_visible().then(|| host.bindings());
        output.draw(|frame| {
            render::draw(
                frame,
                &snapshot,
                host.scale(),
                &decorator,
                host.state().focused(),
                help,
            );
        })?;
        Ok(ControlFlow::Continue)
    });

    output.exit()?;
    result
}
