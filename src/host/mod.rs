// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! Terminal host for the console view.
//!
//! One terminal cell stands for one `cell_width x cell_height` pixel block of
//! the view. The rightmost column is kept for the scrollbar when one is
//! attached.

pub mod demo;
pub mod keys;
pub mod renderer;

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use conview::{CellMetrics, ConsoleView, ScrollbarModel};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::layout::Rect as Area;
use ratatui::prelude::*;
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use keys::{is_interrupt, map_key};
use renderer::{CellRenderer, to_color};

/// Pixels scrolled per mouse wheel notch.
const WHEEL_STEP: u32 = 3 * 16;

/// Cell metrics that line the view up with terminal cells: rows are as tall
/// as suggestion menu rows and the scroll range counts whole rows.
pub fn terminal_metrics() -> CellMetrics {
    CellMetrics {
        cell_width: 10,
        cell_height: 16,
        row_height_factor: 16.0,
        height_padding: 16,
    }
}

/// Run the view until the exit flag is set, Ctrl-C is pressed or the input
/// stream ends.
pub async fn run(mut view: ConsoleView, exit: Rc<Cell<bool>>) -> io::Result<()> {
    setup_terminal()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;

    let res = run_view(&mut terminal, &mut view, &exit).await;

    restore_terminal()?;
    res
}

fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        io::stdout(),
        crossterm::cursor::Show,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    Ok(())
}

/// Split the frame into the view area and, when a scrollbar is attached,
/// the column it is drawn in.
fn split_area(area: Area, bound: bool) -> (Area, Option<Area>) {
    if !bound || area.width < 2 {
        return (area, None);
    }
    let view = Area {
        width: area.width - 1,
        ..area
    };
    let bar = Area {
        x: area.x + area.width - 1,
        width: 1,
        ..area
    };
    (view, Some(bar))
}

/// Pixel size of a view area.
fn view_size(area: Area, metrics: &CellMetrics) -> (u32, u32) {
    (
        u32::from(area.width).saturating_mul(metrics.cell_width),
        u32::from(area.height).saturating_mul(metrics.cell_height),
    )
}

fn sync_size(
    terminal: &Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut ConsoleView,
) -> io::Result<()> {
    let size = terminal.size()?;
    let (area, _) = split_area(
        Area::new(0, 0, size.width, size.height),
        view.scrollbar().is_some(),
    );
    let (width, height) = view_size(area, &view.config().cells);
    if (width, height) != view.size() {
        debug!(width, height, "view resized");
        view.resize(width, height);
    }
    Ok(())
}

fn draw_scrollbar(frame: &mut Frame, area: Area, bar: &ScrollbarModel, color: Color) {
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("▴"))
        .end_symbol(Some("▾"))
        .track_symbol(Some(" "))
        .thumb_symbol("│")
        .style(Style::default().fg(color))
        .thumb_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

    let mut state = ScrollbarState::new(bar.max_value() as usize)
        .position(bar.value as usize)
        .viewport_content_length(bar.large_change as usize);

    frame.render_stateful_widget(scrollbar, area, &mut state);
}

fn draw(frame: &mut Frame, view: &ConsoleView) {
    let (area, bar_area) = split_area(frame.area(), view.scrollbar().is_some());
    let cells = view.config().cells;

    let mut renderer = CellRenderer::new(
        frame.buffer_mut(),
        area,
        cells.cell_width,
        cells.cell_height,
    );
    view.paint(&mut renderer);

    if let (Some(bar_area), Some(bar)) = (bar_area, view.scrollbar()) {
        if bar.enabled {
            draw_scrollbar(frame, bar_area, bar, to_color(view.palette().suggestion_menu));
        } else {
            let bg = to_color(view.palette().background);
            for y in bar_area.top()..bar_area.bottom() {
                if let Some(cell) = frame.buffer_mut().cell_mut((bar_area.x, y)) {
                    cell.reset();
                    cell.set_bg(bg);
                }
            }
        }
    }
}

fn handle_mouse(view: &mut ConsoleView, mouse: MouseEvent) {
    let Some(bar) = view.scrollbar().copied() else {
        return;
    };
    match mouse.kind {
        MouseEventKind::ScrollUp => view.scroll_to(bar.value.saturating_sub(WHEEL_STEP)),
        MouseEventKind::ScrollDown => view.scroll_to(bar.value.saturating_add(WHEEL_STEP)),
        _ => {}
    }
}

async fn run_view(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut ConsoleView,
    exit: &Cell<bool>,
) -> io::Result<()> {
    let mut event_stream = EventStream::new();
    let mut blink = interval(view.config().blink_interval());
    blink.set_missed_tick_behavior(MissedTickBehavior::Skip);

    sync_size(terminal, view)?;
    view.request_redraw();

    loop {
        if exit.get() {
            info!("exit requested");
            return Ok(());
        }

        if view.take_redraw() {
            terminal.draw(|frame| draw(frame, view))?;
        }

        tokio::select! {
            _ = blink.tick() => {
                view.tick();
            }

            maybe_event = event_stream.next() => {
                let Some(event_result) = maybe_event else {
                    break;
                };
                let event = event_result?;

                match event {
                    Event::Key(key) => {
                        if is_interrupt(&key) {
                            info!("interrupted");
                            return Ok(());
                        }
                        if let Some(key) = map_key(&key) {
                            view.handle_key(key);
                        }
                    }
                    Event::Mouse(mouse) => handle_mouse(view, mouse),
                    Event::Resize(_, _) => {
                        terminal.autoresize()?;
                        sync_size(terminal, view)?;
                        view.request_redraw();
                    }
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
