// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Jason Ish

//! The demo shell that runs behind the prompt.

use std::cell::Cell;
use std::rc::Rc;

use conview::{ColorRef, ConsoleView, StyleKind};

/// Completions seeded when no suggestion file is given.
pub const DEMO_SUGGESTIONS: &[&str] = &[
    "system.test.a",
    "system.memory.dump();",
    "system.test();",
    "system.core.insert(",
    "system.core.kernel.run",
    "system.core.kernel.su.login(",
    "system.memory.clear();",
    "system.memory.release(",
    "system.memory.info();",
    "system.core.kernel.su.login(",
    "system.core.kernel.su.login(",
    "system.core.kernel.su.abc(",
    "system.core.kernel.su.def(",
];

/// `machine:~ user$:` from the environment.
pub fn default_prompt_info() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "user".to_string());
    let machine = std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "localhost".to_string());
    format!("{machine}:~ {user}$:")
}

pub fn greet(view: &mut ConsoleView) {
    view.write_line_colored("conview demo", ColorRef::CYAN);
    view.write_line("Type `help` for commands. Up/Down walk suggestions, Ctrl-C quits.");
    view.blank_line();
}

/// Handles committed lines. Setting the shared flag asks the host to quit.
pub struct DemoShell {
    exit: Rc<Cell<bool>>,
}

impl DemoShell {
    pub fn new(exit: Rc<Cell<bool>>) -> Self {
        Self { exit }
    }

    pub fn run(&mut self, view: &mut ConsoleView, input: &str) {
        match input.trim() {
            "help" => {
                view.write_line("help    show this list");
                view.write_line("clear   clear the screen");
                view.write_line("styles  show the text decorations");
                view.write_line("exit    leave the demo (also `quit`)");
            }
            "clear" => view.clear(),
            "styles" => {
                for style in StyleKind::ALL {
                    view.write_line_styled(style.as_str(), ColorRef::WHITE, style, ColorRef::RED);
                }
            }
            "exit" | "quit" => self.exit.set(true),
            "" => {}
            other => {
                view.write_line("You typed: ");
                view.write_colored(other.to_string(), ColorRef::YELLOW);
            }
        }
    }
}

impl conview::InputConsumer for DemoShell {
    fn on_submit(&mut self, view: &mut ConsoleView, text: &str) {
        self.run(view, text);
    }
}
