use std::io::{self, BufRead, Write};

use anyhow::Result;
use log::info;
use multiclip_core::{ClipboardWatcher, EventKind};

use super::commands::{self, Command};
use super::host::ConsoleHost;
use crate::config::DemoConfig;

/// Main demo state: the watcher attached to the simulated host.
pub struct App {
    config: DemoConfig,
    watcher: ClipboardWatcher<ConsoleHost>,
}

impl App {
    pub fn new(config: DemoConfig) -> Self {
        let host = ConsoleHost::new(&config.host);
        let mut watcher = ClipboardWatcher::new(host);
        watcher.set(config.items.clone());
        Self { config, watcher }
    }

    /// Run the console loop until quit or EOF.
    pub fn run(mut self) -> Result<()> {
        println!("multiclip demo console — 'help' lists commands");
        self.print_status();

        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            print!("> ");
            io::stdout().flush()?;
            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            match commands::parse(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self.handle(command),
                Err(e) => println!("error: {e}"),
            }
        }
        info!("demo console exiting");
        Ok(())
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Set(items) => {
                self.watcher.set(items);
                self.print_queue();
            }
            Command::SetText(text) => {
                self.watcher.set_text(&text);
                self.print_queue();
            }
            Command::Clear => {
                self.watcher.clear();
                println!("queue cleared");
            }
            Command::Queue => self.print_queue(),
            Command::Shift => println!("shifted: {:?}", self.watcher.shift()),
            Command::Pop => println!("popped: {:?}", self.watcher.pop()),
            Command::Start(options) => {
                let options = options.unwrap_or(self.config.options);
                match self.watcher.start_watching(options) {
                    Ok(_) => println!("watching with {:?}", options),
                    Err(e) => println!("error: {e}"),
                }
            }
            Command::Stop => {
                self.watcher.stop_watching();
                println!("stopped");
            }
            Command::Status => self.print_status(),
            Command::Select(text) => {
                self.watcher.source_mut().select(text);
            }
            Command::Focus(name) => {
                if !self.watcher.source_mut().focus(&name) {
                    println!("no field named {name:?}");
                }
            }
            Command::Fields => self.print_fields(),
            Command::Copy => {
                self.watcher.source_mut().dispatch_capture(EventKind::Copy);
                self.print_status();
            }
            Command::Cut => {
                self.watcher.source_mut().dispatch_capture(EventKind::Cut);
                self.print_status();
            }
            Command::Paste => {
                self.watcher.source_mut().dispatch_paste();
                self.print_fields();
                self.print_status();
            }
            Command::Key(key) => self.watcher.source_mut().dispatch_key(key),
            Command::Help => println!("{}", commands::HELP),
            // Quit is handled by the run loop.
            Command::Quit => {}
        }
    }

    fn print_queue(&self) {
        println!("queue: {:?}", self.watcher.get());
    }

    fn print_fields(&self) {
        let focused = self.watcher.source().focused_name().to_owned();
        for field in self.watcher.source().fields() {
            let marker = if field.name() == focused { "*" } else { " " };
            println!("{marker} {}: {:?}", field.name(), field.text());
        }
    }

    fn print_status(&mut self) {
        let watching = self.watcher.is_watching();
        let queue = self.watcher.get();
        let selection = self
            .watcher
            .source()
            .selection()
            .map(str::to_owned);
        let clipboard = self.watcher.source_mut().clipboard_text();
        println!(
            "watching: {watching} | queue: {queue:?} | selection: {selection:?} | clipboard: {clipboard:?}"
        );
    }
}
