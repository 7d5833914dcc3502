//! Console command parsing.

use anyhow::{anyhow, bail, Result};
use multiclip_core::{KeyInput, Modifiers, WatchOptions};

/// One console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set(Vec<String>),
    SetText(String),
    Clear,
    Queue,
    Shift,
    Pop,
    /// `None` means "use the configured options".
    Start(Option<WatchOptions>),
    Stop,
    Status,
    Select(String),
    Focus(String),
    Fields,
    Copy,
    Cut,
    Paste,
    Key(KeyInput),
    Help,
    Quit,
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "set" => Command::Set(parse_items(rest)?),
        "settext" => Command::SetText(rest.to_owned()),
        "clear" => Command::Clear,
        "queue" => Command::Queue,
        "shift" => Command::Shift,
        "pop" => Command::Pop,
        "start" => Command::Start(if rest.is_empty() {
            None
        } else {
            Some(parse_options(rest)?)
        }),
        "stop" => Command::Stop,
        "status" => Command::Status,
        "select" => Command::Select(rest.to_owned()),
        "focus" => {
            if rest.is_empty() {
                bail!("focus needs a field name");
            }
            Command::Focus(rest.to_owned())
        }
        "fields" => Command::Fields,
        "copy" => Command::Copy,
        "cut" => Command::Cut,
        "paste" => Command::Paste,
        "key" => Command::Key(parse_key(rest)?),
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {other:?} (try 'help')"),
    };
    Ok(Some(command))
}

/// Parse a JSON array of items; non-string entries are stringified the
/// way the original demo page accepted `[1,2,3]`.
fn parse_items(json: &str) -> Result<Vec<String>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| anyhow!("invalid JSON array: {e}"))?;
    Ok(values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}

/// Build watch options from whitespace-separated flags. The `keep-*`
/// flags turn the matching auto-stop off.
fn parse_options(rest: &str) -> Result<WatchOptions> {
    let mut options = WatchOptions::default();
    for flag in rest.split_whitespace() {
        match flag {
            "sync" => options.sync = true,
            "shift" => options.shift = true,
            "pop" => options.pop = true,
            "keep-copy" => options.stop_copy_on_end = false,
            "keep-cut" => options.stop_cut_on_end = false,
            "keep-paste" => options.stop_paste_on_end = false,
            other => bail!("unknown option flag {other:?}"),
        }
    }
    Ok(options)
}

/// Parse a key spec like `ctrl+c`.
fn parse_key(spec: &str) -> Result<KeyInput> {
    let mut mods = Modifiers::default();
    let mut ch = None;
    for part in spec.split('+') {
        let part = part.trim();
        match part.to_ascii_lowercase().as_str() {
            "ctrl" => mods.ctrl = true,
            "alt" => mods.alt = true,
            "shift" => mods.shift = true,
            "meta" | "super" | "cmd" => mods.meta = true,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => ch = Some(c),
                    _ => bail!("unrecognized key {part:?}"),
                }
            }
        }
    }
    let ch = ch.ok_or_else(|| anyhow!("key spec needs a character, e.g. ctrl+v"))?;
    Ok(KeyInput::new(ch, mods))
}

pub const HELP: &str = "\
queue commands:
  set <json array>     replace the queue, e.g. set [\"a\", \"b\"] or set [1,2,3]
  settext <text>       replace the queue from comma-separated text
  queue                print the queue
  shift | pop          consume one item from the front / back
  clear                empty the queue
session commands:
  start [flags]        start watching; flags: sync shift pop keep-copy keep-cut keep-paste
                       (no flags: use the configured options)
  stop                 stop watching
  status               session, queue, selection and clipboard state
host commands:
  select <text>        set the simulated selection
  focus <field>        move focus to a field
  fields               list fields and their contents
  copy | cut | paste   dispatch a clipboard event
  key <spec>           dispatch a keydown, e.g. key ctrl+v
other:
  help, quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_parse_to_none() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn set_accepts_json_arrays() {
        let command = parse(r#"set ["a", "b"]"#).unwrap();
        assert_eq!(
            command,
            Some(Command::Set(vec!["a".into(), "b".into()]))
        );

        let numbers = parse("set [1,2,3]").unwrap();
        assert_eq!(
            numbers,
            Some(Command::Set(vec!["1".into(), "2".into(), "3".into()]))
        );

        assert!(parse("set not-json").is_err());
    }

    #[test]
    fn start_flags_build_options() {
        assert_eq!(parse("start").unwrap(), Some(Command::Start(None)));

        let command = parse("start sync shift keep-paste").unwrap();
        let Some(Command::Start(Some(options))) = command else {
            panic!("expected start options");
        };
        assert!(options.sync);
        assert!(options.shift);
        assert!(!options.stop_paste_on_end);
        assert!(options.stop_copy_on_end);

        assert!(parse("start turbo").is_err());
    }

    #[test]
    fn key_specs_parse_modifiers() {
        let command = parse("key ctrl+v").unwrap();
        let Some(Command::Key(key)) = command else {
            panic!("expected key command");
        };
        assert_eq!(key.ch, 'v');
        assert!(key.mods.ctrl);
        assert!(!key.mods.alt);

        assert!(parse("key ctrl+").is_err());
        assert!(parse("key ctrl+abc").is_err());
    }

    #[test]
    fn settext_keeps_raw_text() {
        let command = parse("settext A, B ,C").unwrap();
        assert_eq!(command, Some(Command::SetText("A, B ,C".into())));
    }

    #[test]
    fn unknown_commands_error() {
        assert!(parse("frobnicate").is_err());
        assert!(parse("focus").is_err());
    }
}
