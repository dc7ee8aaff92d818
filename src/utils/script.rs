use std::io::{BufRead, Write};
use std::str::FromStr;

use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Captures, Regex};
use thiserror::Error;

use crate::average::average;
use crate::error::IndexError;
use crate::linked_list::StringLinkedList;

lazy_static! {
    static ref NO_ARGS: Regex =
        Regex::new(r"(?i)^(pop|shift|len|print|average|clear)\s*$").unwrap();
    static ref VALUE: Regex = Regex::new(r"(?i)^(push|unshift)(?:\s+(.*))?$").unwrap();
    static ref INDEX: Regex = Regex::new(r"(?i)^(get|remove)\s+(\d+)\s*$").unwrap();
    static ref INDEX_VALUE: Regex =
        Regex::new(r"(?i)^(set|insert)\s+(\d+)(?:\s+(.*))?$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Push(String),
    Unshift(String),
    Pop,
    Shift,
    Get(usize),
    Set(usize, String),
    Insert(usize, String),
    Remove(usize),
    Len,
    Print,
    Average,
    Clear,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim_start().trim_end_matches(['\r', '\n']);

        if let Some(caps) = NO_ARGS.captures(line) {
            return match keyword(&caps).as_str() {
                "pop" => Ok(Command::Pop),
                "shift" => Ok(Command::Shift),
                "len" => Ok(Command::Len),
                "print" => Ok(Command::Print),
                "average" => Ok(Command::Average),
                _ => Ok(Command::Clear),
            };
        }

        if let Some(caps) = VALUE.captures(line) {
            let value = rest(&caps, 2);
            return match keyword(&caps).as_str() {
                "push" => Ok(Command::Push(value)),
                _ => Ok(Command::Unshift(value)),
            };
        }

        if let Some(caps) = INDEX.captures(line) {
            let index = parse_index(&caps)?;
            return match keyword(&caps).as_str() {
                "get" => Ok(Command::Get(index)),
                _ => Ok(Command::Remove(index)),
            };
        }

        if let Some(caps) = INDEX_VALUE.captures(line) {
            let index = parse_index(&caps)?;
            let value = rest(&caps, 3);
            return match keyword(&caps).as_str() {
                "set" => Ok(Command::Set(index, value)),
                _ => Ok(Command::Insert(index, value)),
            };
        }

        Err("Unknown command detected".to_string())
    }
}

fn keyword(caps: &Captures) -> String {
    caps[1].to_lowercase()
}

fn rest(caps: &Captures, group: usize) -> String {
    caps.get(group)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn parse_index(caps: &Captures) -> Result<usize, String> {
    caps[2]
        .parse::<usize>()
        .map_err(|e| format!("Bad index: {}", e))
}

/// Parses one script line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("line {line}: {message}: {text:?}")]
    Parse {
        line: usize,
        text: String,
        message: String,
    },

    #[error("line {line}: {source}")]
    Index {
        line: usize,
        #[source]
        source: IndexError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: usize,
    pub errors: usize,
}

/// A list plus the policy for index errors raised while running a script.
pub struct Session {
    list: StringLinkedList,
    strict: bool,
}

impl Session {
    pub fn new(list: StringLinkedList, strict: bool) -> Session {
        Session { list, strict }
    }

    pub fn list(&self) -> &StringLinkedList {
        &self.list
    }

    pub fn into_list(self) -> StringLinkedList {
        self.list
    }

    /// Applies one command, returning the line it prints, if any.
    pub fn apply(&mut self, command: Command) -> Result<Option<String>, IndexError> {
        let list = &mut self.list;
        let output = match command {
            Command::Push(value) => {
                list.push(value);
                None
            }
            Command::Unshift(value) => {
                list.unshift(value);
                None
            }
            Command::Pop => Some(list.pop()?),
            Command::Shift => Some(list.shift()?),
            Command::Get(index) => Some(list.get_at(index)?.to_string()),
            Command::Set(index, value) => {
                list.set_at(index, value)?;
                None
            }
            Command::Insert(index, value) => {
                list.insert_at(index, value)?;
                None
            }
            Command::Remove(index) => Some(list.remove_at(index)?),
            Command::Len => Some(list.len().to_string()),
            Command::Print => Some(list.to_string()),
            Command::Average => Some(average(list).to_string()),
            Command::Clear => {
                list.clear();
                None
            }
        };
        Ok(output)
    }

    /// Runs every line of `input`, writing command output to `output`.
    ///
    /// Parse errors always stop the run. Index errors stop it only in strict
    /// mode; otherwise they are written as `error: ...` lines.
    pub fn run<R, W>(&mut self, input: R, mut output: W) -> Result<RunSummary, ScriptError>
    where
        R: BufRead,
        W: Write,
    {
        let mut summary = RunSummary::default();

        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let number = number + 1;

            let command = match parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    return Err(ScriptError::Parse {
                        line: number,
                        text: line,
                        message,
                    })
                }
            };

            debug!("line {}: {:?}", number, command);
            summary.commands += 1;

            match self.apply(command) {
                Ok(Some(text)) => writeln!(output, "{}", text)?,
                Ok(None) => {}
                Err(source) if self.strict => {
                    return Err(ScriptError::Index {
                        line: number,
                        source,
                    })
                }
                Err(source) => {
                    warn!("line {}: {}", number, source);
                    summary.errors += 1;
                    writeln!(output, "error: line {}: {}", number, source)?;
                }
            }
        }

        output.flush()?;
        Ok(summary)
    }
}
