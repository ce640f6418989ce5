//! Interactive menu over a [`FileStore`].
//!
//! The loop moves between [`State`]s until the user picks anything other than
//! a known menu entry or input runs out. Store failures are not handled here;
//! they end the session and surface to the caller.

use std::io::{BufRead, Write};

use anyhow::Result;
use log::{debug, info};

use crate::{io_utils::split_row, store::FileStore};

pub const FIELD_SEPARATOR: &str = "\t | \t";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Menu,
    Read,
    Rewrite,
    Append,
    Exit,
}

impl State {
    pub fn from_choice(choice: &str) -> Self {
        match choice {
            "1" => State::Read,
            "2" => State::Rewrite,
            "3" => State::Append,
            _ => State::Exit,
        }
    }
}

pub struct Session<'a, R, W> {
    store: &'a FileStore,
    input: R,
    output: W,
    clear_screen: bool,
}

impl<'a, R, W> Session<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a FileStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            clear_screen: false,
        }
    }

    pub fn clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        let mut state = State::Menu;
        while state != State::Exit {
            debug!("Entering {state:?}");
            state = match state {
                State::Menu => self.menu()?,
                State::Read => self.read()?,
                State::Rewrite => self.rewrite()?,
                State::Append => self.append()?,
                State::Exit => State::Exit,
            };
        }
        Ok(())
    }

    fn menu(&mut self) -> Result<State> {
        self.clear()?;
        writeln!(self.output, "Menu:")?;
        writeln!(self.output, "1. Read file")?;
        writeln!(self.output, "2. Rewrite file")?;
        writeln!(self.output, "3. Append to file")?;
        writeln!(self.output, "(other). Exit")?;
        let choice = self.prompt("What would you like to do? (Enter one of the numbers above): ")?;
        Ok(choice.map_or(State::Exit, |c| State::from_choice(&c)))
    }

    fn read(&mut self) -> Result<State> {
        self.clear()?;
        let rows = self.store.read()?;
        for row in &rows {
            writeln!(self.output, "{}", row.join(FIELD_SEPARATOR))?;
        }
        self.acknowledge()
    }

    fn rewrite(&mut self) -> Result<State> {
        self.clear()?;
        writeln!(
            self.output,
            "Enter rows as 'value1,value2,...,valueN' (empty line to finish):"
        )?;

        let mut rows = Vec::new();
        loop {
            let Some(line) = self.prompt(&format!("Row {}: ", rows.len() + 1))? else {
                return Ok(State::Exit);
            };
            if !line.is_empty() {
                rows.push(split_row(&line));
                continue;
            }
            if !rows.is_empty() {
                break;
            }
            writeln!(self.output, "No rows were entered. The file will be empty.")?;
            match self.prompt("Continue? (Yes(1)/No(2)): ")? {
                Some(answer) if answer.trim() == "1" => break,
                Some(_) => continue,
                None => return Ok(State::Exit),
            }
        }

        self.store.rewrite_all(&rows)?;
        info!("Rewrite finished with {} row(s)", rows.len());
        Ok(State::Menu)
    }

    fn append(&mut self) -> Result<State> {
        self.clear()?;
        writeln!(self.output, "Enter rows as 'value1,value2,value3' (empty line to finish):")?;

        let mut appended = 0usize;
        loop {
            let Some(line) = self.prompt(&format!("Row {}: ", appended + 1))? else {
                return Ok(State::Exit);
            };
            if line.is_empty() {
                break;
            }
            self.store.append(&split_row(&line))?;
            appended += 1;
        }

        writeln!(self.output, "Appended {appended} row(s).")?;
        self.acknowledge()
    }

    fn acknowledge(&mut self) -> Result<State> {
        let ack = self.prompt("Press Enter to return to the menu...")?;
        Ok(if ack.is_some() { State::Menu } else { State::Exit })
    }

    fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            write!(self.output, "{CLEAR_SCREEN}")?;
        }
        Ok(())
    }

    /// Prints `text` and reads one line without its terminator. `None` means
    /// the input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
