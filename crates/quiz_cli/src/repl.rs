//! Read/eval/print loop over the quiz store.
//!
//! # Responsibility
//! - Read one line at a time and dispatch it as a command.
//! - Drive add/edit flows and play sessions prompt by prompt.
//! - Report user-level errors and keep the loop alive.
//!
//! # Invariants
//! - Only one prompt is outstanding at a time.
//! - An interrupted flow writes nothing.

use crate::command::{parse_command, Command};
use crate::output::{id_tag, print_banner, print_error, print_line, prompt_label, quiz_line};
use anyhow::Result;
use colored::{Color, Colorize};
use log::warn;
use quiz_core::{
    EditFlow, FlowField, FlowMode, FlowStep, PlaySession, QuizId, QuizRepository, QuizService,
    RepoError, SessionState,
};
use rand::Rng;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};

const COMMAND_PROMPT: &str = "quiz> ";

const HELP_LINES: &[&str] = &[
    "Commands:",
    "  h|help - Show this help.",
    "  list - List existing quizzes.",
    "  show <id> - Show the question and answer of one quiz.",
    "  add - Add a new quiz interactively.",
    "  delete <id> - Delete one quiz.",
    "  edit <id> - Edit one quiz.",
    "  test <id> - Try answering one quiz.",
    "  p|play - Answer every quiz in random order.",
    "  credits - Credits.",
    "  q|quit - Leave the program.",
];

/// What one read attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Input was cancelled (Ctrl-C).
    Interrupted,
    /// Input stream closed (Ctrl-D).
    Eof,
}

/// Source of user input lines.
pub trait LineReader {
    /// Reads one line; `initial` is editable text placed before the cursor.
    fn read_line(&mut self, prompt: &str, initial: Option<&str>) -> Result<ReadOutcome>;

    /// Records a dispatched command line for later recall.
    fn remember(&mut self, _line: &str) {}
}

/// Terminal line editor with history and pre-filled prompts.
pub struct TerminalReader {
    editor: DefaultEditor,
}

impl TerminalReader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for TerminalReader {
    fn read_line(&mut self, prompt: &str, initial: Option<&str>) -> Result<ReadOutcome> {
        let result = match initial {
            Some(text) => self.editor.readline_with_initial(prompt, (text, "")),
            None => self.editor.readline(prompt),
        };
        read_outcome(result)
    }

    fn remember(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            warn!("event=history_add module=cli status=error error={err}");
        }
    }
}

/// Maps a line editor result onto `ReadOutcome`. Terminal failures surface as
/// `io::Error` so the loop treats them as fatal.
fn read_outcome(result: rustyline::Result<String>) -> Result<ReadOutcome> {
    match result {
        Ok(line) => Ok(ReadOutcome::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
        Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
        Err(ReadlineError::Io(err)) => Err(err.into()),
        Err(err) => Err(io::Error::new(io::ErrorKind::Other, err).into()),
    }
}

/// Interactive loop bound to one store, one input source and one output.
pub struct Repl<'s, R: QuizRepository, L: LineReader, W: Write, G: Rng> {
    service: &'s QuizService<R>,
    reader: L,
    out: W,
    rng: G,
}

impl<'s, R: QuizRepository, L: LineReader, W: Write, G: Rng> Repl<'s, R, L, W, G> {
    pub fn new(service: &'s QuizService<R>, reader: L, out: W, rng: G) -> Self {
        Self {
            service,
            reader,
            out,
            rng,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let line = match self.reader.read_line(COMMAND_PROMPT, None)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => continue,
                ReadOutcome::Eof => break,
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    print_error(&mut self.out, err)?;
                    continue;
                }
            };
            self.reader.remember(line.trim());

            if command == Command::Quit {
                break;
            }
            self.dispatch(command)?;
        }

        print_line(&mut self.out, "Bye!")?;
        Ok(())
    }

    /// Executes one command. Only I/O failures are returned; store errors are
    /// reported to the user.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        let result = match command {
            Command::Help => self.help(),
            Command::List => self.list(),
            Command::Show(id) => self.show(id),
            Command::Add => self.run_flow(EditFlow::create()),
            Command::Delete(id) => self.delete(id),
            Command::Edit(id) => match EditFlow::edit(self.service, id) {
                Ok(flow) => self.run_flow(flow),
                Err(err) => Err(err.into()),
            },
            Command::Test(id) => self.test(id),
            Command::Play => self.play(),
            Command::Credits => self.credits(),
            Command::Quit => Ok(()),
        };

        match result {
            Ok(()) => Ok(()),
            Err(err) => match err.downcast_ref::<io::Error>() {
                Some(_) => Err(err),
                None => {
                    warn!("event=command module=cli status=error command={command:?}");
                    print_error(&mut self.out, err)?;
                    Ok(())
                }
            },
        }
    }

    fn help(&mut self) -> Result<()> {
        for line in HELP_LINES {
            print_line(&mut self.out, line)?;
        }
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        for quiz in self.service.list_all()? {
            print_line(&mut self.out, format!(" {}:  {}", id_tag(quiz.id), quiz.question))?;
        }
        Ok(())
    }

    fn show(&mut self, id: QuizId) -> Result<()> {
        let quiz = self.service.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;
        print_line(&mut self.out, quiz_line(&quiz))?;
        Ok(())
    }

    fn delete(&mut self, id: QuizId) -> Result<()> {
        if self.service.delete(id)? {
            print_line(&mut self.out, format!(" Deleted quiz {}", id_tag(id)))?;
        } else {
            print_line(&mut self.out, format!(" Nothing to delete for {}", id_tag(id)))?;
        }
        Ok(())
    }

    fn run_flow(&mut self, mut flow: EditFlow) -> Result<()> {
        while let Some(prompt) = flow.prompt() {
            let label = match prompt.field {
                FlowField::Question => prompt_label("Enter a question:"),
                FlowField::Answer => prompt_label("Enter the answer:"),
            };
            match self.reader.read_line(&label, prompt.initial.as_deref())? {
                ReadOutcome::Line(line) => {
                    if flow.submit(line)? == FlowStep::Ready {
                        break;
                    }
                }
                ReadOutcome::Interrupted | ReadOutcome::Eof => {
                    print_line(&mut self.out, " Cancelled, nothing was saved.")?;
                    return Ok(());
                }
            }
        }

        let mode = flow.mode();
        let quiz = flow.commit(self.service)?;
        let verb = match mode {
            FlowMode::Create => "Added",
            FlowMode::Edit(_) => "Updated",
        };
        print_line(&mut self.out, format!(" {}{}", verb.magenta(), quiz_line(&quiz)))?;
        Ok(())
    }

    fn test(&mut self, id: QuizId) -> Result<()> {
        let quiz = self.service.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;
        let answer = match self
            .reader
            .read_line(&prompt_label(&format!("{}?", quiz.question)), None)?
        {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Interrupted | ReadOutcome::Eof => return Ok(()),
        };

        print_line(&mut self.out, "Your answer is:")?;
        if self.service.check_answer(id, &answer)? {
            print_banner(&mut self.out, "Correct", Color::Green)?;
        } else {
            print_banner(&mut self.out, "Incorrect", Color::Red)?;
        }
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let snapshot = self.service.list_all()?;
        let mut session = PlaySession::new(snapshot, &mut self.rng);
        session.start()?;

        while !session.state().is_finished() {
            let label = match session.current_question() {
                Some(question) => prompt_label(question),
                None => break,
            };
            let answer = match self.reader.read_line(&label, None)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted | ReadOutcome::Eof => {
                    print_line(&mut self.out, " Game abandoned.")?;
                    return Ok(());
                }
            };

            let outcome = session.answer(&answer)?;
            if outcome.correct {
                print_line(
                    &mut self.out,
                    format!("CORRECT - {} right so far", outcome.score),
                )?;
            } else {
                print_line(
                    &mut self.out,
                    format!("INCORRECT - the answer was {}", outcome.expected),
                )?;
            }
        }

        match session.state() {
            SessionState::Won => {
                print_line(&mut self.out, "Nothing left to ask. End of game. Score:")?;
                print_banner(&mut self.out, session.score(), Color::Magenta)?;
            }
            _ => {
                print_line(&mut self.out, "End of game. Score:")?;
                print_banner(&mut self.out, session.score(), Color::Red)?;
            }
        }
        Ok(())
    }

    fn credits(&mut self) -> Result<()> {
        print_line(&mut self.out, "Author:")?;
        print_line(&mut self.out, "  Emmanuel Lucio Urbina".green())?;
        print_line(&mut self.out, "  Twitter : @emmanuelluur".magenta())?;
        Ok(())
    }
}
