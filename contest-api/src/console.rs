//! Diagnostics and prompts, kept apart from the outcome a command prints.

use std::env;
use std::io::{self, Write};
use std::mem;

use anyhow::anyhow;
use console::{Style, StyledObject, Term};

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ConsoleConfig {
    /// Answer every confirmation with yes.
    pub assume_yes: bool,
}

#[derive(Debug)]
enum Backend {
    Stderr(Term),
    Memory { input: String, output: Vec<u8> },
    Null(io::Sink),
}

/// Destination of request lines, notices and prompts.
///
/// Writes go to stderr on a terminal. The in-memory backend records output
/// and answers prompts from queued input lines.
#[derive(Debug)]
pub struct Console {
    backend: Backend,
    conf: ConsoleConfig,
}

impl Console {
    pub fn term(conf: ConsoleConfig) -> Self {
        Self::with_backend(Backend::Stderr(Term::stderr()), conf)
    }

    pub fn buf(conf: ConsoleConfig) -> Self {
        let backend = Backend::Memory {
            input: String::new(),
            output: Vec::new(),
        };
        Self::with_backend(backend, conf)
    }

    /// Discards output. Every prompt reads an empty line.
    pub fn sink(conf: ConsoleConfig) -> Self {
        Self::with_backend(Backend::Null(io::sink()), conf)
    }

    fn with_backend(backend: Backend, conf: ConsoleConfig) -> Self {
        Self { backend, conf }
    }

    /// Queues input for the in-memory backend. Ignored by the others.
    pub fn write_input(&mut self, s: &str) {
        if let Backend::Memory { input, .. } = &mut self.backend {
            input.push_str(s);
        }
    }

    pub fn take_output(self) -> crate::Result<String> {
        match self.backend {
            Backend::Memory { output, .. } => Ok(String::from_utf8(output)?),
            _ => Err(anyhow!("Only an in-memory console keeps its output")),
        }
    }

    /// Asks a yes/no question. Anything but yes or no picks `default`.
    pub fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        if self.conf.assume_yes {
            return Ok(true);
        }
        let choices = if default { "Y/n" } else { "y/N" };
        let answer = self.prompt_and_read(&format!("{} ({}) ", message, choices), false)?;
        let answer = answer.trim().to_lowercase();
        Ok(match answer.as_str() {
            "y" | "yes" => true,
            "n" | "no" => false,
            _ => default,
        })
    }

    /// Takes the value from env var `env_name` when set, otherwise asks for it.
    pub fn get_env_or_prompt_and_read(
        &mut self,
        env_name: &str,
        prompt: &str,
        is_password: bool,
    ) -> io::Result<String> {
        match env::var(env_name) {
            Ok(value) => {
                let shown = if is_password { "********" } else { value.as_str() };
                writeln!(self, "{}{} (read from env {})", prompt, shown, env_name)?;
                Ok(value)
            }
            Err(_) => self.prompt_and_read(prompt, is_password),
        }
    }

    fn prompt_and_read(&mut self, prompt: &str, is_password: bool) -> io::Result<String> {
        write!(self, "{}", prompt)?;
        self.flush()?;
        match &mut self.backend {
            Backend::Stderr(term) if is_password => term.read_secure_line(),
            Backend::Stderr(term) => term.read_line(),
            Backend::Memory { input, .. } => {
                let line = match input.find('\n') {
                    Some(end) => input.drain(..=end).collect(),
                    None => mem::take(input),
                };
                Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
            }
            Backend::Null(_) => Ok(String::new()),
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match &mut self.backend {
            Backend::Stderr(term) => term,
            Backend::Memory { output, .. } => output,
            Backend::Null(sink) => sink,
        }
    }
}

impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer().flush()
    }
}

pub fn sty_r<D>(val: D) -> StyledObject<D> {
    Style::new().red().apply_to(val)
}

pub fn sty_g<D>(val: D) -> StyledObject<D> {
    Style::new().green().apply_to(val)
}

pub fn sty_dim<D>(val: D) -> StyledObject<D> {
    Style::new().dim().apply_to(val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_answers() -> anyhow::Result<()> {
        let cases = &[
            (true, "", false, true),
            (false, "y\n", false, true),
            (false, " YES \n", false, true),
            (false, "n\r\n", true, false),
            (false, "No\n", true, false),
            (false, "later\n", true, true),
            (false, "later\n", false, false),
            (false, "\n", true, true),
            (false, "", false, false),
        ];
        for &(assume_yes, input, default, expected) in cases {
            let mut cnsl = Console::buf(ConsoleConfig { assume_yes });
            cnsl.write_input(input);
            assert_eq!(cnsl.confirm("Submit?", default)?, expected, "{:?}", input);
        }
        Ok(())
    }

    #[test]
    fn confirm_writes_prompt() -> anyhow::Result<()> {
        let mut cnsl = Console::buf(ConsoleConfig::default());
        cnsl.write_input("y\n");
        cnsl.confirm("Submit?", false)?;
        assert_eq!(cnsl.take_output()?, "Submit? (y/N) ");
        Ok(())
    }

    #[test]
    fn queued_lines_answer_prompts_in_order() -> anyhow::Result<()> {
        let mut cnsl = Console::buf(ConsoleConfig::default());
        cnsl.write_input("n\ny\n");
        assert!(!cnsl.confirm("First?", true)?);
        assert!(cnsl.confirm("Second?", false)?);
        Ok(())
    }

    #[test]
    fn env_value_is_masked() -> anyhow::Result<()> {
        let env_name = if cfg!(windows) { "APPDATA" } else { "HOME" };
        let env_val = env::var(env_name)?;

        let mut cnsl = Console::buf(ConsoleConfig::default());
        assert_eq!(cnsl.get_env_or_prompt_and_read(env_name, "password: ", true)?, env_val);
        assert_eq!(
            cnsl.take_output()?,
            format!("password: ******** (read from env {})\n", env_name)
        );
        Ok(())
    }

    #[test]
    fn prompt_when_env_missing() -> anyhow::Result<()> {
        let mut cnsl = Console::buf(ConsoleConfig::default());
        cnsl.write_input("secret\n");
        let value = cnsl.get_env_or_prompt_and_read("CONTEST_TEST_UNSET_VAR", "password: ", true)?;
        assert_eq!(value, "secret");
        assert_eq!(cnsl.take_output()?, "password: ");

        let mut cnsl = Console::sink(ConsoleConfig::default());
        let value = cnsl.get_env_or_prompt_and_read("CONTEST_TEST_UNSET_VAR", "username: ", false)?;
        assert_eq!(value, "");
        assert!(cnsl.take_output().is_err());
        Ok(())
    }
}
