//! Commands typed at the RSVP prompt.

use shared::domain::Attendance;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// New content of the name field (may be empty).
    Name(String),
    /// 1-based position in the suggestion list.
    Pick(usize),
    Dismiss,
    Attendance(Attendance),
    Increment,
    Decrement,
    Submit,
    Show,
    Help,
    Quit,
}

impl UiCommand {
    pub fn name(&self) -> &'static str {
        match self {
            UiCommand::Name(_) => "name",
            UiCommand::Pick(_) => "pick",
            UiCommand::Dismiss => "dismiss",
            UiCommand::Attendance(_) => "attendance",
            UiCommand::Increment => "increment",
            UiCommand::Decrement => "decrement",
            UiCommand::Submit => "submit",
            UiCommand::Show => "show",
            UiCommand::Help => "help",
            UiCommand::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("'pick' expects a suggestion number, got '{0}'")]
    InvalidPick(String),
}

pub const HELP: &str = "\
comandos:
  nombre <texto>   escribir el nombre (vacio para borrar)
  elegir <n>       elegir la sugerencia n
  cerrar           ocultar sugerencias
  si | no          asistire / no asistire
  + | -            sumar / restar asistentes
  enviar           enviar la confirmacion
  ver              mostrar el formulario
  salir            terminar";

pub fn parse_command(line: &str) -> Result<UiCommand, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head.to_lowercase().as_str() {
        "nombre" | "name" | "n" => Ok(UiCommand::Name(rest.to_string())),
        "elegir" | "pick" | "p" => rest
            .parse::<usize>()
            .ok()
            .filter(|index| *index > 0)
            .map(UiCommand::Pick)
            .ok_or_else(|| CommandError::InvalidPick(rest.to_string())),
        "cerrar" | "close" => Ok(UiCommand::Dismiss),
        "si" | "sí" | "yes" => Ok(UiCommand::Attendance(Attendance::Yes)),
        "no" => Ok(UiCommand::Attendance(Attendance::No)),
        "+" => Ok(UiCommand::Increment),
        "-" => Ok(UiCommand::Decrement),
        "enviar" | "submit" => Ok(UiCommand::Submit),
        "ver" | "show" => Ok(UiCommand::Show),
        "ayuda" | "help" | "?" => Ok(UiCommand::Help),
        "salir" | "quit" | "exit" => Ok(UiCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_keeps_inner_spaces_and_may_be_empty() {
        assert_eq!(
            parse_command("nombre  Juan Perez "),
            Ok(UiCommand::Name("Juan Perez".to_string()))
        );
        assert_eq!(parse_command("nombre"), Ok(UiCommand::Name(String::new())));
    }

    #[test]
    fn pick_requires_positive_number() {
        assert_eq!(parse_command("elegir 2"), Ok(UiCommand::Pick(2)));
        assert_eq!(
            parse_command("elegir 0"),
            Err(CommandError::InvalidPick("0".to_string()))
        );
        assert_eq!(
            parse_command("pick juan"),
            Err(CommandError::InvalidPick("juan".to_string()))
        );
    }

    #[test]
    fn attendance_and_stepper_shortcuts() {
        assert_eq!(
            parse_command("SI"),
            Ok(UiCommand::Attendance(Attendance::Yes))
        );
        assert_eq!(parse_command("no"), Ok(UiCommand::Attendance(Attendance::No)));
        assert_eq!(parse_command(" + "), Ok(UiCommand::Increment));
        assert_eq!(parse_command("-"), Ok(UiCommand::Decrement));
    }

    #[test]
    fn blank_and_unknown_input() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("bailar"),
            Err(CommandError::Unknown("bailar".to_string()))
        );
    }
}
