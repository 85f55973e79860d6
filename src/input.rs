//! Console input collection.
//!
//! Prompts are asked in a fixed order and each answer must parse as a real
//! number. The first failure ends the collection; nothing is computed from a
//! partial set of answers.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{Result, TrajectoryError};
use crate::state::LaunchState;

/// Everything the user types before a run starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunInputs {
    pub t_final: f64,
    pub state: LaunchState,
}

/// One console question: the identifier used in diagnostics and the visible prompt
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub prompt: &'static str,
}

pub const TIME_FIELD: Field = Field {
    name: "t",
    prompt: "Tiempo final t (en segundos): ",
};

pub const STATE_FIELDS: [Field; 6] = [
    Field { name: "x0", prompt: "Posición inicial x0 (m): " },
    Field { name: "y0", prompt: "Posición inicial y0 (m): " },
    Field { name: "z0", prompt: "Posición inicial z0 (m): " },
    Field { name: "vx0", prompt: "Velocidad inicial vx0 (m/s): " },
    Field { name: "vy0", prompt: "Velocidad inicial vy0 (m/s): " },
    Field { name: "vz0", prompt: "Velocidad inicial vz0 (m/s): " },
];

/// Parse one answer as a finite real number
pub fn parse_real(field: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(TrajectoryError::InvalidNumber {
            field: field.to_string(),
            input: trimmed.to_string(),
        }),
    }
}

/// Validate the final time of a run
pub fn validate_final_time(t_final: f64) -> Result<f64> {
    if !t_final.is_finite() {
        return Err(TrajectoryError::NonFiniteTime(t_final));
    }
    if t_final < 0.0 {
        return Err(TrajectoryError::NegativeTime(t_final));
    }
    Ok(t_final)
}

/// Blocking line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Show the prompt and read one real number
    pub fn ask(&mut self, field: &Field) -> Result<f64> {
        write!(self.writer, "{}", field.prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line)?;
        if read == 0 {
            return Err(TrajectoryError::UnexpectedEof {
                field: field.name.to_string(),
            });
        }

        let value = parse_real(field.name, &line)?;
        debug!(field = field.name, value, "read input");
        Ok(value)
    }

    /// Ask every question in order; the final time is validated before the state is read
    pub fn collect(&mut self) -> Result<RunInputs> {
        let t_final = validate_final_time(self.ask(&TIME_FIELD)?)?;

        let mut values = [0.0; 6];
        for (slot, field) in values.iter_mut().zip(STATE_FIELDS.iter()) {
            *slot = self.ask(field)?;
        }
        let [x0, y0, z0, vx0, vy0, vz0] = values;

        Ok(RunInputs {
            t_final,
            state: LaunchState::from_components(x0, y0, z0, vx0, vy0, vz0),
        })
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}
