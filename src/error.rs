use thiserror::Error;

/// Errors raised while collecting input, sampling or rendering a trajectory
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("valor inválido para {field}: {input:?} no es un número real")]
    InvalidNumber { field: String, input: String },

    #[error("el tiempo final no puede ser negativo (t = {0})")]
    NegativeTime(f64),

    #[error("el tiempo final debe ser un número finito (t = {0})")]
    NonFiniteTime(f64),

    #[error("se necesitan al menos 2 muestras para trazar la trayectoria (n = {0})")]
    TooFewSamples(usize),

    #[error("la entrada terminó antes de leer {field}")]
    UnexpectedEof { field: String },

    #[error("error de entrada/salida: {0}")]
    Io(#[from] std::io::Error),

    #[error("escenario inválido: {0}")]
    Scenario(String),

    #[error("no se pudo generar la imagen: {0}")]
    Render(String),
}

impl TrajectoryError {
    /// True for failures caused by what the user typed (as opposed to I/O or rendering)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TrajectoryError::InvalidNumber { .. }
                | TrajectoryError::NegativeTime(_)
                | TrajectoryError::NonFiniteTime(_)
                | TrajectoryError::UnexpectedEof { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrajectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        let err = TrajectoryError::InvalidNumber {
            field: "x0".to_string(),
            input: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("x0"));
        assert!(msg.contains("abc"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(TrajectoryError::NegativeTime(-1.0).is_input_error());
        assert!(TrajectoryError::UnexpectedEof { field: "t".into() }.is_input_error());
        assert!(!TrajectoryError::Render("backend".into()).is_input_error());
        assert!(!TrajectoryError::TooFewSamples(1).is_input_error());
    }
}
