use std::fmt::Formatter;

pub enum LoggerError {
    InvalidLevel(String),
}

fn format_logger_error(l: &LoggerError, fmt: &mut Formatter) -> std::fmt::Result {
    match l {
        LoggerError::InvalidLevel(token) => {
            write!(fmt, "Invalid Level: {:?}", token)
        }
    }
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        format_logger_error(self, f)
    }
}

impl std::fmt::Debug for LoggerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        format_logger_error(self, f)
    }
}
impl std::error::Error for LoggerError {}
