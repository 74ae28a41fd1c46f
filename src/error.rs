use crossbeam::channel::{RecvError, SendError};
use failure::{Context, Fail};
use std::fmt::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}
#[derive(Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "pool is terminated")]
    Terminated,
}

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.inner.get_context()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl From<ErrorKind> for Error {
    fn from(err: ErrorKind) -> Self {
        Error {
            inner: Context::new(err),
        }
    }
}

// channel errors only happen once the coordinator has exited
impl<T> From<SendError<T>> for Error {
    fn from(_: SendError<T>) -> Self {
        Error::from(ErrorKind::Terminated)
    }
}

impl From<RecvError> for Error {
    fn from(_: RecvError) -> Self {
        Error::from(ErrorKind::Terminated)
    }
}
