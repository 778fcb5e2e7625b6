use core::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// An absent value was offered for insertion.
    InvalidArgument,
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument => write!(fmt, "invalid argument: value must be present"),
        }
    }
}

impl std::error::Error for Error {}
