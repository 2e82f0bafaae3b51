/// State of data a screen fetches from the backend. Each variant maps to exactly one render branch.
#[derive(Clone, Debug, PartialEq)]
pub enum RemoteResource<T> {
    Loading,
    Error(String),
    Empty,
    Ready(T),
}

/// Data that can be "present but empty", which renders differently from an error
pub trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl<T> IsEmpty for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<T> RemoteResource<T> {
    /// Resolve a fetch result. Any error collapses into `message` after being logged, keeping the
    /// detailed cause out of the view.
    pub fn from_result<E>(result: Result<T, E>, message: &str) -> Self
    where
        T: IsEmpty,
        E: std::fmt::Display,
    {
        match result {
            Ok(data) if data.is_empty() => Self::Empty,
            Ok(data) => Self::Ready(data),
            Err(error) => {
                log::error!("{message} {error}");
                Self::Error(message.to_owned())
            }
        }
    }

    /// Resolve a fetch of a single record where `None` means the record does not exist
    pub fn from_optional<E>(result: Result<Option<T>, E>, message: &str) -> Self
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(Some(data)) => Self::Ready(data),
            Ok(None) => Self::Empty,
            Err(error) => {
                log::error!("{message} {error}");
                Self::Error(message.to_owned())
            }
        }
    }

    #[cfg(test)]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self::Loading
    }
}
