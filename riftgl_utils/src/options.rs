use std::fmt::Display;

pub trait OptExt {
    type T;
    fn unwrap_unreach(self) -> Self::T;
}

impl<T> OptExt for Option<T> {
    type T = T;

    fn unwrap_unreach(self) -> Self::T {
        self.unwrap_or_else(|| unreachable!())
    }
}

impl<T, E> OptExt for Result<T, E> {
    type T = T;

    fn unwrap_unreach(self) -> Self::T {
        self.unwrap_or_else(|_| unreachable!())
    }
}

pub trait ResExt {
    type T;
    /// Logs the error under `what` and discards it.
    fn ok_or_log(self, what: &str) -> Option<Self::T>;
}

impl<T, E: Display> ResExt for Result<T, E> {
    type T = T;

    fn ok_or_log(self, what: &str) -> Option<Self::T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("{what}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_unreach_passes_values_through() {
        assert_eq!(Some(3).unwrap_unreach(), 3);
        assert_eq!(Ok::<_, ()>("gl").unwrap_unreach(), "gl");
    }

    #[test]
    #[should_panic]
    fn unwrap_unreach_panics_on_none() {
        None::<u32>.unwrap_unreach();
    }

    #[test]
    fn ok_or_log_drops_errors() {
        assert_eq!(Ok::<_, String>(7).ok_or_log("value"), Some(7));
        assert_eq!(Err::<u32, _>("bad utf-8").ok_or_log("value"), None);
    }
}
