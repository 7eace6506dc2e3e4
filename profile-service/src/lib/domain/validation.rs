use thiserror::Error;

/// A single failed input check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
}

/// Every failed check of one request, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .0.iter().map(|e| e.msg.as_str()).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: impl Into<String>, msg: impl Into<String>) {
        self.0.push(FieldError {
            param: param.into(),
            msg: msg.into(),
        });
    }

    /// Record `msg` against `param` if `result` failed; otherwise hand back the value.
    pub fn check<T, E>(
        &mut self,
        param: &str,
        result: Result<T, E>,
        msg: &str,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(_) => {
                self.push(param, msg);
                None
            }
        }
    }

    /// Record `msg` if `value` is missing or blank; otherwise return it trimmed.
    pub fn require(&mut self, param: &str, value: Option<&str>, msg: &str) -> Option<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v.to_string()),
            _ => {
                self.push(param, msg);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}
