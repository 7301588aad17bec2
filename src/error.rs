use std::{collections::BTreeMap, fmt, sync::Arc};

#[derive(Debug, Clone)]
pub struct GlobeError {
    pub key: &'static str,
    pub args: BTreeMap<&'static str, String>,
    pub causes: Vec<GlobeCause>,
}

#[derive(Debug, Clone)]
pub enum GlobeCause {
    Globe(Box<GlobeError>),
    Std(Arc<dyn std::error::Error + Send + Sync>),
}

impl GlobeError {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            args: BTreeMap::new(),
            causes: Vec::new(),
        }
    }

    pub fn with_arg(mut self, k: &'static str, v: impl ToString) -> Self {
        self.args.insert(k, v.to_string());
        self
    }

    #[allow(dead_code)]
    pub fn push_globe(mut self, cause: GlobeError) -> Self {
        self.causes.push(GlobeCause::Globe(Box::new(cause)));
        self
    }

    pub fn push_std(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.causes.push(GlobeCause::Std(Arc::new(cause)));
        self
    }
}

impl fmt::Display for GlobeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.key)?;
        let mut first = true;
        for (k, v) in &self.args {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            write!(f, "{k}={v}")?;
        }
        write!(f, ")")
    }
}

impl std::error::Error for GlobeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.causes.iter().find_map(|c| match c {
            GlobeCause::Globe(e) => Some(e.as_ref() as &dyn std::error::Error),
            GlobeCause::Std(e) => Some(e.as_ref()),
        })
    }
}

impl From<String> for GlobeError {
    fn from(s: String) -> Self {
        GlobeError::new("string-error").with_arg("msg", s)
    }
}

impl From<&str> for GlobeError {
    fn from(s: &str) -> Self {
        GlobeError::new("str-error").with_arg("msg", s)
    }
}

impl From<serde_json::Error> for GlobeError {
    fn from(err: serde_json::Error) -> Self {
        GlobeError::new("serde_json::Error").push_std(err)
    }
}

impl From<winit::error::EventLoopError> for GlobeError {
    fn from(err: winit::error::EventLoopError) -> Self {
        GlobeError::new("winit::error::EventLoopError").push_std(err)
    }
}
