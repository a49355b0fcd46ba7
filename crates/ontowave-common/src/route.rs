use std::fmt;

/// A logical path in the viewer's route space. Always starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    path: String,
}

impl Route {
    pub fn new(path: &str) -> Self {
        if path.starts_with('/') {
            Self {
                path: path.to_string(),
            }
        } else {
            Self {
                path: format!("/{path}"),
            }
        }
    }

    pub fn root() -> Self {
        Self::new("/")
    }

    /// Route for a URL fragment. No fragment (or a bare `#`) is the root route.
    pub fn from_fragment(fragment: &str) -> Self {
        let raw = fragment.strip_prefix('#').unwrap_or(fragment);
        Self::new(raw)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// The fragment that navigates to this route, e.g. `#/a/b`.
    pub fn fragment(&self) -> String {
        format!("#{}", self.path)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
