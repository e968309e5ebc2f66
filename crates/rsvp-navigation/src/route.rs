//! Route paths

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::NavigationError;
use crate::Result;

/// A navigable path such as `/form`. Doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() {
            return Err(NavigationError::InvalidRoute(
                "Route cannot be empty".to_string(),
            ));
        }
        if !path.starts_with('/') {
            return Err(NavigationError::InvalidRoute(format!(
                "Route must be an absolute path: {path}"
            )));
        }

        Ok(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Route {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
