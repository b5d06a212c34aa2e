use std::fmt;

/// One screen per route. `Delete` is drawn as an overlay above another screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Show { id: String },
    Delete { id: String },
    NotFound { path: String },
}

impl Route {
    /// Exact match only: no trailing slashes, no extra segments, no empty ids.
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        if path == "/" {
            return Route::List;
        }

        let segments: Vec<&str> = match path.strip_prefix('/') {
            Some(rest) => rest.split('/').collect(),
            None => Vec::new(),
        };

        match segments.as_slice() {
            ["show", id] if !id.is_empty() => Route::Show { id: id.to_string() },
            ["delete", id] if !id.is_empty() => Route::Delete { id: id.to_string() },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn show(id: impl fmt::Display) -> Self {
        Route::Show { id: id.to_string() }
    }

    pub fn delete(id: impl fmt::Display) -> Self {
        Route::Delete { id: id.to_string() }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Show { id } => format!("/show/{id}"),
            Route::Delete { id } => format!("/delete/{id}"),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn is_overlay(&self) -> bool {
        matches!(self, Route::Delete { .. })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Client-side navigation history with back/forward.
#[derive(Debug, Clone)]
pub struct Navigator {
    entries: Vec<Route>,
    index: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::List)
    }
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.index]
    }

    /// Pushing drops any forward entries. Re-pushing the current route is a no-op.
    pub fn push(&mut self, route: Route) {
        if *self.current() == route {
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(route);
        self.index = self.entries.len() - 1;
        tracing::debug!(route = %self.current(), "navigate");
    }

    pub fn push_path(&mut self, path: &str) {
        self.push(Route::resolve(path));
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        true
    }

    /// The screen an overlay route is drawn on top of.
    pub fn underlay(&self) -> Route {
        self.entries[..self.index]
            .iter()
            .rev()
            .find(|route| !route.is_overlay())
            .cloned()
            .unwrap_or(Route::List)
    }
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
