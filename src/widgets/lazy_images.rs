use std::collections::HashSet;

/// Images that load their source on first sight and are never watched again.
#[derive(Debug, Default)]
pub struct LazyImages {
    watching: HashSet<String>,
    loaded: HashSet<String>,
}

impl LazyImages {
    pub fn new<'a>(sources: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            watching: sources.into_iter().map(str::to_string).collect(),
            loaded: HashSet::new(),
        }
    }

    /// Eager images, and anything not registered, count as loaded.
    pub fn is_loaded(&self, src: &str) -> bool {
        !self.watching.contains(src) || self.loaded.contains(src)
    }

    pub fn on_visible(&mut self, src: &str) -> bool {
        if self.watching.remove(src) {
            log::debug!("lazy image loaded: {}", src);
            self.loaded.insert(src.to_string());
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn pending(&self) -> usize {
        self.watching.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_once_on_first_visibility() {
        let mut images = LazyImages::new(["diagram.png", "flow.png"]);
        assert!(!images.is_loaded("diagram.png"));
        assert!(images.is_loaded("eager.png"));

        assert!(images.on_visible("diagram.png"));
        assert!(!images.on_visible("diagram.png"));
        assert!(images.is_loaded("diagram.png"));
        assert_eq!(images.pending(), 1);
    }
}
