use crate::page::PageSnapshot;

/// Trigger band as fractions of the viewport height cut from the top and bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSpyConfig {
    pub top_margin: f32,
    pub bottom_margin: f32,
}

impl Default for ScrollSpyConfig {
    fn default() -> Self {
        Self {
            top_margin: 0.2,
            bottom_margin: 0.6,
        }
    }
}

impl ScrollSpyConfig {
    /// Band `(top, bottom)` in viewport coordinates.
    pub fn band(&self, viewport_height: f32) -> (f32, f32) {
        let top = viewport_height * self.top_margin;
        let bottom = viewport_height * (1.0 - self.bottom_margin);
        (top, bottom)
    }
}

/// A TOC link paired with the region its fragment resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTarget {
    pub link_index: usize,
    pub href: String,
    pub region_id: String,
    intersecting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEvent {
    pub region_id: String,
    pub is_intersecting: bool,
}

/// Marks the TOC link whose region most recently entered the trigger band.
#[derive(Debug)]
pub struct ScrollSpy {
    config: ScrollSpyConfig,
    targets: Vec<ObservationTarget>,
    active: Option<usize>,
    observing: bool,
}

impl ScrollSpy {
    /// Resolves every TOC link; unresolvable ones are dropped. `None` when
    /// nothing is left to observe.
    pub fn create(page: &PageSnapshot, config: ScrollSpyConfig) -> Option<Self> {
        let targets: Vec<ObservationTarget> = page
            .toc
            .iter()
            .enumerate()
            .filter_map(|(link_index, link)| {
                let region = page.resolve_fragment(&link.href)?;
                Some(ObservationTarget {
                    link_index,
                    href: link.href.clone(),
                    region_id: region.id.clone(),
                    intersecting: false,
                })
            })
            .collect();

        let dropped = page.toc.len() - targets.len();
        if dropped > 0 {
            log::debug!("scroll spy dropped {} unresolvable toc links", dropped);
        }
        if targets.is_empty() {
            return None;
        }

        Some(Self {
            config,
            targets,
            active: None,
            observing: true,
        })
    }

    pub fn targets(&self) -> &[ObservationTarget] {
        &self.targets
    }

    #[cfg(test)]
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// TOC link index currently carrying the active marker.
    pub fn active_link(&self) -> Option<usize> {
        self.active.map(|i| self.targets[i].link_index)
    }

    pub fn active_region(&self) -> Option<&str> {
        self.active.map(|i| self.targets[i].region_id.as_str())
    }

    pub fn is_active(&self, link_index: usize) -> bool {
        self.active_link() == Some(link_index)
    }

    /// Applies a batch in delivery order. Every entering region clears the
    /// marker and takes it, so the last one processed wins. A region linked
    /// more than once marks its first link.
    pub fn observe(&mut self, events: &[IntersectionEvent]) -> bool {
        if !self.observing {
            return false;
        }
        let before = self.active;
        for event in events {
            let mut first = None;
            for (position, target) in self.targets.iter_mut().enumerate() {
                if target.region_id == event.region_id {
                    target.intersecting = event.is_intersecting;
                    first.get_or_insert(position);
                }
            }
            // A single slot: setting it clears every other link.
            if let (true, Some(position)) = (event.is_intersecting, first) {
                self.active = Some(position);
            }
        }
        if before != self.active {
            log::debug!("scroll spy active region: {:?}", self.active_region());
        }
        before != self.active
    }

    /// Turns region geometry into intersection transitions, like a platform
    /// observer would. `regions` holds `(id, top, bottom)` relative to the
    /// viewport top; regions not listed keep their last state.
    pub fn observe_layout(&mut self, viewport_height: f32, regions: &[(&str, f32, f32)]) -> bool {
        let (band_top, band_bottom) = self.config.band(viewport_height);
        let mut events: Vec<IntersectionEvent> = Vec::new();
        for target in &self.targets {
            if events.iter().any(|event| event.region_id == target.region_id) {
                continue;
            }
            let Some(&(_, top, bottom)) = regions.iter().find(|(id, _, _)| *id == target.region_id)
            else {
                continue;
            };
            let intersecting = top < band_bottom && bottom > band_top;
            if intersecting != target.intersecting {
                events.push(IntersectionEvent {
                    region_id: target.region_id.clone(),
                    is_intersecting: intersecting,
                });
            }
        }
        self.observe(&events)
    }

    /// Stops observation. The current marker stays where it is.
    pub fn teardown(&mut self) {
        self.observing = false;
    }
}
