//! Progress indicator projection

use crate::dom::{Document, ElementId};

pub const ACTIVE: &str = "is-active";
pub const COMPLETED: &str = "is-completed";

/// State of one step marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Completed,
    Active,
    Pending,
}

/// Project the current step onto `count` markers
pub fn project(current: usize, count: usize) -> Vec<MarkerState> {
    (1..=count)
        .map(|step| match step.cmp(&current) {
            std::cmp::Ordering::Less => MarkerState::Completed,
            std::cmp::Ordering::Equal => MarkerState::Active,
            std::cmp::Ordering::Greater => MarkerState::Pending,
        })
        .collect()
}

/// Markers and connecting segments bound at attach
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressIndicator {
    /// `.form-progress`, hidden once the form is delivered
    pub container: Option<ElementId>,
    pub markers: Vec<ElementId>,
    /// Segment `i` connects marker `i` and marker `i + 1`
    pub segments: Vec<ElementId>,
}

impl ProgressIndicator {
    /// Re-render every marker and segment for `current` as one batch
    pub fn render(&self, doc: &mut Document, current: usize) {
        let states = project(current, self.markers.len());
        doc.batch(|doc| {
            for (marker, state) in self.markers.iter().zip(states) {
                doc.toggle_class(*marker, COMPLETED, state == MarkerState::Completed);
                doc.toggle_class(*marker, ACTIVE, state == MarkerState::Active);
            }
            for (i, segment) in self.segments.iter().enumerate() {
                doc.toggle_class(*segment, COMPLETED, i + 1 < current);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::el;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_middle_step() {
        use MarkerState::*;
        assert_eq!(project(2, 3), vec![Completed, Active, Pending]);
    }

    #[test]
    fn test_project_bounds() {
        use MarkerState::*;
        assert_eq!(project(1, 3), vec![Active, Pending, Pending]);
        assert_eq!(project(3, 3), vec![Completed, Completed, Active]);
        assert!(project(1, 0).is_empty());
    }

    fn indicator(doc: &mut Document) -> ProgressIndicator {
        let root = doc.root();
        let container = el("div").class("form-progress").build(doc, root);
        let mut markers = Vec::new();
        let mut segments = Vec::new();
        for i in 0..3 {
            markers.push(el("span").class("form-progress__step").build(doc, container));
            if i < 2 {
                segments.push(el("span").class("form-progress__line").build(doc, container));
            }
        }
        ProgressIndicator {
            container: Some(container),
            markers,
            segments,
        }
    }

    #[test]
    fn test_render_classes() {
        let mut doc = Document::new();
        let progress = indicator(&mut doc);
        progress.render(&mut doc, 3);

        assert!(doc.element(progress.markers[0]).has_class(COMPLETED));
        assert!(doc.element(progress.markers[1]).has_class(COMPLETED));
        assert!(doc.element(progress.markers[2]).has_class(ACTIVE));
        assert!(!doc.element(progress.markers[2]).has_class(COMPLETED));
        assert!(doc.element(progress.segments[0]).has_class(COMPLETED));
        assert!(doc.element(progress.segments[1]).has_class(COMPLETED));
    }

    #[test]
    fn test_render_is_whole_and_atomic() {
        let mut doc = Document::new();
        let progress = indicator(&mut doc);
        progress.render(&mut doc, 3);
        doc.take_mutations();

        progress.render(&mut doc, 1);
        let batches = doc.take_mutations();
        assert_eq!(batches.len(), 1);
        assert!(doc.element(progress.markers[0]).has_class(ACTIVE));
        assert!(!doc.element(progress.markers[0]).has_class(COMPLETED));
        assert!(!doc.element(progress.segments[0]).has_class(COMPLETED));
        assert!(!doc.element(progress.markers[2]).has_class(ACTIVE));
    }

    #[test]
    fn test_rendering_same_step_twice_changes_nothing() {
        let mut doc = Document::new();
        let progress = indicator(&mut doc);
        progress.render(&mut doc, 2);
        doc.take_mutations();
        progress.render(&mut doc, 2);
        assert!(doc.take_mutations().is_empty());
    }
}
