//! The page a form lives on
//!
//! A `Page` owns the document and the animator that every controller on it
//! shares. Controllers receive it by `&mut` for each operation instead of
//! reaching for process-wide state.

use crate::animation::{AnimationId, Animator, TweenEngine, TweenSpec};
use crate::dom::{Document, ElementId};
use std::time::Duration;

pub struct Page {
    document: Document,
    animator: Box<dyn Animator>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("document", &self.document)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Page animated by the default [`TweenEngine`]
    pub fn new(document: Document) -> Self {
        Self::with_animator(document, Box::new(TweenEngine::new()))
    }

    pub fn with_animator(document: Document, animator: Box<dyn Animator>) -> Self {
        Self { document, animator }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn animate(&mut self, spec: TweenSpec) -> AnimationId {
        self.animator.animate(&mut self.document, spec)
    }

    pub fn kill_tweens_of(&mut self, target: ElementId) {
        self.animator.kill_tweens_of(target);
    }

    pub fn is_animating(&self, id: AnimationId) -> bool {
        self.animator.is_running(id)
    }

    /// Advance animation time; returns the tweens that completed
    pub fn tick(&mut self, dt: Duration) -> Vec<AnimationId> {
        self.animator.advance(&mut self.document, dt)
    }

    /// Run `f` with every document write committed as one mutation batch
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.document.begin_batch();
        let result = f(self);
        self.document.commit_batch();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::MockAnimator;
    use crate::dom::StyleProp;

    #[test]
    fn test_tick_delegates_to_animator() {
        let mut animator = MockAnimator::new();
        animator
            .expect_advance()
            .times(1)
            .returning(|_, _| vec![AnimationId::new(7)]);
        let mut page = Page::with_animator(Document::new(), Box::new(animator));
        assert_eq!(page.tick(Duration::from_millis(16)), vec![AnimationId::new(7)]);
    }

    #[test]
    fn test_batch_groups_writes_across_page_calls() {
        let mut page = Page::default();
        let root = page.document().root();
        let a = page.document_mut().create_element("div");
        page.document_mut().append_child(root, a);
        page.batch(|page| {
            page.document_mut().add_class(a, "is-active");
            page.animate(TweenSpec::new(a, Duration::from_millis(100)).from_to(
                StyleProp::Opacity,
                0.0,
                1.0,
            ));
        });
        assert_eq!(page.document_mut().take_mutations().len(), 1);
    }

    #[test]
    fn test_default_engine_runs_tweens() {
        let mut page = Page::default();
        let root = page.document().root();
        let id = page.animate(TweenSpec::new(root, Duration::from_millis(10)).to(StyleProp::Y, 3.0));
        assert!(page.is_animating(id));
        assert_eq!(page.tick(Duration::from_millis(10)), vec![id]);
        assert!(!page.is_animating(id));
    }
}
