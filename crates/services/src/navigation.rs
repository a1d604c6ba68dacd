use std::sync::Arc;

use learn_core::model::{Catalog, Lesson, LessonId, Module, ModuleId};

/// What the Learning Center shows for the active module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Lesson(LessonId),
    Quiz,
}

/// Tracks the active module and whether a lesson or the quiz is open.
///
/// Every reachable state points at a module of the catalog, and a lesson
/// selection always points at a lesson of that module.
#[derive(Debug, Clone)]
pub struct NavigationController {
    catalog: Arc<Catalog>,
    module: ModuleId,
    selection: Selection,
}

impl NavigationController {
    /// Starts on the first lesson of the first module.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let first = catalog.first_module();
        let module = first.id().clone();
        let selection = entry_selection(first);
        Self {
            catalog,
            module,
            selection,
        }
    }

    /// Switches module, landing on its first lesson. Unknown ids are ignored.
    pub fn select_module(&mut self, module_id: &ModuleId) -> bool {
        let Some(module) = self.catalog.module(module_id) else {
            tracing::debug!(module = %module_id, "ignoring unknown module");
            return false;
        };
        self.selection = entry_selection(module);
        self.module = module_id.clone();
        true
    }

    /// Opens a lesson of the active module. Lessons of other modules are ignored.
    pub fn select_lesson(&mut self, lesson_id: &LessonId) -> bool {
        if self.active_module().lesson(lesson_id).is_none() {
            tracing::debug!(lesson = %lesson_id, module = %self.module, "ignoring lesson outside active module");
            return false;
        }
        self.selection = Selection::Lesson(lesson_id.clone());
        true
    }

    pub fn open_quiz(&mut self) {
        self.selection = Selection::Quiz;
    }

    #[must_use]
    pub fn active_module(&self) -> &Module {
        self.catalog
            .module(&self.module)
            .unwrap_or_else(|| self.catalog.first_module())
    }

    /// The open lesson, or `None` in quiz mode.
    #[must_use]
    pub fn active_lesson(&self) -> Option<&Lesson> {
        match &self.selection {
            Selection::Lesson(id) => self.active_module().lesson(id),
            Selection::Quiz => None,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn is_quiz_mode(&self) -> bool {
        matches!(self.selection, Selection::Quiz)
    }
}

fn entry_selection(module: &Module) -> Selection {
    module
        .first_lesson()
        .map_or(Selection::Quiz, |lesson| Selection::Lesson(lesson.id().clone()))
}
