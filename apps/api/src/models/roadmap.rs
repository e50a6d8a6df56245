use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{require_text, InvalidOutput};

/// Bounds on roadmap size, shared by the prompt and the output check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadmapPolicy {
    pub min_modules: usize,
    pub max_modules: usize,
    pub min_lessons: usize,
    pub max_lessons: usize,
}

impl Default for RoadmapPolicy {
    fn default() -> Self {
        Self {
            min_modules: 3,
            max_modules: 7,
            min_lessons: 3,
            max_lessons: 7,
        }
    }
}

impl RoadmapPolicy {
    pub fn check(&self) -> Result<()> {
        ensure!(self.min_modules >= 1, "roadmap needs at least one module");
        ensure!(self.min_lessons >= 1, "modules need at least one lesson");
        ensure!(
            self.min_modules <= self.max_modules,
            "min_modules ({}) exceeds max_modules ({})",
            self.min_modules,
            self.max_modules
        );
        ensure!(
            self.min_lessons <= self.max_lessons,
            "min_lessons ({}) exceeds max_lessons ({})",
            self.min_lessons,
            self.max_lessons
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lesson {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Module {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Roadmap {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Roadmap {
    /// Drops lessonless modules, renumbers modules and lessons from 1 in their
    /// declared order and checks every title, description and count.
    pub fn finalize(mut self, policy: &RoadmapPolicy) -> Result<Self, InvalidOutput> {
        require_text(&self.title, "Roadmap Title")?;
        require_text(&self.description, "Roadmap Description")?;

        let before = self.modules.len();
        self.modules.retain(|module| !module.lessons.is_empty());
        if self.modules.len() < before {
            warn!(
                "Dropped {} modules without lessons from roadmap '{}'",
                before - self.modules.len(),
                self.title
            );
        }

        let count = self.modules.len();
        if count < policy.min_modules || count > policy.max_modules {
            return Err(InvalidOutput::ModuleCount {
                count,
                min: policy.min_modules,
                max: policy.max_modules,
            });
        }

        self.modules.sort_by_key(|module| module.order);
        for (index, module) in self.modules.iter_mut().enumerate() {
            module.order = index as u32 + 1;
            require_text(&module.title, format!("Title of module {}", module.order))?;
            require_text(&module.description, format!("Description of module '{}'", module.title))?;

            let lessons = module.lessons.len();
            if lessons < policy.min_lessons || lessons > policy.max_lessons {
                return Err(InvalidOutput::LessonCount {
                    module: module.title.clone(),
                    count: lessons,
                    min: policy.min_lessons,
                    max: policy.max_lessons,
                });
            }

            module.lessons.sort_by_key(|lesson| lesson.order);
            for (position, lesson) in module.lessons.iter_mut().enumerate() {
                lesson.order = position as u32 + 1;
                require_text(
                    &lesson.title,
                    format!("Title of lesson {} in '{}'", lesson.order, module.title),
                )?;
                require_text(
                    &lesson.description,
                    format!("Description of lesson '{}'", lesson.title),
                )?;
            }
        }

        Ok(self)
    }
}
