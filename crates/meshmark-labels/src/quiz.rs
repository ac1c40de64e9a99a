//! Quizzes composed over a label set.

use meshmark_core::VertexId;
use meshmark_mesh::Point3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LabelError, LabelResult};
use crate::label::{Label, LabelId};
use crate::label_set::LabelSet;

/// One "find this label" question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Label the answer must fall inside
    pub label_id: LabelId,
    /// Text shown to the student
    pub prompt: String,
}

/// Ordered questions referring to labels of one set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    /// Quiz name
    pub name: String,
    /// Uuid of the label set the questions refer to, once it is saved
    pub label_set: Option<Uuid>,
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Create an empty quiz over `set`.
    #[must_use]
    pub fn new(name: impl Into<String>, set: &LabelSet) -> Self {
        Self {
            name: name.into(),
            label_set: set.uuid,
            questions: Vec::new(),
        }
    }

    /// One "Find the <name>" question per label, in creation order.
    #[must_use]
    pub fn from_labels(name: impl Into<String>, set: &LabelSet) -> Self {
        let mut quiz = Self::new(name, set);
        quiz.questions = set
            .labels()
            .iter()
            .map(|label| QuizQuestion {
                label_id: label.id(),
                prompt: format!("Find the {}", label.name),
            })
            .collect();
        quiz
    }

    /// Questions in order.
    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Append a question about a label of `set`.
    ///
    /// # Errors
    ///
    /// [`LabelError::LabelNotFound`] if `set` has no such label.
    pub fn add_question(&mut self, set: &LabelSet, label_id: LabelId, prompt: impl Into<String>) -> LabelResult<()> {
        if set.label(label_id).is_none() {
            return Err(LabelError::LabelNotFound(label_id));
        }
        self.questions.push(QuizQuestion {
            label_id,
            prompt: prompt.into(),
        });
        Ok(())
    }

    /// Check whether `vertex` answers question `index`.
    ///
    /// # Errors
    ///
    /// [`LabelError::QuestionOutOfRange`] or [`LabelError::LabelNotFound`]
    /// if the label has since been removed.
    pub fn check(&self, set: &LabelSet, index: usize, vertex: VertexId) -> LabelResult<bool> {
        Ok(self.target(set, index)?.contains_vertex(vertex))
    }

    /// Check whether `point` answers question `index` (point markers).
    ///
    /// # Errors
    ///
    /// As for [`Quiz::check`].
    pub fn check_point(&self, set: &LabelSet, index: usize, point: &Point3) -> LabelResult<bool> {
        Ok(self.target(set, index)?.contains_point(point))
    }

    fn target<'a>(&self, set: &'a LabelSet, index: usize) -> LabelResult<&'a Label> {
        let question = self.questions.get(index).ok_or(LabelError::QuestionOutOfRange {
            index,
            count: self.questions.len(),
        })?;
        set.label(question.label_id)
            .ok_or(LabelError::LabelNotFound(question.label_id))
    }
}
