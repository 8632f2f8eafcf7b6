// Pure projection from session state to what the screen shows
//
// `ViewTree::project` takes a state snapshot and returns plain data: the
// header, the optional add form and the day sections. Drawing code only
// reads the tree, so everything about *what* is shown is testable without
// a terminal.

use crate::model::{TrainingId, TrainingType, Weekday};
use crate::session::{nonzero_counts, ViewState};

pub const TITLE: &str = "Meus Treinos";

/// Top of the screen: totals and per-type counts
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: &'static str,
    pub total: usize,
    /// Types with at least one record, in fixed type order
    pub counts: Vec<(TrainingType, usize)>,
    pub loading: bool,
}

/// The add form, present only while adding
#[derive(Debug, Clone, PartialEq)]
pub struct FormPanel {
    pub day: Option<Weekday>,
    pub kind: Option<TrainingType>,
    pub can_submit: bool,
}

/// One record line with its delete affordance
#[derive(Debug, Clone, PartialEq)]
pub struct RecordRow {
    pub id: TrainingId,
    pub kind: TrainingType,
    pub date: String,
}

/// A weekday and the records logged on it
#[derive(Debug, Clone, PartialEq)]
pub struct DaySection {
    pub day: Weekday,
    pub rows: Vec<RecordRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTree {
    pub header: Header,
    pub form: Option<FormPanel>,
    /// Non-empty days only, Sunday first
    pub sections: Vec<DaySection>,
}

impl ViewTree {
    pub fn project(state: &ViewState) -> Self {
        let counts = state.derived_counts();

        let header = Header {
            title: TITLE,
            total: state.records.len(),
            counts: nonzero_counts(&counts),
            loading: state.is_loading,
        };

        let form = state.is_adding_mode.then(|| FormPanel {
            day: state.selected_day,
            kind: state.selected_type,
            can_submit: state.can_submit(),
        });

        let sections = state
            .grouped_by_day()
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|group| DaySection {
                day: group.day,
                rows: group
                    .records
                    .into_iter()
                    .map(|record| RecordRow {
                        id: record.id,
                        kind: record.kind,
                        date: record.date.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            header,
            form,
            sections,
        }
    }

    /// All rows in display order (the record cursor walks these)
    pub fn rows(&self) -> impl Iterator<Item = &RecordRow> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|section| section.rows.len()).sum()
    }

    pub fn row_at(&self, index: usize) -> Option<&RecordRow> {
        self.rows().nth(index)
    }
}
