//! Built-in dataset used when no collection has been persisted yet.

use crate::model::collection::Collection;
use crate::model::list::List;
use crate::model::todo::{Completion, Todo};

/// Builds the default collection shown on first launch.
///
/// Passed to the store as a factory, so every call returns a fresh value.
pub fn default_collection() -> Collection {
    let project = seeded_list(
        "l-1",
        "Checklist Progetto",
        &[
            ("t-1", "Inviare mail proposta progetto", Completion::Done),
            ("t-2", "Attendere Ack", Completion::Ongoing),
            ("t-3", "Sviluppare progetto", Completion::Ongoing),
            ("t-4", "Iscriversi ad un appello", Completion::Ongoing),
            (
                "t-5",
                "Rispondere correttamente all'esame",
                Completion::Ongoing,
            ),
            ("t-6", "Festeggiare", Completion::Ongoing),
        ],
    );
    let roadmap = seeded_list(
        "l-2",
        "Dev Roadmap",
        &[
            (
                "t-7",
                "Scegliere un linguaggio di progammazione",
                Completion::Done,
            ),
            ("t-8", "Imparare linguaggio", Completion::Done),
            (
                "t-9",
                "Sviluppare un progetto di esempio",
                Completion::Ongoing,
            ),
        ],
    );

    Collection::new(vec![project, roadmap])
}

fn seeded_list(id: &str, name: &str, todos: &[(&str, &str, Completion)]) -> List {
    List {
        todos: todos
            .iter()
            .map(|(todo_id, text, completed)| Todo::with_id(*todo_id, *text, *completed))
            .collect(),
        ..List::with_id(id, name)
    }
}
