//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Titles, authors and descriptions that satisfy every constraint
//! - Property-based testing strategies for valid and invalid payloads

use crate::fixtures::buy_milk_payload;
use fake::faker::lorem::en::{Sentence, Words};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use task_core::TaskPayload;

/// Generate a short task title (always at least 3 characters)
pub fn generate_title() -> String {
    let words: Vec<String> = Words(2..5).fake();
    words.join(" ")
}

/// Generate a realistic author name
pub fn generate_author() -> String {
    Name().fake()
}

/// Generate a description between 3 and 250 characters
pub fn generate_description() -> String {
    let sentence: String = Sentence(3..12).fake();
    sentence.chars().take(250).collect()
}

/// Generate a random priority in 1..=5
pub fn generate_priority() -> i32 {
    rand::thread_rng().gen_range(1..=5)
}

/// Generate a random valid payload
pub fn generate_payload() -> TaskPayload {
    TaskPayload {
        title: generate_title(),
        author: generate_author(),
        description: generate_description(),
        priority: generate_priority(),
        complete: rand::thread_rng().gen_bool(0.5),
    }
}

/// Generate `count` random valid payloads
pub fn generate_payloads(count: usize) -> Vec<TaskPayload> {
    (0..count).map(|_| generate_payload()).collect()
}

/// Property-based testing strategies
pub mod strategies {
    use super::*;

    /// Any payload that satisfies every field constraint
    pub fn valid_payload() -> impl Strategy<Value = TaskPayload> {
        (
            "[A-Za-z0-9][A-Za-z0-9 ]{2,40}",
            "[A-Za-z][A-Za-z .'-]{1,30}",
            "[A-Za-z0-9 .,%!?-]{3,250}",
            1..=5i32,
            any::<bool>(),
        )
            .prop_map(|(title, author, description, priority, complete)| TaskPayload {
                title,
                author,
                description,
                priority,
                complete,
            })
    }

    /// A payload breaking exactly one constraint, paired with that field's name
    pub fn invalid_payload() -> impl Strategy<Value = (&'static str, TaskPayload)> {
        prop_oneof![
            "[a-z]{0,2}".prop_map(|title| ("title", TaskPayload { title, ..buy_milk_payload() })),
            "[a-z]{0,1}".prop_map(|author| {
                ("author", TaskPayload { author, ..buy_milk_payload() })
            }),
            "[a-z]{0,2}".prop_map(|description| {
                ("description", TaskPayload { description, ..buy_milk_payload() })
            }),
            "[a-z]{251,300}".prop_map(|description| {
                ("description", TaskPayload { description, ..buy_milk_payload() })
            }),
            (i32::MIN..=0).prop_map(|priority| {
                ("priority", TaskPayload { priority, ..buy_milk_payload() })
            }),
            (6..=i32::MAX).prop_map(|priority| {
                ("priority", TaskPayload { priority, ..buy_milk_payload() })
            }),
        ]
    }

    /// Ids that must be rejected before any lookup
    pub fn non_positive_id() -> impl Strategy<Value = i64> {
        i64::MIN..=0
    }
}
