//! A loaded day's mounted cards.
//!
//! Loading a day always builds a fresh session, so every submission unit
//! starts idle. A failed load reports once on the error channel and leaves
//! the session empty.

use crate::card::{Card, ExerciseCard, LogTarget, PeriodizedCard};
use crate::feed::build_feed;
use crate::plan::PlanSource;
use crate::submission::{ExerciseLogger, Feedback, SubmitOutcome};
use crate::DayPlan;
use futures::future::LocalBoxFuture;

/// The card (or superset member) that logs a given exercise
#[derive(Debug)]
pub enum Loggable<'s> {
    Manual(&'s ExerciseCard),
    Auto(&'s PeriodizedCard),
}

impl<'s> Loggable<'s> {
    pub fn submit<'a, L, F>(&self, logger: &'a L, feedback: &'a F) -> LocalBoxFuture<'a, SubmitOutcome>
    where
        L: ExerciseLogger + 'a,
        F: Feedback + 'a,
    {
        match self {
            Loggable::Manual(card) => card.submit(logger, feedback),
            Loggable::Auto(card) => card.submit(logger, feedback),
        }
    }
}

/// Cards mounted for one day, in feed order
#[derive(Debug)]
pub struct DaySession {
    day: u32,
    week: Option<u32>,
    cards: Vec<Card>,
}

impl DaySession {
    /// Mount every unit of a loaded day
    pub fn mount(plan: DayPlan) -> Self {
        let target = LogTarget {
            week: plan.week,
            day: plan.day,
        };
        let cards = build_feed(&plan.exercises)
            .into_iter()
            .map(|unit| Card::mount(unit, target))
            .collect();

        Self {
            day: plan.day,
            week: Some(plan.week),
            cards,
        }
    }

    /// Session with nothing to show, after a failed load
    pub fn empty(day: u32) -> Self {
        Self {
            day,
            week: None,
            cards: Vec::new(),
        }
    }

    /// Load a day from `source` and mount it
    pub async fn load<S, F>(source: &S, day: u32, feedback: &F) -> Self
    where
        S: PlanSource,
        F: Feedback,
    {
        match source.load_day(day).await {
            Ok(plan) => Self::mount(plan),
            Err(err) => {
                tracing::debug!("Failed to load day {}: {}", day, err);
                feedback.on_error(&err.message);
                Self::empty(day)
            }
        }
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn week(&self) -> Option<u32> {
        self.week
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Find the loggable card for an exercise, looking inside supersets
    pub fn find(&self, exercise: &str) -> Option<Loggable<'_>> {
        self.cards.iter().find_map(|card| match card {
            Card::Standalone(c) if c.name() == exercise => Some(Loggable::Manual(c)),
            Card::Periodized(c) if c.name() == exercise => Some(Loggable::Auto(c)),
            Card::Superset(superset) => superset
                .members()
                .iter()
                .find(|member| member.name() == exercise)
                .map(Loggable::Manual),
            _ => None,
        })
    }

    /// Mutable access to a manually logged exercise, for editing its inputs
    pub fn find_manual_mut(&mut self, exercise: &str) -> Option<&mut ExerciseCard> {
        self.cards.iter_mut().find_map(|card| match card {
            Card::Standalone(c) if c.name() == exercise => Some(c),
            Card::Superset(superset) => {
                let index = superset
                    .members()
                    .iter()
                    .position(|member| member.name() == exercise)?;
                superset.member_mut(index)
            }
            _ => None,
        })
    }
}
